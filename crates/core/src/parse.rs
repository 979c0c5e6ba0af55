//! HTML parsing and element queries.
//!
//! This module provides the [`Document`] and [`Element`] types the audit
//! checks run against. Queries are CSS selectors, so "by tag name" is just
//! `"h1"` and "by attribute presence" is `"[href]"`.
//!
//! # Example
//!
//! ```rust
//! use seoaudit_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <a href="/docs">Docs</a>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let headings = doc.select("h1").unwrap();
//! assert_eq!(headings.len(), 1);
//! ```

use scraper::{Html, Selector};
use url::Url;

use crate::{AuditError, Result};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors. It never changes after parsing.
///
/// # Example
///
/// ```rust
/// use seoaudit_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// let title = doc.select_first("title").unwrap().unwrap();
/// assert_eq!(title.text(), "Test");
/// ```
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Malformed markup is recovered the way browsers do, so this only fails
    /// for reasons outside the markup itself.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html, base_url: None })
    }

    /// Parses HTML and remembers the URL it was fetched from.
    ///
    /// The base URL is what relative links are resolved against.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidUrl`] if `base_url` cannot be parsed.
    pub fn parse_with_url(html: &str, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| AuditError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let html = Html::parse_document(html);
        Ok(Self { html, base_url: Some(base_url) })
    }

    /// Gets the base URL the document was parsed with.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use seoaudit_core::parse::Document;
    ///
    /// let html = r#"<img src="a.png" alt=""><img src="b.png">"#;
    /// let doc = Document::parse(html).unwrap();
    /// assert_eq!(doc.select("img").unwrap().len(), 2);
    /// assert_eq!(doc.select("img[alt]").unwrap().len(), 1);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Every element carrying `attribute`, whatever its tag.
    pub fn elements_with_attr(&'_ self, attribute: &str) -> Result<Vec<Element<'_>>> {
        self.select(&format!("[{}]", attribute))
    }

    /// Gets the prose of the page: paragraph texts joined by blank lines.
    ///
    /// Used for scoring page readability without navigation or script noise.
    pub fn readable_text(&self) -> String {
        let Ok(paragraphs) = self.select("p") else {
            return String::new();
        };

        paragraphs
            .iter()
            .map(|p| p.text().split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A wrapper around scraper's ElementRef.
///
/// Element represents a single node in the HTML document tree and provides
/// methods for accessing its attributes and text content.
///
/// # Example
///
/// ```rust
/// use seoaudit_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the outer HTML of this element.
    ///
    /// Returns the HTML content including this element's own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Returns `true` if the attribute is present, even with an empty value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Gets the lowercase tag name (e.g., "div", "a", "span").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AuditError::HtmlParseError(format!("Invalid selector: {}", e)))
}
