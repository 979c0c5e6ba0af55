//! Heading structure checks.

use crate::parse::{Document, Element};
use crate::{CheckResult, Evidence, Result};

const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

/// Checks that the page has exactly one `<h1>`.
///
/// # Example
///
/// ```rust
/// use seoaudit_core::{Document, Status, check_h1};
///
/// let doc = Document::parse("<h1>Only one</h1><h2>Sub</h2>").unwrap();
/// assert_eq!(check_h1(&doc).unwrap().status(), Status::Good);
/// ```
pub fn check_h1(doc: &Document) -> Result<CheckResult> {
    let h1 = doc.select("h1")?;
    let evidence = outer_html_list(&h1);
    tracing::debug!(count = h1.len(), "checked h1");

    if h1.len() == 1 {
        Ok(CheckResult::good("h1 used once", evidence))
    } else {
        Ok(CheckResult::bad("h1 is not exist or more than one", evidence))
    }
}

/// Checks that headings never skip a level on the way down.
///
/// `h2` followed by `h4` is a skip; going back up (`h4` then `h2`) is fine.
/// A page without any heading is BAD.
pub fn check_heading_order(doc: &Document) -> Result<CheckResult> {
    let headings = doc.select(HEADINGS)?;
    let evidence = outer_html_list(&headings);

    if headings.is_empty() {
        return Ok(CheckResult::bad("no headings found", evidence));
    }

    let levels: Vec<usize> = headings.iter().filter_map(heading_level).collect();

    let skip = levels.windows(2).find(|pair| pair[1] > pair[0] + 1);

    match skip {
        Some(pair) => Ok(CheckResult::bad(
            format!("heading level skipped: h{} followed by h{}", pair[0], pair[1]),
            evidence,
        )),
        None => Ok(CheckResult::good("heading levels are sequential", evidence)),
    }
}

fn heading_level(element: &Element<'_>) -> Option<usize> {
    element.tag_name().strip_prefix('h')?.parse().ok()
}

fn outer_html_list(elements: &[Element<'_>]) -> Evidence {
    Evidence::Elements(elements.iter().map(Element::outer_html).collect())
}
