//! Meta description and title length checks.
//!
//! Lengths are counted in characters, not bytes.

use std::ops::RangeInclusive;

use crate::parse::Document;
use crate::{AuditError, CheckResult, Evidence, Result};

/// Recommended meta description length, in characters.
pub const META_DESCRIPTION_LENGTH: RangeInclusive<usize> = 130..=160;

/// Recommended title length, in characters.
pub const TITLE_LENGTH: RangeInclusive<usize> = 50..=60;

/// Checks the length of `<meta name="description">`.
///
/// A missing description is a BAD result with empty evidence, not an error.
/// A description without a `content` attribute is treated as empty.
///
/// # Example
///
/// ```rust
/// use seoaudit_core::{Document, Evidence, Status, check_meta_description};
///
/// let doc = Document::parse("<head><title>x</title></head>").unwrap();
/// let result = check_meta_description(&doc).unwrap();
/// assert_eq!(result.status(), Status::Bad);
/// assert_eq!(result.evidence(), &Evidence::Text(String::new()));
/// ```
pub fn check_meta_description(doc: &Document) -> Result<CheckResult> {
    let Some(meta) = doc.select_first(r#"meta[name="description"]"#)? else {
        return Ok(CheckResult::bad("the meta description doesn't exist", Evidence::Text(String::new())));
    };

    let content = meta.attr("content").unwrap_or_default().to_string();
    let length = content.chars().count();
    tracing::debug!(length, "checked meta description");

    if META_DESCRIPTION_LENGTH.contains(&length) {
        Ok(CheckResult::good(
            "the meta description length is between 130 and 160",
            Evidence::Text(content),
        ))
    } else {
        Ok(CheckResult::bad(
            "the meta description recommended length is 130-160",
            Evidence::Text(content),
        ))
    }
}

/// Checks the length of the `<title>` text.
///
/// # Errors
///
/// Returns [`AuditError::MissingElement`] when the page has no `<title>`.
pub fn check_title(doc: &Document) -> Result<CheckResult> {
    let title = doc
        .select_first("title")?
        .ok_or_else(|| AuditError::MissingElement("title".to_string()))?;

    let length = title.text().chars().count();
    let evidence = Evidence::Element(title.outer_html());
    tracing::debug!(length, "checked title");

    if TITLE_LENGTH.contains(&length) {
        Ok(CheckResult::good("title length between 50-60", evidence))
    } else {
        Ok(CheckResult::bad("title length not between 50-60", evidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;
    use rstest::rstest;

    fn meta_page(length: usize) -> String {
        format!(r#"<head><meta name="description" content="{}"></head>"#, "a".repeat(length))
    }

    fn title_page(length: usize) -> String {
        format!("<head><title>{}</title></head>", "t".repeat(length))
    }

    #[rstest]
    #[case(100, Status::Bad)]
    #[case(129, Status::Bad)]
    #[case(130, Status::Good)]
    #[case(145, Status::Good)]
    #[case(160, Status::Good)]
    #[case(161, Status::Bad)]
    fn test_meta_description_length(#[case] length: usize, #[case] expected: Status) {
        let doc = Document::parse(&meta_page(length)).unwrap();
        let result = check_meta_description(&doc).unwrap();

        assert_eq!(result.status(), expected);
        assert_eq!(result.evidence(), &Evidence::Text("a".repeat(length)));
    }

    #[test]
    fn test_meta_description_missing() {
        let doc = Document::parse("<head><title>No meta</title></head>").unwrap();
        let result = check_meta_description(&doc).unwrap();

        assert_eq!(result.status(), Status::Bad);
        assert_eq!(result.description(), "the meta description doesn't exist");
        assert!(result.evidence().is_empty());
    }

    #[test]
    fn test_meta_description_without_content() {
        let doc = Document::parse(r#"<meta name="description">"#).unwrap();
        let result = check_meta_description(&doc).unwrap();

        assert_eq!(result.status(), Status::Bad);
        assert_eq!(result.evidence(), &Evidence::Text(String::new()));
    }

    #[test]
    fn test_meta_description_counts_characters() {
        let content = "é".repeat(140);
        let html = format!(r#"<meta name="description" content="{}">"#, content);
        let doc = Document::parse(&html).unwrap();

        assert_eq!(check_meta_description(&doc).unwrap().status(), Status::Good);
    }

    #[test]
    fn test_first_description_wins() {
        let html = format!(
            r#"<meta name="description" content="short"><meta name="description" content="{}">"#,
            "a".repeat(145)
        );
        let doc = Document::parse(&html).unwrap();
        assert_eq!(check_meta_description(&doc).unwrap().status(), Status::Bad);
    }

    #[rstest]
    #[case(49, Status::Bad)]
    #[case(50, Status::Good)]
    #[case(55, Status::Good)]
    #[case(60, Status::Good)]
    #[case(61, Status::Bad)]
    fn test_title_length(#[case] length: usize, #[case] expected: Status) {
        let doc = Document::parse(&title_page(length)).unwrap();
        let result = check_title(&doc).unwrap();

        assert_eq!(result.status(), expected);
        assert!(matches!(result.evidence(), Evidence::Element(html) if html.starts_with("<title>")));
    }

    #[test]
    fn test_title_missing_is_an_error() {
        let doc = Document::parse("<body><h1>No title</h1></body>").unwrap();
        let result = check_title(&doc);

        assert!(matches!(result, Err(AuditError::MissingElement(name)) if name == "title"));
    }
}
