//! Image alt text check.

use crate::parse::Document;
use crate::{CheckResult, Evidence, Result};

/// Checks every `<img>` for an `alt` attribute, one result per image.
///
/// An empty `alt=""` counts as present: it is how decorative images are
/// marked.
pub fn check_img_alt(doc: &Document) -> Result<Vec<CheckResult>> {
    let images = doc.select("img")?;
    tracing::debug!(count = images.len(), "checking image alt attributes");

    Ok(images
        .iter()
        .map(|img| {
            let evidence = Evidence::Element(img.outer_html());
            if img.has_attr("alt") {
                CheckResult::good("has alt attributes", evidence)
            } else {
                CheckResult::bad("has no alt attributes", evidence)
            }
        })
        .collect())
}
