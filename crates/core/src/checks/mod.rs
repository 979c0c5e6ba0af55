//! On-page SEO checks.
//!
//! Every check is an independent function over a parsed [`Document`](crate::Document)
//! that produces one or more [`CheckResult`](crate::CheckResult)s. None of
//! them mutate the document, and they can run in any order.

pub mod headings;
pub mod images;
pub mod links;
pub mod meta;

pub use headings::{check_h1, check_heading_order};
pub use images::check_img_alt;
#[cfg(feature = "fetch")]
pub use links::{LinkChecker, check_hrefs};
pub use links::{collect_hrefs, resolve_link};
pub use meta::{META_DESCRIPTION_LENGTH, TITLE_LENGTH, check_meta_description, check_title};
