pub mod audit;
pub mod check;
pub mod checks;
pub mod error;
pub mod fetch;
pub mod parse;
pub mod readability;
pub mod report;
pub mod sitemap;
pub mod text;

pub use audit::{AuditConfig, AuditConfigBuilder, Auditor, CheckKind};
pub use check::{CheckResult, Evidence, Status};
pub use checks::{
    META_DESCRIPTION_LENGTH, TITLE_LENGTH, check_h1, check_heading_order, check_img_alt, check_meta_description,
    check_title, collect_hrefs, resolve_link,
};
#[cfg(feature = "fetch")]
pub use checks::{LinkChecker, check_hrefs};
pub use error::{AuditError, Result};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin};
pub use parse::{Document, Element};
pub use readability::{
    DEFAULT_LANGUAGE, ReadingEase, TextMetrics, check_readability, check_readability_with, text_metrics,
    text_metrics_with,
};
pub use report::{AuditReport, Outcome, ReportEntry, Summary};
pub use sitemap::{
    ChangeFrequency, SITEMAP_NAMESPACE, SitemapEntry, load_entries, match_frequency, render_sitemap,
    render_sitemap_on, validate_date, validate_date_or, write_sitemap,
};
pub use text::{count_sentences, count_syllables, count_words, tokenize_sentences, tokenize_words};
