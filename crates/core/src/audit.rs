//! Running a selection of checks over one page.
//!
//! The [`Auditor`] is the main entry point. It runs every check named in its
//! [`AuditConfig`] and collects the outcomes into an [`AuditReport`] in check
//! order. A failing check is recorded in the report and never stops the
//! others.
//!
//! # Example
//!
//! ```rust
//! use seoaudit_core::{AuditConfig, Auditor, CheckKind};
//!
//! let config = AuditConfig::builder()
//!     .checks([CheckKind::H1, CheckKind::Images])
//!     .build();
//!
//! let html = r#"<html><body><h1>Hello</h1><img src="a.png"></body></html>"#;
//! let report = Auditor::with_config(config).audit_html(html, None).unwrap();
//!
//! assert_eq!(report.entries.len(), 2);
//! assert_eq!(report.summary().bad, 1);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
#[cfg(feature = "fetch")]
use url::Url;

#[cfg(feature = "fetch")]
use crate::checks::LinkChecker;
use crate::checks::{check_h1, check_heading_order, check_img_alt, check_meta_description, check_title, collect_hrefs};
use crate::fetch::FetchConfig;
#[cfg(feature = "fetch")]
use crate::fetch::fetch_url;
use crate::parse::Document;
use crate::readability::{DEFAULT_LANGUAGE, check_readability};
use crate::report::{AuditReport, ReportEntry};
use crate::text::builtin_registry;
use crate::{AuditError, Result};

/// The checks an audit can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    H1,
    Headings,
    Images,
    Meta,
    Title,
    Links,
}

impl CheckKind {
    /// Every check, in default run order.
    pub const ALL: [CheckKind; 6] = [
        CheckKind::H1,
        CheckKind::Headings,
        CheckKind::Images,
        CheckKind::Meta,
        CheckKind::Title,
        CheckKind::Links,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::H1 => "h1",
            CheckKind::Headings => "headings",
            CheckKind::Images => "images",
            CheckKind::Meta => "meta",
            CheckKind::Title => "title",
            CheckKind::Links => "links",
        }
    }

    /// `true` for checks that make network requests.
    pub fn needs_network(&self) -> bool {
        matches!(self, CheckKind::Links)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h1" => Ok(CheckKind::H1),
            "headings" | "heading" => Ok(CheckKind::Headings),
            "img" | "images" => Ok(CheckKind::Images),
            "meta" => Ok(CheckKind::Meta),
            "title" => Ok(CheckKind::Title),
            "links" | "href" => Ok(CheckKind::Links),
            _ => Err(format!(
                "Invalid check: {}. Valid options: h1, headings, images, meta, title, links",
                s
            )),
        }
    }
}

/// Configuration for an [`Auditor`].
///
/// # Example
///
/// ```rust
/// use seoaudit_core::{AuditConfig, CheckKind};
///
/// let config = AuditConfig::builder()
///     .timeout(10)
///     .max_concurrency(4)
///     .language("id_ID")
///     .readability(true)
///     .checks([CheckKind::Links, CheckKind::Title])
///     .build();
///
/// assert_eq!(config.fetch.timeout, 10);
/// assert_eq!(config.checks, vec![CheckKind::Links, CheckKind::Title]);
/// ```
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// HTTP settings for fetching the page and checking links.
    pub fetch: FetchConfig,

    /// Language code used for the readability score (default: en_US).
    pub language: String,

    /// Checks to run, in order (default: all).
    pub checks: Vec<CheckKind>,

    /// Whether to score the readability of the page prose (default: false).
    pub readability: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            checks: CheckKind::ALL.to_vec(),
            readability: false,
        }
    }
}

impl AuditConfig {
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::new()
    }
}

/// Builder for [`AuditConfig`].
pub struct AuditConfigBuilder {
    config: AuditConfig,
}

impl AuditConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AuditConfig::default() }
    }

    /// Sets the per-request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.fetch.timeout = seconds;
        self
    }

    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets how many link checks may be in flight at once.
    pub fn max_concurrency(mut self, value: usize) -> Self {
        self.config.fetch.max_concurrency = value;
        self
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.config.language = code.into();
        self
    }

    /// Replaces the check selection. Duplicates are dropped, first occurrence wins.
    pub fn checks(mut self, checks: impl IntoIterator<Item = CheckKind>) -> Self {
        let mut selected = Vec::new();
        for check in checks {
            if !selected.contains(&check) {
                selected.push(check);
            }
        }
        self.config.checks = selected;
        self
    }

    pub fn readability(mut self, value: bool) -> Self {
        self.config.readability = value;
        self
    }

    pub fn build(self) -> AuditConfig {
        self.config
    }
}

impl Default for AuditConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the configured checks over pages.
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    config: AuditConfig,
}

/// Offline work finished; link checks still outstanding.
struct PendingAudit {
    slots: Vec<Slot>,
    source_url: Option<String>,
    readability: Option<f64>,
}

enum Slot {
    Done(Vec<ReportEntry>),
    #[cfg_attr(not(feature = "fetch"), allow(dead_code))]
    Links(Vec<String>),
}

impl Auditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audits an HTML string without touching the network.
    ///
    /// Link checks are skipped; use [`Auditor::audit_page`] to include them.
    /// `base_url` is recorded as the report source.
    ///
    /// # Errors
    ///
    /// - [`AuditError::InvalidUrl`] if `base_url` does not parse.
    /// - [`AuditError::UnsupportedLanguage`] if readability is requested for an unknown language.
    pub fn audit_html(&self, html: &str, base_url: Option<&str>) -> Result<AuditReport> {
        let doc = parse_document(html, base_url)?;
        let pending = self.prepare(&doc)?;

        let mut report = AuditReport {
            source_url: pending.source_url,
            entries: Vec::new(),
            readability: pending.readability,
        };
        for slot in pending.slots {
            match slot {
                Slot::Done(entries) => report.entries.extend(entries),
                Slot::Links(_) => tracing::debug!("skipping link check in offline audit"),
            }
        }

        Ok(report)
    }

    /// Audits an HTML string, running every selected check including links.
    #[cfg(feature = "fetch")]
    pub async fn audit_page(&self, html: &str, base_url: Option<&str>) -> Result<AuditReport> {
        let pending = {
            let doc = parse_document(html, base_url)?;
            self.prepare(&doc)?
        };
        Ok(self.finish(pending).await)
    }

    /// Audits an already parsed document, running every selected check.
    ///
    /// Everything that reads the document runs before this returns, so the
    /// future only borrows the auditor.
    #[cfg(feature = "fetch")]
    pub fn audit_document<'a>(&'a self, doc: &Document) -> Result<impl Future<Output = AuditReport> + use<'a>> {
        let pending = self.prepare(doc)?;
        Ok(self.finish(pending))
    }

    /// Fetches `url` and audits the page.
    ///
    /// # Errors
    ///
    /// Fails only when the page itself cannot be fetched or parsed. Broken
    /// links on the page are BAD entries, and transport failures on them are
    /// failed entries in the report.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_audit(&self, url: &str) -> Result<AuditReport> {
        let html = fetch_url(url, &self.config.fetch).await?;
        self.audit_page(&html, Some(url)).await
    }

    fn prepare(&self, doc: &Document) -> Result<PendingAudit> {
        if self.config.readability {
            builtin_registry().resolve(&self.config.language)?;
        }

        let slots = self
            .config
            .checks
            .iter()
            .map(|check| self.run_offline(*check, doc))
            .collect();

        let readability = if self.config.readability { self.page_readability(doc) } else { None };

        Ok(PendingAudit { slots, source_url: doc.base_url().map(|url| url.to_string()), readability })
    }

    fn run_offline(&self, check: CheckKind, doc: &Document) -> Slot {
        tracing::debug!(%check, "running check");

        match check {
            CheckKind::H1 => Slot::Done(vec![ReportEntry::from_result(check, check_h1(doc))]),
            CheckKind::Headings => Slot::Done(vec![ReportEntry::from_result(check, check_heading_order(doc))]),
            CheckKind::Meta => Slot::Done(vec![ReportEntry::from_result(check, check_meta_description(doc))]),
            CheckKind::Title => Slot::Done(vec![ReportEntry::from_result(check, check_title(doc))]),
            CheckKind::Images => match check_img_alt(doc) {
                Ok(results) => Slot::Done(results.into_iter().map(|r| ReportEntry::checked(check, r)).collect()),
                Err(e) => Slot::Done(vec![ReportEntry::failed(check, &e)]),
            },
            CheckKind::Links => match collect_hrefs(doc) {
                Ok(hrefs) => Slot::Links(hrefs),
                Err(e) => Slot::Done(vec![ReportEntry::failed(check, &e)]),
            },
        }
    }

    fn page_readability(&self, doc: &Document) -> Option<f64> {
        let text = doc.readable_text();
        match check_readability(&text, &self.config.language) {
            Ok(score) => Some(score),
            Err(AuditError::EmptyInput) => {
                tracing::debug!("page has no prose to score");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "readability scoring failed");
                None
            }
        }
    }

    #[cfg(feature = "fetch")]
    async fn finish(&self, pending: PendingAudit) -> AuditReport {
        let parent = pending.source_url.as_deref().and_then(|url| Url::parse(url).ok());
        let mut checker: Option<LinkChecker> = None;
        let mut entries = Vec::new();

        for slot in pending.slots {
            match slot {
                Slot::Done(done) => entries.extend(done),
                Slot::Links(hrefs) => {
                    if checker.is_none() {
                        match LinkChecker::new(self.config.fetch.clone()) {
                            Ok(built) => checker = Some(built),
                            Err(e) => {
                                entries.push(ReportEntry::failed(CheckKind::Links, &e));
                                continue;
                            }
                        }
                    }

                    if let Some(checker) = &checker {
                        let results = checker.check_all(hrefs, parent.as_ref()).await;
                        entries.extend(
                            results
                                .into_iter()
                                .map(|result| ReportEntry::from_result(CheckKind::Links, result)),
                        );
                    }
                }
            }
        }

        AuditReport { source_url: pending.source_url, entries, readability: pending.readability }
    }
}

fn parse_document(html: &str, base_url: Option<&str>) -> Result<Document> {
    match base_url {
        Some(url) => Document::parse_with_url(html, url),
        None => Document::parse(html),
    }
}
