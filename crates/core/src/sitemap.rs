//! Sitemap entries and XML serialization.
//!
//! Entries are validated and normalized on the way out: an out-of-range
//! priority is dropped, an unparsable `lastmod` becomes today's date, and an
//! unset change frequency is omitted. Only an empty or non-absolute `loc`
//! rejects the whole sitemap.
//!
//! # Example
//!
//! ```rust
//! use seoaudit_core::{ChangeFrequency, SitemapEntry, render_sitemap};
//!
//! let entries = vec![
//!     SitemapEntry::new("https://example.com/")
//!         .lastmod("2023-04-10")
//!         .changefreq(ChangeFrequency::Daily)
//!         .priority(0.8),
//! ];
//!
//! let xml = render_sitemap(&entries).unwrap();
//! assert!(xml.starts_with("<?xml version=\"1.0\" ?>\n<urlset"));
//! assert!(xml.contains("    <priority>0.8</priority>\n"));
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use url::Url;

use crate::{AuditError, Result};

static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// Namespace of the sitemaps.org protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" ?>"#;

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// The token used in sitemap XML.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(format!(
                "Invalid change frequency: {}. Valid options: always, hourly, daily, weekly, monthly, yearly, never",
                s
            )),
        }
    }
}

/// One page record of a sitemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    /// Absolute URL of the page.
    pub loc: String,
    /// Last modification date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
    /// Unrecognized tokens deserialize to `None`.
    #[serde(default, deserialize_with = "lenient_frequency", skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

impl SitemapEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self { loc: loc.into(), lastmod: None, changefreq: None, priority: None }
    }

    pub fn lastmod(mut self, value: impl Into<String>) -> Self {
        self.lastmod = Some(value.into());
        self
    }

    pub fn changefreq(mut self, value: ChangeFrequency) -> Self {
        self.changefreq = Some(value);
        self
    }

    pub fn priority(mut self, value: f64) -> Self {
        self.priority = Some(value);
        self
    }

    /// Rejects entries whose `loc` is empty or not an absolute URL.
    pub fn validate(&self) -> Result<()> {
        let loc = self.loc.trim();
        if loc.is_empty() {
            return Err(AuditError::InvalidEntry("loc must not be empty".to_string()));
        }

        Url::parse(loc).map_err(|e| AuditError::InvalidEntry(format!("loc '{}' is not an absolute URL: {}", loc, e)))?;
        Ok(())
    }

    /// The priority that will be written, if any.
    ///
    /// Values outside `[0.0, 1.0]` (and NaN) are dropped. Negative zero is
    /// written as `0.0`.
    pub fn emitted_priority(&self) -> Option<f64> {
        self.priority.filter(|p| (0.0..=1.0).contains(p)).map(f64::abs)
    }
}

fn lenient_frequency<'de, D>(deserializer: D) -> std::result::Result<Option<ChangeFrequency>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|token| token.parse().ok()))
}

/// Maps a change frequency to its XML token, or `""` when unset.
pub fn match_frequency(freq: Option<ChangeFrequency>) -> &'static str {
    freq.map(|f| f.as_str()).unwrap_or("")
}

/// Returns `value` if it is a valid `YYYY-MM-DD` date, today's date otherwise.
///
/// Invalid dates are replaced rather than rejected. The year must be exactly
/// four unsigned digits.
pub fn validate_date(value: &str) -> String {
    validate_date_or(value, today())
}

/// Same as [`validate_date`] with an explicit "today".
pub fn validate_date_or(value: &str, today: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");

    if !DATE_SHAPE.is_match(value) {
        tracing::warn!(value, "lastmod is not YYYY-MM-DD, using today's date");
        return today.to_string();
    }

    match Date::parse(value, format) {
        Ok(_) => value.to_string(),
        Err(e) => {
            tracing::warn!(value, error = %e, "invalid lastmod, using today's date");
            today.to_string()
        }
    }
}

fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Renders entries as a sitemap XML document.
///
/// # Errors
///
/// Returns [`AuditError::InvalidEntry`] if any entry fails validation; no
/// output is produced in that case.
pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String> {
    render_sitemap_on(entries, today())
}

/// Renders entries, using `today` to replace invalid `lastmod` values.
pub fn render_sitemap_on(entries: &[SitemapEntry], today: Date) -> Result<String> {
    for (index, entry) in entries.iter().enumerate() {
        entry.validate().map_err(|e| match e {
            AuditError::InvalidEntry(reason) => AuditError::InvalidEntry(format!("entry {}: {}", index, reason)),
            other => other,
        })?;
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
        ))
        .map_err(xml_error)?;

    for entry in entries {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(xml_error)?;

        write_text_element(&mut writer, "loc", entry.loc.trim())?;

        if let Some(lastmod) = &entry.lastmod {
            write_text_element(&mut writer, "lastmod", &validate_date_or(lastmod, today))?;
        }

        let changefreq = match_frequency(entry.changefreq);
        if !changefreq.is_empty() {
            write_text_element(&mut writer, "changefreq", changefreq)?;
        }

        match entry.emitted_priority() {
            Some(priority) => write_text_element(&mut writer, "priority", &format!("{:.1}", priority))?,
            None => {
                if let Some(dropped) = entry.priority {
                    tracing::warn!(loc = %entry.loc, priority = dropped, "priority outside 0.0-1.0 omitted");
                }
            }
        }

        writer
            .write_event(Event::End(BytesEnd::new("url")))
            .map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(xml_error)?;

    let body = String::from_utf8(writer.into_inner()).map_err(|e| AuditError::Serialization(e.to_string()))?;

    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}

/// Renders entries and writes the document to `path`, replacing any existing file.
pub fn write_sitemap(entries: &[SitemapEntry], path: impl AsRef<Path>) -> Result<()> {
    let xml = render_sitemap(entries)?;
    fs::write(path.as_ref(), xml)?;
    tracing::debug!(path = %path.as_ref().display(), entries = entries.len(), "wrote sitemap");
    Ok(())
}

/// Parses a JSON array of entries.
///
/// ```rust
/// use seoaudit_core::load_entries;
///
/// let entries = load_entries(r#"[{"loc": "https://example.com/", "changefreq": "sometimes"}]"#).unwrap();
/// assert_eq!(entries[0].changefreq, None);
/// ```
pub fn load_entries(json: &str) -> Result<Vec<SitemapEntry>> {
    Ok(serde_json::from_str(json)?)
}

fn write_text_element<W: std::io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::from_escaped(partial_escape(text)))
        .map_err(xml_error)?;
    Ok(())
}

fn xml_error(err: impl fmt::Display) -> AuditError {
    AuditError::Serialization(format!("XML writer: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 10 - 19);

    #[test]
    fn test_full_document_layout() {
        let entries = vec![
            SitemapEntry::new("https://example.com/")
                .lastmod("2023-04-10")
                .changefreq(ChangeFrequency::Daily)
                .priority(0.8),
            SitemapEntry::new("https://example.com/about"),
        ];

        let xml = render_sitemap_on(&entries, TODAY).unwrap();
        let expected = concat!(
            "<?xml version=\"1.0\" ?>\n",
            "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
            "  <url>\n",
            "    <loc>https://example.com/</loc>\n",
            "    <lastmod>2023-04-10</lastmod>\n",
            "    <changefreq>daily</changefreq>\n",
            "    <priority>0.8</priority>\n",
            "  </url>\n",
            "  <url>\n",
            "    <loc>https://example.com/about</loc>\n",
            "  </url>\n",
            "</urlset>\n",
        );

        assert_eq!(xml, expected);
    }

    #[test]
    fn test_out_of_range_priority_is_omitted() {
        let entries = vec![
            SitemapEntry::new("https://example.com/")
                .priority(2.3)
                .lastmod("2023-04-10")
                .changefreq(ChangeFrequency::Hourly),
        ];

        let xml = render_sitemap_on(&entries, TODAY).unwrap();
        assert!(!xml.contains("<priority>"));
        assert!(xml.contains("<lastmod>2023-04-10</lastmod>"));
        assert!(xml.contains("<changefreq>hourly</changefreq>"));
    }

    #[test]
    fn test_priority_bounds() {
        assert_eq!(SitemapEntry::new("https://a.example/").priority(0.0).emitted_priority(), Some(0.0));
        assert_eq!(SitemapEntry::new("https://a.example/").priority(1.0).emitted_priority(), Some(1.0));
        assert_eq!(SitemapEntry::new("https://a.example/").priority(-0.1).emitted_priority(), None);
        assert_eq!(SitemapEntry::new("https://a.example/").priority(f64::NAN).emitted_priority(), None);
    }

    #[test]
    fn test_priority_one_decimal_place() {
        let entries = vec![
            SitemapEntry::new("https://example.com/").priority(0.84),
            SitemapEntry::new("https://example.com/b").priority(1.0),
            SitemapEntry::new("https://example.com/c").priority(0.66),
        ];
        let xml = render_sitemap_on(&entries, TODAY).unwrap();
        let priorities: Vec<&str> = xml
            .lines()
            .filter_map(|line| line.trim().strip_prefix("<priority>"))
            .filter_map(|line| line.strip_suffix("</priority>"))
            .collect();

        assert_eq!(priorities, vec!["0.8", "1.0", "0.7"]);
    }

    #[test]
    fn test_negative_zero_priority() {
        let entry = SitemapEntry::new("https://example.com/").priority(-0.0);
        assert!(entry.emitted_priority().unwrap().is_sign_positive());

        let xml = render_sitemap_on(&[entry], TODAY).unwrap();
        assert!(xml.contains("<priority>0.0</priority>"));
        assert!(!xml.contains("-0.0"));
    }

    #[test]
    fn test_invalid_lastmod_becomes_today() {
        let entries = vec![SitemapEntry::new("https://example.com/").lastmod("not-a-date")];
        let xml = render_sitemap_on(&entries, TODAY).unwrap();

        assert!(xml.contains("<lastmod>2026-10-19</lastmod>"));
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(validate_date_or("2023-04-10", TODAY), "2023-04-10");
        assert_eq!(validate_date_or("2023-4-10", TODAY), "2026-10-19");
        assert_eq!(validate_date_or("2023-02-30", TODAY), "2026-10-19");
        assert_eq!(validate_date_or("2023-04-10T12:00", TODAY), "2026-10-19");
        assert_eq!(validate_date_or("", TODAY), "2026-10-19");
        assert_eq!(validate_date_or("+2023-04-10", TODAY), "2026-10-19");
        assert_eq!(validate_date_or("-2023-04-10", TODAY), "2026-10-19");
        assert_eq!(validate_date_or("02023-04-10", TODAY), "2026-10-19");
    }

    #[test]
    fn test_signed_year_lastmod_is_replaced() {
        let entries = vec![SitemapEntry::new("https://example.com/").lastmod("+2023-04-10")];
        let xml = render_sitemap_on(&entries, TODAY).unwrap();

        assert!(xml.contains("<lastmod>2026-10-19</lastmod>"));
        assert!(!xml.contains("+2023"));
    }

    #[test]
    fn test_validate_date_uses_current_date() {
        let replaced = validate_date("garbage");
        assert_eq!(replaced.len(), 10);
        assert_eq!(validate_date_or(&replaced, TODAY), replaced);
    }

    #[test]
    fn test_match_frequency() {
        assert_eq!(match_frequency(Some(ChangeFrequency::Weekly)), "weekly");
        assert_eq!(match_frequency(Some(ChangeFrequency::Never)), "never");
        assert_eq!(match_frequency(None), "");
    }

    #[test]
    fn test_change_frequency_from_str() {
        assert_eq!("HOURLY".parse::<ChangeFrequency>(), Ok(ChangeFrequency::Hourly));
        assert_eq!(" yearly ".parse::<ChangeFrequency>(), Ok(ChangeFrequency::Yearly));
        assert!("fortnightly".parse::<ChangeFrequency>().is_err());
    }

    #[test]
    fn test_empty_loc_is_rejected() {
        let entries = vec![SitemapEntry::new("https://example.com/"), SitemapEntry::new("  ")];
        let result = render_sitemap_on(&entries, TODAY);

        assert!(matches!(result, Err(AuditError::InvalidEntry(msg)) if msg.starts_with("entry 1")));
    }

    #[test]
    fn test_relative_loc_is_rejected() {
        let result = render_sitemap_on(&[SitemapEntry::new("/about")], TODAY);
        assert!(matches!(result, Err(AuditError::InvalidEntry(_))));
    }

    #[test]
    fn test_loc_is_escaped() {
        let entries = vec![SitemapEntry::new("https://example.com/?a=1&b=2")];
        let xml = render_sitemap_on(&entries, TODAY).unwrap();

        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2</loc>"));
    }

    #[test]
    fn test_write_sitemap_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, "old content").unwrap();

        write_sitemap(&[SitemapEntry::new("https://example.com/")], &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();

        assert!(written.starts_with("<?xml"));
        assert!(!written.contains("old content"));
    }

    #[test]
    fn test_write_sitemap_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sitemap.xml");
        let result = write_sitemap(&[SitemapEntry::new("https://example.com/")], &path);

        assert!(matches!(result, Err(AuditError::WriteError(_))));
    }

    #[test]
    fn test_load_entries() {
        let json = r#"[
            {"loc": "https://example.com/", "lastmod": "2024-01-01", "changefreq": "Monthly", "priority": 0.5},
            {"loc": "https://example.com/blog", "changefreq": null}
        ]"#;
        let entries = load_entries(json).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].changefreq, Some(ChangeFrequency::Monthly));
        assert_eq!(entries[0].priority, Some(0.5));
        assert_eq!(entries[1], SitemapEntry::new("https://example.com/blog"));
    }

    #[test]
    fn test_load_entries_rejects_malformed_json() {
        assert!(matches!(load_entries("{not json"), Err(AuditError::Serialization(_))));
    }
}
