//! Link resolution and liveness checks.
//!
//! Links are resolved against the page URL with standard URL-join rules and
//! fetched with a GET request. Only an exact `200 OK` is GOOD. Transport
//! failures are errors, never BAD results, so callers can tell "the server
//! said no" apart from "we could not ask".

#[cfg(feature = "fetch")]
use std::future::Future;

#[cfg(feature = "fetch")]
use futures::{StreamExt, stream};
#[cfg(feature = "fetch")]
use reqwest::{Client, StatusCode};
use url::Url;

#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, build_client, transport_error};
use crate::parse::Document;
use crate::{AuditError, Result};
#[cfg(feature = "fetch")]
use crate::{CheckResult, Evidence};

/// Resolves `link` against `parent`.
///
/// Absolute, scheme-relative (`//host/x`), path-absolute (`/x`) and
/// path-relative (`x`) links are all handled by URL joining.
///
/// # Errors
///
/// Returns [`AuditError::InvalidUrl`] for a relative link without a parent,
/// an unparsable link, or a target that is not `http`/`https`.
///
/// # Example
///
/// ```rust
/// use seoaudit_core::resolve_link;
/// use url::Url;
///
/// let parent = Url::parse("https://example.com/guide/").unwrap();
/// let url = resolve_link("/docs", Some(&parent)).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs");
/// ```
pub fn resolve_link(link: &str, parent: Option<&Url>) -> Result<Url> {
    let link = link.trim();

    let resolved = match parent {
        Some(base) => base.join(link),
        None => Url::parse(link),
    }
    .map_err(|e| AuditError::InvalidUrl(format!("{}: {}", link, e)))?;

    if !matches!(resolved.scheme(), "http" | "https") {
        return Err(AuditError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            resolved,
            resolved.scheme()
        )));
    }

    Ok(resolved)
}

/// The `href` of every element carrying one, in document order.
pub fn collect_hrefs(doc: &Document) -> Result<Vec<String>> {
    Ok(doc
        .elements_with_attr("href")?
        .iter()
        .filter_map(|el| el.attr("href"))
        .map(str::to_string)
        .collect())
}

/// Checks links over one shared HTTP client.
///
/// # Example
///
/// ```no_run
/// use seoaudit_core::{FetchConfig, LinkChecker};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = LinkChecker::new(FetchConfig::default())?;
///     let result = checker.check_link("https://example.com/", None).await?;
///     println!("{}", result);
///     Ok(())
/// }
/// ```
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl LinkChecker {
    /// Creates a checker with its own client built from `config`.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Resolves and fetches one link.
    ///
    /// # Errors
    ///
    /// - [`AuditError::InvalidUrl`] if the link cannot be resolved.
    /// - [`AuditError::Fetch`] / [`AuditError::Timeout`] on transport failure.
    pub async fn check_link(&self, link: &str, parent: Option<&Url>) -> Result<CheckResult> {
        let url = resolve_link(link, parent)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(url.as_str(), e, &self.config))?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "checked link");

        let evidence = Evidence::Text(url.to_string());
        if status == StatusCode::OK {
            Ok(CheckResult::good("link is working", evidence))
        } else {
            Ok(CheckResult::bad(
                format!("link is not working i.e RESPONSE CODE != 200 (got {})", status.as_u16()),
                evidence,
            ))
        }
    }

    /// Checks every link with at most `max_concurrency` requests in flight.
    ///
    /// Results come back in the order of `links`, whatever order the
    /// requests finish in. Dropping the returned future cancels every
    /// in-flight request.
    pub async fn check_all(&self, links: Vec<String>, parent: Option<&Url>) -> Vec<Result<CheckResult>> {
        let concurrency = self.config.max_concurrency.max(1);
        tracing::debug!(links = links.len(), concurrency, "checking links");

        let mut results: Vec<(usize, Result<CheckResult>)> = stream::iter(links.into_iter().enumerate())
            .map(|(index, link)| async move { (index, self.check_link(&link, parent).await) })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }
}

/// Collects every `href` in `doc` and returns the future that checks them.
///
/// The hrefs are read before this returns, so the future does not borrow
/// the document.
#[cfg(feature = "fetch")]
pub fn check_hrefs<'a>(
    doc: &Document, parent: Option<&'a Url>, checker: &'a LinkChecker,
) -> Result<impl Future<Output = Vec<Result<CheckResult>>> + use<'a>> {
    let links = collect_hrefs(doc)?;
    Ok(checker.check_all(links, parent))
}
