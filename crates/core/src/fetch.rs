//! Page fetching from URLs, files, and stdin.
//!
//! This module provides functions for retrieving HTML content from
//! various sources: HTTP/HTTPS URLs, local files, and standard input,
//! plus the shared HTTP client configuration used by the link checker.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{AuditError, Result};

/// HTTP client configuration for fetching pages and checking links.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Maximum number of link checks in flight at once.
    pub max_concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Seoaudit/1.0)".to_string(),
            max_concurrency: 8,
        }
    }
}

/// Builds an HTTP client honoring the timeout and User-Agent of `config`.
///
/// Redirects are followed, so a link that ends in a 200 after redirection is
/// reported as working.
#[cfg(feature = "fetch")]
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|source| AuditError::Fetch { url: String::new(), source })
}

/// Maps a transport error to [`AuditError::Timeout`] or [`AuditError::Fetch`].
#[cfg(feature = "fetch")]
pub(crate) fn transport_error(url: &str, source: reqwest::Error, config: &FetchConfig) -> AuditError {
    if source.is_timeout() {
        AuditError::Timeout { url: url.to_string(), timeout: config.timeout }
    } else {
        AuditError::Fetch { url: url.to_string(), source }
    }
}

/// Fetches HTML content from a URL.
///
/// This function performs an HTTP GET request and returns the response body as text.
/// Only `http` and `https` URLs are accepted.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| AuditError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(AuditError::InvalidUrl(format!("{}: http and https only", url)));
    }

    let client = build_client(config)?;
    tracing::debug!(%parsed_url, timeout = config.timeout, "fetching page");

    let response = client
        .get(parsed_url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| transport_error(url, e, config))?;

    let content = response.text().await.map_err(|e| transport_error(url, e, config))?;

    Ok(content)
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(AuditError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(AuditError::from)
    }
}

/// Reads content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(AuditError::from)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.max_concurrency, 8);
        assert!(config.user_agent.contains("Seoaudit"));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(AuditError::InvalidUrl(_))));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_rejects_other_schemes() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("ftp://example.com/file", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(AuditError::InvalidUrl(msg)) if msg.contains("http and https only")));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(AuditError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<h1>Hi</h1>").unwrap();

        let content = fetch_file(path.to_str().unwrap()).unwrap();
        assert_eq!(content, "<h1>Hi</h1>");
    }

    #[test]
    fn test_fetch_file_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = fetch_file(dir.path().to_str().unwrap());
        assert!(matches!(result, Err(AuditError::WriteError(_))));
    }
}
