//! Structured check results shared by every audit function.
//!
//! A [`CheckResult`] is the verdict of one check invocation: a binary
//! [`Status`], a human-readable description, and the [`Evidence`] that
//! produced the verdict.
//!
//! # Example
//!
//! ```rust
//! use seoaudit_core::{CheckResult, Evidence, Status};
//!
//! let result = CheckResult::new(Status::Good, "h1 used once", Evidence::Text("<h1>Hi</h1>".into()));
//! assert_eq!(result.to_string(), "Status: GOOD\nDescription: h1 used once\nElement: <h1>Hi</h1>");
//! ```

use std::fmt;

use serde::Serialize;

/// Binary outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Bad,
    Good,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Bad => write!(f, "BAD"),
            Status::Good => write!(f, "GOOD"),
        }
    }
}

/// What a check inspected to reach its verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Evidence {
    /// Outer HTML of a single element.
    Element(String),
    /// Outer HTML of every matched element, in document order.
    Elements(Vec<String>),
    /// A raw value such as a URL or attribute content. Empty when nothing was found.
    Text(String),
}

impl Evidence {
    /// Returns `true` when the evidence carries no content.
    pub fn is_empty(&self) -> bool {
        match self {
            Evidence::Element(html) | Evidence::Text(html) => html.is_empty(),
            Evidence::Elements(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evidence::Element(html) => write!(f, "{}", html),
            Evidence::Elements(items) => write!(f, "[{}]", items.join(", ")),
            Evidence::Text(text) => write!(f, "{}", text),
        }
    }
}

/// The immutable verdict of one check invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    status: Status,
    description: String,
    evidence: Evidence,
}

impl CheckResult {
    pub fn new(status: Status, description: impl Into<String>, evidence: Evidence) -> Self {
        Self { status, description: description.into(), evidence }
    }

    pub fn good(description: impl Into<String>, evidence: Evidence) -> Self {
        Self::new(Status::Good, description, evidence)
    }

    pub fn bad(description: impl Into<String>, evidence: Evidence) -> Self {
        Self::new(Status::Bad, description, evidence)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn evidence(&self) -> &Evidence {
        &self.evidence
    }

    pub fn is_good(&self) -> bool {
        self.status == Status::Good
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status: {}\nDescription: {}\nElement: {}",
            self.status, self.description, self.evidence
        )
    }
}
