//! Ordered audit reports.

use std::fmt;

use serde::Serialize;

use crate::audit::CheckKind;
use crate::check::CheckResult;
use crate::{AuditError, Result};

/// What happened when one check ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The check ran and produced a verdict.
    Checked(CheckResult),
    /// The check could not run. Other checks are unaffected.
    Failed { error: String },
}

/// One line of a report. Image and link checks contribute one entry per element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub check: CheckKind,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ReportEntry {
    pub fn checked(check: CheckKind, result: CheckResult) -> Self {
        Self { check, outcome: Outcome::Checked(result) }
    }

    pub fn failed(check: CheckKind, error: &AuditError) -> Self {
        Self { check, outcome: Outcome::Failed { error: error.to_string() } }
    }

    pub(crate) fn from_result(check: CheckKind, result: Result<CheckResult>) -> Self {
        match result {
            Ok(result) => Self::checked(check, result),
            Err(e) => {
                tracing::debug!(%check, error = %e, "check failed");
                Self::failed(check, &e)
            }
        }
    }

    /// The verdict, if the check ran.
    pub fn result(&self) -> Option<&CheckResult> {
        match &self.outcome {
            Outcome::Checked(result) => Some(result),
            Outcome::Failed { .. } => None,
        }
    }
}

/// Totals across a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub good: usize,
    pub bad: usize,
    pub failed: usize,
}

impl Summary {
    /// `true` when every entry ran and passed.
    pub fn is_clean(&self) -> bool {
        self.bad == 0 && self.failed == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} good, {} bad, {} failed", self.good, self.bad, self.failed)
    }
}

/// Everything one audit of one page found, in check order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    pub source_url: Option<String>,
    pub entries: Vec<ReportEntry>,
    /// Reading-Ease score of the page prose, when requested and computable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readability: Option<f64>,
}

impl AuditReport {
    /// Entries produced by one kind of check.
    pub fn entries_for(&self, check: CheckKind) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |entry| entry.check == check)
    }

    pub fn summary(&self) -> Summary {
        self.entries
            .iter()
            .fold(Summary::default(), |mut summary, entry| {
                match &entry.outcome {
                    Outcome::Checked(result) if result.is_good() => summary.good += 1,
                    Outcome::Checked(_) => summary.bad += 1,
                    Outcome::Failed { .. } => summary.failed += 1,
                }
                summary
            })
    }

    /// Serializes the report, with its summary, as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        #[derive(Serialize)]
        struct Output<'a> {
            #[serde(flatten)]
            report: &'a AuditReport,
            summary: Summary,
        }

        let output = Output { report: self, summary: self.summary() };
        let json = if pretty { serde_json::to_string_pretty(&output)? } else { serde_json::to_string(&output)? };
        Ok(json)
    }
}
