use owo_colors::OwoColorize;
use seoaudit_core::{AuditReport, CheckKind, CheckResult, Outcome, ReadingEase, Status, Summary, TextMetrics};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Seoaudit".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Audit web pages for common on-page SEO defects\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print one check verdict in the three-line layout
pub fn print_result(check: CheckKind, result: &CheckResult) {
    let status = match result.status() {
        Status::Good => result.status().to_string().green().bold().to_string(),
        Status::Bad => result.status().to_string().red().bold().to_string(),
    };

    println!("{}", format!("[{}]", check).dimmed());
    println!("{} {}", "Status:".dimmed(), status);
    println!("{} {}", "Description:".dimmed(), result.description());
    println!("{} {}", "Element:".dimmed(), result.evidence());
    println!();
}

/// Print a check that could not run
pub fn print_failure(check: CheckKind, error: &str) {
    println!("{}", format!("[{}]", check).dimmed());
    println!("{} {}", "Status:".dimmed(), "FAILED".yellow().bold());
    println!("{} {}", "Error:".dimmed(), error);
    println!();
}

pub fn print_report(report: &AuditReport) {
    if let Some(url) = &report.source_url {
        println!("{} {}\n", "Page:".dimmed(), url.bright_white().underline());
    }

    for entry in &report.entries {
        match &entry.outcome {
            Outcome::Checked(result) => print_result(entry.check, result),
            Outcome::Failed { error } => print_failure(entry.check, error),
        }
    }

    if let Some(score) = report.readability {
        println!(
            "{} {} ({})",
            "Readability:".dimmed(),
            format!("{:.2}", score).bright_white(),
            ReadingEase::from_score(score)
        );
    }

    print_summary(&report.summary());
}

pub fn print_summary(summary: &Summary) {
    println!("{}", "═".repeat(60).dimmed());
    println!(
        "{} {}, {}, {}",
        "Summary:".bold().cyan(),
        format!("{} good", summary.good).green(),
        format!("{} bad", summary.bad).red(),
        format!("{} failed", summary.failed).yellow()
    );
}

pub fn print_readability(metrics: &TextMetrics, score: f64, grade: f64) {
    let band = ReadingEase::from_score(score);

    println!("{} {}", "Score:".dimmed(), format!("{:.2}", score).bright_white().bold());
    println!("{} {}", "Ease:".dimmed(), band);
    println!("{} {:.1}", "Grade level:".dimmed(), grade);
    println!("{} {}", "Words:".dimmed(), metrics.words);
    println!("{} {}", "Sentences:".dimmed(), metrics.sentences);
    println!("{} {}", "Syllables:".dimmed(), metrics.syllables);
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
