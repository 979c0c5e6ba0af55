mod echo;
mod menu;

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::{ArgGroup, Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use seoaudit_core::{
    AuditConfig, AuditReport, Auditor, ChangeFrequency, CheckKind, DEFAULT_LANGUAGE, FetchConfig, SitemapEntry,
    fetch_file, fetch_stdin, load_entries, render_sitemap, text_metrics, write_sitemap,
};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Audit web pages for common on-page SEO defects
#[derive(Parser, Debug)]
#[command(name = "seoaudit")]
#[command(author = "Seoaudit Contributors")]
#[command(version)]
#[command(about = "Audit web pages for common on-page SEO defects", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run SEO checks against a page
    Audit(AuditArgs),
    /// Score the readability of a text
    Readability(ReadabilityArgs),
    /// Generate a sitemap.xml
    Sitemap(SitemapArgs),
    /// Interactive numbered menu
    Menu(MenuArgs),
}

#[derive(Args, Debug)]
struct AuditArgs {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// URL relative links resolve against (file and stdin input)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Check to run (h1, headings, images, meta, title, links); repeatable, default all
    #[arg(short, long = "check", value_name = "KIND")]
    checks: Vec<CheckKind>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Maximum number of link checks in flight
    #[arg(long, default_value = "8", value_name = "NUM")]
    concurrency: usize,

    /// Also score the readability of the page prose
    #[arg(long)]
    readability: bool,

    /// Language code for readability scoring
    #[arg(short, long, default_value = DEFAULT_LANGUAGE, value_name = "CODE")]
    language: String,
}

#[derive(Args, Debug)]
struct ReadabilityArgs {
    /// Text to score, or "-" for stdin (default: stdin)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Language code for syllable rules
    #[arg(short, long, default_value = DEFAULT_LANGUAGE, value_name = "CODE")]
    language: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "url"])))]
struct SitemapArgs {
    /// JSON file holding an array of entries
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Page URL to list; repeatable
    #[arg(short, long, value_name = "LOC")]
    url: Vec<String>,

    /// Change frequency applied to every --url entry
    #[arg(long, value_name = "FREQ", requires = "url")]
    changefreq: Option<ChangeFrequency>,

    /// Priority (0.0-1.0) applied to every --url entry
    #[arg(long, value_name = "NUM", requires = "url")]
    priority: Option<f64>,

    /// Last modification date (YYYY-MM-DD) applied to every --url entry
    #[arg(long, value_name = "DATE", requires = "url")]
    lastmod: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct MenuArgs {
    /// Page to audit; skips the source prompt
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "seoaudit=debug,seoaudit_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn is_web_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Where an audit input is read from.
fn input_kind(input: &str) -> &'static str {
    if is_web_url(input) {
        "url"
    } else if input == "-" {
        "stdin"
    } else {
        "file"
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    match cli.command {
        Command::Audit(args) => run_audit(args, cli.verbose).await,
        Command::Readability(args) => run_readability(args),
        Command::Sitemap(args) => run_sitemap(args),
        Command::Menu(args) => {
            let config = FetchConfig { timeout: args.timeout, ..FetchConfig::default() };
            let mut stdin = io::stdin().lock();
            let mut stdout = io::stdout();
            menu::run(&mut stdin, &mut stdout, args.url, config).await
        }
    }
}

async fn run_audit(args: AuditArgs, verbose: bool) -> anyhow::Result<()> {
    let mut builder = AuditConfig::builder()
        .timeout(args.timeout)
        .max_concurrency(args.concurrency)
        .language(&args.language)
        .readability(args.readability);

    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent);
    }
    if !args.checks.is_empty() {
        builder = builder.checks(args.checks.iter().copied());
    }

    let config = builder.build();
    tracing::debug!(
        input = %args.input,
        source = input_kind(&args.input),
        checks = config.checks.len(),
        "auditing page"
    );
    let auditor = Auditor::with_config(config);

    let audit = async {
        if is_web_url(&args.input) {
            if verbose {
                echo::print_step(1, 2, &format!("Fetching and auditing {}", args.input.bright_white().underline()));
            }
            auditor
                .fetch_and_audit(&args.input)
                .await
                .with_context(|| format!("Failed to audit {}", args.input))
        } else {
            let html = read_local(&args.input)?;
            if verbose {
                echo::print_step(1, 2, &format!("Auditing {} of HTML", echo::format_size(html.len())));
            }
            auditor
                .audit_page(&html, args.base_url.as_deref())
                .await
                .context("Failed to audit page")
        }
    };

    let report = tokio::select! {
        report = audit => report?,
        _ = tokio::signal::ctrl_c() => {
            echo::print_warning("Interrupted, incomplete results discarded");
            bail!("interrupted");
        }
    };

    if verbose {
        echo::print_step(2, 2, "Writing report");
        eprintln!();
    }

    print_audit_report(&report, args.format)
}

fn print_audit_report(report: &AuditReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => echo::print_report(report),
        OutputFormat::Json => println!("{}", report.to_json(true).context("Failed to serialize report")?),
    }
    Ok(())
}

fn read_local(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        fetch_stdin().context("Failed to read from stdin")
    } else {
        fetch_file(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

fn run_readability(args: ReadabilityArgs) -> anyhow::Result<()> {
    let text = match args.text.as_deref() {
        None | Some("-") => fetch_stdin().context("Failed to read from stdin")?,
        Some(text) => text.to_string(),
    };

    let metrics = text_metrics(&text, &args.language)?;
    let score = metrics.reading_ease().context("Cannot score text")?;
    let grade = metrics.grade_level().context("Cannot score text")?;

    match args.format {
        OutputFormat::Text => echo::print_readability(&metrics, score, grade),
        OutputFormat::Json => {
            let band = metrics.band()?;
            let output = serde_json::json!({
                "language": args.language,
                "score": score,
                "grade_level": grade,
                "ease": band,
                "words": metrics.words,
                "sentences": metrics.sentences,
                "syllables": metrics.syllables,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn run_sitemap(args: SitemapArgs) -> anyhow::Result<()> {
    let entries = match &args.input {
        Some(path) => {
            let json = fetch_file(path).with_context(|| format!("Failed to read file: {}", path))?;
            load_entries(&json).with_context(|| format!("Failed to parse entries in {}", path))?
        }
        None => args
            .url
            .iter()
            .map(|loc| SitemapEntry {
                loc: loc.clone(),
                lastmod: args.lastmod.clone(),
                changefreq: args.changefreq,
                priority: args.priority,
            })
            .collect(),
    };

    tracing::debug!(entries = entries.len(), output = ?args.output, "rendering sitemap");

    match &args.output {
        Some(path) => {
            write_sitemap(&entries, path).with_context(|| format!("Failed to write sitemap: {}", path.display()))?;
            echo::print_success(&format!(
                "Sitemap with {} entries written to {}",
                entries.len(),
                path.display().bright_white()
            ));
        }
        None => print!("{}", render_sitemap(&entries)?),
    }

    Ok(())
}
