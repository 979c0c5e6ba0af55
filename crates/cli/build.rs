use std::{env, fs, path::PathBuf};

use clap::{Arg, ArgAction, Command, arg, value_parser};

const CHECKS: [&str; 8] = ["h1", "headings", "img", "images", "meta", "title", "links", "href"];
const FREQUENCIES: [&str; 7] = ["always", "hourly", "daily", "weekly", "monthly", "yearly", "never"];

fn format_arg() -> Arg {
    arg!(-f --format <FORMAT> "Output format (text, json)")
        .default_value("text")
        .value_parser(["text", "json"])
}

fn language_arg() -> Arg {
    arg!(-l --language <CODE> "Language code for syllable rules").default_value("en_US")
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let audit = Command::new("audit")
        .about("Run SEO checks against a page")
        .arg(arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(arg!(--base_url <URL> "URL relative links resolve against (file and stdin input)"))
        .arg(
            arg!(-c --check <KIND> "Check to run; repeatable, default all")
                .action(ArgAction::Append)
                .value_parser(CHECKS),
        )
        .arg(format_arg())
        .arg(arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(arg!(--user_agent <UA> "Custom User-Agent for HTTP requests"))
        .arg(arg!(--concurrency <NUM> "Maximum number of link checks in flight").default_value("8"))
        .arg(arg!(--readability "Also score the readability of the page prose"))
        .arg(language_arg());

    let readability = Command::new("readability")
        .about("Score the readability of a text")
        .arg(arg!([TEXT] "Text to score, or '-' for stdin (default: stdin)"))
        .arg(language_arg())
        .arg(format_arg());

    let sitemap = Command::new("sitemap")
        .about("Generate a sitemap.xml")
        .arg(arg!(-i --input <FILE> "JSON file holding an array of entries").value_parser(value_parser!(PathBuf)))
        .arg(arg!(-u --url <LOC> "Page URL to list; repeatable").action(ArgAction::Append))
        .arg(arg!(--changefreq <FREQ> "Change frequency applied to every --url entry").value_parser(FREQUENCIES))
        .arg(arg!(--priority <NUM> "Priority (0.0-1.0) applied to every --url entry"))
        .arg(arg!(--lastmod <DATE> "Last modification date (YYYY-MM-DD) applied to every --url entry"))
        .arg(arg!(-o --output <FILE> "Output file (default: stdout)").value_parser(value_parser!(PathBuf)));

    let menu = Command::new("menu")
        .about("Interactive numbered menu")
        .arg(arg!([URL] "Page to audit; skips the source prompt"))
        .arg(arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"));

    let mut cmd = Command::new("seoaudit")
        .version("1.0.0")
        .author("Seoaudit Contributors")
        .about("Audit web pages for common on-page SEO defects")
        .arg(arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand_required(true)
        .subcommands([audit, readability, sitemap, menu]);

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "seoaudit", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "seoaudit", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "seoaudit", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "seoaudit", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
