//! Interactive numbered menu.

use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use seoaudit_core::{
    AuditError, CheckResult, Document, FetchConfig, LinkChecker, check_h1, check_hrefs, check_img_alt,
    check_meta_description, check_readability, check_title, fetch_url,
};
use url::Url;

const PAGE_MENU: &str = "
1. Check h1
2. Check href links
3. Check img
4. Check meta
5. Check title
6. Check content readability
Any other key exits.";

const OTHER_MENU: &str = "
1. Check content readability
Any other key exits.";

/// Runs the menu until the user picks an unlisted option or input ends.
///
/// With `url` set the source prompt is skipped and the page is fetched directly.
pub async fn run<R: BufRead, W: Write>(
    input: &mut R, out: &mut W, url: Option<String>, config: FetchConfig,
) -> anyhow::Result<()> {
    writeln!(out, "Simple SEO audit tools\n")?;

    let link = match url {
        Some(url) => Some(url),
        None => {
            writeln!(out, "1. Web page\n2. Other")?;
            match prompt(input, out, "")?.as_deref() {
                Some("1") => prompt(input, out, "Enter link: ")?,
                Some("2") => {
                    other_menu(input, out)?;
                    None
                }
                _ => None,
            }
        }
    };

    if let Some(link) = link {
        page_menu(input, out, &link, config).await?;
    }

    writeln!(out, "Program over.")?;
    Ok(())
}

async fn page_menu<R: BufRead, W: Write>(input: &mut R, out: &mut W, link: &str, config: FetchConfig) -> anyhow::Result<()> {
    let is_web = Url::parse(link).is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
    if !is_web {
        bail!("http and https only");
    }

    let html = fetch_url(link, &config).await.with_context(|| format!("Failed to fetch {}", link))?;
    let doc = Document::parse_with_url(&html, link)?;
    let checker = LinkChecker::new(config)?;

    loop {
        writeln!(out, "{}", PAGE_MENU)?;
        let Some(choice) = prompt(input, out, ">>> ")? else {
            break;
        };
        writeln!(out)?;

        match choice.as_str() {
            "1" => {
                writeln!(out, "Checking h1....\n")?;
                show(out, check_h1(&doc))?;
            }
            "2" => {
                writeln!(out, "Checking href links....")?;
                match check_hrefs(&doc, doc.base_url(), &checker) {
                    Ok(checks) => {
                        for result in checks.await {
                            writeln!(out)?;
                            show(out, result)?;
                        }
                    }
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "3" => {
                writeln!(out, "Checking img....")?;
                match check_img_alt(&doc) {
                    Ok(results) => {
                        for result in results {
                            writeln!(out, "\n{}", result)?;
                        }
                    }
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "4" => {
                writeln!(out, "Checking meta....\n")?;
                show(out, check_meta_description(&doc))?;
            }
            "5" => {
                writeln!(out, "Checking title....\n")?;
                show(out, check_title(&doc))?;
            }
            "6" => readability_prompt(input, out)?,
            _ => break,
        }
    }

    Ok(())
}

fn other_menu<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> anyhow::Result<()> {
    loop {
        writeln!(out, "{}", OTHER_MENU)?;
        match prompt(input, out, ">>> ")?.as_deref() {
            Some("1") => {
                writeln!(out)?;
                readability_prompt(input, out)?;
            }
            _ => return Ok(()),
        }
    }
}

fn readability_prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "en_US has the most accurate rules.")?;
    let Some(language) = prompt(input, out, "Language (code): ")? else {
        return Ok(());
    };
    let Some(text) = prompt(input, out, "Enter text: ")? else {
        return Ok(());
    };

    match check_readability(&text, &language) {
        Ok(score) => writeln!(out, "\nScore: {:.2}", score)?,
        Err(e) => writeln!(out, "\nError: {}", e)?,
    }
    Ok(())
}

fn show<W: Write>(out: &mut W, result: Result<CheckResult, AuditError>) -> anyhow::Result<()> {
    match result {
        Ok(result) => writeln!(out, "{}", result)?,
        Err(e) => writeln!(out, "Error: {}", e)?,
    }
    Ok(())
}

/// Prints `label` and reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> anyhow::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read input")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_with(input: &str, url: Option<String>) -> (anyhow::Result<()>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(run(&mut reader, &mut output, url, FetchConfig::default()));
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_other_menu_readability() {
        let (result, output) = run_with("2\n1\nen_US\nThe cat sat on the mat.\nq\n", None);

        assert!(result.is_ok());
        assert!(output.contains("Score: "));
        assert!(output.ends_with("Program over.\n"));
    }

    #[test]
    fn test_unknown_language_is_reported() {
        let (result, output) = run_with("2\n1\nxx_XX\nHello there.\n", None);

        assert!(result.is_ok());
        assert!(output.contains("Error: Unsupported language: xx_XX"));
    }

    #[test]
    fn test_exit_on_other_key() {
        let (result, output) = run_with("9\n", None);
        assert!(result.is_ok());
        assert!(output.contains("Program over."));
    }

    #[test]
    fn test_rejects_non_web_link() {
        let (result, _) = run_with("1\nftp://example.com/\n", None);
        assert!(result.is_err_and(|e| e.to_string() == "http and https only"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (result, output) = run_with("", None);
        assert!(result.is_ok());
        assert!(output.contains("Program over."));
    }
}
