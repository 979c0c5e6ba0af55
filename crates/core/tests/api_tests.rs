//! Library API integration tests
use seoaudit_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

const WORD_COUNT_TEXT: &str = "Hello world, this is a test. Another sentence here! And a question? Yes.";

#[test]
fn test_word_and_sentence_counts() {
    let text = "The quick brown fox jumps over the lazy dog. It was not amused! Why would it be?";
    assert_eq!(count_words(text), 17);
    assert_eq!(count_sentences(text), 3);
    assert_eq!(count_words(WORD_COUNT_TEXT), 13);
    assert_eq!(count_sentences(WORD_COUNT_TEXT), 4);
}

#[test]
fn test_syllables_indonesian() {
    assert_eq!(count_syllables("menyapu", "id_ID").unwrap(), 3);
}

#[test]
fn test_readability_api() {
    let score = check_readability("The cat sat on the mat. The dog ran off.", DEFAULT_LANGUAGE).unwrap();
    assert!(score > 90.0);
    assert_eq!(ReadingEase::from_score(score), ReadingEase::VeryEasy);
    assert!(matches!(check_readability("   ", DEFAULT_LANGUAGE), Err(AuditError::EmptyInput)));
}

#[test]
fn test_good_page_checks() {
    let doc = Document::parse(&load_fixture("good_page.html")).unwrap();

    assert!(check_h1(&doc).unwrap().is_good());
    assert!(check_heading_order(&doc).unwrap().is_good());
    assert!(check_meta_description(&doc).unwrap().is_good());
    assert!(check_title(&doc).unwrap().is_good());

    let images = check_img_alt(&doc).unwrap();
    assert_eq!(images.len(), 2);
    assert!(images.iter().all(CheckResult::is_good));
}

#[test]
fn test_bad_page_checks() {
    let doc = Document::parse(&load_fixture("bad_page.html")).unwrap();

    let h1 = check_h1(&doc).unwrap();
    assert_eq!(h1.status(), Status::Bad);
    assert_eq!(h1.description(), "h1 is not exist or more than one");
    assert!(matches!(h1.evidence(), Evidence::Elements(items) if items.len() == 2));

    let order = check_heading_order(&doc).unwrap();
    assert_eq!(order.description(), "heading level skipped: h2 followed by h4");

    let meta = check_meta_description(&doc).unwrap();
    assert_eq!(meta.status(), Status::Bad);
    assert_eq!(meta.evidence(), &Evidence::Text("Too short.".to_string()));

    assert_eq!(check_title(&doc).unwrap().status(), Status::Bad);

    let images = check_img_alt(&doc).unwrap();
    assert_eq!(images[0].status(), Status::Bad);
    assert_eq!(images[1].status(), Status::Good);
}

#[test]
fn test_missing_head_elements() {
    let doc = Document::parse(&load_fixture("missing_head.html")).unwrap();

    let meta = check_meta_description(&doc).unwrap();
    assert_eq!(meta.description(), "the meta description doesn't exist");
    assert!(meta.evidence().is_empty());

    assert!(matches!(check_title(&doc), Err(AuditError::MissingElement(name)) if name == "title"));
    assert!(check_img_alt(&doc).unwrap().is_empty());
    assert_eq!(check_heading_order(&doc).unwrap().status(), Status::Bad);
}

#[test]
fn test_check_result_display() {
    let doc = Document::parse("<h1>Hello</h1>").unwrap();
    let result = check_h1(&doc).unwrap();

    assert_eq!(
        result.to_string(),
        "Status: GOOD\nDescription: h1 used once\nElement: [<h1>Hello</h1>]"
    );
}

#[test]
fn test_collect_and_resolve_hrefs() {
    let html = load_fixture("bad_page.html");
    let doc = Document::parse_with_url(&html, "https://example.com/guide/").unwrap();
    let hrefs = collect_hrefs(&doc).unwrap();

    assert_eq!(hrefs, vec!["mailto:hello@example.com", "/contact"]);
    assert!(matches!(resolve_link(&hrefs[0], doc.base_url()), Err(AuditError::InvalidUrl(_))));
    assert_eq!(
        resolve_link(&hrefs[1], doc.base_url()).unwrap().as_str(),
        "https://example.com/contact"
    );
    assert_eq!(
        resolve_link("/docs", doc.base_url()).unwrap().as_str(),
        "https://example.com/docs"
    );
}

#[test]
fn test_offline_audit_report() {
    let html = load_fixture("bad_page.html");
    let report = Auditor::new().audit_html(&html, Some("https://example.com/")).unwrap();

    assert_eq!(report.entries_for(CheckKind::Links).count(), 0);
    assert_eq!(report.entries_for(CheckKind::Images).count(), 2);

    let summary = report.summary();
    assert_eq!(summary.good, 1);
    assert_eq!(summary.failed, 0);
    assert!(!summary.is_clean());

    let json: serde_json::Value = serde_json::from_str(&report.to_json(true).unwrap()).unwrap();
    assert_eq!(json["summary"]["bad"], summary.bad);
}

#[test]
fn test_audit_with_readability() {
    let html = load_fixture("good_page.html");
    let config = AuditConfig::builder()
        .checks([CheckKind::H1, CheckKind::Title])
        .readability(true)
        .language("en")
        .build();
    let report = Auditor::with_config(config).audit_html(&html, None).unwrap();

    assert!(report.summary().is_clean());
    assert!(report.readability.is_some());
}

#[test]
fn test_sitemap_from_fixture() {
    let entries = load_entries(&load_fixture("sitemap_entries.json")).unwrap();
    assert_eq!(entries[2].changefreq, None);

    let xml = render_sitemap(&entries).unwrap();
    assert_eq!(xml, load_fixture("sitemap_expected.xml"));
}

#[test]
fn test_write_sitemap_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sitemap.xml");
    let entries = vec![
        SitemapEntry::new("https://example.com/")
            .changefreq(ChangeFrequency::Monthly)
            .priority(0.5),
    ];

    write_sitemap(&entries, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();

    assert!(written.ends_with("</urlset>\n"));
    assert!(written.contains("<changefreq>monthly</changefreq>"));
    assert!(written.contains("<priority>0.5</priority>"));
}

#[test]
fn test_sitemap_rejects_empty_loc() {
    let entries = vec![SitemapEntry::new("")];
    assert!(matches!(render_sitemap(&entries), Err(AuditError::InvalidEntry(_))));
}

#[test]
fn test_custom_rule_registry() {
    struct TwoPerWord;

    impl text::SyllableRules for TwoPerWord {
        fn syllables(&self, _word: &str) -> Result<usize> {
            Ok(2)
        }
    }

    let mut registry = text::RuleRegistry::with_builtin();
    registry.register("tl_PH", TwoPerWord);

    let metrics = text_metrics_with("Isa dalawa tatlo.", "tl-ph", &registry).unwrap();
    assert_eq!(metrics.syllables, 6);
    assert!(check_readability_with("Isa dalawa tatlo.", "tl_PH", &registry).is_ok());
    assert!(matches!(check_readability("Isa dalawa tatlo.", "tl_PH"), Err(AuditError::UnsupportedLanguage(_))));
}
