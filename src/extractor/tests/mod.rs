use std::fs;

use crate::extractor::{ExtractError, ExtractionResponse, PageTemplate, extract_page};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_article() {
    let html = fixture("article.html");
    let page = extract_page(&html, &PageTemplate::wechat()).unwrap();
    let article = &page.article;

    assert_eq!(article.title, "Ownership, Explained Slowly");
    assert_eq!(article.author, "Rust Weekly");
    assert_eq!(article.publish_time, "2024-03-08 09:30");

    assert!(article.content.starts_with("## Why ownership\n\n"));
    assert!(article.content.contains("Every value has **exactly one** owner at a time."));
    assert!(article.content.contains("*lend* a value \nwithout giving it away."));
    assert!(article.content.contains("\n\n### Summary\n\nMove, borrow, or clone."));
    assert!(article.content.ends_with("Move, borrow, or clone."));
}

#[test]
fn test_removed_elements_leave_no_text() {
    let html = fixture("article.html");
    let content = extract_page(&html, &PageTemplate::wechat())
        .unwrap()
        .article
        .content;

    assert!(!content.contains("diagram.png"));
    assert!(!content.contains("Sponsored"));
    assert!(!content.contains("Scan to follow"));
    assert!(!content.contains("hidden tracking text"));
    assert!(!content.contains("window.tracking"));
    assert!(!content.contains("Shared via"));
    assert!(!content.contains("\n\n\n"));
    assert!(!content.contains("  "));
}

#[test]
fn test_links_come_from_unpruned_content() {
    let html = fixture("article.html");
    let links = extract_page(&html, &PageTemplate::wechat()).unwrap().links;

    let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html",
            "https://doc.rust-lang.org/nomicon/",
            // inside the share notice, which only the text copy drops
            "https://mp.weixin.qq.com/share",
        ]
    );
    assert_eq!(links[1].text, "nomicon");
    // outside the content root
    assert!(!urls.iter().any(|u| u.contains("report")));
}

#[test]
fn test_secondary_selectors() {
    let html = fixture("fallback.html");
    let page = extract_page(&html, &PageTemplate::wechat()).unwrap();

    assert_eq!(page.article.title, "Second Choice Title");
    assert_eq!(page.article.author, "Backup Author");
    assert_eq!(page.article.publish_time, "");
    assert!(
        page.article
            .content
            .starts_with("Content found through the secondary selector.")
    );
    assert_eq!(page.links.len(), 1);
    assert_eq!(page.links[0].url, "https://example.com/more");
}

#[test]
fn test_missing_content_root() {
    let html = fixture("not_article.html");
    let result = extract_page(&html, &PageTemplate::wechat());

    assert_eq!(result.unwrap_err(), ExtractError::ContentNotFound);
}

#[test]
fn test_extraction_response_contract() {
    let html = fixture("article.html");
    let response = ExtractionResponse::from(extract_page(&html, &PageTemplate::wechat()));
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["article"]["publishTime"], "2024-03-08 09:30");
    assert_eq!(json["data"]["links"][0]["text"], "book chapter");
    assert!(json.get("error").is_none());
}

#[test]
fn test_invalid_selector_is_reported() {
    let mut template = PageTemplate::wechat();
    template.content = vec!["div[".to_string()];

    match extract_page("<html></html>", &template) {
        Err(ExtractError::InvalidSelector { selector, .. }) => assert_eq!(selector, "div["),
        other => panic!("Expected InvalidSelector, got {other:?}"),
    }
}

#[test]
fn test_malformed_html() {
    let html = r#"<div id="js_content"><p>Unclosed <b>bold<p>Next paragraph"#;
    let page = extract_page(html, &PageTemplate::wechat()).unwrap();

    assert!(page.article.content.contains("Unclosed"));
    assert!(page.article.content.contains("Next paragraph"));
}

fn nested_content(depth: usize) -> String {
    format!(
        r#"<html><body><div id="js_content"><p>{}deep text<a href="https://example.com/deep">deep link</a>{}</p></div></body></html>"#,
        "<span>".repeat(depth),
        "</span>".repeat(depth)
    )
}

#[test]
fn test_deeply_nested_content_is_rejected() {
    let result = extract_page(&nested_content(6000), &PageTemplate::wechat());

    assert_eq!(
        result,
        Err(ExtractError::TooDeeplyNested {
            limit: crate::extractor::tree::MAX_DEPTH
        })
    );
    assert!(
        ExtractionResponse::from(result)
            .error
            .unwrap()
            .contains("nested more than")
    );
}

#[test]
fn test_moderately_nested_content_is_extracted() {
    let page = extract_page(&nested_content(300), &PageTemplate::wechat()).unwrap();

    assert_eq!(page.article.content, "deep text deep link");
    assert_eq!(page.links.len(), 1);
    assert_eq!(page.links[0].url, "https://example.com/deep");
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(body in ".*") {
            let html = format!(r#"<div id="js_content">{body}</div>"#);
            let _ = extract_page(&html, &PageTemplate::wechat());
        }

        #[test]
        fn test_content_is_normalized(body in "[a-z <>/pbr\n]*") {
            let html = format!(r#"<div id="js_content">{body}</div>"#);
            if let Ok(page) = extract_page(&html, &PageTemplate::wechat()) {
                prop_assert!(!page.article.content.contains("\n\n\n"));
                prop_assert!(!page.article.content.contains("  "));
                prop_assert_eq!(page.article.content.trim(), page.article.content.as_str());
            }
        }
    }
}
