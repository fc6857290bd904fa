pub mod cleaner;
pub mod links;
pub mod markdown;
pub mod model;
pub mod template;
pub mod tree;

#[cfg(test)]
mod tests;

pub use model::{ArticleRecord, ExtractError, ExtractedPage, ExtractionResponse, LinkRecord};
pub use template::PageTemplate;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::extractor::tree::Node;

#[instrument(skip_all, fields(template = %template.name))]
pub fn extract_page(html: &str, template: &PageTemplate) -> Result<ExtractedPage, ExtractError> {
    let document = Html::parse_document(html);

    // 1. Locate the content root; nothing else matters without it
    let content_root =
        select_first(&document, &template.content)?.ok_or(ExtractError::ContentNotFound)?;

    // 2. Metadata is best effort
    let title = first_text(&document, &template.title)?;
    let author = first_text(&document, &template.author)?;
    let publish_time = first_text(&document, &template.publish_time)?;

    // 3. Snapshot the content root; links come from the untouched snapshot
    let source = Node::from_element(content_root)?;
    let links = links::collect_links(&source);

    // 4. Prune a copy and serialize what is left
    let mut copy = source.clone();
    let removed = cleaner::prune(&mut copy, &template.removals);
    let content = markdown::normalize_whitespace(&markdown::serialize(&copy));

    debug!(
        removed,
        links = links.len(),
        chars = content.chars().count(),
        "Extracted article"
    );

    Ok(ExtractedPage {
        article: ArticleRecord {
            title,
            author,
            publish_time,
            content,
        },
        links,
    })
}

fn select_first<'a>(
    document: &'a Html,
    selectors: &[String],
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    for selector in selectors {
        let parsed = Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
            selector: selector.clone(),
            reason: e.to_string(),
        })?;
        if let Some(element) = document.select(&parsed).next() {
            return Ok(Some(element));
        }
    }
    Ok(None)
}

fn first_text(document: &Html, selectors: &[String]) -> Result<String, ExtractError> {
    Ok(select_first(document, selectors)?
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default())
}
