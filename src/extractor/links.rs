use std::collections::HashSet;

use crate::extractor::model::LinkRecord;
use crate::extractor::tree::{NodeKind, TreeNode};

const EXCLUDED_PREFIXES: &[&str] = &["#", "javascript:", "mailto:", "tel:", "about:"];

/// Collect outbound links under `root`, in document order, unique by url.
pub fn collect_links<N: TreeNode>(root: &N) -> Vec<LinkRecord> {
    let mut links = Vec::new();
    walk_anchors(root, &mut links);
    dedup_by_url(links)
}

fn walk_anchors<N: TreeNode>(root: &N, links: &mut Vec<LinkRecord>) {
    let mut pending: Vec<&N> = root.children().into_iter().rev().collect();

    while let Some(node) = pending.pop() {
        if node.kind() != NodeKind::Element {
            continue;
        }

        if node.tag_name().is_some_and(|tag| tag.eq_ignore_ascii_case("a"))
            && let Some(href) = node.attr("href")
        {
            let text = node.text_content();
            let text = text.trim();
            if is_valid_link(href) && !text.is_empty() {
                links.push(LinkRecord {
                    text: text.to_string(),
                    url: href.to_string(),
                });
            }
        }

        pending.extend(node.children().into_iter().rev());
    }
}

/// Whether `href` points somewhere worth listing.
pub fn is_valid_link(href: &str) -> bool {
    if href.is_empty() {
        return false;
    }
    let lower = href.to_ascii_lowercase();
    !EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Keep the first link seen for each url.
pub fn dedup_by_url(links: Vec<LinkRecord>) -> Vec<LinkRecord> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}
