use crate::extractor::LinkRecord;

/// Clipboard payload for a summary: the raw markdown as received.
pub fn summary_copy_text(summary: &str) -> String {
    summary.to_string()
}

/// Clipboard payload for links: numbered entries separated by a blank line.
pub fn links_copy_text(links: &[LinkRecord]) -> String {
    links
        .iter()
        .enumerate()
        .map(|(i, link)| format!("{}. {}\n   {}", i + 1, link.text, link.url))
        .collect::<Vec<_>>()
        .join("\n\n")
}
