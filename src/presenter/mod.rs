//! Turns an extracted article, its links and an optional summary into markup
//! fragments plus clipboard payloads.

pub mod copy;
pub mod markdown;
pub mod page;

pub use copy::{links_copy_text, summary_copy_text};
pub use markdown::render_markdown;
pub use page::{render_document, render_error_document};

use serde::{Deserialize, Serialize};

use crate::extractor::{ArticleRecord, LinkRecord};

pub const UNTITLED: &str = "Untitled";
pub const NO_LINKS_HINT: &str = "No external links found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    Summarize,
    ExtractLinksOnly,
}

impl RenderMode {
    /// Label of the button that repeats the action.
    pub fn action_label(self) -> &'static str {
        match self {
            RenderMode::Summarize => "Summarize again",
            RenderMode::ExtractLinksOnly => "Extract again",
        }
    }
}

/// Rendered fragments for one result view. Every field is safe to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub mode: RenderMode,
    pub title: String,
    pub meta: String,
    pub summary: Option<String>,
    pub link_count: usize,
    pub links: String,
    pub action_label: &'static str,
}

/// A failure as shown to the user. Every failure can be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub message: String,
    pub retry: RenderMode,
}

impl ErrorView {
    pub fn new(message: impl Into<String>, retry: RenderMode) -> Self {
        Self {
            message: message.into(),
            retry,
        }
    }
}

pub(crate) fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn escape_attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

pub fn render(
    article: &ArticleRecord,
    links: &[LinkRecord],
    summary: Option<&str>,
    mode: RenderMode,
) -> DisplayState {
    let title = if article.title.is_empty() {
        UNTITLED.to_string()
    } else {
        escape(&article.title)
    };

    let summary = match (mode, summary) {
        (RenderMode::Summarize, Some(text)) if !text.is_empty() => Some(render_markdown(text)),
        _ => None,
    };

    DisplayState {
        mode,
        title,
        meta: render_meta(article),
        summary,
        link_count: links.len(),
        links: render_links(links),
        action_label: mode.action_label(),
    }
}

fn render_meta(article: &ArticleRecord) -> String {
    [&article.author, &article.publish_time]
        .into_iter()
        .filter(|value| !value.is_empty())
        .map(|value| format!("<span>{}</span>", escape(value)))
        .collect()
}

fn render_links(links: &[LinkRecord]) -> String {
    if links.is_empty() {
        return format!("<p class=\"hint\">{NO_LINKS_HINT}</p>");
    }
    links
        .iter()
        .map(|link| {
            let url = escape_attr(&link.url);
            format!(
                "<div class=\"link-item\"><a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\" title=\"{url}\">{}</a></div>",
                escape(&link.text)
            )
        })
        .collect()
}
