use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Article metadata and body text pulled from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub title: String,
    pub author: String,
    pub publish_time: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub text: String,
    pub url: String,
}

/// Everything a single extraction produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPage {
    pub article: ArticleRecord,
    pub links: Vec<LinkRecord>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("article content not found; make sure the page is an official-account article")]
    ContentNotFound,

    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("article content is nested more than {limit} levels deep")]
    TooDeeplyNested { limit: usize },
}

/// Wire shape handed back to whoever asked for an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractedPage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<ExtractedPage, ExtractError>> for ExtractionResponse {
    fn from(result: Result<ExtractedPage, ExtractError>) -> Self {
        match result {
            Ok(page) => Self {
                success: true,
                data: Some(page),
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(err.to_string()),
            },
        }
    }
}
