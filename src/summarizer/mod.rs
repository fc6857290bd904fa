pub mod errors;
pub mod request;
pub mod response;
pub mod tokens;
pub mod transport;

pub use errors::SummarizeError;
pub use request::{ChatMessage, ChatRequest, DEFAULT_MODEL, DEFAULT_PROMPT, Role};
pub use response::{TransportResponse, parse_response};
pub use tokens::estimate_tokens;
pub use transport::{ChatTransport, HttpTransport};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::store::Configuration;
use crate::extractor::ArticleRecord;

/// Outcome of a summarization in the shape the presentation layer expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<String, SummarizeError>> for SummaryResult {
    fn from(result: Result<String, SummarizeError>) -> Self {
        match result {
            Ok(summary) => Self {
                success: true,
                summary: Some(summary),
                error: None,
            },
            Err(err) => Self {
                success: false,
                summary: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Clone)]
pub struct Summarizer {
    transport: Arc<dyn ChatTransport>,
}

impl Summarizer {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// Summarize `article` with a single request; the caller decides on retries.
    #[instrument(skip_all, fields(title = %article.title))]
    pub async fn summarize(
        &self,
        article: &ArticleRecord,
        config: &Configuration,
        prompt_override: Option<&str>,
    ) -> Result<String, SummarizeError> {
        if config.api_key.is_empty() {
            return Err(SummarizeError::MissingApiKey);
        }
        if config.api_endpoint.is_empty() {
            return Err(SummarizeError::MissingEndpoint);
        }

        let request = ChatRequest::for_article(article, config, prompt_override);
        debug!(
            model = %request.model,
            estimated_tokens = estimate_tokens(&request.messages[1].content),
            "Sending summarization request"
        );

        let response = self
            .transport
            .post_chat(&config.api_endpoint, &config.api_key, &request)
            .await?;

        match parse_response(&response) {
            Ok(summary) => {
                info!(chars = summary.chars().count(), "Summary received");
                Ok(summary)
            }
            Err(err) => {
                warn!("Summarization failed: {}", err);
                Err(err)
            }
        }
    }
}
