use reqwest::StatusCode;
use serde::Deserialize;

use crate::summarizer::errors::SummarizeError;

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Raw status and body of an upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Turn an upstream reply into the summary text.
pub fn parse_response(response: &TransportResponse) -> Result<String, SummarizeError> {
    if !response.status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .map(|body| body.error.message)
            .unwrap_or_else(|_| {
                response
                    .status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });
        return Err(SummarizeError::Upstream {
            status: response.status.as_u16(),
            message,
        });
    }

    let parsed: ChatResponse =
        serde_json::from_str(&response.body).map_err(|_| SummarizeError::MalformedResponse)?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .ok_or(SummarizeError::MalformedResponse)
}
