use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("API key is not configured; set it with `leapread config set --api-key`")]
    MissingApiKey,

    #[error("API endpoint is not configured; set it with `leapread config set --endpoint`")]
    MissingEndpoint,

    #[error("API request failed ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("malformed response from summarization API")]
    MalformedResponse,

    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for SummarizeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
