use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};

use crate::summarizer::errors::SummarizeError;
use crate::summarizer::request::ChatRequest;
use crate::summarizer::response::TransportResponse;

/// Sends one chat request and hands back whatever came back.
///
/// Implementations do not interpret the status code; that is
/// [`parse_response`](crate::summarizer::response::parse_response)'s job.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_chat(
        &self,
        endpoint: &str,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<TransportResponse, SummarizeError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, SummarizeError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    #[instrument(skip_all, fields(endpoint = %endpoint, model = %request.model))]
    async fn post_chat(
        &self,
        endpoint: &str,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<TransportResponse, SummarizeError> {
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Chat response received");

        Ok(TransportResponse { status, body })
    }
}
