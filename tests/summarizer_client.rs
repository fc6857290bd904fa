mod helpers;

use std::sync::Arc;

use leapread::extractor::ArticleRecord;
use leapread::summarizer::{HttpTransport, SummarizeError, SummaryResult, Summarizer};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn summarizer() -> Summarizer {
    Summarizer::new(Arc::new(HttpTransport::new(helpers::TIMEOUT).unwrap()))
}

fn article() -> ArticleRecord {
    ArticleRecord {
        title: "Ownership".to_string(),
        author: "Ferris".to_string(),
        publish_time: "2024-03-08".to_string(),
        content: "Every value has a single owner.".to_string(),
    }
}

#[tokio::test]
async fn test_request_shape_and_trimmed_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(helpers::CHAT_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "temperature": 0.7,
            "max_tokens": 2000,
            "messages": [
                { "role": "system", "content": "Summarize the article." },
                {
                    "role": "user",
                    "content": "title: Ownership\n\nauthor: Ferris\n\ncontent:\nEvery value has a single owner."
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(helpers::chat_reply(" Hello ")))
        .expect(1)
        .mount(&server)
        .await;

    let summary = summarizer()
        .summarize(&article(), &helpers::configuration(&server), None)
        .await
        .unwrap();

    assert_eq!(summary, "Hello");
}

#[tokio::test]
async fn test_empty_choices_is_malformed() {
    let server = MockServer::start().await;
    helpers::mount_chat(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
    )
    .await;

    let result = summarizer()
        .summarize(&article(), &helpers::configuration(&server), None)
        .await;

    assert_eq!(result, Err(SummarizeError::MalformedResponse));
}

#[tokio::test]
async fn test_upstream_error_message_is_surfaced() {
    let server = MockServer::start().await;
    helpers::mount_chat(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({ "error": { "message": "bad key" } })),
    )
    .await;

    let result: SummaryResult = summarizer()
        .summarize(&article(), &helpers::configuration(&server), None)
        .await
        .into();

    assert!(!result.success);
    let error = result.error.unwrap();
    assert!(error.contains("401"), "{error}");
    assert!(error.contains("bad key"), "{error}");
}

#[tokio::test]
async fn test_non_json_error_uses_status_reason() {
    let server = MockServer::start().await;
    helpers::mount_chat(
        &server,
        ResponseTemplate::new(500).set_body_string("<html>oops</html>"),
    )
    .await;

    let result = summarizer()
        .summarize(&article(), &helpers::configuration(&server), None)
        .await;

    assert_eq!(
        result,
        Err(SummarizeError::Upstream {
            status: 500,
            message: "Internal Server Error".to_string(),
        })
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let server = MockServer::start().await;
    let mut config = helpers::configuration(&server);
    // Nothing listens on port 9 locally
    config.api_endpoint = "http://127.0.0.1:9/v1/chat/completions".to_string();

    let result = summarizer().summarize(&article(), &config, None).await;

    assert!(matches!(result, Err(SummarizeError::Transport(_))));
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = helpers::configuration(&server);
    config.api_key.clear();

    let result = summarizer().summarize(&article(), &config, None).await;

    assert_eq!(result, Err(SummarizeError::MissingApiKey));
}
