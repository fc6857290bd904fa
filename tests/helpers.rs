#![allow(dead_code)]

use std::time::Duration;

use leapread::config::store::Configuration;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub const CHAT_PATH: &str = "/v1/chat/completions";

pub const ARTICLE_HTML: &str = include_str!("../src/extractor/tests/fixtures/article.html");

pub fn configuration(server: &MockServer) -> Configuration {
    Configuration {
        api_endpoint: format!("{}{}", server.uri(), CHAT_PATH),
        api_key: "sk-test".to_string(),
        model_name: "test-model".to_string(),
        default_prompt: "Summarize the article.".to_string(),
    }
}

pub fn chat_reply(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

pub async fn mount_chat(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_page(server: &MockServer, page_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html.as_bytes())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

pub const TIMEOUT: Duration = Duration::from_secs(5);
