use serde::{Deserialize, Serialize};

use crate::config::store::Configuration;
use crate::extractor::ArticleRecord;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

/// Instruction used when neither an override nor a configured prompt exists.
pub const DEFAULT_PROMPT: &str = "You are a professional article summarization assistant. \
Read the article below carefully and summarize it as follows:

1. Use a Markdown unordered list
2. Extract the core arguments and key information
3. Drop marketing and redundant content
4. Stay objective and accurate; do not invent information
5. Nested second-level lists are allowed
6. Bold (**text**) and italics (*text*) may be used for emphasis
7. Keep it concise, usually 5-10 points

Begin the summary:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn for_article(
        article: &ArticleRecord,
        config: &Configuration,
        prompt_override: Option<&str>,
    ) -> Self {
        let model = if config.model_name.is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            config.model_name.clone()
        };

        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: effective_prompt(prompt_override, config).to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: build_input_text(article),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Override, then configured default, then the built-in prompt.
pub fn effective_prompt<'a>(prompt_override: Option<&'a str>, config: &'a Configuration) -> &'a str {
    prompt_override
        .filter(|p| !p.trim().is_empty())
        .or_else(|| Some(config.default_prompt.as_str()).filter(|p| !p.trim().is_empty()))
        .unwrap_or(DEFAULT_PROMPT)
}

pub fn build_input_text(article: &ArticleRecord) -> String {
    let mut text = String::new();
    if !article.title.is_empty() {
        text.push_str(&format!("title: {}\n\n", article.title));
    }
    if !article.author.is_empty() {
        text.push_str(&format!("author: {}\n\n", article.author));
    }
    text.push_str(&format!("content:\n{}", article.content));
    text
}
