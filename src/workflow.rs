//! Runs user actions end to end: load the page, extract it, optionally
//! summarize it, and publish the rendered result.
//!
//! Actions may overlap. Each one takes a [`RequestToken`] before its first
//! await, and its result only reaches the view if no newer action has started
//! since. In-flight work is never cancelled; stale results are dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::store::{ConfigStore, StoreError};
use crate::extractor::{ExtractError, ExtractedPage, PageTemplate, extract_page};
use crate::fetcher::{FetchError, PageLoader, PageSource};
use crate::presenter::{DisplayState, ErrorView, RenderMode, render};
use crate::summarizer::{SummarizeError, Summarizer};

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Summarize(#[from] SummarizeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Initial,
    Loading,
    Result(DisplayState),
    Error(ErrorView),
}

/// Everything one action produced.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub page: ExtractedPage,
    pub summary: Option<String>,
    pub display: DisplayState,
}

#[derive(Debug)]
pub struct ActionReport {
    pub token: RequestToken,
    /// Whether the result reached the view.
    pub applied: bool,
    pub result: Result<ActionOutcome, WorkflowError>,
}

pub struct Workflow {
    store: Arc<dyn ConfigStore>,
    loader: Arc<dyn PageLoader>,
    summarizer: Summarizer,
    template: PageTemplate,
    api_key_override: Option<String>,
    latest: AtomicU64,
    view: Mutex<ViewState>,
}

impl Workflow {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        loader: Arc<dyn PageLoader>,
        summarizer: Summarizer,
    ) -> Self {
        Self {
            store,
            loader,
            summarizer,
            template: PageTemplate::default(),
            api_key_override: None,
            latest: AtomicU64::new(0),
            view: Mutex::new(ViewState::Initial),
        }
    }

    pub fn with_template(mut self, template: PageTemplate) -> Self {
        self.template = template;
        self
    }

    /// Key used instead of the stored one, e.g. from the environment.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        self.api_key_override = api_key;
        self
    }

    pub fn template(&self) -> &PageTemplate {
        &self.template
    }

    pub async fn view(&self) -> ViewState {
        self.view.lock().await.clone()
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Extract the page and summarize its content.
    pub async fn summarize(
        &self,
        source: &PageSource,
        prompt_override: Option<&str>,
    ) -> ActionReport {
        self.run(source, RenderMode::Summarize, prompt_override).await
    }

    /// Extract the page's links without calling the summarization API.
    pub async fn extract_links(&self, source: &PageSource) -> ActionReport {
        self.run(source, RenderMode::ExtractLinksOnly, None).await
    }

    #[instrument(skip(self, source, prompt_override), fields(source = %source))]
    async fn run(
        &self,
        source: &PageSource,
        mode: RenderMode,
        prompt_override: Option<&str>,
    ) -> ActionReport {
        let token = self.begin();
        self.set_view(token, ViewState::Loading).await;

        let result = self.execute(source, mode, prompt_override).await;
        let next = match &result {
            Ok(outcome) => ViewState::Result(outcome.display.clone()),
            Err(err) => {
                warn!("Action failed: {}", err);
                ViewState::Error(ErrorView::new(err.to_string(), mode))
            }
        };
        let applied = self.set_view(token, next).await;

        ActionReport {
            token,
            applied,
            result,
        }
    }

    fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn set_view(&self, token: RequestToken, next: ViewState) -> bool {
        let mut view = self.view.lock().await;
        if !self.is_current(token) {
            debug!(token = token.0, "Discarding result of superseded action");
            return false;
        }
        *view = next;
        true
    }

    async fn execute(
        &self,
        source: &PageSource,
        mode: RenderMode,
        prompt_override: Option<&str>,
    ) -> Result<ActionOutcome, WorkflowError> {
        let loaded = self.loader.load(source).await?;
        let page = extract_page(&loaded.html, &self.template)?;
        info!(
            title = %page.article.title,
            links = page.links.len(),
            "Page extracted"
        );

        let summary = match mode {
            RenderMode::Summarize => Some(self.summarize_article(&page, prompt_override).await?),
            RenderMode::ExtractLinksOnly => None,
        };

        let display = render(&page.article, &page.links, summary.as_deref(), mode);
        Ok(ActionOutcome {
            page,
            summary,
            display,
        })
    }

    async fn summarize_article(
        &self,
        page: &ExtractedPage,
        prompt_override: Option<&str>,
    ) -> Result<String, WorkflowError> {
        let mut config = self.store.get_config().await?;
        if let Some(key) = &self.api_key_override {
            config.api_key = key.clone();
        }

        let prompt = match prompt_override.filter(|p| !p.trim().is_empty()) {
            Some(prompt) => Some(prompt.to_string()),
            None => self.store.custom_prompt().await?,
        };

        Ok(self
            .summarizer
            .summarize(&page.article, &config, prompt.as_deref())
            .await?)
    }
}
