mod helpers;

use std::sync::Arc;

use leapread::config::store::{ConfigStore, MemoryStore};
use leapread::fetcher::{PageFetcher, PageSource};
use leapread::presenter::{RenderMode, links_copy_text};
use leapread::summarizer::{HttpTransport, Summarizer};
use leapread::workflow::{ViewState, Workflow, WorkflowError};
use wiremock::{MockServer, ResponseTemplate};

async fn workflow(server: &MockServer) -> Workflow {
    let store = Arc::new(MemoryStore::with_config(helpers::configuration(server)));
    Workflow::new(
        store,
        Arc::new(PageFetcher::new().unwrap()),
        Summarizer::new(Arc::new(HttpTransport::new(helpers::TIMEOUT).unwrap())),
    )
}

#[tokio::test]
async fn test_summarize_end_to_end() {
    let server = MockServer::start().await;
    helpers::mount_page(&server, "/s/article", helpers::ARTICLE_HTML).await;
    helpers::mount_chat(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(helpers::chat_reply("- **Owners** drop values\n- Borrows are checked")),
    )
    .await;

    let workflow = workflow(&server).await;
    let source = PageSource::parse(&format!("{}/s/article", server.uri()));

    let report = workflow.summarize(&source, None).await;

    assert!(report.applied);
    let outcome = report.result.unwrap();
    assert_eq!(outcome.page.article.title, "Ownership, Explained Slowly");
    assert!(outcome.summary.unwrap().starts_with("- **Owners**"));
    match workflow.view().await {
        ViewState::Result(state) => {
            assert_eq!(state.mode, RenderMode::Summarize);
            let summary = state.summary.unwrap();
            assert!(summary.contains("<ul><li><strong>Owners</strong> drop values</li>"));
            assert_eq!(state.link_count, outcome.page.links.len());
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[tokio::test]
async fn test_links_end_to_end() {
    let server = MockServer::start().await;
    helpers::mount_page(&server, "/s/article", helpers::ARTICLE_HTML).await;

    let workflow = workflow(&server).await;
    let source = PageSource::parse(&format!("{}/s/article", server.uri()));

    let outcome = workflow.extract_links(&source).await.result.unwrap();

    assert!(outcome.summary.is_none());
    let copied = links_copy_text(&outcome.page.links);
    assert!(copied.starts_with("1. "));
    assert_eq!(copied.matches("\n\n").count(), outcome.page.links.len() - 1);
}

#[tokio::test]
async fn test_missing_key_is_reported_before_calling_api() {
    let server = MockServer::start().await;
    helpers::mount_page(&server, "/s/article", helpers::ARTICLE_HTML).await;

    let store = Arc::new(MemoryStore::new());
    let mut config = helpers::configuration(&server);
    config.api_key.clear();
    store.save_config(&config).await.unwrap();

    let workflow = Workflow::new(
        store,
        Arc::new(PageFetcher::new().unwrap()),
        Summarizer::new(Arc::new(HttpTransport::new(helpers::TIMEOUT).unwrap())),
    );
    let source = PageSource::parse(&format!("{}/s/article", server.uri()));

    let report = workflow.summarize(&source, None).await;

    assert!(matches!(report.result, Err(WorkflowError::Summarize(_))));
    match workflow.view().await {
        ViewState::Error(view) => {
            assert!(view.message.contains("API key"));
            assert_eq!(view.retry, RenderMode::Summarize);
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[tokio::test]
async fn test_page_fetch_failure_is_retryable() {
    let server = MockServer::start().await;

    let workflow = workflow(&server).await;
    let source = PageSource::parse(&format!("{}/s/missing", server.uri()));

    let report = workflow.extract_links(&source).await;

    assert!(matches!(report.result, Err(WorkflowError::Fetch(_))));
    assert!(matches!(
        workflow.view().await,
        ViewState::Error(view) if view.retry == RenderMode::ExtractLinksOnly
    ));
}
