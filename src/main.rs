mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use leapread::{
    config::{
        Settings,
        store::{ConfigStore, Configuration, FileStore},
    },
    extractor::{ExtractionResponse, PageTemplate},
    fetcher::{PageFetcher, PageSource},
    presenter::{ErrorView, RenderMode, links_copy_text, render_document, render_error_document},
    summarizer::{DEFAULT_PROMPT, HttpTransport, SummaryResult, Summarizer},
    workflow::{ActionReport, Workflow, WorkflowError},
};
use tracing::{info, warn};

use crate::cli::{Cli, Commands, ConfigCommands, OutputArgs, PromptCommands};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for results
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let settings = Settings::from_env()?;
    let store = Arc::new(FileStore::new(settings.store_path()));

    match cli.command {
        Commands::Summarize {
            source,
            prompt,
            output,
        } => {
            let workflow = build_workflow(&settings, store)?;
            let source = parse_source(&workflow, &source);
            let report = workflow.summarize(&source, prompt.as_deref()).await;
            finish(report, RenderMode::Summarize, &output)
        }
        Commands::Links { source, output } => {
            let workflow = build_workflow(&settings, store)?;
            let source = parse_source(&workflow, &source);
            let report = workflow.extract_links(&source).await;
            finish(report, RenderMode::ExtractLinksOnly, &output)
        }
        Commands::Config { command } => {
            run_config(command, &settings, store.as_ref()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Prompt { command } => {
            run_prompt(command, store.as_ref()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_workflow(settings: &Settings, store: Arc<FileStore>) -> Result<Workflow> {
    let loader = PageFetcher::new().context("failed to build page fetcher")?;
    let transport =
        HttpTransport::new(settings.request_timeout()).context("failed to build API client")?;

    Ok(Workflow::new(store, Arc::new(loader), Summarizer::new(Arc::new(transport)))
        .with_template(PageTemplate::wechat())
        .with_api_key_override(settings.api_key_override().map(str::to_string)))
}

fn parse_source(workflow: &Workflow, input: &str) -> PageSource {
    let source = PageSource::parse(input);
    if let Some(url) = source.url()
        && !workflow.template().matches_url(url.as_str())
    {
        warn!(
            url = %url,
            "Url does not look like an official-account article; extraction may fail"
        );
    }
    source
}

fn finish(report: ActionReport, mode: RenderMode, output: &OutputArgs) -> Result<ExitCode> {
    if let Some(path) = &output.html {
        let document = match &report.result {
            Ok(outcome) => render_document(&outcome.display),
            Err(err) => render_error_document(&ErrorView::new(err.to_string(), mode)),
        };
        std::fs::write(path, document)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "HTML written");
    }

    if output.json {
        let json = match mode {
            RenderMode::Summarize => serde_json::to_string_pretty(&summary_result(&report))?,
            RenderMode::ExtractLinksOnly => {
                serde_json::to_string_pretty(&extraction_response(&report))?
            }
        };
        println!("{json}");
        return Ok(exit_code(&report));
    }

    match &report.result {
        Ok(outcome) => {
            let article = &outcome.page.article;
            println!(
                "# {}",
                if article.title.is_empty() {
                    leapread::presenter::UNTITLED
                } else {
                    article.title.as_str()
                }
            );
            let meta: Vec<&str> = [article.author.as_str(), article.publish_time.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect();
            if !meta.is_empty() {
                println!("{}", meta.join(" | "));
            }
            if let Some(summary) = &outcome.summary {
                println!("\n{summary}");
            }
            println!("\nLinks ({}):", outcome.page.links.len());
            if outcome.page.links.is_empty() {
                println!("{}", leapread::presenter::NO_LINKS_HINT);
            } else {
                println!("{}", links_copy_text(&outcome.page.links));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{} to retry.", retry_hint(mode));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn retry_hint(mode: RenderMode) -> &'static str {
    match mode {
        RenderMode::Summarize => "Run `leapread summarize` again",
        RenderMode::ExtractLinksOnly => "Run `leapread links` again",
    }
}

fn exit_code(report: &ActionReport) -> ExitCode {
    if report.result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn summary_result(report: &ActionReport) -> SummaryResult {
    match &report.result {
        Ok(outcome) => SummaryResult {
            success: true,
            summary: outcome.summary.clone(),
            error: None,
        },
        Err(err) => SummaryResult {
            success: false,
            summary: None,
            error: Some(err.to_string()),
        },
    }
}

fn extraction_response(report: &ActionReport) -> ExtractionResponse {
    match &report.result {
        Ok(outcome) => ExtractionResponse::from(Ok(outcome.page.clone())),
        Err(WorkflowError::Extract(err)) => ExtractionResponse::from(Err(err.clone())),
        Err(err) => ExtractionResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
        },
    }
}

async fn run_config(
    command: ConfigCommands,
    settings: &Settings,
    store: &dyn ConfigStore,
) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = settings.apply_overrides(store.get_config().await?);
            println!("store:          {}", settings.store_path().display());
            println!("endpoint:       {}", config.api_endpoint);
            println!("api key:        {}", config.masked_key());
            println!("model:          {}", config.model_name);
            println!("default prompt: {}", config.default_prompt);
        }
        ConfigCommands::Init => {
            let existing = store.get_config().await?;
            let config = Configuration {
                api_key: existing.api_key,
                ..Configuration::with_install_defaults()
            };
            store.save_config(&config).await?;
            println!("Configuration initialized at {}", settings.store_path().display());
            if config.api_key.is_empty() {
                println!("Set your key with `leapread config set --api-key <KEY>`.");
            }
        }
        ConfigCommands::Set {
            endpoint,
            api_key,
            model,
            default_prompt,
        } => {
            let mut config = store.get_config().await?;
            if let Some(endpoint) = endpoint {
                config.api_endpoint = endpoint;
            }
            if let Some(api_key) = api_key {
                config.api_key = api_key;
            }
            if let Some(model) = model {
                config.model_name = model;
            }
            if let Some(prompt) = default_prompt {
                config.default_prompt = prompt;
            }
            store.save_config(&config).await?;
            println!("Configuration saved.");
        }
    }
    Ok(())
}

async fn run_prompt(command: PromptCommands, store: &dyn ConfigStore) -> Result<()> {
    match command {
        PromptCommands::Show => {
            let prompt = store.get_prompt().await?;
            if prompt.trim().is_empty() {
                println!("{DEFAULT_PROMPT}");
            } else {
                println!("{prompt}");
            }
        }
        PromptCommands::Set { prompt } => {
            store.save_prompt(&prompt).await?;
            println!("Prompt override saved.");
        }
        PromptCommands::Reset => {
            store.clear_prompt().await?;
            println!("Prompt override removed.");
        }
    }
    Ok(())
}
