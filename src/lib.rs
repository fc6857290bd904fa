pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod presenter;
pub mod summarizer;
pub mod workflow;
