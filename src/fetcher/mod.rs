pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{PageFetcher, PageLoader};
pub use errors::FetchError;
pub use types::{LoadedPage, PageSource};
