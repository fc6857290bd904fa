use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// Where an article page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Url(Url),
    File(PathBuf),
}

impl PageSource {
    /// `http(s)://` inputs are urls, anything else is treated as a file path.
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::File(PathBuf::from(input)),
        }
    }

    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Url(url) => Some(url),
            Self::File(_) => None,
        }
    }
}

impl std::fmt::Display for PageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A page decoded to UTF-8 and ready for extraction.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedPage {
    /// Final url after redirects, or the file path.
    pub location: String,
    pub charset: String,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert!(matches!(
            PageSource::parse("https://mp.weixin.qq.com/s/abc"),
            PageSource::Url(_)
        ));
        assert!(matches!(
            PageSource::parse("saved/article.html"),
            PageSource::File(_)
        ));
        assert!(matches!(
            PageSource::parse("file:///tmp/a.html"),
            PageSource::File(_)
        ));
    }
}
