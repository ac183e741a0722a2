//! Page fetching: URL in, readable title and text out, or nothing.

mod extract;
mod http;

pub use extract::{parse_page, ContentExtractor, ExtractedPage, HtmlExtractor};
pub use http::HttpContentFetcher;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Readable content pulled from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedContent {
    pub title: String,
    /// Main body text, never empty.
    pub content: String,
    pub url: String,
}

/// Best-effort page fetcher.
///
/// `None` means the page had no usable content for whatever reason; the
/// reason only shows up in the logs.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<FetchedContent>;
}

#[async_trait]
impl ContentFetcher for Box<dyn ContentFetcher> {
    async fn fetch(&self, url: &str) -> Option<FetchedContent> {
        (**self).fetch(url).await
    }
}

/// Reasons a page yields no content. Never leaves [`ContentFetcher::fetch`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("page contained no extractable text")]
    EmptyContent,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Request(format!("timed out: {}", err))
        } else {
            FetchError::Request(err.to_string())
        }
    }
}
