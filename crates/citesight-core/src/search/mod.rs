//! Web search: query in, ranked candidate links out.

mod duckduckgo;
mod error;
mod retry;

pub use duckduckgo::{parse_results, resolve_link, DuckDuckGoSearch};
pub use error::SearchError;
pub use retry::RetryPolicy;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One ranked hit from a search backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    /// Resolved, absolute destination URL.
    pub link: String,
    pub snippet: String,
}

/// A search backend.
///
/// Implementations retry transient failures themselves; an `Err` means the
/// backend is unusable and the research run should stop.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns at most the configured number of results, best first.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

#[async_trait]
impl SearchProvider for Box<dyn SearchProvider> {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        (**self).search(query).await
    }
}
