use thiserror::Error;

/// Errors that can occur while searching.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Request(String),

    #[error("Search backend returned HTTP {0}")]
    Status(u16),

    #[error("Failed to read search response: {0}")]
    Body(String),

    #[error("Failed to parse search results: {0}")]
    Parse(String),

    #[error("Failed to perform search after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<SearchError>,
    },
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Request(err.to_string())
    }
}
