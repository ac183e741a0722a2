use thiserror::Error;

/// Errors that can occur during completion requests.
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("Missing API key. Set OPENROUTER_API_KEY (or CITESIGHT_LLM_API_KEY) for your provider.")]
    MissingApiKey,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited. Try again later.")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LLMError::RequestFailed(format!("timed out: {}", err))
        } else {
            LLMError::Network(err.to_string())
        }
    }
}
