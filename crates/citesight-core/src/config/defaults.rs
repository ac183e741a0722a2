//! Default values for CiteSight configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// LLM Defaults
// ============================================================================

/// Default LLM provider.
pub const DEFAULT_LLM_PROVIDER: &str = "openrouter";

/// Default model (OpenRouter's free DeepSeek model).
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-0528:free";

/// Default max tokens for LLM responses.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default timeout for a single completion request, in seconds.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

// OpenRouter defaults
/// Default OpenRouter API URL.
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";
/// Site URL sent as `HTTP-Referer` for OpenRouter attribution.
pub const DEFAULT_SITE_URL: &str = "https://cite-sight.com";
/// Site name sent as `X-Title` for OpenRouter attribution.
pub const DEFAULT_SITE_NAME: &str = "CiteSight";

// OpenAI defaults
/// Default OpenAI API URL.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

// Ollama defaults
/// Default Ollama API URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/v1";
/// Default Ollama model.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

// ============================================================================
// Search Defaults
// ============================================================================

/// DuckDuckGo HTML search endpoint.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Maximum number of search results considered per query.
pub const DEFAULT_MAX_SEARCH_RESULTS: usize = 5;

/// Maximum number of search attempts before the run is aborted.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Base backoff delay in milliseconds, doubled after every failed attempt.
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Default network timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent for search and page requests.
pub const DEFAULT_USER_AGENT: &str = "CiteSight Research Agent/1.0";

// ============================================================================
// Fetch Defaults
// ============================================================================

/// Maximum characters of extracted page text passed on to summarization.
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 20_000;

// ============================================================================
// Pipeline Defaults
// ============================================================================

/// Number of fetch+summarize items in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 1;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default log level when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// Files
// ============================================================================

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "citesight.toml";

/// Directory name under the user config dir.
pub const USER_CONFIG_DIR: &str = "citesight";
