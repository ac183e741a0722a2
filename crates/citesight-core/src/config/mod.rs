//! Configuration management for CiteSight.
//!
//! Configuration is resolved in the following order:
//! 1. An explicitly given file (`--config`), if any
//! 2. Project-local `citesight.toml` file
//! 3. User config `~/.config/citesight/config.toml`
//! 4. Built-in defaults
//!
//! The first file found is used. Environment variables are applied on top of
//! whichever source won.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion service configuration.
    pub llm: LLMConfig,

    /// Web search configuration.
    pub search: SearchConfig,

    /// Page fetching configuration.
    pub fetch: FetchConfig,

    /// Pipeline orchestration configuration.
    pub pipeline: PipelineConfig,

    /// Log output configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from default locations.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(PROJECT_CONFIG_FILE).exists() {
            return Self::from_file(PROJECT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply overrides from the process environment.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using the given variable lookup.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("CITESIGHT_LLM_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Some(model) = lookup("CITESIGHT_LLM_MODEL") {
            self.llm.model = Some(model);
        }
        if let Some(url) = lookup("CITESIGHT_LLM_BASE_URL") {
            self.llm.base_url = Some(url);
        }
        if let Some(key) = lookup("CITESIGHT_LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }
        parse_into(&lookup, "CITESIGHT_LLM_MAX_TOKENS", &mut self.llm.max_tokens);
        parse_into(&lookup, "CITESIGHT_LLM_TEMPERATURE", &mut self.llm.temperature);

        parse_into(&lookup, "CITESIGHT_MAX_SEARCH_RESULTS", &mut self.search.max_results);
        parse_into(&lookup, "CITESIGHT_MAX_RETRIES", &mut self.search.max_retries);

        // One timeout knob covers every network call.
        if let Some(secs) = lookup("CITESIGHT_TIMEOUT").and_then(|v| v.parse::<u64>().ok()) {
            self.search.timeout_secs = secs;
            self.fetch.timeout_secs = secs;
            self.llm.timeout_secs = secs;
        }

        if let Some(agent) = lookup("CITESIGHT_USER_AGENT") {
            self.search.user_agent = agent.clone();
            self.fetch.user_agent = agent;
        }

        if let Some(level) = lookup("CITESIGHT_LOG_LEVEL") {
            self.logging.level = level;
        }

        if self.llm.api_key.is_none() {
            let fallback = match self.llm.provider.as_str() {
                "openai" => "OPENAI_API_KEY",
                _ => "OPENROUTER_API_KEY",
            };
            self.llm.api_key = lookup(fallback);
        }
    }

    /// Checks values that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_retries == 0 {
            return Err(ConfigError::Invalid(
                "search.max_retries must be at least 1".to_string(),
            ));
        }
        if self.pipeline.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.concurrency must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(format!(
                "llm.temperature must be between 0 and 2, got {}",
                self.llm.temperature
            )));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn parse_into<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(value) = lookup(key).and_then(|v| v.parse().ok()) {
        *target = value;
    }
}

/// Completion service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Provider name: "openrouter", "openai", or "ollama".
    pub provider: String,

    /// Model name (provider-specific).
    pub model: Option<String>,

    /// Base URL for API.
    pub base_url: Option<String>,

    /// API key (can also be set via environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Attribution URL sent to OpenRouter.
    pub site_url: String,

    /// Attribution name sent to OpenRouter.
    pub site_name: String,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_LLM_PROVIDER.to_string(),
            model: None,
            base_url: None,
            api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            site_url: DEFAULT_SITE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl LLMConfig {
    /// Get the model name, falling back to provider defaults.
    pub fn model_or_default(&self) -> String {
        self.model.clone().unwrap_or_else(|| match self.provider.as_str() {
            "openai" => DEFAULT_OPENAI_MODEL.to_string(),
            "ollama" => DEFAULT_OLLAMA_MODEL.to_string(),
            _ => DEFAULT_MODEL.to_string(),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Web search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// HTML search endpoint.
    pub endpoint: String,

    /// Maximum results returned per query.
    pub max_results: usize,

    /// Total attempts before giving up.
    pub max_retries: u32,

    /// Backoff base delay in milliseconds.
    pub base_delay_ms: u64,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_SEARCH_RESULTS,
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

/// Page fetching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Extracted text is cut to this many characters (0 = unlimited).
    pub max_content_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Pipeline orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fetch+summarize items processed at once per sub-question.
    pub concurrency: usize,

    /// Deadline for a whole research run, in seconds. Unbounded if unset.
    pub run_timeout_secs: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            run_timeout_secs: None,
        }
    }
}

impl PipelineConfig {
    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_secs.map(Duration::from_secs)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or filter directive used when `RUST_LOG` is not set.
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.provider, DEFAULT_LLM_PROVIDER);
        assert_eq!(config.llm.max_tokens, 1000);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.max_retries, 3);
        assert_eq!(config.search.timeout_secs, 30);
        assert_eq!(config.fetch.user_agent, DEFAULT_USER_AGENT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[llm]"));
        assert!(toml_str.contains("[search]"));
        assert!(toml_str.contains("[fetch]"));
        assert!(toml_str.contains("[pipeline]"));
        assert!(!toml_str.contains("api_key"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CITESIGHT_LLM_MODEL", "some/model"),
            ("CITESIGHT_MAX_SEARCH_RESULTS", "8"),
            ("CITESIGHT_TIMEOUT", "12"),
            ("CITESIGHT_LLM_TEMPERATURE", "not-a-number"),
            ("OPENROUTER_API_KEY", "sk-or-test"),
        ]);
        let mut config = Config::default();
        config.apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.llm.model.as_deref(), Some("some/model"));
        assert_eq!(config.search.max_results, 8);
        assert_eq!(config.search.timeout_secs, 12);
        assert_eq!(config.fetch.timeout_secs, 12);
        assert_eq!(config.llm.timeout_secs, 12);
        assert_eq!(config.llm.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-or-test"));
    }

    #[test]
    fn test_explicit_key_beats_provider_fallback() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CITESIGHT_LLM_API_KEY", "explicit"),
            ("OPENROUTER_API_KEY", "fallback"),
        ]);
        let mut config = Config::default();
        config.apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.llm.api_key.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_validate_rejects_zero_retries() {
        let mut config = Config::default();
        config.search.max_retries = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_model_or_default() {
        let mut config = LLMConfig::default();
        assert_eq!(config.model_or_default(), DEFAULT_MODEL);

        config.provider = "ollama".to_string();
        assert_eq!(config.model_or_default(), DEFAULT_OLLAMA_MODEL);

        config.model = Some("custom-model".to_string());
        assert_eq!(config.model_or_default(), "custom-model");
    }
}
