use crate::config::{
    LLMConfig, DEFAULT_MODEL, DEFAULT_OPENAI_MODEL, DEFAULT_SITE_NAME, DEFAULT_SITE_URL,
};
use super::{LLMError, OpenAIClient};

/// Completion provider configuration.
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenRouter (default)
    OpenRouter {
        base_url: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
        site_url: String,
        site_name: String,
    },
    /// OpenAI or any compatible endpoint that needs a key
    OpenAI {
        base_url: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
    },
    /// Local Ollama instance
    Ollama {
        base_url: Option<String>,
        model: String,
    },
}

impl Default for Provider {
    fn default() -> Self {
        Provider::OpenRouter {
            base_url: None,
            api_key: None,
            model: None,
            site_url: DEFAULT_SITE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl Provider {
    /// Creates a provider from LLMConfig.
    ///
    /// The credential is taken from the config as-is; environment fallbacks
    /// are resolved when the config is loaded.
    pub fn from_config(config: &LLMConfig) -> Result<Self, LLMError> {
        match config.provider.to_lowercase().as_str() {
            "openrouter" => Ok(Provider::OpenRouter {
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
                model: config.model.clone(),
                site_url: config.site_url.clone(),
                site_name: config.site_name.clone(),
            }),
            "openai" => Ok(Provider::OpenAI {
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
                model: config.model.clone(),
            }),
            "ollama" => Ok(Provider::Ollama {
                base_url: config.base_url.clone(),
                model: config.model_or_default(),
            }),
            other => Err(LLMError::UnknownProvider(other.to_string())),
        }
    }

    /// Creates a client from the provider configuration.
    ///
    /// A configured base URL overrides the provider's public endpoint.
    pub fn build(self) -> Result<OpenAIClient, LLMError> {
        match self {
            Provider::OpenRouter {
                base_url,
                api_key,
                model,
                site_url,
                site_name,
            } => {
                let key = require_key(api_key)?;
                let mdl = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
                let client = match base_url {
                    Some(base) => OpenAIClient::new(base, key, mdl),
                    None => OpenAIClient::openrouter(key, mdl),
                };

                Ok(client
                    .with_header("HTTP-Referer", site_url)
                    .with_header("X-Title", site_name))
            }

            Provider::OpenAI {
                base_url,
                api_key,
                model,
            } => {
                let key = require_key(api_key)?;
                let mdl = model.unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

                Ok(match base_url {
                    Some(base) => OpenAIClient::new(base, key, mdl),
                    None => OpenAIClient::openai(key, mdl),
                })
            }

            Provider::Ollama { base_url, model } => Ok(match base_url {
                Some(base) => OpenAIClient::new(base, "", model),
                None => OpenAIClient::ollama(model),
            }),
        }
    }
}

fn require_key(key: Option<String>) -> Result<String, LLMError> {
    key.filter(|k| !k.trim().is_empty())
        .ok_or(LLMError::MissingApiKey)
}
