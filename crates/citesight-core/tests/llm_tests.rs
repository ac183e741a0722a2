use citesight_core::config::{DEFAULT_MODEL, DEFAULT_OLLAMA_MODEL, DEFAULT_OPENROUTER_URL};
use citesight_core::llm::Provider;
use citesight_core::{LLMConfig, LLMError, OpenAIClient};

mod openai {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAIClient::new("https://api.example.com/v1", "test-key", "gpt-4");
        assert_eq!(client.model(), "gpt-4");
    }

    #[test]
    fn test_named_constructors() {
        assert_eq!(OpenAIClient::openai("k", "gpt-4o").model(), "gpt-4o");
        assert_eq!(OpenAIClient::ollama("llama3").model(), "llama3");
        assert_eq!(
            OpenAIClient::openrouter("k", "deepseek/deepseek-r1").model(),
            "deepseek/deepseek-r1"
        );
    }

    #[test]
    fn test_builder_chain() {
        let client = OpenAIClient::openrouter("k", "m")
            .with_max_tokens(200)
            .with_temperature(0.1)
            .with_timeout(std::time::Duration::from_secs(5))
            .with_header("X-Title", "CiteSight");
        assert_eq!(client.model(), "m");
    }
}

mod provider {
    use super::*;

    #[test]
    fn test_default_provider() {
        assert!(matches!(Provider::default(), Provider::OpenRouter { .. }));
    }

    #[test]
    fn test_missing_key_fails_for_openrouter() {
        let config = LLMConfig::default();
        let result = OpenAIClient::from_config(&config);
        assert!(matches!(result, Err(LLMError::MissingApiKey)));
    }

    #[test]
    fn test_blank_key_fails_for_openai() {
        let config = LLMConfig {
            provider: "openai".to_string(),
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            OpenAIClient::from_config(&config),
            Err(LLMError::MissingApiKey)
        ));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = LLMConfig {
            provider: "ollama".to_string(),
            ..Default::default()
        };
        let client = OpenAIClient::from_config(&config).unwrap();
        assert_eq!(client.model(), DEFAULT_OLLAMA_MODEL);
    }

    #[test]
    fn test_openrouter_uses_default_model() {
        let config = LLMConfig {
            api_key: Some("sk-or-test".to_string()),
            ..Default::default()
        };
        let client = OpenAIClient::from_config(&config).unwrap();
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(client.base_url(), DEFAULT_OPENROUTER_URL);
    }

    #[test]
    fn test_openrouter_base_url_override() {
        let config = LLMConfig {
            api_key: Some("sk-or-test".to_string()),
            base_url: Some("http://127.0.0.1:9999/v1".to_string()),
            ..Default::default()
        };
        let client = OpenAIClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9999/v1");
    }

    #[test]
    fn test_unknown_provider() {
        let config = LLMConfig {
            provider: "anthropic".to_string(),
            api_key: Some("k".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Provider::from_config(&config),
            Err(LLMError::UnknownProvider(_))
        ));
    }
}
