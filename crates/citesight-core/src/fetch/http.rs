use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{ContentExtractor, ContentFetcher, FetchError, FetchedContent, HtmlExtractor};
use crate::config::FetchConfig;

/// Fetcher that checks reachability over HTTP, then hands the URL to an
/// extractor.
pub struct HttpContentFetcher<E: ContentExtractor = HtmlExtractor> {
    client: Client,
    extractor: E,
}

impl HttpContentFetcher<HtmlExtractor> {
    /// Creates a fetcher using the bundled HTML extractor.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let extractor = HtmlExtractor::new(config)?;
        Self::with_extractor(config, extractor)
    }
}

impl<E: ContentExtractor> HttpContentFetcher<E> {
    pub fn with_extractor(config: &FetchConfig, extractor: E) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, extractor })
    }

    async fn try_fetch(&self, url: &str) -> Result<FetchedContent, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let page = self.extractor.extract(url).await?;
        if page.text.trim().is_empty() {
            return Err(FetchError::EmptyContent);
        }

        Ok(FetchedContent {
            title: page.title,
            content: page.text,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl<E: ContentExtractor> ContentFetcher for HttpContentFetcher<E> {
    async fn fetch(&self, url: &str) -> Option<FetchedContent> {
        match self.try_fetch(url).await {
            Ok(content) => {
                debug!(url, chars = content.content.len(), "fetched page content");
                Some(content)
            }
            Err(err) => {
                warn!(url, error = %err, "no usable content");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ExtractedPage;
    use std::time::Duration;

    struct FixedExtractor(ExtractedPage);

    #[async_trait]
    impl ContentExtractor for FixedExtractor {
        async fn extract(&self, _url: &str) -> Result<ExtractedPage, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn quick_config() -> FetchConfig {
        FetchConfig {
            timeout_secs: 2,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_none() {
        let fetcher = HttpContentFetcher::new(&quick_config()).unwrap();
        // Port 1 on loopback refuses connections.
        assert!(fetcher.fetch("http://127.0.0.1:1/page").await.is_none());
    }

    #[tokio::test]
    async fn test_reachability_gate_runs_before_extraction() {
        let extractor = FixedExtractor(ExtractedPage {
            title: "t".into(),
            text: "some text".into(),
        });
        let fetcher = HttpContentFetcher::with_extractor(&quick_config(), extractor).unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            fetcher.fetch("http://127.0.0.1:1/page"),
        )
        .await
        .unwrap();
        assert!(result.is_none());
    }
}
