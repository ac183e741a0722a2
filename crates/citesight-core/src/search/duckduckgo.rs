use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use super::{RetryPolicy, SearchError, SearchProvider, SearchResult};
use crate::config::SearchConfig;

/// Host used to absolutize DuckDuckGo's relative redirect links.
const DDG_ORIGIN: &str = "https://duckduckgo.com";

/// Search through DuckDuckGo's HTML endpoint (no API key required).
pub struct DuckDuckGoSearch {
    client: Client,
    endpoint: String,
    max_results: usize,
    retry: RetryPolicy,
}

impl DuckDuckGoSearch {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_results: config.max_results,
            retry: RetryPolicy::from_config(config),
        })
    }

    /// Replaces the retry policy (tests use a zero delay).
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn search_once(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .header("Accept", "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Body(e.to_string()))?;

        parse_results(&body, self.max_results)
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let results = self.retry.run(|_| self.search_once(query)).await?;
        info!(query, num_results = results.len(), "search completed");
        Ok(results)
    }
}

/// Extracts results from a DuckDuckGo HTML result page.
///
/// Only the first `max_results` result blocks are looked at; blocks without a
/// title link or a snippet are dropped, so fewer results may come back.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let result_sel = selector(".result")?;
    let link_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let doc = Html::parse_document(html);
    let mut results = Vec::new();

    for block in doc.select(&result_sel).take(max_results) {
        let (Some(anchor), Some(snippet)) = (
            block.select(&link_sel).next(),
            block.select(&snippet_sel).next(),
        ) else {
            continue;
        };

        let href = anchor.value().attr("href").unwrap_or("").trim();
        if href.is_empty() {
            continue;
        }

        results.push(SearchResult {
            title: collect_text(anchor.text()),
            link: resolve_link(href),
            snippet: collect_text(snippet.text()),
        });
    }

    Ok(results)
}

/// Turns a result href into an absolute destination URL.
///
/// DuckDuckGo wraps destinations as `//duckduckgo.com/l/?uddg=<encoded>&rut=…`;
/// the `uddg` parameter is decoded. Protocol-relative links get `https:`,
/// scheme-less links get `https://`.
pub fn resolve_link(href: &str) -> String {
    let href = href.trim();
    let link = unwrap_redirect(href).unwrap_or_else(|| href.to_string());
    normalize_scheme(&link)
}

fn unwrap_redirect(href: &str) -> Option<String> {
    if !href.contains("uddg=") {
        return None;
    }

    let absolute = if href.starts_with('/') && !href.starts_with("//") {
        format!("{DDG_ORIGIN}{href}")
    } else {
        normalize_scheme(href)
    };

    Url::parse(&absolute)
        .ok()?
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn normalize_scheme(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn collect_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("selector '{css}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
<html><body>
  <div class="result results_links web-result">
    <h2><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fen.wikipedia.org%2Fwiki%2FRust_(programming_language)&amp;rut=abc">
      Rust (programming language)
    </a></h2>
    <a class="result__snippet" href="#">Rust is a general-purpose   programming language.</a>
  </div>
  <div class="result">
    <h2><a class="result__a" href="www.rust-lang.org/learn">Learn Rust</a></h2>
  </div>
  <div class="result">
    <h2><a class="result__a" href="https://doc.rust-lang.org/book/">The Book</a></h2>
    <div class="result__snippet">An introductory book about Rust.</div>
  </div>
</body></html>
"##;

    #[test]
    fn test_parse_results() {
        let results = parse_results(PAGE, 5).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].title, "Rust (programming language)");
        assert_eq!(
            results[0].link,
            "https://en.wikipedia.org/wiki/Rust_(programming_language)"
        );
        assert_eq!(results[0].snippet, "Rust is a general-purpose programming language.");

        // the block without a snippet is skipped
        assert_eq!(results[1].link, "https://doc.rust-lang.org/book/");
    }

    #[test]
    fn test_parse_results_honours_max() {
        let results = parse_results(PAGE, 1).unwrap();
        assert_eq!(results.len(), 1);

        // The second block lacks a snippet, so only one survives out of two.
        let results = parse_results(PAGE, 2).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_parse_empty_page() {
        let results = parse_results("<html><body>No results.</body></html>", 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1&rut=x"),
            "https://example.com/a?b=1"
        );
        assert_eq!(
            resolve_link("/l/?uddg=https%3A%2F%2Fexample.org%2F"),
            "https://example.org/"
        );
        assert_eq!(resolve_link("//example.com/page"), "https://example.com/page");
        assert_eq!(resolve_link("example.com/page"), "https://example.com/page");
        assert_eq!(resolve_link("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_redirect_to_schemeless_target() {
        assert_eq!(
            resolve_link("//duckduckgo.com/l/?uddg=example.net%2Fx"),
            "https://example.net/x"
        );
    }
}
