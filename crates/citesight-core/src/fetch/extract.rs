use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};

use super::FetchError;
use crate::config::FetchConfig;

/// Title and main text of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub text: String,
}

/// Downloads a page and pulls out its readable content.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractedPage, FetchError>;
}

/// Extractor built on `scraper`.
pub struct HtmlExtractor {
    client: Client,
    max_chars: usize,
}

impl HtmlExtractor {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            max_chars: config.max_content_chars,
        })
    }
}

#[async_trait]
impl ContentExtractor for HtmlExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Extraction(e.to_string()))?;

        parse_page(&body, self.max_chars)
    }
}

// Subtrees that never hold article text.
const SKIP_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "form", "noscript", "svg", "iframe",
];

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "td", "th", "article",
    "section", "main", "blockquote", "pre", "figcaption", "dt", "dd",
];

// Below this many characters a content region is treated as a false hit.
const MIN_REGION_CHARS: usize = 100;

/// Extracts title and main text from an HTML document.
///
/// `max_chars` of 0 disables truncation.
pub fn parse_page(html: &str, max_chars: usize) -> Result<ExtractedPage, FetchError> {
    let doc = Html::parse_document(html);

    let title = page_title(&doc)?;

    let mut text = String::new();
    for css in ["article", "main", "[role=\"main\"]"] {
        if let Some(region) = doc.select(&selector(css)?).next() {
            let candidate = region_text(region);
            if candidate.chars().count() >= MIN_REGION_CHARS {
                text = candidate;
                break;
            }
        }
    }
    if text.is_empty() {
        if let Some(body) = doc.select(&selector("body")?).next() {
            text = region_text(body);
        }
    }

    Ok(ExtractedPage {
        title,
        text: truncate_chars(&text, max_chars),
    })
}

fn page_title(doc: &Html) -> Result<String, FetchError> {
    let og = selector("meta[property=\"og:title\"]")?;
    if let Some(content) = doc
        .select(&og)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
    {
        return Ok(content.to_string());
    }

    Ok(doc
        .select(&selector("title")?)
        .next()
        .map(|el| collapse_inline(&el.text().collect::<String>()))
        .unwrap_or_default())
}

fn region_text(el: ElementRef<'_>) -> String {
    let mut buf = String::new();
    collect_text(el, &mut buf);
    collapse_whitespace(&buf)
}

fn collect_text(el: ElementRef<'_>, buf: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => buf.push_str(text),
            Node::Element(element) => {
                let tag = element.name();
                if SKIP_TAGS.contains(&tag) {
                    continue;
                }
                let is_block = BLOCK_TAGS.contains(&tag);
                if is_block {
                    buf.push('\n');
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, buf);
                }
                if is_block {
                    buf.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Collapses spaces within lines and drops blank lines, keeping paragraph
/// breaks as single newlines.
fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(collapse_inline)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_inline(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return text.to_string();
    }
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Extraction(format!("selector '{css}': {e}")))
}
