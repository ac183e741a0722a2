use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::decompose::{IdentityDecomposer, QuestionDecomposer};
use super::log::{LogEntry, LogStep, ResearchLog};
use super::report::{ResearchReport, Source};
use crate::config::{Config, PipelineConfig};
use crate::fetch::{ContentFetcher, FetchError, HttpContentFetcher};
use crate::llm::LLMError;
use crate::outcome::{DegradeReason, Outcome};
use crate::search::{DuckDuckGoSearch, SearchError, SearchProvider, SearchResult};
use crate::summarize::{CrossValidation, SummarizationService, Summarizer, SummaryArtifact};

/// Errors that end a research run, or stop a pipeline from being built.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("Research run exceeded deadline of {} seconds", .0.as_secs())]
    DeadlineExceeded(Duration),

    #[error("Failed to set up content fetcher: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to set up completion service: {0}")]
    LLM(#[from] LLMError),
}

/// Drives search, fetch, summarize and cross-validate for one question.
pub struct ResearchPipeline {
    search: Box<dyn SearchProvider>,
    fetcher: Box<dyn ContentFetcher>,
    summarizer: Box<dyn SummarizationService>,
    decomposer: Box<dyn QuestionDecomposer>,
    config: PipelineConfig,
}

/// What came out of fetching and summarizing one search result.
struct ProcessedItem {
    kept: Option<(Source, SummaryArtifact)>,
    entry: LogEntry,
}

impl ResearchPipeline {
    pub fn new(
        search: impl SearchProvider + 'static,
        fetcher: impl ContentFetcher + 'static,
        summarizer: impl SummarizationService + 'static,
    ) -> Self {
        Self {
            search: Box::new(search),
            fetcher: Box::new(fetcher),
            summarizer: Box::new(summarizer),
            decomposer: Box::new(IdentityDecomposer),
            config: PipelineConfig::default(),
        }
    }

    /// Builds the DuckDuckGo / HTTP / completion-service pipeline.
    ///
    /// Fails if the completion service has no credential.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let search = DuckDuckGoSearch::new(&config.search)?;
        let fetcher = HttpContentFetcher::new(&config.fetch)?;
        let summarizer = Summarizer::from_config(&config.llm)?;

        Ok(Self::new(search, fetcher, summarizer).with_config(config.pipeline.clone()))
    }

    pub fn with_decomposer(mut self, decomposer: impl QuestionDecomposer + 'static) -> Self {
        self.decomposer = Box::new(decomposer);
        self
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the full research flow for `question`.
    ///
    /// Never fails: a fatal error comes back as [`ResearchReport::Failed`]
    /// carrying the log recorded up to that point.
    pub async fn research(&self, question: &str) -> ResearchReport {
        let run_id = Uuid::new_v4();
        let span = info_span!("research", %run_id);
        self.research_with_deadline(question).instrument(span).await
    }

    async fn research_with_deadline(&self, question: &str) -> ResearchReport {
        let mut log = ResearchLog::new();

        let result = match self.config.run_timeout() {
            Some(deadline) => tokio::time::timeout(deadline, self.run(question, &mut log))
                .await
                .unwrap_or(Err(PipelineError::DeadlineExceeded(deadline))),
            None => self.run(question, &mut log).await,
        };

        match result {
            Ok(report) => report,
            Err(err) => {
                error!(error = %err, "research run failed");
                ResearchReport::Failed {
                    error: err.to_string(),
                    research_log: log.into_entries(),
                }
            }
        }
    }

    async fn run(
        &self,
        question: &str,
        log: &mut ResearchLog,
    ) -> Result<ResearchReport, PipelineError> {
        let sub_questions = self.decomposer.decompose(question).await;
        log.record(
            LogStep::QuestionBreakdown,
            json!({ "sub_questions": sub_questions }),
        );

        let mut sources = Vec::new();
        let mut summaries = Vec::new();

        for sub_question in &sub_questions {
            let results = self.search.search(sub_question).await?;
            log.record(
                LogStep::Search,
                json!({ "sub_question": sub_question, "num_results": results.len() }),
            );

            let mut items = stream::iter(
                results
                    .into_iter()
                    .map(|result| self.process_result(result, sub_question)),
            )
            .buffered(self.config.concurrency.max(1));

            while let Some(item) = items.next().await {
                log.push(item.entry);
                if let Some((source, summary)) = item.kept {
                    sources.push(source);
                    summaries.push(summary);
                }
            }
        }

        let cross_validation = self.cross_validate(&summaries).await;

        info!(
            sources = sources.len(),
            insufficient = cross_validation.is_insufficient(),
            "research complete"
        );

        Ok(ResearchReport::Completed {
            question: question.to_string(),
            sources,
            summaries,
            cross_validation,
            research_log: log.entries().to_vec(),
        })
    }

    async fn process_result(&self, result: SearchResult, context: &str) -> ProcessedItem {
        let url = result.link.clone();

        let Some(content) = self.fetcher.fetch(&url).await else {
            return ProcessedItem::failed(&url, "no_content");
        };

        let outcome = self.summarizer.summarize(&content.content, context).await;
        let degraded = match outcome.reason() {
            Some(DegradeReason::ServiceFailure(_)) => {
                return ProcessedItem::failed(&url, "summary_failed");
            }
            Some(reason) => Some(reason.as_str()),
            None => None,
        };

        let mut details = json!({ "url": url, "success": true });
        if let Some(reason) = degraded {
            details["degraded"] = json!(reason);
        }

        // Cite the page's own title; the search anchor text is only a fallback.
        let title = if content.title.trim().is_empty() {
            result.title
        } else {
            content.title
        };
        let source = Source {
            title,
            url: content.url,
        };
        ProcessedItem {
            kept: Some((source, outcome.into_inner())),
            entry: LogEntry::new(LogStep::ContentProcessing, details),
        }
    }

    async fn cross_validate(&self, summaries: &[SummaryArtifact]) -> CrossValidation {
        if summaries.len() < 2 {
            info!(num_summaries = summaries.len(), "not enough sources for cross-validation");
            return CrossValidation::InsufficientSources;
        }

        let outcome = self.summarizer.cross_validate(summaries).await;
        let confidence = outcome
            .value()
            .analysis()
            .map(|analysis| analysis.confidence.as_str());
        match &outcome {
            Outcome::Complete(_) => {
                info!(num_summaries = summaries.len(), confidence, "cross-validation complete");
            }
            Outcome::Degraded { reason, .. } => {
                warn!(num_summaries = summaries.len(), %reason, "cross-validation degraded");
            }
        }

        outcome.into_inner()
    }
}

impl ProcessedItem {
    fn failed(url: &str, reason: &str) -> Self {
        Self {
            kept: None,
            entry: LogEntry::new(
                LogStep::ContentProcessing,
                json!({ "url": url, "success": false, "reason": reason }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_message() {
        let err = PipelineError::DeadlineExceeded(Duration::from_secs(90));
        assert_eq!(
            err.to_string(),
            "Research run exceeded deadline of 90 seconds"
        );
    }

    #[test]
    fn test_search_error_is_transparent() {
        let err = PipelineError::from(SearchError::RetriesExhausted {
            attempts: 3,
            last: Box::new(SearchError::Status(503)),
        });
        assert!(err
            .to_string()
            .starts_with("Failed to perform search after 3 attempts: "));
    }
}
