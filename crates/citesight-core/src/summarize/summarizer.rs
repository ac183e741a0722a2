use async_trait::async_trait;
use tracing::{debug, warn};

use super::prompts::{build_cross_validation_prompt, build_source_blocks, build_summary_prompt};
use super::{CrossValidation, CrossValidationPayload, SummaryArtifact, SummaryPayload};
use crate::config::LLMConfig;
use crate::llm::{LLMError, OpenAIClient, LLM};
use crate::outcome::{DegradeReason, Outcome};

/// Summarizes sources and cross-validates summaries.
///
/// Neither method fails: problems come back as [`Outcome::Degraded`] with a
/// placeholder value.
#[async_trait]
pub trait SummarizationService: Send + Sync {
    /// Summarizes one source's text, using `context` (the sub-question) as guidance.
    async fn summarize(&self, content: &str, context: &str) -> Outcome<SummaryArtifact>;

    /// Produces a single joint analysis covering every given summary.
    async fn cross_validate(&self, summaries: &[SummaryArtifact]) -> Outcome<CrossValidation>;
}

#[async_trait]
impl SummarizationService for Box<dyn SummarizationService> {
    async fn summarize(&self, content: &str, context: &str) -> Outcome<SummaryArtifact> {
        (**self).summarize(content, context).await
    }

    async fn cross_validate(&self, summaries: &[SummaryArtifact]) -> Outcome<CrossValidation> {
        (**self).cross_validate(summaries).await
    }
}

/// [`SummarizationService`] backed by a completion service.
pub struct Summarizer<L: LLM> {
    llm: L,
}

impl Summarizer<OpenAIClient> {
    /// Builds the configured client; fails if the credential is missing.
    pub fn from_config(config: &LLMConfig) -> Result<Self, LLMError> {
        Ok(Self::new(OpenAIClient::from_config(config)?))
    }
}

impl<L: LLM> Summarizer<L> {
    pub fn new(llm: L) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl<L: LLM> SummarizationService for Summarizer<L> {
    async fn summarize(&self, content: &str, context: &str) -> Outcome<SummaryArtifact> {
        let source_length = content.chars().count();
        let prompt = build_summary_prompt(content, context);

        let reply = match self.llm.complete_json(&prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "summarization request failed");
                return Outcome::degraded(
                    SummaryArtifact::new(&SummaryPayload::unavailable(), source_length),
                    DegradeReason::ServiceFailure(err.to_string()),
                );
            }
        };

        match SummaryPayload::parse(&reply) {
            Ok(payload) => {
                debug!(key_points = payload.key_points.len(), "summary parsed");
                Outcome::Complete(SummaryArtifact::new(&payload, source_length))
            }
            Err(err) => {
                warn!(error = %err, "summary reply was not JSON, keeping raw text");
                Outcome::degraded(
                    SummaryArtifact::new(&SummaryPayload::permissive(reply), source_length),
                    DegradeReason::UnparsableReply,
                )
            }
        }
    }

    async fn cross_validate(&self, summaries: &[SummaryArtifact]) -> Outcome<CrossValidation> {
        let parsed: Vec<SummaryPayload> = summaries
            .iter()
            .filter_map(|artifact| match artifact.payload() {
                Ok(payload) => Some(payload),
                Err(err) => {
                    warn!(error = %err, "skipping summary with malformed payload");
                    None
                }
            })
            .collect();

        let prompt = build_cross_validation_prompt(&build_source_blocks(&parsed));

        let reply = match self.llm.complete_json(&prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "cross-validation request failed");
                return Outcome::degraded(
                    CrossValidation::zeroed(),
                    DegradeReason::ServiceFailure(err.to_string()),
                );
            }
        };

        match CrossValidationPayload::parse(&reply) {
            Ok(payload) => Outcome::Complete(CrossValidation::from_payload(&payload)),
            Err(err) => {
                warn!(error = %err, "cross-validation reply was not JSON");
                Outcome::degraded(CrossValidation::zeroed(), DegradeReason::UnparsableReply)
            }
        }
    }
}
