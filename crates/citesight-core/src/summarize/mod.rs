//! Per-source summaries and joint cross-validation through a completion service.

mod payload;
pub mod prompts;
mod summarizer;

pub use payload::{
    extract_json, Confidence, CrossValidation, CrossValidationPayload, SummaryArtifact,
    SummaryPayload, INSUFFICIENT_SOURCES_TEXT, SUMMARY_UNAVAILABLE_TEXT,
};
pub use summarizer::{SummarizationService, Summarizer};
