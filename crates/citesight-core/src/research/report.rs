use serde::{Deserialize, Serialize};

use super::log::LogEntry;
use crate::summarize::{CrossValidation, SummaryArtifact};

/// A page whose summary made it into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

/// The output of one research run.
///
/// Serialized without a tag: callers tell the two shapes apart by the
/// presence of the `error` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResearchReport {
    /// The run hit a fatal error.
    Failed {
        error: String,
        research_log: Vec<LogEntry>,
    },
    Completed {
        question: String,
        /// Parallel to `summaries`.
        sources: Vec<Source>,
        summaries: Vec<SummaryArtifact>,
        cross_validation: CrossValidation,
        research_log: Vec<LogEntry>,
    },
}

impl ResearchReport {
    pub fn is_error(&self) -> bool {
        matches!(self, ResearchReport::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResearchReport::Failed { error, .. } => Some(error),
            ResearchReport::Completed { .. } => None,
        }
    }

    pub fn research_log(&self) -> &[LogEntry] {
        match self {
            ResearchReport::Failed { research_log, .. }
            | ResearchReport::Completed { research_log, .. } => research_log,
        }
    }

    pub fn sources(&self) -> &[Source] {
        match self {
            ResearchReport::Completed { sources, .. } => sources,
            ResearchReport::Failed { .. } => &[],
        }
    }

    pub fn summaries(&self) -> &[SummaryArtifact] {
        match self {
            ResearchReport::Completed { summaries, .. } => summaries,
            ResearchReport::Failed { .. } => &[],
        }
    }

    pub fn cross_validation(&self) -> Option<&CrossValidation> {
        match self {
            ResearchReport::Completed {
                cross_validation, ..
            } => Some(cross_validation),
            ResearchReport::Failed { .. } => None,
        }
    }
}
