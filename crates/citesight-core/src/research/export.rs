use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use super::report::ResearchReport;
use crate::summarize::CrossValidation;

/// Output formats a report can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

impl ResearchReport {
    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts the report to the plain-text download format.
    pub fn to_text(&self) -> String {
        match self {
            ResearchReport::Failed {
                error,
                research_log,
            } => {
                let mut txt = String::from("CiteSight Research Report\n\n");
                txt.push_str(&format!("Research failed: {}\n", error));
                if !research_log.is_empty() {
                    txt.push_str("\nResearch Log:\n");
                    for entry in research_log {
                        txt.push_str(&format!(
                            "{} {} {}\n",
                            entry.timestamp.to_rfc3339(),
                            entry.step,
                            entry.details
                        ));
                    }
                }
                txt
            }
            ResearchReport::Completed {
                question,
                sources,
                summaries,
                cross_validation,
                ..
            } => {
                let mut txt = String::from("CiteSight Research Report\n\n");

                txt.push_str("Research Question:\n");
                txt.push_str(question);
                txt.push_str("\n\n");

                txt.push_str("Sources:\n");
                for source in sources {
                    txt.push_str(&format!("- {}: {}\n", source.title, source.url));
                }
                txt.push('\n');

                txt.push_str("Key Findings:\n");
                for (i, artifact) in summaries.iter().enumerate() {
                    let Ok(payload) = artifact.payload() else {
                        continue;
                    };
                    if payload.is_empty() {
                        continue;
                    }

                    txt.push_str(&format!("\nSummary {}:\n", i + 1));
                    txt.push_str(&format!("Summary: {}\n", payload.summary));
                    if !payload.key_points.is_empty() {
                        txt.push_str("\nKey Points:\n");
                        for point in &payload.key_points {
                            txt.push_str(&format!("- {}\n", point));
                        }
                    }
                    if !payload.quotes.is_empty() {
                        txt.push_str("\nNotable Quotes:\n");
                        for quote in &payload.quotes {
                            txt.push_str(&format!("> {}\n", quote));
                        }
                    }
                    txt.push_str(&format!("Confidence Level: {}\n", payload.confidence_level));
                }

                push_cross_validation(&mut txt, cross_validation);
                txt
            }
        }
    }

    /// Writes the report to `path` in the given format.
    pub fn write_to(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let body = self.render(format)?;
        fs::write(path, body).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn render(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Json => self.to_json(),
            ExportFormat::Text => Ok(self.to_text()),
        }
    }
}

fn push_cross_validation(txt: &mut String, cross_validation: &CrossValidation) {
    let Some(analysis) = cross_validation.analysis() else {
        txt.push_str("\nCross-validation data not available\n");
        return;
    };

    txt.push_str("\nCross-Validation Analysis:\n");

    let sections = [
        ("Points of Agreement", "✓", &analysis.agreements),
        ("Points of Contradiction", "⚠️", &analysis.contradictions),
        ("Unique Information", "🔍", &analysis.unique_points),
    ];
    for (heading, marker, points) in sections {
        if points.is_empty() {
            continue;
        }
        txt.push_str(&format!("\n{}:\n", heading));
        for point in points {
            txt.push_str(&format!("{} {}\n", marker, point));
        }
    }

    txt.push_str(&format!("\nOverall Confidence: {}\n", analysis.confidence));
}
