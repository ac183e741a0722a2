use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Text stored in place of a cross-validation when fewer than two summaries exist.
pub const INSUFFICIENT_SOURCES_TEXT: &str = "Not enough sources for cross-validation";

/// Summary text used when the completion service could not be reached.
pub const SUMMARY_UNAVAILABLE_TEXT: &str = "Error generating summary";

/// Self-reported confidence attached to model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    /// Case-insensitive; anything unrecognised counts as medium.
    pub fn parse_lenient(s: &str) -> Self {
        let s = s.trim().to_lowercase();
        if s.starts_with("high") {
            Confidence::High
        } else if s.starts_with("low") {
            Confidence::Low
        } else {
            Confidence::Medium
        }
    }
}

// Null, numbers and other non-strings read as medium instead of failing the payload.
impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Confidence::parse_lenient(&s),
            _ => Confidence::Medium,
        })
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured summary of a single source, as requested from the model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryPayload {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<String>,
    #[serde(default)]
    pub confidence_level: Confidence,
}

impl SummaryPayload {
    /// Parses a model reply, tolerating Markdown code fences.
    pub fn parse(reply: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(extract_json(reply))
    }

    /// Keeps a reply that was not JSON as the summary text.
    pub fn permissive(raw: impl Into<String>) -> Self {
        Self {
            summary: raw.into(),
            key_points: Vec::new(),
            quotes: Vec::new(),
            confidence_level: Confidence::Medium,
        }
    }

    /// Placeholder for a source the service could not summarize.
    pub fn unavailable() -> Self {
        Self {
            summary: SUMMARY_UNAVAILABLE_TEXT.to_string(),
            key_points: Vec::new(),
            quotes: Vec::new(),
            confidence_level: Confidence::Low,
        }
    }

    /// True when there is nothing worth showing.
    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty() && self.key_points.is_empty() && self.quotes.is_empty()
    }
}

/// Summary of one source as it appears in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryArtifact {
    /// JSON-serialized [`SummaryPayload`].
    #[serde(rename = "summary")]
    pub summary_text: String,
    /// Length of the summarized text in characters.
    pub source_length: usize,
}

impl SummaryArtifact {
    pub fn new(payload: &SummaryPayload, source_length: usize) -> Self {
        Self {
            // A struct of strings always serializes.
            summary_text: serde_json::to_string(payload).unwrap_or_default(),
            source_length,
        }
    }

    pub fn payload(&self) -> Result<SummaryPayload, serde_json::Error> {
        serde_json::from_str(&self.summary_text)
    }
}

/// Joint analysis of several summaries, as requested from the model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrossValidationPayload {
    #[serde(default)]
    pub agreements: Vec<String>,
    #[serde(default)]
    pub contradictions: Vec<String>,
    #[serde(default)]
    pub unique_points: Vec<String>,
    #[serde(default)]
    pub confidence: Confidence,
}

impl CrossValidationPayload {
    pub fn parse(reply: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(extract_json(reply))
    }

    /// Result used when the model reply is unusable.
    pub fn zeroed() -> Self {
        Self {
            agreements: Vec::new(),
            contradictions: Vec::new(),
            unique_points: Vec::new(),
            confidence: Confidence::Low,
        }
    }
}

/// Cross-validation slot of a report.
///
/// Serialized as `{"cross_validation": "<payload JSON or sentinel text>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CrossValidationWire", into = "CrossValidationWire")]
pub enum CrossValidation {
    /// JSON-serialized [`CrossValidationPayload`].
    Analysis { payload: String },
    /// Fewer than two summaries were available.
    InsufficientSources,
}

impl CrossValidation {
    pub fn from_payload(payload: &CrossValidationPayload) -> Self {
        CrossValidation::Analysis {
            payload: serde_json::to_string(payload).unwrap_or_default(),
        }
    }

    pub fn zeroed() -> Self {
        Self::from_payload(&CrossValidationPayload::zeroed())
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, CrossValidation::InsufficientSources)
    }

    /// The parsed analysis, if there is one and it parses.
    pub fn analysis(&self) -> Option<CrossValidationPayload> {
        match self {
            CrossValidation::Analysis { payload } => serde_json::from_str(payload).ok(),
            CrossValidation::InsufficientSources => None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct CrossValidationWire {
    cross_validation: String,
}

impl From<CrossValidationWire> for CrossValidation {
    fn from(wire: CrossValidationWire) -> Self {
        if wire.cross_validation == INSUFFICIENT_SOURCES_TEXT {
            CrossValidation::InsufficientSources
        } else {
            CrossValidation::Analysis {
                payload: wire.cross_validation,
            }
        }
    }
}

impl From<CrossValidation> for CrossValidationWire {
    fn from(value: CrossValidation) -> Self {
        let cross_validation = match value {
            CrossValidation::Analysis { payload } => payload,
            CrossValidation::InsufficientSources => INSUFFICIENT_SOURCES_TEXT.to_string(),
        };
        CrossValidationWire { cross_validation }
    }
}

/// Extracts JSON from a response that might be wrapped in markdown code blocks.
///
/// Handles both multi-line fences and a single-line "```json {...}```".
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(fenced) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Language tag, if any, runs up to the first whitespace or JSON opener.
    let body = fenced.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let body = match body.rfind("```") {
        Some(end) => &body[..end],
        None => body,
    };

    body.trim()
}
