use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Pipeline step a log entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStep {
    QuestionBreakdown,
    Search,
    ContentProcessing,
}

impl LogStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStep::QuestionBreakdown => "question_breakdown",
            LogStep::Search => "search",
            LogStep::ContentProcessing => "content_processing",
        }
    }
}

impl std::fmt::Display for LogStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub step: LogStep,
    pub details: Value,
}

impl LogEntry {
    pub fn new(step: LogStep, details: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            step,
            details,
        }
    }
}

/// Append-only step log for a single research run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResearchLog {
    entries: Vec<LogEntry>,
}

impl ResearchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry stamped now.
    pub fn record(&mut self, step: LogStep, details: Value) {
        self.push(LogEntry::new(step, details));
    }

    /// Appends an entry that was stamped earlier.
    pub fn push(&mut self, entry: LogEntry) {
        info!(step = %entry.step, details = %entry.details, "research step");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_appends_in_order() {
        let mut log = ResearchLog::new();
        log.record(LogStep::QuestionBreakdown, json!({"sub_questions": ["q"]}));
        log.record(LogStep::Search, json!({"sub_question": "q", "num_results": 0}));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].step, LogStep::QuestionBreakdown);
        assert_eq!(log.entries()[1].details["num_results"], 0);
        assert!(log.entries()[0].timestamp <= log.entries()[1].timestamp);
    }

    #[test]
    fn test_step_names() {
        let entry = LogEntry::new(LogStep::ContentProcessing, json!({}));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["step"], "content_processing");
        assert!(value["timestamp"].is_string());
    }
}
