use citesight_core::research::{ExportError, LogEntry, LogStep, ResearchReport, Source};
use citesight_core::summarize::{
    Confidence, CrossValidation, CrossValidationPayload, SummaryArtifact, SummaryPayload,
};
use citesight_core::ExportFormat;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn sample_report(cross_validation: CrossValidation) -> ResearchReport {
    let first = SummaryPayload {
        summary: "Moderate coffee intake is linked to lower mortality.".into(),
        key_points: vec!["3-4 cups a day".into(), "observational data".into()],
        quotes: vec!["Coffee is not a health risk".into()],
        confidence_level: Confidence::High,
    };
    let empty = SummaryPayload {
        summary: "   ".into(),
        ..Default::default()
    };

    ResearchReport::Completed {
        question: "Is coffee healthy?".into(),
        sources: vec![
            Source {
                title: "Coffee and health".into(),
                url: "https://example.com/coffee".into(),
            },
            Source {
                title: "Blank".into(),
                url: "https://example.com/blank".into(),
            },
        ],
        summaries: vec![
            SummaryArtifact::new(&first, 1200),
            SummaryArtifact::new(&empty, 10),
        ],
        cross_validation,
        research_log: vec![LogEntry::new(
            LogStep::Search,
            json!({"sub_question": "Is coffee healthy?", "num_results": 2}),
        )],
    }
}

#[test]
fn test_text_export_sections() {
    let analysis = CrossValidationPayload {
        agreements: vec!["Coffee is safe in moderation".into()],
        contradictions: vec!["Effect on blood pressure".into()],
        unique_points: Vec::new(),
        confidence: Confidence::Medium,
    };
    let txt = sample_report(CrossValidation::from_payload(&analysis)).to_text();

    assert!(txt.starts_with("CiteSight Research Report\n\nResearch Question:\nIs coffee healthy?\n"));
    assert!(txt.contains("Sources:\n- Coffee and health: https://example.com/coffee\n"));
    assert!(txt.contains("Key Findings:\n\nSummary 1:\nSummary: Moderate coffee intake"));
    assert!(txt.contains("Key Points:\n- 3-4 cups a day\n- observational data\n"));
    assert!(txt.contains("Notable Quotes:\n> Coffee is not a health risk\n"));
    assert!(txt.contains("Confidence Level: high\n"));
    // the blank summary is left out
    assert!(!txt.contains("Summary 2:"));

    assert!(txt.contains("Cross-Validation Analysis:"));
    assert!(txt.contains("Points of Agreement:\n✓ Coffee is safe in moderation\n"));
    assert!(txt.contains("Points of Contradiction:\n⚠️ Effect on blood pressure\n"));
    assert!(!txt.contains("Unique Information:"));
    assert!(txt.ends_with("Overall Confidence: medium\n"));
}

#[test]
fn test_text_export_sentinel() {
    let txt = sample_report(CrossValidation::InsufficientSources).to_text();
    assert!(txt.contains("Cross-validation data not available"));
    assert!(!txt.contains("Cross-Validation Analysis:"));
}

#[test]
fn test_failed_report_lists_log() {
    let report = ResearchReport::Failed {
        error: "Research run exceeded deadline of 5 seconds".into(),
        research_log: vec![LogEntry::new(
            LogStep::QuestionBreakdown,
            json!({"sub_questions": ["q"]}),
        )],
    };
    let txt = report.to_text();
    assert!(txt.contains("Research failed: Research run exceeded deadline of 5 seconds"));
    assert!(txt.contains("question_breakdown {\"sub_questions\":[\"q\"]}"));
}

#[test]
fn test_write_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let report = sample_report(CrossValidation::InsufficientSources);

    let json_path = temp_dir.path().join("report.json");
    report.write_to(&json_path, ExportFormat::Json).unwrap();
    let written: ResearchReport =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(written, report);

    let txt_path = temp_dir.path().join("report.txt");
    report.write_to(&txt_path, ExportFormat::Text).unwrap();
    assert_eq!(fs::read_to_string(&txt_path).unwrap(), report.to_text());
}

#[test]
fn test_write_to_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("report.json");
    let report = sample_report(CrossValidation::InsufficientSources);

    match report.write_to(&path, ExportFormat::Json) {
        Err(ExportError::Io { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected an io error, got {other:?}"),
    }
}
