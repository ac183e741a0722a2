use super::SummaryPayload;

/// Builds the prompt asking for a structured summary of one source.
pub fn build_summary_prompt(content: &str, context: &str) -> String {
    format!(
        r#"Please analyze and summarize the following content. Provide your response in valid JSON format using this exact structure:
{{
    "summary": "A concise summary of the content",
    "key_points": ["Key point 1", "Key point 2", ...],
    "quotes": ["Notable quote 1", "Notable quote 2", ...],
    "confidence_level": "high/medium/low"
}}

If provided, consider this context: {context}

Content to analyze:
{content}"#
    )
}

/// Renders parsed summaries as numbered per-source blocks.
pub fn build_source_blocks(summaries: &[SummaryPayload]) -> String {
    summaries
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "Source {}:\nSummary: {}\nKey Points: {}",
                i + 1,
                s.summary,
                s.key_points.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the prompt asking for one joint analysis of all sources.
pub fn build_cross_validation_prompt(source_blocks: &str) -> String {
    format!(
        r#"Please analyze these different source summaries and provide your response in valid JSON format using this exact structure:
{{
    "agreements": ["Point of agreement 1", "Point of agreement 2", ...],
    "contradictions": ["Contradiction 1", "Contradiction 2", ...],
    "unique_points": ["Unique point 1", "Unique point 2", ...],
    "confidence": "high/medium/low"
}}

Sources to analyze:
{source_blocks}"#
    )
}
