use async_trait::async_trait;

/// Splits a research question into the sub-questions that get searched.
#[async_trait]
pub trait QuestionDecomposer: Send + Sync {
    /// Must return at least one sub-question.
    async fn decompose(&self, question: &str) -> Vec<String>;
}

/// Searches the question as asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityDecomposer;

#[async_trait]
impl QuestionDecomposer for IdentityDecomposer {
    async fn decompose(&self, question: &str) -> Vec<String> {
        vec![question.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identity_keeps_question() {
        let subs = IdentityDecomposer.decompose("What is CRISPR?").await;
        assert_eq!(subs, vec!["What is CRISPR?".to_string()]);
    }
}
