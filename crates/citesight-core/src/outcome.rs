//! Result type for services that never fail toward their caller.
//!
//! Summarization and cross-validation always hand back a value. When the
//! value is a stand-in rather than real model output, it arrives as
//! [`Outcome::Degraded`] together with the reason, so the orchestrator can
//! decide what to keep without catching anything.

use std::fmt;

/// Why a service handed back a substitute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// The model replied, but not with the structured data asked for.
    UnparsableReply,
    /// The completion service could not be reached or returned an error.
    ServiceFailure(String),
}

impl DegradeReason {
    /// Short machine-readable tag, used in research log details.
    pub fn as_str(&self) -> &'static str {
        match self {
            DegradeReason::UnparsableReply => "unparsable_reply",
            DegradeReason::ServiceFailure(_) => "service_failure",
        }
    }
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::UnparsableReply => write!(f, "model reply was not valid JSON"),
            DegradeReason::ServiceFailure(msg) => write!(f, "completion service failed: {}", msg),
        }
    }
}

/// A value that is either genuine or a degraded substitute.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Complete(T),
    Degraded { value: T, reason: DegradeReason },
}

impl<T> Outcome<T> {
    pub fn degraded(value: T, reason: DegradeReason) -> Self {
        Outcome::Degraded { value, reason }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Complete(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Outcome::Complete(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&DegradeReason> {
        match self {
            Outcome::Complete(_) => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_inner_returns_value_either_way() {
        assert_eq!(Outcome::Complete(3).into_inner(), 3);
        assert_eq!(
            Outcome::degraded(4, DegradeReason::UnparsableReply).into_inner(),
            4
        );
    }

    #[test]
    fn test_reason_tags() {
        let outcome = Outcome::degraded((), DegradeReason::ServiceFailure("boom".into()));
        assert!(outcome.is_degraded());
        assert_eq!(outcome.reason().map(|r| r.as_str()), Some("service_failure"));
        assert!(outcome.reason().unwrap().to_string().contains("boom"));
    }
}
