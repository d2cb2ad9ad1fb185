use std::fmt;

use crate::domain::prompt::SUMMARY_MARKER;

pub const NO_DIFFS_MESSAGE: &str = "No diffs found for the given timeframe.";

/// Every way a summarization attempt can end. Only `Standup` carries model text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    NoDiffs,
    Standup(String),
    AccessDenied(String),
    ApiError(String),
    Unexpected(String),
}

impl SummaryOutcome {
    /// Ensures the model text carries the summary marker.
    pub fn from_completion(text: &str) -> Self {
        if text.contains(SUMMARY_MARKER) {
            SummaryOutcome::Standup(text.to_string())
        } else {
            SummaryOutcome::Standup(format!("{SUMMARY_MARKER}\n{}", text.trim()))
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SummaryOutcome::AccessDenied(_)
                | SummaryOutcome::ApiError(_)
                | SummaryOutcome::Unexpected(_)
        )
    }
}

impl fmt::Display for SummaryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryOutcome::NoDiffs => f.write_str(NO_DIFFS_MESSAGE),
            SummaryOutcome::Standup(text) => f.write_str(text),
            SummaryOutcome::AccessDenied(detail) => write!(
                f,
                "❌ Access denied while calling Groq API.\n\
                 This often happens if:\n\
                 - You are behind a VPN that blocks Groq\n\
                 - Your API key is invalid or expired\n\n\
                 Details: {detail}"
            ),
            SummaryOutcome::ApiError(detail) => write!(f, "❌ API error from Groq: {detail}"),
            SummaryOutcome::Unexpected(detail) => write!(f, "❌ Unexpected error: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_marker_to_trimmed_text() {
        let outcome = SummaryOutcome::from_completion("\n  Yesterday I worked on...\n- a\n  ");
        assert_eq!(
            outcome.to_string(),
            "Standup:\nYesterday I worked on...\n- a"
        );
    }

    #[test]
    fn keeps_text_that_already_has_marker() {
        let text = "  Standup:\nYesterday I worked on...\n- b\n";
        assert_eq!(SummaryOutcome::from_completion(text).to_string(), text);
    }

    #[test]
    fn renders_no_diffs_literal() {
        assert_eq!(
            SummaryOutcome::NoDiffs.to_string(),
            "No diffs found for the given timeframe."
        );
    }

    #[test]
    fn renders_access_denied_with_causes_and_detail() {
        let rendered = SummaryOutcome::AccessDenied("Error code: 403 - blocked".to_string())
            .to_string();

        assert!(rendered.starts_with("❌ Access denied while calling Groq API."));
        assert!(rendered.contains("- You are behind a VPN that blocks Groq\n"));
        assert!(rendered.contains("- Your API key is invalid or expired\n\n"));
        assert!(rendered.ends_with("Details: Error code: 403 - blocked"));
    }

    #[test]
    fn renders_error_prefixes() {
        assert_eq!(
            SummaryOutcome::ApiError("Error code: 500 - boom".to_string()).to_string(),
            "❌ API error from Groq: Error code: 500 - boom"
        );
        assert_eq!(
            SummaryOutcome::Unexpected("timed out".to_string()).to_string(),
            "❌ Unexpected error: timed out"
        );
    }

    #[test]
    fn classifies_failures() {
        assert!(!SummaryOutcome::NoDiffs.is_failure());
        assert!(!SummaryOutcome::Standup("Standup:".to_string()).is_failure());
        assert!(SummaryOutcome::Unexpected(String::new()).is_failure());
    }
}
