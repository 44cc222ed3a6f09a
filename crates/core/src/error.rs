use thiserror::Error;

/// Failure kinds for the assisted (LLM-backed) features and their storage.
///
/// The AI kinds never reach a user as a fault: every feature recovers them
/// into its fallback payload and turns the kind into a tip via [`AssistError::tip`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistError {
    #[error("no completion API key configured")]
    NoCredential,

    #[error("completion API key rejected")]
    AuthFailure,

    #[error("completion API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("no JSON {0} found in completion text")]
    ExtractionFailure(&'static str),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AssistError {
    /// Short machine-readable name, used as a log field and metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            AssistError::NoCredential => "no_credential",
            AssistError::AuthFailure => "auth_failure",
            AssistError::Upstream { .. } => "upstream_error",
            AssistError::Transport(_) => "transport_error",
            AssistError::ExtractionFailure(_) => "extraction_failure",
            AssistError::Storage(_) => "storage_failure",
        }
    }

    /// Explanatory string shown next to a fallback payload.
    pub fn tip(&self) -> String {
        match self {
            AssistError::NoCredential => "set GROQ_API_KEY for real-time AI results".to_string(),
            AssistError::AuthFailure => {
                "API key invalid or expired, please check your GROQ_API_KEY".to_string()
            }
            AssistError::Upstream { status, .. } => format!("API error {status}"),
            AssistError::Transport(msg) => format!("request failed: {msg}"),
            AssistError::ExtractionFailure(_) => "the AI reply could not be read".to_string(),
            AssistError::Storage(_) => "something went wrong, please try again".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure_tip_mentions_key() {
        assert!(AssistError::AuthFailure.tip().contains("invalid or expired"));
    }

    #[test]
    fn upstream_tip_embeds_status() {
        let err = AssistError::Upstream {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.tip(), "API error 503");
        assert_eq!(err.kind(), "upstream_error");
    }
}
