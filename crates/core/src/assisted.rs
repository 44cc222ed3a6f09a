use serde::{Deserialize, Serialize};

use crate::error::AssistError;

/// Response envelope for every AI-backed feature.
///
/// `degraded` is set whenever `data` came from the fallback table rather than
/// the model; `tip` then explains why. `raw` keeps the model's text when one
/// was received, for a "show AI response" panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assisted<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl<T> Assisted<T> {
    /// A payload produced from a model reply.
    pub fn live(data: T, raw: impl Into<String>) -> Self {
        Self {
            data,
            tip: None,
            degraded: false,
            raw: Some(raw.into()),
        }
    }

    /// A fallback payload, with a tip composed from the feature note and the failure.
    pub fn fallback(data: T, note: &str, cause: &AssistError) -> Self {
        Self {
            data,
            tip: Some(format!("{note} ({})", cause.tip())),
            degraded: true,
            raw: None,
        }
    }

    pub fn with_raw(mut self, raw: Option<String>) -> Self {
        self.raw = raw;
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Assisted<U> {
        Assisted {
            data: f(self.data),
            tip: self.tip,
            degraded: self.degraded,
            raw: self.raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_tip_combines_note_and_cause() {
        let out = Assisted::fallback(3, "Basic hospital data for delhi", &AssistError::AuthFailure);
        assert!(out.degraded);
        assert_eq!(
            out.tip.as_deref(),
            Some("Basic hospital data for delhi (API key invalid or expired, please check your GROQ_API_KEY)")
        );
    }

    #[test]
    fn live_payload_skips_tip_when_serialized() {
        let out = Assisted::live(vec!["a"], "raw text");
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("tip").is_none());
        assert_eq!(json["degraded"], false);
        assert_eq!(json["raw"], "raw text");
    }
}
