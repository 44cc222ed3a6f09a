use serde::{Deserialize, Serialize};

use crate::extract::{JsonShape, extract_json};
use crate::lenient;
use crate::words::{WordCount, word_frequencies};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthAnswer {
    pub answer: String,
    pub tips: Vec<String>,
    pub tip_words: Vec<WordCount>,
}

impl HealthAnswer {
    pub fn new(answer: String, tips: Vec<String>) -> Self {
        let tip_words = word_frequencies(tips.iter().map(String::as_str));
        Self {
            answer,
            tips,
            tip_words,
        }
    }

    /// Split a free-text reply into the prose answer and its JSON tip list.
    ///
    /// The answer is everything before the list; a reply with no list keeps
    /// its full text and no tips.
    pub fn from_reply(text: &str) -> Self {
        let tips = extract_json(text, JsonShape::Array)
            .map(|value| lenient::list_items(&value))
            .unwrap_or_default();
        let answer = text.split("\n[").next().unwrap_or(text).trim().to_string();
        Self::new(answer, tips)
    }
}
