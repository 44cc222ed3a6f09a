//! Word frequencies for word-cloud rendering.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "your", "you", "are", "can", "may", "not", "any", "this", "that",
    "from", "into", "per", "day", "more", "less", "use", "all", "but", "its", "out", "has", "have",
    "get", "take", "been", "will", "such", "also", "like", "some", "than",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// Count words of three or more letters, most frequent first, ties alphabetical.
pub fn word_frequencies<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<WordCount> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for text in texts {
        for word in text
            .split(|c: char| !c.is_alphabetic())
            .map(str::to_lowercase)
            .filter(|w| w.chars().count() >= 3 && !STOPWORDS.contains(&w.as_str()))
        {
            *counts.entry(word).or_default() += 1;
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_orders_words() {
        let words = word_frequencies(["Nausea, dizziness", "nausea and rash", "Rash!"]);
        assert_eq!(words[0], WordCount { word: "nausea".to_string(), count: 2 });
        assert_eq!(words[1], WordCount { word: "rash".to_string(), count: 2 });
        assert_eq!(words[2].word, "dizziness");
        assert!(words.iter().all(|w| w.word != "and"));
    }
}
