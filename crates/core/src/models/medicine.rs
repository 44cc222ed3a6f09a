//! Session medicine list, AI medicine insights and the dashboard charts.

use std::fmt::Write as _;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::lenient;
use crate::words::{WordCount, word_frequencies};

/// Days assumed when a duration has no digits.
pub const DEFAULT_DURATION_DAYS: u32 = 5;

/// Longest course the dashboard will chart.
pub const MAX_DURATION_DAYS: u32 = 365;

/// A medicine entered by the user. Lives only in the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medicine {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub duration: String,
}

impl Medicine {
    /// Digits in the duration text ("5 days" → 5, "1-2 weeks" → 12), capped at
    /// [`MAX_DURATION_DAYS`].
    pub fn duration_days(&self) -> u32 {
        match self.stated_days() {
            Some(days) => days.min(u64::from(MAX_DURATION_DAYS)) as u32,
            None => DEFAULT_DURATION_DAYS,
        }
    }

    /// False when the duration text names more than [`MAX_DURATION_DAYS`].
    pub fn duration_in_range(&self) -> bool {
        self.stated_days()
            .is_none_or(|days| days <= u64::from(MAX_DURATION_DAYS))
    }

    /// Too many digits to fit a `u64` reads as `u64::MAX`.
    fn stated_days(&self) -> Option<u64> {
        let digits: String = self.duration.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        Some(digits.parse().unwrap_or(u64::MAX))
    }

    pub fn describe(&self) -> String {
        [&self.name, &self.dosage, &self.frequency, &self.duration]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedicineInfo {
    pub uses: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub side_effects: String,
    pub warnings: String,
    pub summary: String,
}

impl MedicineInfo {
    pub fn from_reply(value: &JsonValue) -> Self {
        Self {
            uses: lenient::text(value, "uses"),
            kind: lenient::text(value, "type"),
            side_effects: lenient::text_any(
                value,
                &["side_effects", "common side effects", "common_side_effects"],
            ),
            warnings: lenient::text(value, "warnings"),
            summary: lenient::text(value, "summary"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombinationInfo {
    pub interactions: Vec<String>,
    pub summary: String,
}

impl CombinationInfo {
    /// `interactions` may arrive as one string or as a list.
    pub fn from_reply(value: &JsonValue) -> Self {
        Self {
            interactions: lenient::string_list(value, "interactions"),
            summary: lenient::text(value, "summary"),
        }
    }

    pub fn interactions_text(&self) -> String {
        if self.interactions.is_empty() {
            "None found".to_string()
        } else {
            self.interactions.join("; ")
        }
    }
}

/// Medicine together with what the model said about it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicineInsight {
    pub medicine: Medicine,
    pub info: MedicineInfo,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeCount {
    pub kind: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationBar {
    pub medicine: String,
    pub days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoseEntry {
    pub medicine: String,
    pub day: NaiveDate,
    pub dosage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionEdge {
    pub from: String,
    pub to: String,
}

/// Chart data for the medicine dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicineCharts {
    pub type_distribution: Vec<TypeCount>,
    pub durations: Vec<DurationBar>,
    pub timeline: Vec<DoseEntry>,
    pub interaction_edges: Vec<InteractionEdge>,
    pub side_effect_words: Vec<WordCount>,
}

impl MedicineCharts {
    pub fn build(insights: &[MedicineInsight], combination: &CombinationInfo, today: NaiveDate) -> Self {
        let medicines: Vec<&Medicine> = insights.iter().map(|i| &i.medicine).collect();
        Self {
            type_distribution: type_distribution(insights),
            durations: medicines
                .iter()
                .map(|m| DurationBar {
                    medicine: m.name.clone(),
                    days: m.duration_days(),
                })
                .collect(),
            timeline: timeline(&medicines, today),
            interaction_edges: interaction_edges(&medicines, combination),
            side_effect_words: word_frequencies(
                insights.iter().map(|i| i.info.side_effects.as_str()),
            ),
        }
    }
}

/// Count of each medicine type, in first-seen order.
fn type_distribution(insights: &[MedicineInsight]) -> Vec<TypeCount> {
    let mut counts: Vec<TypeCount> = Vec::new();
    for insight in insights {
        match counts.iter_mut().find(|c| c.kind == insight.info.kind) {
            Some(entry) => entry.count += 1,
            None => counts.push(TypeCount {
                kind: insight.info.kind.clone(),
                count: 1,
            }),
        }
    }
    counts
}

/// One dose marker per medicine per day, starting today.
fn timeline(medicines: &[&Medicine], today: NaiveDate) -> Vec<DoseEntry> {
    medicines
        .iter()
        .flat_map(|m| {
            (0..m.duration_days()).filter_map(move |offset| {
                today
                    .checked_add_days(Days::new(offset as u64))
                    .map(|day| DoseEntry {
                        medicine: m.name.clone(),
                        day,
                        dosage: m.dosage.clone(),
                    })
            })
        })
        .collect()
}

/// Pairs of medicines that are both named in the interaction notes.
fn interaction_edges(medicines: &[&Medicine], combination: &CombinationInfo) -> Vec<InteractionEdge> {
    let text = combination.interactions.join(" ").to_lowercase();
    if text.is_empty() || text == "none found" {
        return Vec::new();
    }

    let mut edges = Vec::new();
    for (i, a) in medicines.iter().enumerate() {
        for b in &medicines[i + 1..] {
            let (na, nb) = (a.name.to_lowercase(), b.name.to_lowercase());
            if na != nb && text.contains(&na) && text.contains(&nb) {
                edges.push(InteractionEdge {
                    from: a.name.clone(),
                    to: b.name.clone(),
                });
            }
        }
    }
    edges
}

/// The "Download AI Summary" text.
pub fn dashboard_summary(insights: &[MedicineInsight], combination: &CombinationInfo) -> String {
    let mut out = String::from("AI Medicine Dashboard Summary\n\n");
    for insight in insights {
        let m = &insight.medicine;
        let _ = writeln!(
            out,
            "{} ({} {} {}): {}",
            m.name, m.dosage, m.frequency, m.duration, insight.info.summary
        );
    }
    let _ = write!(
        out,
        "\nCombination Summary: {}\nInteractions: {}\n",
        combination.summary,
        combination.interactions_text()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn medicine(name: &str, duration: &str) -> Medicine {
        Medicine {
            name: name.to_string(),
            dosage: "500mg".to_string(),
            frequency: "2x/day".to_string(),
            duration: duration.to_string(),
        }
    }

    fn insight(name: &str, duration: &str, kind: &str, side_effects: &str) -> MedicineInsight {
        MedicineInsight {
            medicine: medicine(name, duration),
            info: MedicineInfo {
                uses: "Pain".to_string(),
                kind: kind.to_string(),
                side_effects: side_effects.to_string(),
                warnings: "None".to_string(),
                summary: format!("{name} summary"),
            },
            degraded: false,
            tip: None,
        }
    }

    #[test]
    fn duration_digits_with_default() {
        assert_eq!(medicine("a", "7 days").duration_days(), 7);
        assert_eq!(medicine("a", "").duration_days(), 5);
        assert_eq!(medicine("a", "a week").duration_days(), 5);
    }

    #[test]
    fn huge_duration_is_clamped() {
        let m = medicine("a", "4000000000 days");
        assert_eq!(m.duration_days(), MAX_DURATION_DAYS);
        assert!(!m.duration_in_range());

        let m = medicine("a", "99999999999999999999999 days");
        assert_eq!(m.duration_days(), MAX_DURATION_DAYS);
        assert!(!m.duration_in_range());

        assert!(medicine("a", "365 days").duration_in_range());
        assert!(medicine("a", "a week").duration_in_range());
    }

    #[test]
    fn timeline_is_bounded_by_the_cap() {
        let insights = vec![insight("Aspirin", "2000000 days", "NSAID", "")];
        let combo = CombinationInfo {
            interactions: Vec::new(),
            summary: String::new(),
        };
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let charts = MedicineCharts::build(&insights, &combo, today);
        assert_eq!(charts.timeline.len(), MAX_DURATION_DAYS as usize);
        assert_eq!(charts.durations[0].days, MAX_DURATION_DAYS);
    }

    #[test]
    fn info_accepts_spaced_side_effect_key() {
        let info = MedicineInfo::from_reply(&json!({
            "uses": "Fever", "type": "Analgesic", "common side effects": ["Nausea", "Rash"]
        }));
        assert_eq!(info.kind, "Analgesic");
        assert_eq!(info.side_effects, "Nausea, Rash");
        assert_eq!(info.summary, "Unknown");
    }

    #[test]
    fn combination_accepts_string_interactions() {
        let combo = CombinationInfo::from_reply(&json!({
            "interactions": "Aspirin and Ibuprofen increase bleeding risk",
            "summary": "Be careful"
        }));
        assert_eq!(combo.interactions.len(), 1);
    }

    #[test]
    fn charts_from_insights() {
        let insights = vec![
            insight("Aspirin", "3 days", "NSAID", "bleeding, nausea"),
            insight("Ibuprofen", "2 days", "NSAID", "nausea"),
            insight("Amoxicillin", "", "Antibiotic", "diarrhea"),
        ];
        let combo = CombinationInfo {
            interactions: vec!["Aspirin with ibuprofen raises bleeding risk".to_string()],
            summary: "Avoid combining NSAIDs".to_string(),
        };
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let charts = MedicineCharts::build(&insights, &combo, today);

        assert_eq!(
            charts.type_distribution,
            vec![
                TypeCount { kind: "NSAID".to_string(), count: 2 },
                TypeCount { kind: "Antibiotic".to_string(), count: 1 },
            ]
        );
        assert_eq!(charts.durations[2].days, 5);
        assert_eq!(charts.timeline.len(), 3 + 2 + 5);
        assert_eq!(charts.timeline[1].day, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(
            charts.interaction_edges,
            vec![InteractionEdge { from: "Aspirin".to_string(), to: "Ibuprofen".to_string() }]
        );
        assert_eq!(charts.side_effect_words[0].word, "nausea");
    }

    #[test]
    fn summary_text_lists_every_medicine() {
        let insights = vec![insight("Dolo", "5 days", "Analgesic", "")];
        let combo = CombinationInfo {
            interactions: Vec::new(),
            summary: "Fine".to_string(),
        };
        let text = dashboard_summary(&insights, &combo);
        assert!(text.contains("Dolo (500mg 2x/day 5 days): Dolo summary"));
        assert!(text.contains("Interactions: None found"));
    }
}
