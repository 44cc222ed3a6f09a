//! Static payloads served whenever the completion endpoint cannot be used.
//!
//! Every feature's canned answer lives in one table, embedded at build time
//! from `fallbacks.json` and optionally replaced by a file at startup.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::diet::MealAnalysis;
use crate::models::exercise::{WorkoutType, WorkoutVideo};
use crate::models::health::HealthAnswer;
use crate::models::hospital::Hospital;
use crate::models::meal_plan::MealPlan;
use crate::models::medicine::{CombinationInfo, Medicine, MedicineInfo};
use crate::models::nutrition::NutritionFacts;

const EMBEDDED: &str = include_str!("fallbacks.json");

/// Diet fallback health score is capped here.
const MAX_FALLBACK_HEALTH_SCORE: f64 = 95.0;
const MAX_FALLBACK_SUGGESTIONS: usize = 3;

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("failed to read fallback table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fallback table: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct Keyed<T> {
    keyword: String,
    #[serde(flatten)]
    entry: T,
}

#[derive(Debug, Clone, Deserialize)]
struct FoodFacts {
    facts: NutritionFacts,
}

#[derive(Debug, Clone, Deserialize)]
struct NutritionSection {
    foods: Vec<Keyed<FoodFacts>>,
    default_pairings: Vec<String>,
    generic: NutritionFacts,
}

#[derive(Debug, Clone, Deserialize)]
struct FoodAnalysis {
    analysis: MealAnalysis,
}

#[derive(Debug, Clone, Deserialize)]
struct MealAnalysisSection {
    foods: Vec<Keyed<FoodAnalysis>>,
    generic: MealAnalysis,
}

#[derive(Debug, Clone, Deserialize)]
struct CityHospitals {
    city: String,
    hospitals: Vec<Hospital>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenericHospital {
    name: String,
    address_suffix: String,
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct HospitalSection {
    cities: Vec<CityHospitals>,
    generic: Vec<GenericHospital>,
}

#[derive(Debug, Clone, Deserialize)]
struct Topic {
    answer: String,
}

#[derive(Debug, Clone, Deserialize)]
struct HealthSection {
    topics: Vec<Keyed<Topic>>,
    topic_tips: Vec<String>,
    generic_answer: String,
    generic_tips: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MedicineEntry {
    info: MedicineInfo,
}

#[derive(Debug, Clone, Deserialize)]
struct MedicineSection {
    medicines: Vec<Keyed<MedicineEntry>>,
    generic: MedicineInfo,
}

#[derive(Debug, Clone, Deserialize)]
struct InteractionRule {
    keywords: Vec<String>,
    note: String,
}

#[derive(Debug, Clone, Deserialize)]
struct InteractionSection {
    rules: Vec<InteractionRule>,
    default_note: String,
}

#[derive(Debug, Clone, Deserialize)]
struct VideoTemplate {
    title: String,
    url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct WorkoutVideos {
    workout_type: String,
    videos: Vec<VideoTemplate>,
}

/// Feature key to canned payload. Loaded once and shared read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackTable {
    nutrition: NutritionSection,
    meal_analysis: MealAnalysisSection,
    meal_plan: MealPlan,
    hospitals: HospitalSection,
    health: HealthSection,
    medicine: MedicineSection,
    interactions: InteractionSection,
    workouts: Vec<WorkoutVideos>,
}

impl FallbackTable {
    /// The table compiled into the binary.
    pub fn embedded() -> Result<Self, FallbackError> {
        Self::from_json(EMBEDDED)
    }

    /// Keywords are lowercased on load; lookups lowercase the user's text.
    pub fn from_json(json: &str) -> Result<Self, FallbackError> {
        let mut table: Self = serde_json::from_str(json)?;
        table.lowercase_keywords();
        Ok(table)
    }

    fn lowercase_keywords(&mut self) {
        fn lower(s: &mut String) {
            *s = s.to_lowercase();
        }
        self.nutrition.foods.iter_mut().for_each(|f| lower(&mut f.keyword));
        self.meal_analysis.foods.iter_mut().for_each(|f| lower(&mut f.keyword));
        self.hospitals.cities.iter_mut().for_each(|c| lower(&mut c.city));
        self.health.topics.iter_mut().for_each(|t| lower(&mut t.keyword));
        self.medicine.medicines.iter_mut().for_each(|m| lower(&mut m.keyword));
        self.interactions
            .rules
            .iter_mut()
            .flat_map(|r| r.keywords.iter_mut())
            .for_each(lower);
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FallbackError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FallbackError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// First keyword contained in the description wins.
    pub fn nutrition_for(&self, description: &str) -> (NutritionFacts, String) {
        let lowered = description.to_lowercase();
        let section = &self.nutrition;
        match section.foods.iter().find(|f| lowered.contains(&f.keyword)) {
            Some(food) => {
                let mut facts = food.entry.facts.clone();
                facts.suggested_pairings = section.default_pairings.clone();
                (facts, format!("Basic nutrition data for {}", food.keyword))
            }
            None => {
                let mut facts = section.generic.clone();
                facts.suggested_pairings = section.default_pairings.clone();
                (facts, "Basic nutrition estimate".to_string())
            }
        }
    }

    /// Sums every food named in the meal description.
    pub fn meal_analysis_for(&self, meal: &str) -> (MealAnalysis, String) {
        let lowered = meal.to_lowercase();
        let mut total = MealAnalysis::default();
        let mut matched = false;
        for food in &self.meal_analysis.foods {
            if !lowered.contains(&food.keyword) {
                continue;
            }
            let a = &food.entry.analysis;
            total.calories += a.calories;
            total.protein += a.protein;
            total.carbs += a.carbs;
            total.fat += a.fat;
            total.fiber += a.fiber;
            total.suggestions.extend(a.suggestions.iter().cloned());
            matched = true;
        }

        if !matched || total.calories <= 0.0 {
            return (
                self.meal_analysis.generic.clone(),
                format!("Generic analysis for {meal}"),
            );
        }

        let score = 70.0 + total.protein * 0.5 + total.fiber * 2.0;
        total.health_score = score.min(MAX_FALLBACK_HEALTH_SCORE).trunc();
        total.suggestions.truncate(MAX_FALLBACK_SUGGESTIONS);
        (total, format!("Basic analysis for {meal}"))
    }

    pub fn meal_plan(&self) -> (MealPlan, String) {
        (self.meal_plan.clone(), "Generic healthy meal plan".to_string())
    }

    /// City records when a known city is named in the location, else generic ones.
    pub fn hospitals_for(&self, location: &str) -> (Vec<Hospital>, String) {
        let lowered = location.to_lowercase();
        if let Some(city) = self
            .hospitals
            .cities
            .iter()
            .find(|c| lowered.contains(&c.city))
        {
            return (
                city.hospitals.clone(),
                format!("Basic hospital data for {}", city.city),
            );
        }

        let hospitals = self
            .hospitals
            .generic
            .iter()
            .map(|g| Hospital {
                name: g.name.clone(),
                address: format!("{location}, {}", g.address_suffix),
                description: g.description.clone(),
            })
            .collect();
        (hospitals, format!("Generic hospital data for {location}"))
    }

    pub fn health_answer_for(&self, question: &str) -> (HealthAnswer, String) {
        let lowered = question.to_lowercase();
        let health = &self.health;
        let answer = match health.topics.iter().find(|t| lowered.contains(&t.keyword)) {
            Some(topic) => HealthAnswer::new(topic.entry.answer.clone(), health.topic_tips.clone()),
            None => HealthAnswer::new(health.generic_answer.clone(), health.generic_tips.clone()),
        };
        (answer, "Basic health advice".to_string())
    }

    pub fn medicine_for(&self, name: &str) -> (MedicineInfo, String) {
        let lowered = name.to_lowercase();
        match self
            .medicine
            .medicines
            .iter()
            .find(|m| lowered.contains(&m.keyword))
        {
            Some(entry) => (entry.entry.info.clone(), format!("Basic information for {name}")),
            None => {
                let mut info = self.medicine.generic.clone();
                info.summary = format!("Basic information for {name}");
                (info, format!("Basic information for {name}"))
            }
        }
    }

    /// Rule lines for every rule whose keyword appears in some medicine name.
    pub fn interactions_for(&self, medicines: &[Medicine]) -> (CombinationInfo, String) {
        if medicines.is_empty() {
            let info = CombinationInfo {
                interactions: vec!["No medicines to analyze".to_string()],
                summary: "Add medicines to get interaction analysis".to_string(),
            };
            return (info, "Basic interaction analysis".to_string());
        }

        let names: Vec<String> = medicines.iter().map(|m| m.name.to_lowercase()).collect();
        let mut interactions: Vec<String> = self
            .interactions
            .rules
            .iter()
            .filter(|rule| {
                names
                    .iter()
                    .any(|name| rule.keywords.iter().any(|k| name.contains(k.as_str())))
            })
            .map(|rule| rule.note.clone())
            .collect();
        if interactions.is_empty() {
            interactions.push(self.interactions.default_note.clone());
        }

        let note = format!("Basic interaction analysis for {} medicines", medicines.len());
        let info = CombinationInfo {
            interactions,
            summary: note.clone(),
        };
        (info, note)
    }

    /// Per-type videos with the duration in each title. Unknown types use Full Body.
    pub fn videos_for(&self, workout: WorkoutType, duration_minutes: u32) -> (Vec<WorkoutVideo>, String) {
        let set = self
            .workouts
            .iter()
            .find(|w| w.workout_type == workout.label())
            .or_else(|| {
                self.workouts
                    .iter()
                    .find(|w| w.workout_type == WorkoutType::FullBody.label())
            });
        let videos = set
            .map(|w| {
                w.videos
                    .iter()
                    .map(|v| {
                        WorkoutVideo::new(
                            format!("{} - {duration_minutes} Min", v.title),
                            v.url.clone(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();
        (videos, format!("Suggested {} videos", workout.label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FallbackTable {
        FallbackTable::embedded().unwrap()
    }

    #[test]
    fn embedded_table_parses() {
        let t = table();
        assert_eq!(t.meal_plan.meals.len(), 3);
        assert_eq!(t.workouts.len(), 4);
    }

    #[test]
    fn mumbai_gets_three_city_hospitals() {
        let (hospitals, note) = table().hospitals_for("Andheri, Mumbai");
        assert_eq!(hospitals.len(), 3);
        assert_eq!(hospitals[0].name, "Lilavati Hospital");
        assert_eq!(note, "Basic hospital data for mumbai");
    }

    #[test]
    fn unknown_location_is_interpolated() {
        let (hospitals, note) = table().hospitals_for("Springfield");
        assert_eq!(hospitals.len(), 3);
        assert_eq!(hospitals[0].address, "Springfield, Main Street");
        assert_eq!(hospitals[2].address, "Springfield, Medical Complex");
        assert!(note.starts_with("Generic hospital data"));
    }

    #[test]
    fn nutrition_keyword_and_generic() {
        let t = table();
        let (facts, note) = t.nutrition_for("Grilled Chicken breast");
        assert_eq!(facts.food, "Chicken");
        assert_eq!(facts.calories, 165.0);
        assert_eq!(facts.suggested_pairings.len(), 3);
        assert_eq!(note, "Basic nutrition data for chicken");

        let (facts, note) = t.nutrition_for("mystery stew");
        assert_eq!(facts.food, "Generic Food");
        assert_eq!(note, "Basic nutrition estimate");
    }

    #[test]
    fn meal_analysis_sums_matches() {
        let (a, note) = table().meal_analysis_for("egg and toast");
        assert_eq!(a.calories, 220.0);
        assert_eq!(a.protein, 15.0);
        // 70 + 15 * 0.5 + 2 * 2 = 81.5
        assert_eq!(a.health_score, 81.0);
        assert_eq!(a.suggestions.len(), 3);
        assert!(note.starts_with("Basic analysis"));
    }

    #[test]
    fn meal_analysis_score_is_capped() {
        let (a, _) = table().meal_analysis_for("chicken and fish with salad");
        assert_eq!(a.health_score, 95.0);
    }

    #[test]
    fn meal_analysis_generic() {
        let (a, note) = table().meal_analysis_for("pizza");
        assert_eq!(a.calories, 200.0);
        assert_eq!(note, "Generic analysis for pizza");
    }

    #[test]
    fn health_topics() {
        let t = table();
        let (answer, _) = t.health_answer_for("How much SLEEP do I need?");
        assert!(answer.answer.starts_with("Get 7-9 hours"));
        assert_eq!(answer.tips.len(), 3);

        let (answer, _) = t.health_answer_for("what about posture");
        assert_eq!(answer.tips.len(), 5);
    }

    #[test]
    fn medicine_lookup() {
        let t = table();
        let (info, _) = t.medicine_for("Dolo 650");
        assert_eq!(info.kind, "Analgesic and antipyretic");

        let (info, _) = t.medicine_for("Metformin");
        assert_eq!(info.summary, "Basic information for Metformin");
    }

    #[test]
    fn interaction_rules() {
        let t = table();
        let meds = vec![
            Medicine {
                name: "Aspirin".into(),
                dosage: String::new(),
                frequency: String::new(),
                duration: String::new(),
            },
            Medicine {
                name: "Dolo 650".into(),
                dosage: String::new(),
                frequency: String::new(),
                duration: String::new(),
            },
        ];
        let (info, _) = t.interactions_for(&meds);
        assert_eq!(
            info.interactions,
            vec![
                "Paracetamol: Generally safe, avoid alcohol".to_string(),
                "Aspirin: May interact with blood thinners".to_string(),
            ]
        );
        assert_eq!(info.summary, "Basic interaction analysis for 2 medicines");

        let (info, _) = t.interactions_for(&[]);
        assert_eq!(info.interactions, vec!["No medicines to analyze".to_string()]);
    }

    #[test]
    fn videos_carry_duration() {
        let (videos, _) = table().videos_for(WorkoutType::Yoga, 20);
        assert_eq!(videos.len(), 3);
        assert_eq!(videos[0].title, "Yoga Flow - 20 Min");
        assert_eq!(videos[0].video_id.as_deref(), Some("CM43AZaRXNw"));
    }

    #[test]
    fn capitalized_keywords_still_match() {
        let json = EMBEDDED
            .replacen(r#""city": "mumbai""#, r#""city": "Mumbai""#, 1)
            .replacen(r#""keyword": "chicken""#, r#""keyword": "Chicken""#, 1);
        let t = FallbackTable::from_json(&json).unwrap();

        let (hospitals, note) = t.hospitals_for("MUMBAI");
        assert_eq!(hospitals[0].name, "Lilavati Hospital");
        assert_eq!(note, "Basic hospital data for mumbai");

        let (facts, _) = t.nutrition_for("chicken curry");
        assert_eq!(facts.food, "Chicken");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FallbackTable::from_path("/nonexistent/fallbacks.json").unwrap_err();
        assert!(matches!(err, FallbackError::Io { .. }));
    }
}
