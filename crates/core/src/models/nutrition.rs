//! Nutrition facts for a described or photographed food.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::lenient;

/// Protein/carbs/fat/fiber grams, the slices of the macro pie chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct MacroBreakdown {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl MacroBreakdown {
    pub fn total(&self) -> f64 {
        self.protein + self.carbs + self.fat + self.fiber
    }

    pub fn add(&mut self, other: &MacroBreakdown) {
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
        self.fiber += other.fiber;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NutritionFacts {
    pub food: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub health_score: f64,
    pub suggested_pairings: Vec<String>,
}

impl Default for NutritionFacts {
    fn default() -> Self {
        Self {
            food: lenient::UNKNOWN.to_string(),
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
            health_score: 0.0,
            suggested_pairings: Vec::new(),
        }
    }
}

impl NutritionFacts {
    /// Read a model reply object, defaulting whatever is missing.
    pub fn from_reply(value: &JsonValue) -> Self {
        Self {
            food: lenient::text(value, "food"),
            calories: lenient::number(value, "calories"),
            protein: lenient::number(value, "protein"),
            carbs: lenient::number(value, "carbs"),
            fat: lenient::number(value, "fat"),
            fiber: lenient::number(value, "fiber"),
            health_score: lenient::number(value, "health_score"),
            suggested_pairings: lenient::string_list(value, "suggested_pairings"),
        }
    }

    pub fn macros(&self) -> MacroBreakdown {
        MacroBreakdown {
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
        }
    }

    /// The model names the food unless it gave up.
    pub fn is_recognized(&self) -> bool {
        !matches!(self.food.as_str(), "Unknown" | "Error")
    }
}

/// Analyzer output: the facts plus chart data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionReport {
    pub facts: NutritionFacts,
    pub macros: MacroBreakdown,
    pub recognized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl NutritionReport {
    pub fn new(facts: NutritionFacts) -> Self {
        Self {
            macros: facts.macros(),
            recognized: facts.is_recognized(),
            facts,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: String) -> Self {
        self.caption = Some(caption);
        self
    }
}
