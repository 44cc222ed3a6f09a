//! Per-meal diet analysis and the daily roll-up.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::nutrition::MacroBreakdown;
use crate::lenient;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MealAnalysis {
    pub food: Option<String>,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub health_score: f64,
    pub suggestions: Vec<String>,
}

static NUMERIC_FIELDS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ["calories", "protein", "carbs", "fat", "fiber", "health_score"]
        .into_iter()
        .filter_map(|key| {
            Regex::new(&format!(r"(?i){key}[^\d]*(\d+)"))
                .ok()
                .map(|re| (key, re))
        })
        .collect()
});

impl MealAnalysis {
    pub fn from_reply(value: &JsonValue) -> Self {
        Self {
            food: value
                .get("food")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            calories: lenient::number(value, "calories"),
            protein: lenient::number(value, "protein"),
            carbs: lenient::number(value, "carbs"),
            fat: lenient::number(value, "fat"),
            fiber: lenient::number(value, "fiber"),
            health_score: lenient::number(value, "health_score"),
            suggestions: lenient::string_list(value, "suggestions"),
        }
    }

    /// Pull "calories: 420"-style figures out of prose when no JSON was given.
    ///
    /// Returns `None` when not a single figure is found.
    pub fn scrape(text: &str) -> Option<Self> {
        let mut analysis = Self::default();
        let mut found = false;
        for (key, re) in NUMERIC_FIELDS.iter() {
            let Some(value) = re
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
            else {
                continue;
            };
            found = true;
            match *key {
                "calories" => analysis.calories = value,
                "protein" => analysis.protein = value,
                "carbs" => analysis.carbs = value,
                "fat" => analysis.fat = value,
                "fiber" => analysis.fiber = value,
                _ => analysis.health_score = value,
            }
        }
        found.then_some(analysis)
    }

    pub fn macros(&self) -> MacroBreakdown {
        MacroBreakdown {
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
        }
    }
}

/// One entry in the diet form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealResult {
    pub meal: String,
    pub analysis: MealAnalysis,
    pub macros: MacroBreakdown,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// Sum of every analyzed meal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DailySummary {
    pub calories: f64,
    pub macros: MacroBreakdown,
    pub average_health_score: f64,
    pub suggestions: Vec<String>,
}

impl DailySummary {
    pub fn from_meals(meals: &[MealResult]) -> Self {
        let mut summary = Self::default();
        let mut score_total = 0.0;
        for meal in meals {
            summary.calories += meal.analysis.calories;
            summary.macros.add(&meal.analysis.macros());
            score_total += meal.analysis.health_score;
            summary
                .suggestions
                .extend(meal.analysis.suggestions.iter().cloned());
        }
        if !meals.is_empty() {
            summary.average_health_score = score_total / meals.len() as f64;
        }
        summary
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietReport {
    pub meals: Vec<MealResult>,
    pub summary: DailySummary,
}
