//! Personalised meal plans and their plain-text export.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::nutrition::MacroBreakdown;
use super::water::FitnessGoal;
use crate::lenient;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanPeriod {
    #[default]
    Daily,
    Weekly,
}

impl PlanPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanPeriod::Daily => "daily",
            PlanPeriod::Weekly => "weekly",
        }
    }
}

/// Health data entered on the planner form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub age: u32,
    pub gender: String,
    pub weight: f64,
    pub height: f64,
    pub goal: FitnessGoal,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub medical_conditions: String,
}

impl UserProfile {
    /// Compact description embedded in prompts and exports.
    pub fn describe(&self) -> String {
        format!(
            "age: {}, gender: {}, weight: {} kg, height: {} cm, goal: {}, allergies: {}, medical conditions: {}",
            self.age,
            self.gender,
            self.weight,
            self.height,
            self.goal.label(),
            none_if_blank(&self.allergies),
            none_if_blank(&self.medical_conditions),
        )
    }
}

fn none_if_blank(s: &str) -> &str {
    if s.trim().is_empty() { "none" } else { s.trim() }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannedMeal {
    pub meal: String,
    pub foods: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub health_score: f64,
}

impl Default for PlannedMeal {
    fn default() -> Self {
        Self {
            meal: lenient::UNKNOWN.to_string(),
            foods: lenient::UNKNOWN.to_string(),
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
            health_score: 0.0,
        }
    }
}

impl PlannedMeal {
    fn from_reply(value: &JsonValue) -> Self {
        Self {
            meal: lenient::text(value, "meal"),
            foods: lenient::text(value, "foods"),
            calories: lenient::number(value, "calories"),
            protein: lenient::number(value, "protein"),
            carbs: lenient::number(value, "carbs"),
            fat: lenient::number(value, "fat"),
            fiber: lenient::number(value, "fiber"),
            health_score: lenient::number(value, "health_score"),
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
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MealPlan {
    pub meals: Vec<PlannedMeal>,
    pub shopping_list: Vec<String>,
    pub ai_tips: Vec<String>,
}

impl MealPlan {
    /// Read a model reply. A plan without meals is treated as unusable.
    pub fn from_reply(value: &JsonValue) -> Option<Self> {
        let meals: Vec<PlannedMeal> = value
            .get("meals")
            .and_then(|m| m.as_array())
            .map(|items| items.iter().map(PlannedMeal::from_reply).collect())
            .unwrap_or_default();
        if meals.is_empty() {
            return None;
        }
        Some(Self {
            meals,
            shopping_list: lenient::string_list(value, "shopping_list"),
            ai_tips: lenient::string_list(value, "ai_tips"),
        })
    }

    /// Plain-text download. Tips that mention an error are left out.
    pub fn text_summary(&self, profile: &UserProfile) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "AI Personalized Meal Plan\n");
        let _ = writeln!(out, "Profile: {}\n", profile.describe());
        let _ = writeln!(out, "\nMeal Plan:");
        for meal in &self.meals {
            let _ = writeln!(out, "{}: {}", capitalize(&meal.meal), meal.foods);
            let _ = writeln!(
                out,
                "Calories: {} | Protein: {}g | Carbs: {}g | Fat: {}g | Fiber: {}g | Health Score: {}",
                meal.calories, meal.protein, meal.carbs, meal.fat, meal.fiber, meal.health_score
            );
            out.push('\n');
        }
        let _ = writeln!(out, "Shopping List:");
        for item in &self.shopping_list {
            let _ = writeln!(out, "- {item}");
        }
        out.push('\n');
        let _ = writeln!(out, "AI Tips:");
        for tip in self
            .ai_tips
            .iter()
            .filter(|tip| !tip.to_lowercase().contains("error"))
        {
            let _ = writeln!(out, "- {tip}");
        }
        out.trim_end().to_string()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
