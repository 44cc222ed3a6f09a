//! Per-meal analysis for the day's breakfast, lunch and dinner

use nutri_core::models::diet::{DailySummary, DietReport, MealAnalysis, MealResult};
use nutri_core::{Assisted, JsonShape, extract_json};

use super::Assistant;

const MAX_TOKENS: u32 = 512;

fn prompt(meal: &str) -> String {
    format!(
        "Analyze this meal: {meal}. Return a JSON with keys: food, calories, protein, carbs, fat, fiber, \
health_score, suggestions (list of improvements)."
    )
}

/// A reply without JSON still counts when figures can be scraped from its prose.
pub async fn analyze_meal(assistant: &Assistant, meal: &str) -> Assisted<MealAnalysis> {
    assistant
        .ask(
            "diet",
            &prompt(meal),
            MAX_TOKENS,
            |text| {
                extract_json(text, JsonShape::Object)
                    .map(|v| MealAnalysis::from_reply(&v))
                    .or_else(|err| MealAnalysis::scrape(text).ok_or(err))
            },
            |table| table.meal_analysis_for(meal),
        )
        .await
}

/// Analyze each named meal in order. Blank descriptions are skipped.
pub async fn analyze_day(assistant: &Assistant, meals: &[(&str, &str)]) -> DietReport {
    let mut results = Vec::new();
    for (label, description) in meals {
        let description = description.trim();
        if description.is_empty() {
            continue;
        }
        let analysis = analyze_meal(assistant, description).await;
        results.push(MealResult {
            meal: label.to_string(),
            macros: analysis.data.macros(),
            analysis: analysis.data,
            degraded: analysis.degraded,
            tip: analysis.tip,
        });
    }

    let summary = DailySummary::from_meals(&results);
    DietReport {
        meals: results,
        summary,
    }
}
