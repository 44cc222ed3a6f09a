//! Personalized daily or weekly meal plans

use nutri_core::models::meal_plan::{MealPlan, PlanPeriod, UserProfile};
use nutri_core::{AssistError, Assisted, JsonShape, extract_json};

use super::Assistant;

const MAX_TOKENS: u32 = 1024;

fn prompt(profile: &UserProfile, period: PlanPeriod) -> String {
    format!(
        "Given this user profile: {}, generate a {} meal plan (breakfast, lunch, dinner, snacks) with food items, \
calories, macros, and a health score for each meal. If you cannot generate a fully customized plan due to medical \
conditions or missing info, return a safe, generic healthy meal plan and include a warning in ai_tips. \
Always return a valid JSON object with keys: meals (list of dicts with meal, foods, calories, protein, carbs, fat, \
fiber, health_score), shopping_list (list), ai_tips (list).",
        profile.describe(),
        period.as_str()
    )
}

/// The fallback plan carries its degraded-mode tip in `ai_tips` too.
pub async fn generate(
    assistant: &Assistant,
    profile: &UserProfile,
    period: PlanPeriod,
) -> Assisted<MealPlan> {
    let mut plan = assistant
        .ask(
            "meal_plan",
            &prompt(profile, period),
            MAX_TOKENS,
            |text| {
                let value = extract_json(text, JsonShape::Object)?;
                MealPlan::from_reply(&value).ok_or(AssistError::ExtractionFailure("object"))
            },
            |table| table.meal_plan(),
        )
        .await;

    if plan.degraded {
        if let Some(tip) = &plan.tip {
            plan.data.ai_tips.insert(0, tip.clone());
        }
    }
    plan
}
