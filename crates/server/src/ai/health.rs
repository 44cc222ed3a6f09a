//! Free-form health, nutrition and fitness questions

use nutri_core::models::health::HealthAnswer;
use nutri_core::Assisted;

use super::Assistant;

const MAX_TOKENS: u32 = 512;

fn prompt(question: &str) -> String {
    format!(
        "Answer this health/nutrition/fitness question in a friendly, practical way. \
Also provide 3-5 actionable tips as a JSON list.\nQuestion: {question}"
    )
}

/// The answer always comes back; tips may be empty when the reply had no list.
pub async fn answer(assistant: &Assistant, question: &str) -> Assisted<HealthAnswer> {
    assistant
        .ask(
            "health",
            &prompt(question),
            MAX_TOKENS,
            |text| Ok(HealthAnswer::from_reply(text)),
            |table| table.health_answer_for(question),
        )
        .await
}
