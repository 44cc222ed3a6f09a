//! Hospitals near a free-text location

use nutri_core::models::hospital::Hospital;
use nutri_core::{AssistError, Assisted, JsonShape, extract_json};

use super::Assistant;

const MAX_TOKENS: u32 = 512;

fn prompt(location: &str) -> String {
    format!(
        "List 5 well-known hospitals near {location}. For each, provide a short description \
(services, specialties, reputation). Return as a JSON list of objects with 'name', 'address', and 'description'."
    )
}

pub async fn find(assistant: &Assistant, location: &str) -> Assisted<Vec<Hospital>> {
    assistant
        .ask(
            "hospitals",
            &prompt(location),
            MAX_TOKENS,
            |text| {
                let value = extract_json(text, JsonShape::Array)?;
                Hospital::list_from_reply(&value).ok_or(AssistError::ExtractionFailure("array"))
            },
            |table| table.hospitals_for(location),
        )
        .await
}
