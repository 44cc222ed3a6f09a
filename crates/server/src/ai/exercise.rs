//! Workout video recommendations

use nutri_core::models::exercise::{WorkoutType, WorkoutVideo};
use nutri_core::{AssistError, Assisted, JsonShape, extract_json};

use super::Assistant;

const MAX_TOKENS: u32 = 512;

fn prompt(workout: WorkoutType, duration_minutes: u32) -> String {
    format!(
        "Generate 3 popular {} workout videos for {duration_minutes} minutes. For each video, provide a title \
and a valid YouTube video ID (11 characters). Return as JSON array with 'title' and 'video_id' keys.",
        workout.label()
    )
}

pub async fn recommend(
    assistant: &Assistant,
    workout: WorkoutType,
    duration_minutes: u32,
) -> Assisted<Vec<WorkoutVideo>> {
    assistant
        .ask(
            "exercise",
            &prompt(workout, duration_minutes),
            MAX_TOKENS,
            |text| {
                let value = extract_json(text, JsonShape::Array)?;
                WorkoutVideo::list_from_reply(&value).ok_or(AssistError::ExtractionFailure("array"))
            },
            |table| table.videos_for(workout, duration_minutes),
        )
        .await
}
