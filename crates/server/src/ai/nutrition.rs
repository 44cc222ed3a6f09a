//! Nutrition facts from a food description or a meal photo

use base64::Engine as _;
use nutri_core::models::nutrition::{NutritionFacts, NutritionReport};
use nutri_core::{Assisted, JsonShape, extract_json};

use super::Assistant;

const TEXT_MAX_TOKENS: u32 = 600;
const CAPTION_MAX_TOKENS: u32 = 300;

const CAPTION_SYSTEM: &str = "You are a food recognition expert. Describe the food in this image as clearly as possible. \
Include the main ingredients and cooking method if visible. If you can't recognize the food clearly, say 'Unknown'.";
const CAPTION_INSTRUCTION: &str = "What food is in this image? Describe it in detail.";

fn prompt(description: &str) -> String {
    format!(
        "You are a nutrition expert. Given the following food description, return a JSON object with keys: \
food (name of the food), calories (number), protein (number in grams), carbs (number in grams), \
fat (number in grams), fiber (number in grams), health_score (number 0-100), \
suggested_pairings (array of 3-5 foods that pair well with this meal). \
Provide realistic nutritional values. If you can't recognize the food, return 'Unknown' for food.\n\
Food description: {description}"
    )
}

/// Analyze a free-text food description
pub async fn analyze_text(assistant: &Assistant, description: &str) -> Assisted<NutritionReport> {
    assistant
        .ask(
            "nutrition",
            &prompt(description),
            TEXT_MAX_TOKENS,
            |text| extract_json(text, JsonShape::Object).map(|v| NutritionFacts::from_reply(&v)),
            |table| table.nutrition_for(description),
        )
        .await
        .map(NutritionReport::new)
}

/// Caption an uploaded image with the vision model, then analyze the caption
pub async fn analyze_image(
    assistant: &Assistant,
    bytes: &[u8],
    mime_type: &str,
) -> Assisted<NutritionReport> {
    let data_url = format!(
        "data:{mime_type};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    );

    match assistant
        .client()
        .describe_image(CAPTION_SYSTEM, CAPTION_INSTRUCTION, data_url, CAPTION_MAX_TOKENS)
        .await
    {
        Ok(caption) => {
            let caption = caption.trim().to_string();
            tracing::info!(caption_len = caption.len(), "Image captioned");
            let report = analyze_text(assistant, &caption).await;
            report.map(|r| r.with_caption(caption))
        }
        Err(err) => assistant
            .degrade("nutrition_image", err, |table| table.nutrition_for(""))
            .map(NutritionReport::new),
    }
}

/// Guess an image MIME type from magic bytes, trusting the upload's own type otherwise
pub fn sniff_mime(bytes: &[u8], declared: Option<&str>) -> String {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg".into();
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        return "image/png".into();
    }
    match declared {
        Some(t) if t.starts_with("image/") => t.to_string(),
        _ => "image/jpeg".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_description() {
        let p = prompt("2 eggs, 1 toast");
        assert!(p.ends_with("Food description: 2 eggs, 1 toast"));
        assert!(p.contains("suggested_pairings"));
    }

    #[test]
    fn sniffs_common_formats() {
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0], None), "image/jpeg");
        assert_eq!(sniff_mime(&[0x89, b'P', b'N', b'G', 0x0D], Some("image/jpeg")), "image/png");
        assert_eq!(sniff_mime(b"GIF89a", Some("image/gif")), "image/gif");
        assert_eq!(sniff_mime(b"????", Some("text/plain")), "image/jpeg");
    }
}
