//! Per-medicine information, combination interactions and the dashboard

use chrono::NaiveDate;
use nutri_core::models::medicine::{
    CombinationInfo, Medicine, MedicineCharts, MedicineInfo, MedicineInsight, dashboard_summary,
};
use nutri_core::{Assisted, JsonShape, extract_json};
use serde::Serialize;

use super::Assistant;

const MAX_TOKENS: u32 = 512;

fn info_prompt(medicine: &Medicine) -> String {
    let mut prompt = format!("Give a JSON summary for the medicine '{}'", medicine.name);
    if !(medicine.dosage.is_empty() && medicine.frequency.is_empty() && medicine.duration.is_empty()) {
        prompt.push_str(&format!(
            ", dosage: {}, frequency: {}, duration: {}",
            medicine.dosage, medicine.frequency, medicine.duration
        ));
    }
    prompt.push_str(
        ". Include: uses, type (e.g. antibiotic, painkiller), common side effects, warnings, and a one-sentence summary.",
    );
    prompt
}

fn combination_prompt(medicines: &[Medicine]) -> String {
    let names: Vec<&str> = medicines.iter().map(|m| m.name.as_str()).collect();
    format!(
        "Given this list of medicines: {}, describe any important interactions, precautions, \
and give a one-sentence summary. Return as JSON with keys: interactions, summary.",
        names.join(", ")
    )
}

pub async fn info(assistant: &Assistant, medicine: &Medicine) -> Assisted<MedicineInfo> {
    assistant
        .ask(
            "medicine",
            &info_prompt(medicine),
            MAX_TOKENS,
            |text| extract_json(text, JsonShape::Object).map(|v| MedicineInfo::from_reply(&v)),
            |table| table.medicine_for(&medicine.name),
        )
        .await
}

/// Interactions across the whole list. An empty list never calls out.
pub async fn combination(assistant: &Assistant, medicines: &[Medicine]) -> Assisted<CombinationInfo> {
    if medicines.is_empty() {
        let (data, note) = assistant.fallbacks().interactions_for(medicines);
        return Assisted {
            data,
            tip: Some(note),
            degraded: false,
            raw: None,
        };
    }

    assistant
        .ask(
            "medicine_combination",
            &combination_prompt(medicines),
            MAX_TOKENS,
            |text| extract_json(text, JsonShape::Object).map(|v| CombinationInfo::from_reply(&v)),
            |table| table.interactions_for(medicines),
        )
        .await
}

#[derive(Debug, Serialize)]
pub struct MedicineDashboard {
    pub medicines: Vec<MedicineInsight>,
    pub combination: Assisted<CombinationInfo>,
    pub charts: MedicineCharts,
    pub summary: String,
}

/// Look up every medicine, then the combination, and build the chart data
pub async fn dashboard(
    assistant: &Assistant,
    medicines: &[Medicine],
    today: NaiveDate,
) -> MedicineDashboard {
    let mut insights = Vec::with_capacity(medicines.len());
    for medicine in medicines {
        let looked_up = info(assistant, medicine).await;
        insights.push(MedicineInsight {
            medicine: medicine.clone(),
            info: looked_up.data,
            degraded: looked_up.degraded,
            tip: looked_up.tip,
        });
    }

    let combination = combination(assistant, medicines).await;
    let charts = MedicineCharts::build(&insights, &combination.data, today);
    let summary = dashboard_summary(&insights, &combination.data);

    MedicineDashboard {
        medicines: insights,
        combination,
        charts,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str, dosage: &str) -> Medicine {
        Medicine {
            name: name.into(),
            dosage: dosage.into(),
            frequency: String::new(),
            duration: String::new(),
        }
    }

    #[test]
    fn info_prompt_mentions_dosage_only_when_given() {
        assert!(!info_prompt(&med("Aspirin", "")).contains("dosage"));
        assert!(info_prompt(&med("Aspirin", "75mg")).contains("dosage: 75mg"));
    }

    #[test]
    fn combination_prompt_lists_names() {
        let p = combination_prompt(&[med("Aspirin", ""), med("Ibuprofen", "")]);
        assert!(p.starts_with("Given this list of medicines: Aspirin, Ibuprofen,"));
    }
}
