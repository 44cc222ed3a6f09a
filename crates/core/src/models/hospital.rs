use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::lenient;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hospital {
    pub name: String,
    pub address: String,
    pub description: String,
}

impl Hospital {
    fn from_reply(value: &JsonValue) -> Self {
        Self {
            name: lenient::text(value, "name"),
            address: lenient::text(value, "address"),
            description: lenient::text(value, "description"),
        }
    }

    /// Read a reply list, dropping entries that are not objects. Empty lists are unusable.
    pub fn list_from_reply(value: &JsonValue) -> Option<Vec<Self>> {
        let hospitals: Vec<Self> = value
            .as_array()?
            .iter()
            .filter(|item| item.is_object())
            .map(Self::from_reply)
            .collect();
        (!hospitals.is_empty()).then_some(hospitals)
    }
}
