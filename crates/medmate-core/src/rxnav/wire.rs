//! RxNav JSON response shapes.

use serde::Deserialize;

use crate::models::{InteractionEntry, Severity, DEFAULT_DESCRIPTION};

/// Response of `rxcui.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RxcuiResponse {
    #[serde(default)]
    pub id_group: Option<IdGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdGroup {
    #[serde(default)]
    pub rxnorm_id: Vec<String>,
}

impl RxcuiResponse {
    /// First identifier, if the service matched anything.
    pub fn first_rxcui(&self) -> Option<&str> {
        self.id_group
            .as_ref()
            .and_then(|g| g.rxnorm_id.first())
            .map(String::as_str)
    }
}

/// Response of `interaction/interaction.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionResponse {
    #[serde(default)]
    pub interaction_type_group: Vec<InteractionTypeGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionTypeGroup {
    #[serde(default)]
    pub interaction_type: Vec<InteractionType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionType {
    #[serde(default)]
    pub interaction_pair: Vec<InteractionPair>,
}

#[derive(Debug, Deserialize)]
pub struct InteractionPair {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

impl InteractionResponse {
    /// Flatten groups → types → pairs into entries, preserving order.
    pub fn into_entries(self) -> Vec<InteractionEntry> {
        self.interaction_type_group
            .into_iter()
            .flat_map(|g| g.interaction_type)
            .flat_map(|t| t.interaction_pair)
            .map(|pair| {
                let description = pair
                    .description
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
                InteractionEntry::new(description, Severity::from_label(pair.severity.as_deref()))
            })
            .collect()
    }
}
