//! Interaction records and the per-check report.

use serde::{Deserialize, Serialize};

use super::Severity;

/// Notice appended when a check finds nothing and reports nothing.
pub const NO_INTERACTIONS_NOTICE: &str = "no interactions found";

/// Description used when the interaction service omits one.
pub const DEFAULT_DESCRIPTION: &str =
    "Potential drug interaction detected. Consult your healthcare provider.";

/// Notice for a name the terminology service could not resolve.
pub fn unresolved_notice(name: &str) -> String {
    format!("could not resolve {}", name)
}

/// Notice for a pair whose interaction query failed.
pub fn pair_failure_notice(first: &str, second: &str) -> String {
    format!("could not check {} and {}", first, second)
}

/// One interaction as returned by an interaction source, before display names are attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionEntry {
    pub description: String,
    pub severity: Severity,
}

impl InteractionEntry {
    pub fn new(description: impl Into<String>, severity: Severity) -> Self {
        Self {
            description: description.into(),
            severity,
        }
    }
}

/// An interaction between two of the user's medicines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionRecord {
    /// First medicine, exactly as the user entered it
    pub drug1: String,
    /// Second medicine, exactly as the user entered it
    pub drug2: String,
    pub description: String,
    pub severity: Severity,
}

impl InteractionRecord {
    pub fn from_entry(drug1: &str, drug2: &str, entry: InteractionEntry) -> Self {
        Self {
            drug1: drug1.to_string(),
            drug2: drug2.to_string(),
            description: entry.description,
            severity: entry.severity,
        }
    }
}

/// Result of one interaction check. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InteractionReport {
    /// Interactions in pair order, then in source order within a pair
    pub interactions: Vec<InteractionRecord>,
    /// Human-readable notices in the order they were discovered
    pub notices: Vec<String>,
}

impl InteractionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_interactions(&self) -> bool {
        !self.interactions.is_empty()
    }

    /// Highest severity among the reported interactions.
    pub fn max_severity(&self) -> Option<Severity> {
        self.interactions.iter().map(|i| i.severity).max()
    }

    /// Serialize as `{"interactions": [...], "notices": [...]}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
