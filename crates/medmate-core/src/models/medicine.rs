//! Medicine names and terminology identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resolver::normalize_name;

/// A medicine name as the user typed it, paired with its comparison form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineName {
    original: String,
    normalized: String,
}

impl MedicineName {
    /// Wrap a user-supplied name.
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let normalized = normalize_name(&original);
        Self {
            original,
            normalized,
        }
    }

    /// Name exactly as supplied, used for display.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Trimmed, lowercased name, used for matching and deduplication only.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// True when nothing but whitespace was supplied.
    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }
}

impl From<&str> for MedicineName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque identifier from the terminology service (an RxCUI for RxNav).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerminologyId(String);

impl TerminologyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TerminologyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_original_casing() {
        let name = MedicineName::new("  Aspirin ");
        assert_eq!(name.original(), "  Aspirin ");
        assert_eq!(name.normalized(), "aspirin");
        assert!(!name.is_blank());
    }

    #[test]
    fn test_blank_name() {
        assert!(MedicineName::new("   ").is_blank());
        assert!(MedicineName::from("").is_blank());
    }

    #[test]
    fn test_terminology_id_serializes_as_string() {
        let id = TerminologyId::new("1191");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1191\"");
        assert_eq!(id.to_string(), "1191");
    }
}
