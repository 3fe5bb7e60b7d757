//! Canonical interaction severity.
//!
//! RxNav reports a categorical label ("low", "high", "N/A", ...) while the
//! local interaction table stores a 1-5 level. Both convert here:
//!
//! | level | severity |
//! |-------|----------|
//! | 1, 2  | low      |
//! | 3     | moderate |
//! | 4     | high     |
//! | 5     | major    |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a drug-drug interaction, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Moderate,
    High,
    Major,
}

impl Severity {
    /// Parse a categorical label. Missing or unrecognized labels are moderate.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Severity::Moderate;
        };

        match label.trim().to_lowercase().as_str() {
            "low" | "minor" => Severity::Low,
            "moderate" | "medium" => Severity::Moderate,
            "high" => Severity::High,
            "major" | "severe" | "contraindicated" => Severity::Major,
            other => {
                tracing::debug!(label = other, "unrecognized severity label, using moderate");
                Severity::Moderate
            }
        }
    }

    /// Convert a 1-5 level. Missing levels are moderate; out-of-range levels clamp.
    pub fn from_level(level: Option<i64>) -> Self {
        match level {
            None => Severity::Moderate,
            Some(l) if l <= 2 => Severity::Low,
            Some(3) => Severity::Moderate,
            Some(4) => Severity::High,
            Some(_) => Severity::Major,
        }
    }

    /// Level stored for this severity in the local table.
    pub fn level(self) -> i64 {
        match self {
            Severity::Low => 1,
            Severity::Moderate => 3,
            Severity::High => 4,
            Severity::Major => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Major => "major",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
