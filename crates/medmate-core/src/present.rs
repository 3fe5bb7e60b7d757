//! Presentation model for interaction reports.
//!
//! A report renders as up to three independent parts: interaction cards,
//! notice banners, and the "no known interactions" confirmation (shown only
//! when there is nothing else to show).

use serde::{Deserialize, Serialize};

use crate::checker::{CheckError, CheckResult, MIN_MEDICINES};
use crate::models::{InteractionReport, Severity, NO_INTERACTIONS_NOTICE};

pub const FOUND_HEADLINE: &str = "Potential Interactions Found";
pub const ALL_CLEAR_HEADLINE: &str = "No Known Interactions";
pub const INCOMPLETE_HEADLINE: &str = "Interaction Check Incomplete";
pub const FOUND_ADVISORY: &str =
    "Please consult your healthcare provider about these potential interactions.";
pub const ALL_CLEAR_MESSAGE: &str = "No known interactions found between your current medicines.";

/// Reject lists with fewer than two non-blank names before any lookup runs.
pub fn ensure_checkable<S: AsRef<str>>(names: &[S]) -> CheckResult<()> {
    let usable = names.iter().filter(|n| !n.as_ref().trim().is_empty()).count();
    if usable < MIN_MEDICINES {
        return Err(CheckError::TooFewMedicines);
    }
    Ok(())
}

/// Visual tone of a severity badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Info,
    Caution,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityBadge {
    pub label: String,
    pub tone: BadgeTone,
}

impl From<Severity> for SeverityBadge {
    fn from(severity: Severity) -> Self {
        let (label, tone) = match severity {
            Severity::Low => ("Low", BadgeTone::Info),
            Severity::Moderate => ("Moderate", BadgeTone::Caution),
            Severity::High => ("High", BadgeTone::Warning),
            Severity::Major => ("Major", BadgeTone::Danger),
        };
        Self {
            label: label.to_string(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionCard {
    pub title: String,
    pub description: String,
    pub badge: SeverityBadge,
}

/// Everything a screen needs to show one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    pub headline: String,
    pub cards: Vec<InteractionCard>,
    /// Partial-failure notices; the synthetic "none found" notice is folded into `all_clear`
    pub notices: Vec<String>,
    pub advisory: Option<String>,
    pub all_clear: bool,
}

impl ReportView {
    pub fn from_report(report: &InteractionReport) -> Self {
        let cards: Vec<InteractionCard> = report
            .interactions
            .iter()
            .map(|i| InteractionCard {
                title: format!("{} + {}", i.drug1, i.drug2),
                description: i.description.clone(),
                badge: i.severity.into(),
            })
            .collect();

        let notices: Vec<String> = report
            .notices
            .iter()
            .filter(|n| n.as_str() != NO_INTERACTIONS_NOTICE)
            .cloned()
            .collect();

        let all_clear = cards.is_empty() && notices.is_empty();
        // Notices without cards mean some medicines went unchecked
        let (headline, advisory) = if !cards.is_empty() {
            (FOUND_HEADLINE, Some(FOUND_ADVISORY.to_string()))
        } else if all_clear {
            (ALL_CLEAR_HEADLINE, None)
        } else {
            (INCOMPLETE_HEADLINE, None)
        };

        Self {
            headline: headline.to_string(),
            cards,
            notices,
            advisory,
            all_clear,
        }
    }

    /// Plain-text rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.headline);
        out.push('\n');

        for card in &self.cards {
            out.push_str(&format!(
                "[{}] {}: {}\n",
                card.badge.label, card.title, card.description
            ));
        }
        for notice in &self.notices {
            out.push_str(&format!("! {}\n", notice));
        }
        if let Some(advisory) = &self.advisory {
            out.push_str(advisory);
            out.push('\n');
        }
        if self.all_clear {
            out.push_str(ALL_CLEAR_MESSAGE);
            out.push('\n');
        }
        out
    }
}
