//! Local interaction table as a resolver and interaction source.
//!
//! Terminology ids here are the normalized medicine names themselves.

use strsim::jaro_winkler;

use super::Database;
use crate::models::{InteractionEntry, Severity, TerminologyId};
use crate::resolver::{normalize_name, InteractionLookup, LookupResult, NameResolver};

/// Minimum Jaro-Winkler similarity for an approximate name match.
const MIN_SIMILARITY: f64 = 0.92;

/// Offline interaction source over the local table.
pub struct LocalInteractionTable<'a> {
    db: &'a Database,
}

impl<'a> LocalInteractionTable<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Closest known medicine to `normalized`, exact matches first.
    fn closest_known(&self, normalized: &str) -> Option<String> {
        let known = match self.db.known_medicines() {
            Ok(known) => known,
            Err(e) => {
                tracing::warn!(name = normalized, error = %e, "local medicine lookup failed");
                return None;
            }
        };

        if known.iter().any(|k| k == normalized) {
            return Some(normalized.to_string());
        }

        known
            .into_iter()
            .map(|k| (jaro_winkler(normalized, &k), k))
            .filter(|(score, _)| *score >= MIN_SIMILARITY)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, k)| k)
    }
}

impl NameResolver for LocalInteractionTable<'_> {
    fn resolve(&self, name: &str) -> Option<TerminologyId> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }

        let id = self.closest_known(&normalized).map(TerminologyId::new);
        tracing::debug!(name = %normalized, id = ?id, "resolved against local table");
        id
    }
}

impl InteractionLookup for LocalInteractionTable<'_> {
    fn interactions(
        &self,
        first: &TerminologyId,
        second: &TerminologyId,
    ) -> LookupResult<Vec<InteractionEntry>> {
        let rows = self.db.find_interactions(first.as_str(), second.as_str())?;
        Ok(rows
            .into_iter()
            .map(|row| InteractionEntry::new(row.description, Severity::from_level(row.severity_level)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.seed_defaults().unwrap();
        db
    }

    #[test]
    fn test_resolve_exact_and_approximate() {
        let db = seeded();
        let table = LocalInteractionTable::new(&db);

        assert_eq!(table.resolve(" Aspirin "), Some(TerminologyId::new("aspirin")));
        // one transposition away
        assert_eq!(table.resolve("warfarni"), Some(TerminologyId::new("warfarin")));
        assert_eq!(table.resolve("foobarin"), None);
        assert_eq!(table.resolve(""), None);
    }

    #[test]
    fn test_interactions_use_canonical_severity() {
        let db = seeded();
        db.upsert_interaction("aspirin", "clopidogrel", "drug-drug", "Bleeding", None)
            .unwrap();
        let table = LocalInteractionTable::new(&db);

        let found = table
            .interactions(&TerminologyId::new("warfarin"), &TerminologyId::new("aspirin"))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::High);

        let unknown_level = table
            .interactions(&TerminologyId::new("aspirin"), &TerminologyId::new("clopidogrel"))
            .unwrap();
        assert_eq!(unknown_level[0].severity, Severity::Moderate);

        let none = table
            .interactions(&TerminologyId::new("aspirin"), &TerminologyId::new("metformin"))
            .unwrap();
        assert!(none.is_empty());
    }
}
