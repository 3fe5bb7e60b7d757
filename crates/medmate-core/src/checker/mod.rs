//! Pairwise interaction checker.
//!
//! Pipeline: Resolution pass → Pairwise pass → Summary
//!
//! Every per-name and per-pair failure becomes a notice; only cancellation
//! stops a check early.

mod cancel;

pub use cancel::*;

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{
    pair_failure_notice, unresolved_notice, InteractionRecord, InteractionReport, MedicineName,
    TerminologyId, NO_INTERACTIONS_NOTICE,
};
use crate::resolver::{pair_key, InteractionLookup, NameResolver};

/// Minimum number of medicines the presentation layer accepts for a check.
pub const MIN_MEDICINES: usize = 2;

/// Check errors.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Add at least 2 medicines to check for interactions")]
    TooFewMedicines,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Interaction check cancelled")]
    Cancelled,
}

pub type CheckResult<T> = Result<T, CheckError>;

/// Runs one interaction check over a resolver and an interaction source.
pub struct InteractionChecker<'a> {
    resolver: &'a dyn NameResolver,
    lookup: &'a dyn InteractionLookup,
}

impl<'a> InteractionChecker<'a> {
    pub fn new(resolver: &'a dyn NameResolver, lookup: &'a dyn InteractionLookup) -> Self {
        Self { resolver, lookup }
    }

    /// Check every unordered pair of `names` for known interactions.
    pub fn check_all<S: AsRef<str>>(&self, names: &[S]) -> InteractionReport {
        // A fresh flag is never set, so the check always completes.
        self.check_all_with_cancel(names, &CancelFlag::new())
            .unwrap_or_default()
    }

    /// Like [`check_all`](Self::check_all), stopping with
    /// [`CheckError::Cancelled`] once `cancel` is set.
    pub fn check_all_with_cancel<S: AsRef<str>>(
        &self,
        names: &[S],
        cancel: &CancelFlag,
    ) -> CheckResult<InteractionReport> {
        let medicines: Vec<MedicineName> =
            names.iter().map(|n| MedicineName::new(n.as_ref())).collect();
        tracing::info!(count = medicines.len(), "checking drug interactions");

        let mut report = InteractionReport::new();

        // Step 1: resolve each distinct name once
        let resolved = self.resolve_distinct(&medicines, cancel, &mut report)?;

        // Step 2: query every unordered pair of resolved names
        self.check_pairs(&medicines, &resolved, cancel, &mut report)?;

        // Step 3: never hand back a silent empty report
        if report.interactions.is_empty() && report.notices.is_empty() {
            report.notices.push(NO_INTERACTIONS_NOTICE.to_string());
        }

        tracing::info!(
            interactions = report.interactions.len(),
            notices = report.notices.len(),
            "interaction check finished"
        );
        Ok(report)
    }

    fn resolve_distinct<'m>(
        &self,
        medicines: &'m [MedicineName],
        cancel: &CancelFlag,
        report: &mut InteractionReport,
    ) -> CheckResult<HashMap<&'m str, Option<TerminologyId>>> {
        let mut resolved = HashMap::new();

        for medicine in medicines {
            if cancel.is_cancelled() {
                tracing::info!("interaction check cancelled during resolution");
                return Err(CheckError::Cancelled);
            }
            if resolved.contains_key(medicine.normalized()) {
                continue;
            }

            let id = self.resolver.resolve(medicine.original());
            if id.is_none() {
                report.notices.push(unresolved_notice(medicine.original()));
            }
            resolved.insert(medicine.normalized(), id);
        }

        Ok(resolved)
    }

    fn check_pairs(
        &self,
        medicines: &[MedicineName],
        resolved: &HashMap<&str, Option<TerminologyId>>,
        cancel: &CancelFlag,
        report: &mut InteractionReport,
    ) -> CheckResult<()> {
        let mut checked: HashSet<(&str, &str)> = HashSet::new();

        for (i, first) in medicines.iter().enumerate() {
            for second in &medicines[i + 1..] {
                if cancel.is_cancelled() {
                    tracing::info!("interaction check cancelled during pairwise pass");
                    return Err(CheckError::Cancelled);
                }

                // Repeated names never pair with themselves or re-query a pair
                if first.normalized() == second.normalized() {
                    continue;
                }
                if !checked.insert(pair_key(first.normalized(), second.normalized())) {
                    continue;
                }

                let (Some(Some(first_id)), Some(Some(second_id))) = (
                    resolved.get(first.normalized()),
                    resolved.get(second.normalized()),
                ) else {
                    continue;
                };
                // Different spellings of one drug
                if first_id == second_id {
                    tracing::debug!(
                        first = first.original(),
                        second = second.original(),
                        rxcui = %first_id,
                        "skipping pair with a shared id"
                    );
                    continue;
                }

                match self.lookup.interactions(first_id, second_id) {
                    Ok(entries) => {
                        tracing::debug!(
                            first = first.original(),
                            second = second.original(),
                            found = entries.len(),
                            "checked pair"
                        );
                        report.interactions.extend(entries.into_iter().map(|entry| {
                            InteractionRecord::from_entry(first.original(), second.original(), entry)
                        }));
                    }
                    Err(e) => {
                        tracing::warn!(
                            first = first.original(),
                            second = second.original(),
                            error = %e,
                            "interaction lookup failed"
                        );
                        report
                            .notices
                            .push(pair_failure_notice(first.original(), second.original()));
                    }
                }
            }
        }

        Ok(())
    }
}
