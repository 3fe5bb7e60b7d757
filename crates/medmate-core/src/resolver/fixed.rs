//! In-memory resolver and lookup with fixed answers, for tests and demo mode.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{normalize_name, InteractionLookup, LookupError, LookupResult, NameResolver};
use crate::models::{InteractionEntry, TerminologyId};

/// Resolver backed by a fixed name → id table.
#[derive(Debug, Default)]
pub struct FixedResolver {
    ids: HashMap<String, TerminologyId>,
    calls: RefCell<Vec<String>>,
}

impl FixedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name (matched after normalization).
    pub fn with(mut self, name: &str, id: &str) -> Self {
        self.ids.insert(normalize_name(name), TerminologyId::new(id));
        self
    }

    /// Names passed to `resolve`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl NameResolver for FixedResolver {
    fn resolve(&self, name: &str) -> Option<TerminologyId> {
        self.calls.borrow_mut().push(name.to_string());
        self.ids.get(&normalize_name(name)).cloned()
    }
}

enum FixedAnswer {
    Entries(Vec<InteractionEntry>),
    Failure(String),
}

/// Interaction lookup backed by a fixed id pair → entries table.
///
/// Unregistered pairs have no interactions.
#[derive(Default)]
pub struct FixedInteractions {
    answers: HashMap<(String, String), FixedAnswer>,
    calls: RefCell<Vec<(String, String)>>,
}

impl FixedInteractions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register entries for an unordered id pair.
    pub fn with(mut self, first: &str, second: &str, entries: Vec<InteractionEntry>) -> Self {
        self.answers
            .insert(Self::key(first, second), FixedAnswer::Entries(entries));
        self
    }

    /// Make queries for an unordered id pair fail.
    pub fn failing(mut self, first: &str, second: &str, reason: &str) -> Self {
        self.answers.insert(
            Self::key(first, second),
            FixedAnswer::Failure(reason.to_string()),
        );
        self
    }

    /// Id pairs queried, in call order and argument order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }

    fn key(first: &str, second: &str) -> (String, String) {
        if first <= second {
            (first.to_string(), second.to_string())
        } else {
            (second.to_string(), first.to_string())
        }
    }
}

impl InteractionLookup for FixedInteractions {
    fn interactions(
        &self,
        first: &TerminologyId,
        second: &TerminologyId,
    ) -> LookupResult<Vec<InteractionEntry>> {
        self.calls
            .borrow_mut()
            .push((first.to_string(), second.to_string()));

        match self.answers.get(&Self::key(first.as_str(), second.as_str())) {
            Some(FixedAnswer::Entries(entries)) => Ok(entries.clone()),
            Some(FixedAnswer::Failure(reason)) => Err(LookupError::Unavailable(reason.clone())),
            None => Ok(Vec::new()),
        }
    }
}
