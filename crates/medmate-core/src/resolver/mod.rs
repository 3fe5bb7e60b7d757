//! Capabilities the interaction checker depends on.
//!
//! Resolution: medicine name → terminology id (never fails, absent means not found)
//! Lookup: pair of ids → interaction entries (may fail per pair)

mod fixed;
mod normalizer;

pub use fixed::*;
pub use normalizer::*;

use crate::db::DbError;
use crate::models::{InteractionEntry, TerminologyId};
use thiserror::Error;

/// Interaction lookup errors.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Lookup unavailable: {0}")]
    Unavailable(String),
}

impl LookupError {
    /// Transport failures and server-side errors may succeed on a second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            LookupError::Http(_) | LookupError::Timeout(_) => true,
            LookupError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Maps a free-text medicine name to a terminology id.
///
/// Implementations absorb their own failures: a transport error and an
/// unknown drug both come back as `None`.
pub trait NameResolver {
    fn resolve(&self, name: &str) -> Option<TerminologyId>;
}

/// Returns known interactions between two terminology ids.
pub trait InteractionLookup {
    fn interactions(
        &self,
        first: &TerminologyId,
        second: &TerminologyId,
    ) -> LookupResult<Vec<InteractionEntry>>;
}
