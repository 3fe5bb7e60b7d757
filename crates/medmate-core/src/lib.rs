//! MedMate Core Library
//!
//! Drug-interaction checking for the MedMate medicine manager.
//!
//! # Architecture
//!
//! ```text
//! Medicine names ─▶ ensure_checkable (≥ 2 names)
//!                          │
//!                          ▼
//!              ┌───────────────────────┐
//!              │  Resolution pass      │──▶ NameResolver (RxNav / local table)
//!              │  one lookup per name  │
//!              └───────────┬───────────┘
//!                          ▼
//!              ┌───────────────────────┐
//!              │  Pairwise pass        │──▶ InteractionLookup (RxNav / local table)
//!              │  every i < j          │
//!              └───────────┬───────────┘
//!                          ▼
//!              InteractionReport { interactions, notices }
//!                          │
//!                          ▼
//!                      ReportView
//! ```
//!
//! # Core Principle
//!
//! **Partial failures never abort a check.** An unresolved name or a failed
//! pair query becomes a notice; the remaining pairs still run.
//!
//! # Modules
//!
//! - [`models`]: Domain types (MedicineName, Severity, InteractionReport, etc.)
//! - [`resolver`]: Resolver/lookup capabilities and name normalization
//! - [`rxnav`]: RxNav HTTP client
//! - [`checker`]: Pairwise interaction checker with cancellation
//! - [`db`]: SQLite-backed local interaction table
//! - [`present`]: Report view model and the two-medicine guard
//! - [`service`]: JSON request/response envelope
//! - [`config`]: Client configuration

pub mod checker;
pub mod config;
pub mod db;
pub mod models;
pub mod present;
pub mod resolver;
pub mod rxnav;
pub mod service;

// Re-export commonly used types
pub use checker::{CancelFlag, CheckError, InteractionChecker};
pub use config::ClientConfig;
pub use db::{Database, LocalInteractionTable};
pub use models::{InteractionRecord, InteractionReport, MedicineName, Severity, TerminologyId};
pub use present::{ensure_checkable, ReportView};
pub use resolver::{InteractionLookup, NameResolver};
pub use rxnav::RxNavClient;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedMateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Lookup error: {0}")]
    LookupError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<CheckError> for MedMateError {
    fn from(e: CheckError) -> Self {
        match e {
            CheckError::TooFewMedicines | CheckError::MalformedRequest(_) => {
                MedMateError::InvalidInput(e.to_string())
            }
            CheckError::Cancelled => MedMateError::Cancelled(e.to_string()),
        }
    }
}

impl From<resolver::LookupError> for MedMateError {
    fn from(e: resolver::LookupError) -> Self {
        MedMateError::LookupError(e.to_string())
    }
}

impl From<db::DbError> for MedMateError {
    fn from(e: db::DbError) -> Self {
        MedMateError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for MedMateError {
    fn from(e: serde_json::Error) -> Self {
        MedMateError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedMateError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedMateError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install the log subscriber. `RUST_LOG` overrides the default filter.
/// Calling this more than once is harmless.
#[uniffi::export]
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok() {
        tracing::info!("MedMate core v{} logging initialized", env!("CARGO_PKG_VERSION"));
    }
}

/// Open a core that checks interactions online only.
#[uniffi::export]
pub fn open_core() -> Result<Arc<MedMateCore>, MedMateError> {
    MedMateCore::build(ClientConfig::from_env(), None)
}

/// Open a core with a local interaction table at `path`, seeded on first use.
#[uniffi::export]
pub fn open_core_with_database(path: String) -> Result<Arc<MedMateCore>, MedMateError> {
    let db = Database::open(&path)?;
    if db.count_interactions()? == 0 {
        db.seed_defaults()?;
    }
    MedMateCore::build(ClientConfig::from_env(), Some(db))
}

/// Open a core with a seeded in-memory interaction table (for testing).
#[uniffi::export]
pub fn open_core_in_memory() -> Result<Arc<MedMateCore>, MedMateError> {
    let db = Database::open_in_memory()?;
    db.seed_defaults()?;
    MedMateCore::build(ClientConfig::from_env(), Some(db))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe interaction checking for FFI.
#[derive(uniffi::Object)]
pub struct MedMateCore {
    client: RxNavClient,
    db: Option<Arc<Mutex<Database>>>,
    /// Flag of the most recently started check
    current_check: Mutex<CancelFlag>,
}

impl MedMateCore {
    fn build(config: ClientConfig, db: Option<Database>) -> Result<Arc<Self>, MedMateError> {
        let client = RxNavClient::new(config)?;
        Ok(Arc::new(Self {
            client,
            db: db.map(|d| Arc::new(Mutex::new(d))),
            current_check: Mutex::new(CancelFlag::new()),
        }))
    }

    /// Hand a new check its own flag. Checks already running keep theirs,
    /// so a cancel aimed at them still lands after this one starts.
    fn begin_check(&self) -> CancelFlag {
        let flag = CancelFlag::new();
        let mut current = self
            .current_check
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = flag.clone();
        flag
    }
}

#[uniffi::export]
impl MedMateCore {
    // =========================================================================
    // Interaction Checks
    // =========================================================================

    /// Check the medicines against RxNav.
    pub fn check_interactions(
        &self,
        medicines: Vec<String>,
    ) -> Result<FfiInteractionReport, MedMateError> {
        ensure_checkable(&medicines)?;
        let cancel = self.begin_check();

        let checker = InteractionChecker::new(&self.client, &self.client);
        let report = checker.check_all_with_cancel(&medicines, &cancel)?;
        Ok(report.into())
    }

    /// Check the medicines against the local interaction table.
    pub fn check_interactions_offline(
        &self,
        medicines: Vec<String>,
    ) -> Result<FfiInteractionReport, MedMateError> {
        ensure_checkable(&medicines)?;
        let db = self
            .db
            .as_ref()
            .ok_or_else(|| MedMateError::InvalidInput("No local interaction table".into()))?
            .lock()?;
        let cancel = self.begin_check();

        let table = LocalInteractionTable::new(&db);
        let checker = InteractionChecker::new(&table, &table);
        let report = checker.check_all_with_cancel(&medicines, &cancel)?;
        Ok(report.into())
    }

    /// Handle a raw JSON check request against RxNav.
    pub fn handle_check_request(&self, body: String) -> FfiServiceResponse {
        let cancel = self.begin_check();
        let checker = InteractionChecker::new(&self.client, &self.client);
        service::handle_check_request(&checker, &body, &cancel).into()
    }

    /// Stop the most recently started check at its next iteration.
    pub fn cancel(&self) {
        tracing::info!("interaction check cancellation requested");
        self.current_check
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .cancel();
    }

    // =========================================================================
    // Local Table
    // =========================================================================

    /// Add or update an interaction in the local table.
    pub fn upsert_local_interaction(
        &self,
        medicine_a: String,
        medicine_b: String,
        interaction_type: String,
        description: String,
        severity_level: Option<i64>,
    ) -> Result<(), MedMateError> {
        let db = self
            .db
            .as_ref()
            .ok_or_else(|| MedMateError::InvalidInput("No local interaction table".into()))?
            .lock()?;
        db.upsert_interaction(
            &medicine_a,
            &medicine_b,
            &interaction_type,
            &description,
            severity_level,
        )?;
        Ok(())
    }

    /// Render a report as plain text.
    pub fn render_report(&self, report: FfiInteractionReport) -> String {
        ReportView::from_report(&report.into()).render_text()
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe interaction record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInteractionRecord {
    pub drug1: String,
    pub drug2: String,
    pub description: String,
    /// "low", "moderate", "high" or "major"
    pub severity: String,
}

impl From<InteractionRecord> for FfiInteractionRecord {
    fn from(record: InteractionRecord) -> Self {
        Self {
            drug1: record.drug1,
            drug2: record.drug2,
            description: record.description,
            severity: record.severity.as_str().to_string(),
        }
    }
}

impl From<FfiInteractionRecord> for InteractionRecord {
    fn from(record: FfiInteractionRecord) -> Self {
        InteractionRecord {
            drug1: record.drug1,
            drug2: record.drug2,
            description: record.description,
            severity: Severity::from_label(Some(&record.severity)),
        }
    }
}

/// FFI-safe interaction report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInteractionReport {
    pub interactions: Vec<FfiInteractionRecord>,
    pub notices: Vec<String>,
    pub all_clear: bool,
}

impl From<InteractionReport> for FfiInteractionReport {
    fn from(report: InteractionReport) -> Self {
        let all_clear = ReportView::from_report(&report).all_clear;
        Self {
            interactions: report.interactions.into_iter().map(Into::into).collect(),
            notices: report.notices,
            all_clear,
        }
    }
}

impl From<FfiInteractionReport> for InteractionReport {
    fn from(report: FfiInteractionReport) -> Self {
        InteractionReport {
            interactions: report.interactions.into_iter().map(Into::into).collect(),
            notices: report.notices,
        }
    }
}

/// FFI-safe service response.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiServiceResponse {
    pub status: u16,
    pub body: String,
}

impl From<service::ServiceResponse> for FfiServiceResponse {
    fn from(response: service::ServiceResponse) -> Self {
        Self {
            status: response.status,
            body: response.body,
        }
    }
}
