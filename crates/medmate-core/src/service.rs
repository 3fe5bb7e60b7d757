//! JSON request/response envelope for an interaction check.
//!
//! Request:  `{"medicines": ["Aspirin", "Warfarin"]}`
//! Success:  `{"interactions": [...], "notices": [...]}` (200)
//! Failure:  `{"error": "Failed to check drug interactions"}` (400 or 500)

use serde::{Deserialize, Serialize};

use crate::checker::{CancelFlag, CheckError, CheckResult, InteractionChecker};

pub const CHECK_FAILED_MESSAGE: &str = "Failed to check drug interactions";

/// Body of a check request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckRequest {
    pub medicines: Vec<String>,
}

impl CheckRequest {
    pub fn from_json(body: &str) -> CheckResult<Self> {
        serde_json::from_str(body).map_err(|e| CheckError::MalformedRequest(e.to_string()))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Status code and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: String,
}

impl ServiceResponse {
    fn error(status: u16) -> Self {
        let body = serde_json::to_string(&ErrorBody {
            error: CHECK_FAILED_MESSAGE,
        })
        .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", CHECK_FAILED_MESSAGE));
        Self { status, body }
    }
}

/// Parse a request body, run the check, and encode the outcome.
pub fn handle_check_request(
    checker: &InteractionChecker<'_>,
    body: &str,
    cancel: &CancelFlag,
) -> ServiceResponse {
    let request = match CheckRequest::from_json(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting interaction check request");
            return ServiceResponse::error(400);
        }
    };

    let report = match checker.check_all_with_cancel(&request.medicines, cancel) {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "interaction check failed");
            return ServiceResponse::error(500);
        }
    };

    match report.to_json() {
        Ok(body) => ServiceResponse { status: 200, body },
        Err(e) => {
            tracing::error!(error = %e, "failed to encode interaction report");
            ServiceResponse::error(500)
        }
    }
}
