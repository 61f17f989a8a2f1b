//! Shared error type across sentigate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Verification references an id that was never created.
    UnknownSubmission,
    /// Creation conflict on an id. Ids are caller-generated monotonic
    /// counters, so this is a logic error upstream, not a client error.
    DuplicateSubmission,
    /// The model service failed or returned garbage.
    Upstream,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnknownSubmission => "UNKNOWN_SUBMISSION",
            ClientCode::DuplicateSubmission => "DUPLICATE_SUBMISSION",
            ClientCode::Upstream => "UPSTREAM",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SentigateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum SentigateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unknown submission: {0}")]
    UnknownSubmission(String),
    #[error("duplicate submission id: {0}")]
    DuplicateSubmission(String),
    #[error("model service: {0}")]
    Upstream(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SentigateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            SentigateError::BadRequest(_) => ClientCode::BadRequest,
            SentigateError::UnknownSubmission(_) => ClientCode::UnknownSubmission,
            SentigateError::DuplicateSubmission(_) => ClientCode::DuplicateSubmission,
            SentigateError::Upstream(_) => ClientCode::Upstream,
            SentigateError::Internal(_) => ClientCode::Internal,
        }
    }
}
