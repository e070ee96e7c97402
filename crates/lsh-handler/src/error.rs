use lsh_ledger::LedgerError;
use thiserror::Error;

/// Why an invocation failed.
///
/// The `Display` text of each variant is the message returned to the caller
/// in the error response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Wrong number of arguments for the function. Checked before any
    /// ledger access.
    #[error("Incorrect number of arguments. Expecting {expected}")]
    ArgumentCount { expected: &'static str },

    /// The function name is not one the dispatcher routes.
    #[error("Invalid invoke function name. Expecting \"invoke\" \"delete\" \"query\"")]
    InvalidFunction(String),

    #[error("Failed to get state")]
    LedgerRead(#[source] LedgerError),

    /// Write failures surface the ledger's own message.
    #[error("{0}")]
    LedgerWrite(#[source] LedgerError),

    #[error("Failed to delete state")]
    LedgerDelete(#[source] LedgerError),

    /// A key the operation requires has no entry.
    #[error("Entity not found")]
    NotFound { key: String },

    /// Query failure; carries the JSON error document sent to the caller.
    #[error("{0}")]
    QueryFailed(String),

    #[error("payload encoding failed: {0}")]
    Payload(String),
}

pub type HandlerResult<T> = Result<T, HandlerError>;
