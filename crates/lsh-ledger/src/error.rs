/// Errors reported by a ledger access contract implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Keys must be non-empty.
    #[error("key must not be empty")]
    EmptyKey,

    /// The backing ledger could not be reached or failed internally.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The ledger refused the operation on this key.
    #[error("ledger rejected operation on {key}: {reason}")]
    Rejected { key: String, reason: String },

    /// The transaction scope was already committed or aborted.
    #[error("transaction scope is closed")]
    Closed,
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
