use crate::error::LedgerResult;

/// Key-value access to the ledger, scoped to the current invocation.
///
/// All implementations must satisfy these invariants:
/// - An absent key reads as `Ok(None)`. Callers decide what absence means.
/// - Contents are stored and returned byte-for-byte.
/// - Deleting an absent key is not an error.
/// - No session state survives between invocations; a handler re-reads
///   whatever it needs on every call.
pub trait LedgerStub: Send + Sync {
    /// Read the current content stored under `key`.
    ///
    /// Returns `Ok(None)` if no entry exists.
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any existing entry.
    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Remove the entry stored under `key`.
    fn delete_state(&self, key: &str) -> LedgerResult<()>;
}

impl<T: LedgerStub + ?Sized> LedgerStub for &T {
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        (**self).get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        (**self).put_state(key, value)
    }

    fn delete_state(&self, key: &str) -> LedgerResult<()> {
        (**self).delete_state(key)
    }
}
