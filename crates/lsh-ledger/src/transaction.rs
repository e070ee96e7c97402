use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerStub;

/// A pending mutation. `None` marks a delete.
type Pending = BTreeMap<String, Option<Vec<u8>>>;

struct ScopeState {
    pending: Pending,
    closed: bool,
}

/// One invocation's view of a backing ledger.
///
/// Reads see the scope's own buffered writes and deletes before falling
/// through to the backing ledger. Nothing reaches the backing ledger until
/// [`commit`](Self::commit); [`abort`](Self::abort) drops the buffer. Once
/// either has run, every call fails with [`LedgerError::Closed`].
pub struct TransactionScope<'a, L: LedgerStub + ?Sized> {
    backing: &'a L,
    state: Mutex<ScopeState>,
}

impl<'a, L: LedgerStub + ?Sized> TransactionScope<'a, L> {
    /// Open a scope over `backing`.
    pub fn begin(backing: &'a L) -> Self {
        Self {
            backing,
            state: Mutex::new(ScopeState {
                pending: BTreeMap::new(),
                closed: false,
            }),
        }
    }

    /// Number of buffered mutations (writes and deletes, one per key).
    pub fn pending_len(&self) -> usize {
        self.state.lock().expect("scope lock poisoned").pending.len()
    }

    /// Apply buffered mutations to the backing ledger.
    ///
    /// Returns the number of mutations applied. A backing failure stops the
    /// commit at that key and is returned; the scope is closed either way.
    pub fn commit(&self) -> LedgerResult<usize> {
        let pending = self.close()?;
        let count = pending.len();
        for (key, value) in pending {
            match value {
                Some(bytes) => self.backing.put_state(&key, &bytes)?,
                None => self.backing.delete_state(&key)?,
            }
        }
        debug!(count, "transaction scope committed");
        Ok(count)
    }

    /// Discard buffered mutations.
    pub fn abort(&self) -> LedgerResult<()> {
        let dropped = self.close()?.len();
        debug!(dropped, "transaction scope aborted");
        Ok(())
    }

    fn close(&self) -> LedgerResult<Pending> {
        let mut state = self.state.lock().expect("scope lock poisoned");
        if state.closed {
            return Err(LedgerError::Closed);
        }
        state.closed = true;
        Ok(std::mem::take(&mut state.pending))
    }

    fn stage(&self, key: &str, value: Option<Vec<u8>>) -> LedgerResult<()> {
        if key.is_empty() {
            return Err(LedgerError::EmptyKey);
        }
        let mut state = self.state.lock().expect("scope lock poisoned");
        if state.closed {
            return Err(LedgerError::Closed);
        }
        state.pending.insert(key.to_owned(), value);
        Ok(())
    }
}

impl<L: LedgerStub + ?Sized> LedgerStub for TransactionScope<'_, L> {
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        {
            let state = self.state.lock().expect("scope lock poisoned");
            if state.closed {
                return Err(LedgerError::Closed);
            }
            if let Some(staged) = state.pending.get(key) {
                return Ok(staged.clone());
            }
        }
        self.backing.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        self.stage(key, Some(value.to_vec()))
    }

    fn delete_state(&self, key: &str) -> LedgerResult<()> {
        self.stage(key, None)
    }
}

impl<L: LedgerStub + ?Sized> std::fmt::Debug for TransactionScope<'_, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().expect("scope lock poisoned");
        f.debug_struct("TransactionScope")
            .field("pending", &state.pending.len())
            .field("closed", &state.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLedger;

    #[test]
    fn writes_invisible_until_commit() {
        let ledger = InMemoryLedger::new();
        let scope = TransactionScope::begin(&ledger);
        scope.put_state("alice", b"100").unwrap();

        assert_eq!(scope.get_state("alice").unwrap(), Some(b"100".to_vec()));
        assert_eq!(ledger.get_state("alice").unwrap(), None);

        assert_eq!(scope.commit().unwrap(), 1);
        assert_eq!(ledger.get_state("alice").unwrap(), Some(b"100".to_vec()));
    }

    #[test]
    fn abort_discards_writes() {
        let ledger = InMemoryLedger::with_entries([("bob", "200")]);
        let scope = TransactionScope::begin(&ledger);
        scope.put_state("bob", b"999").unwrap();
        scope.delete_state("bob").unwrap();
        scope.abort().unwrap();
        assert_eq!(ledger.get_state("bob").unwrap(), Some(b"200".to_vec()));
    }

    #[test]
    fn staged_delete_shadows_backing_entry() {
        let ledger = InMemoryLedger::with_entries([("bob", "200")]);
        let scope = TransactionScope::begin(&ledger);
        scope.delete_state("bob").unwrap();
        assert_eq!(scope.get_state("bob").unwrap(), None);
        scope.commit().unwrap();
        assert_eq!(ledger.get_state("bob").unwrap(), None);
    }

    #[test]
    fn reads_fall_through_to_backing() {
        let ledger = InMemoryLedger::with_entries([("alice", "100")]);
        let scope = TransactionScope::begin(&ledger);
        assert_eq!(scope.get_state("alice").unwrap(), Some(b"100".to_vec()));
        assert_eq!(scope.pending_len(), 0);
    }

    #[test]
    fn last_write_per_key_wins() {
        let ledger = InMemoryLedger::new();
        let scope = TransactionScope::begin(&ledger);
        scope.put_state("k", b"1").unwrap();
        scope.put_state("k", b"2").unwrap();
        assert_eq!(scope.pending_len(), 1);
        scope.commit().unwrap();
        assert_eq!(ledger.get_state("k").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn closed_scope_rejects_calls() {
        let ledger = InMemoryLedger::new();
        let scope = TransactionScope::begin(&ledger);
        scope.commit().unwrap();
        assert_eq!(scope.get_state("k"), Err(LedgerError::Closed));
        assert_eq!(scope.put_state("k", b"v"), Err(LedgerError::Closed));
        assert_eq!(scope.commit(), Err(LedgerError::Closed));
        assert_eq!(scope.abort(), Err(LedgerError::Closed));
    }

    #[test]
    fn empty_key_rejected_when_staging() {
        let ledger = InMemoryLedger::new();
        let scope = TransactionScope::begin(&ledger);
        assert_eq!(scope.put_state("", b"v"), Err(LedgerError::EmptyKey));
        assert_eq!(scope.delete_state(""), Err(LedgerError::EmptyKey));
    }

    #[test]
    fn scope_over_trait_object() {
        let ledger = InMemoryLedger::new();
        let backing: &dyn LedgerStub = &ledger;
        let scope = TransactionScope::begin(backing);
        scope.put_state("x", b"y").unwrap();
        scope.commit().unwrap();
        assert_eq!(ledger.len(), 1);
    }
}
