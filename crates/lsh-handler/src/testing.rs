//! Ledger doubles for handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use lsh_ledger::{InMemoryLedger, LedgerError, LedgerResult, LedgerStub};

/// Which contract call should fail.
#[derive(Clone, Debug, Default)]
pub struct Faults {
    pub get: bool,
    /// Fail `put_state` for this key only.
    pub put_key: Option<String>,
    pub delete: bool,
}

/// An [`InMemoryLedger`] that counts every call and fails on demand.
#[derive(Debug, Default)]
pub struct FaultyLedger {
    pub inner: InMemoryLedger,
    pub faults: Faults,
    calls: AtomicUsize,
}

impl FaultyLedger {
    pub fn new(faults: Faults) -> Self {
        Self {
            inner: InMemoryLedger::new(),
            faults,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn seeded(entries: &[(&str, &str)]) -> Self {
        Self {
            inner: InMemoryLedger::with_entries(entries.iter().copied()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl LedgerStub for FaultyLedger {
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        self.record();
        if self.faults.get {
            return Err(LedgerError::Unavailable("read timed out".into()));
        }
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        self.record();
        if self.faults.put_key.as_deref() == Some(key) {
            return Err(LedgerError::Rejected {
                key: key.to_owned(),
                reason: "write conflict".into(),
            });
        }
        self.inner.put_state(key, value)
    }

    fn delete_state(&self, key: &str) -> LedgerResult<()> {
        self.record();
        if self.faults.delete {
            return Err(LedgerError::Unavailable("delete refused".into()));
        }
        self.inner.delete_state(key)
    }
}
