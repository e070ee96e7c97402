use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerStub;

/// In-memory, `BTreeMap`-based ledger.
///
/// Intended for tests, local hosts and embedding. Entries are held behind a
/// `RwLock` for safe concurrent access and cloned on read.
pub struct InMemoryLedger {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a ledger pre-populated with the given entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Sorted list of all keys.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Copy of every entry, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.entries.read().expect("lock poisoned").clone()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn check_key(key: &str) -> LedgerResult<()> {
    if key.is_empty() {
        return Err(LedgerError::EmptyKey);
    }
    Ok(())
}

impl LedgerStub for InMemoryLedger {
    fn get_state(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        check_key(key)?;
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        check_key(key)?;
        let mut map = self.entries.write().expect("lock poisoned");
        map.insert(key.to_owned(), value.to_vec());
        debug!(key, len = value.len(), "entry written");
        Ok(())
    }

    fn delete_state(&self, key: &str) -> LedgerResult<()> {
        check_key(key)?;
        let mut map = self.entries.write().expect("lock poisoned");
        let existed = map.remove(key).is_some();
        debug!(key, existed, "entry deleted");
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryLedger")
            .field("entry_count", &count)
            .finish()
    }
}
