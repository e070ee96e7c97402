//! Ledger access contract for the ledger-state handler.
//!
//! The handler never owns storage. It reads and writes named entries through
//! the [`LedgerStub`] trait, which a host platform implements over its own
//! durable key-value ledger. This crate provides that boundary plus two
//! host-side pieces used by tests and the local `lsh` host:
//!
//! - [`InMemoryLedger`] -- `BTreeMap`-backed ledger for tests and embedding
//! - [`TransactionScope`] -- buffers one invocation's writes and applies them
//!   on commit
//!
//! # Contract Rules
//!
//! 1. `get_state` returns `Ok(None)` for an absent key, never a default value.
//! 2. Contents are opaque bytes; the ledger never interprets them.
//! 3. Deleting an absent key succeeds.
//! 4. Every failure is reported as a [`LedgerError`], never silently dropped.

pub mod error;
pub mod memory;
pub mod traits;
pub mod transaction;

pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use traits::LedgerStub;
pub use transaction::TransactionScope;
