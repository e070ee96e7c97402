//! Ledger-state handler.
//!
//! The entry point a host transaction platform calls to read, write and
//! mutate named entries in its key-value ledger. A host hands the handler a
//! [`LedgerStub`] for the current invocation plus an [`Invocation`]
//! (function name and ordered string arguments) and gets back a
//! [`Response`].
//!
//! | Function | Args | Success payload |
//! |---|---|---|
//! | `init` | key A, content A, key B, content B | none |
//! | `invoke` | key, value to append | none |
//! | `delete` | key | none |
//! | `query` | key | `{"Name":"<key>","Content":"<content>"}` |
//!
//! Entry contents are opaque text. `invoke` appends by concatenation; it
//! never parses contents as numbers.
//!
//! The handler holds no state between invocations. [`StateHandler`] is a unit
//! struct and every operation re-reads the ledger before mutating it.

pub mod error;
pub mod handler;
pub mod invocation;
pub mod response;

#[cfg(test)]
mod testing;

pub use error::{HandlerError, HandlerResult};
pub use handler::{Chaincode, StateHandler};
pub use invocation::{Function, Invocation};
pub use response::{ErrorPayload, QueryPayload, Response, STATUS_ERROR, STATUS_OK};

// Re-export the ledger contract so hosts need only this crate.
pub use lsh_ledger::{InMemoryLedger, LedgerError, LedgerStub, TransactionScope};
