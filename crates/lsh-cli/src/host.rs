use std::path::Path;

use anyhow::Context;
use lsh_handler::{Chaincode, Function, Invocation, Response};
use lsh_ledger::{InMemoryLedger, TransactionScope};
use serde::Deserialize;
use tracing::{debug, warn};

/// A sequence of invocations read from TOML.
///
/// ```toml
/// [[invocation]]
/// function = "init"
/// args = ["alice", "100", "bob", "200"]
///
/// [[invocation]]
/// function = "query"
/// args = ["alice"]
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Script {
    #[serde(rename = "invocation", default)]
    pub invocations: Vec<Invocation>,
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }
}

/// An invocation together with the response it produced.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub invocation: Invocation,
    pub response: Response,
}

/// Local stand-in for the host platform.
///
/// Each submitted invocation runs inside its own [`TransactionScope`]: the
/// scope is committed when the handler answers with success and aborted
/// otherwise, so a failed invocation leaves the ledger untouched.
pub struct Host<C> {
    handler: C,
    ledger: InMemoryLedger,
}

impl<C: Chaincode> Host<C> {
    pub fn new(handler: C, ledger: InMemoryLedger) -> Self {
        Self { handler, ledger }
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    pub fn submit(&self, invocation: &Invocation) -> Response {
        let scope = TransactionScope::begin(&self.ledger);
        let response = if invocation.function() == Function::Init.as_str() {
            self.handler.init(&scope, invocation)
        } else {
            self.handler.invoke(&scope, invocation)
        };

        if !response.is_success() {
            if let Err(e) = scope.abort() {
                warn!(error = %e, "abort failed");
            }
            return response;
        }

        match scope.commit() {
            Ok(applied) => {
                debug!(%invocation, applied, "invocation committed");
                response
            }
            Err(e) => {
                warn!(%invocation, error = %e, "commit failed");
                Response::error(e.to_string())
            }
        }
    }

    /// Submit invocations in order. With `halt_on_error`, stops after the
    /// first failure; the failing outcome is still returned.
    pub fn run<'a, I>(&self, invocations: I, halt_on_error: bool) -> Vec<Outcome>
    where
        I: IntoIterator<Item = &'a Invocation>,
    {
        let mut outcomes = Vec::new();
        for invocation in invocations {
            let response = self.submit(invocation);
            let failed = !response.is_success();
            outcomes.push(Outcome {
                invocation: invocation.clone(),
                response,
            });
            if failed && halt_on_error {
                debug!("halting after failed invocation");
                break;
            }
        }
        outcomes
    }
}
