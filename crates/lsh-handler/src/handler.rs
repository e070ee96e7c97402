use lsh_ledger::LedgerStub;
use tracing::{debug, info};

use crate::error::{HandlerError, HandlerResult};
use crate::invocation::{Function, Invocation};
use crate::response::{ErrorPayload, QueryPayload, Response};

/// Entry points a host platform calls.
///
/// `init` runs once when the handler is instantiated on a ledger; `invoke`
/// runs for every later transaction. Both receive a ledger scoped to the
/// current invocation.
pub trait Chaincode: Send + Sync {
    fn init(&self, ledger: &dyn LedgerStub, invocation: &Invocation) -> Response;

    fn invoke(&self, ledger: &dyn LedgerStub, invocation: &Invocation) -> Response;
}

/// Stateless handler for named text entries.
///
/// Holds no fields; one instance can serve any number of invocations.
#[derive(Clone, Copy, Debug, Default)]
pub struct StateHandler;

impl StateHandler {
    pub fn new() -> Self {
        Self
    }

    /// Route an invocation for hosts that do not separate instantiation from
    /// regular transactions: `init` goes to [`Chaincode::init`], every other
    /// name to [`Chaincode::invoke`].
    pub fn dispatch(&self, ledger: &dyn LedgerStub, invocation: &Invocation) -> Response {
        if invocation.function() == Function::Init.as_str() {
            self.init(ledger, invocation)
        } else {
            self.invoke(ledger, invocation)
        }
    }

    /// Seed two entries: `[key_a, content_a, key_b, content_b]`.
    ///
    /// Existing entries are overwritten. If the first write fails the second
    /// is never attempted.
    pub fn initialize(&self, ledger: &dyn LedgerStub, args: &[String]) -> HandlerResult<()> {
        let [key_a, content_a, key_b, content_b] = expect_args::<4>(args, "4")?;

        info!(%key_a, %content_a, %key_b, %content_b, "initializing entries");

        ledger
            .put_state(key_a, content_a.as_bytes())
            .map_err(HandlerError::LedgerWrite)?;
        ledger
            .put_state(key_b, content_b.as_bytes())
            .map_err(HandlerError::LedgerWrite)?;
        Ok(())
    }

    /// Append `value` to the content of an existing entry: `[key, value]`.
    ///
    /// Contents are concatenated as text, never parsed as numbers. Only the
    /// named key is read or written.
    pub fn transfer(&self, ledger: &dyn LedgerStub, args: &[String]) -> HandlerResult<()> {
        let [key, value] = expect_args::<2>(args, "2")?;

        let mut content = ledger
            .get_state(key)
            .map_err(HandlerError::LedgerRead)?
            .ok_or_else(|| HandlerError::NotFound { key: key.clone() })?;
        content.extend_from_slice(value.as_bytes());

        debug!(%key, content = %String::from_utf8_lossy(&content), "appended to entry");

        ledger
            .put_state(key, &content)
            .map_err(HandlerError::LedgerWrite)
    }

    /// Remove an entry: `[key]`. An absent key is not an error here; only the
    /// ledger decides whether a delete fails.
    pub fn delete(&self, ledger: &dyn LedgerStub, args: &[String]) -> HandlerResult<()> {
        let [key] = expect_args::<1>(args, "1")?;

        ledger.delete_state(key).map_err(HandlerError::LedgerDelete)?;
        debug!(%key, "entry deleted");
        Ok(())
    }

    /// Read an entry: `[key]`. Returns the bytes of
    /// `{"Name":"<key>","Content":"<content>"}`.
    ///
    /// Read failures and absent entries both fail with a JSON error document
    /// naming the queried key.
    pub fn query(&self, ledger: &dyn LedgerStub, args: &[String]) -> HandlerResult<Vec<u8>> {
        let [key] = expect_args::<1>(args, "name of the person to query")?;

        let content = match ledger.get_state(key) {
            Ok(Some(content)) => content,
            Ok(None) => return Err(query_failed(format!("Nil content for {key}"))),
            Err(e) => {
                debug!(%key, error = %e, "query read failed");
                return Err(query_failed(format!("Failed to get state for {key}")));
            }
        };

        let payload = QueryPayload::new(key.as_str(), &content).to_bytes()?;
        debug!(response = %String::from_utf8_lossy(&payload), "query response");
        Ok(payload)
    }

    fn route(
        &self,
        ledger: &dyn LedgerStub,
        invocation: &Invocation,
    ) -> HandlerResult<Option<Vec<u8>>> {
        let args = invocation.args();
        match invocation.function().parse::<Function>()? {
            Function::Invoke => self.transfer(ledger, args).map(|()| None),
            Function::Delete => self.delete(ledger, args).map(|()| None),
            Function::Query => self.query(ledger, args).map(Some),
            Function::Init => Err(HandlerError::InvalidFunction(
                invocation.function().to_owned(),
            )),
        }
    }
}

impl Chaincode for StateHandler {
    fn init(&self, ledger: &dyn LedgerStub, invocation: &Invocation) -> Response {
        debug!(args = invocation.args().len(), "init");
        self.initialize(ledger, invocation.args())
            .map(|()| None::<Vec<u8>>)
            .into()
    }

    fn invoke(&self, ledger: &dyn LedgerStub, invocation: &Invocation) -> Response {
        debug!(function = invocation.function(), args = invocation.args().len(), "invoke");
        self.route(ledger, invocation).into()
    }
}

/// Borrow `args` as a fixed-size array, or fail with the operation's
/// argument-count message.
fn expect_args<'a, const N: usize>(
    args: &'a [String],
    expected: &'static str,
) -> HandlerResult<&'a [String; N]> {
    args.try_into()
        .map_err(|_| HandlerError::ArgumentCount { expected })
}

fn query_failed(message: String) -> HandlerError {
    match ErrorPayload::new(message).to_json() {
        Ok(json) => HandlerError::QueryFailed(json),
        Err(e) => e,
    }
}
