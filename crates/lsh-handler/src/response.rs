use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HandlerError, HandlerResult};

/// Platform status code for a successful invocation.
pub const STATUS_OK: i32 = 200;
/// Platform status code for a failed invocation.
pub const STATUS_ERROR: i32 = 500;

/// Result envelope handed back to the host platform.
///
/// The host serializes this onto its own wire protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Success { payload: Option<Vec<u8>> },
    Error { message: String },
}

impl Response {
    pub fn success(payload: Option<Vec<u8>>) -> Self {
        Self::Success { payload }
    }

    /// Success with no payload.
    pub fn ok() -> Self {
        Self::Success { payload: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status(&self) -> i32 {
        match self {
            Self::Success { .. } => STATUS_OK,
            Self::Error { .. } => STATUS_ERROR,
        }
    }

    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Success { payload } => payload.as_deref(),
            Self::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message } => Some(message),
        }
    }
}

impl From<HandlerError> for Response {
    fn from(err: HandlerError) -> Self {
        warn!(error = %err, "invocation failed");
        Self::error(err.to_string())
    }
}

impl From<HandlerResult<Option<Vec<u8>>>> for Response {
    fn from(result: HandlerResult<Option<Vec<u8>>>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => err.into(),
        }
    }
}

/// Success document returned by `query`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Content")]
    pub content: String,
}

impl QueryPayload {
    /// Non-UTF-8 content is rendered lossily.
    pub fn new(name: impl Into<String>, content: &[u8]) -> Self {
        Self {
            name: name.into(),
            content: String::from_utf8_lossy(content).into_owned(),
        }
    }

    pub fn to_bytes(&self) -> HandlerResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| HandlerError::Payload(e.to_string()))
    }
}

/// Error document returned by `query` when the entry cannot be read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(rename = "Error")]
    pub error: String,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn to_json(&self) -> HandlerResult<String> {
        serde_json::to_string(self).map_err(|e| HandlerError::Payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(Response::ok().status(), 200);
        assert_eq!(Response::error("boom").status(), 500);
    }

    #[test]
    fn accessors() {
        let ok = Response::success(Some(b"data".to_vec()));
        assert!(ok.is_success());
        assert_eq!(ok.payload(), Some(&b"data"[..]));
        assert_eq!(ok.message(), None);

        let err = Response::error("boom");
        assert!(!err.is_success());
        assert_eq!(err.payload(), None);
        assert_eq!(err.message(), Some("boom"));
    }

    #[test]
    fn from_error_uses_display() {
        let resp: Response = HandlerError::NotFound { key: "x".into() }.into();
        assert_eq!(resp, Response::error("Entity not found"));
    }

    #[test]
    fn query_payload_field_names() {
        let bytes = QueryPayload::new("alice", b"100-reduce").to_bytes().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"Name":"alice","Content":"100-reduce"}"#
        );
    }

    #[test]
    fn query_payload_escapes_quotes() {
        let bytes = QueryPayload::new("k", br#"say "hi""#).to_bytes().unwrap();
        let back: QueryPayload = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.content, r#"say "hi""#);
    }

    #[test]
    fn error_payload_field_name() {
        let json = ErrorPayload::new("Nil content for bob").to_json().unwrap();
        assert_eq!(json, r#"{"Error":"Nil content for bob"}"#);
    }
}
