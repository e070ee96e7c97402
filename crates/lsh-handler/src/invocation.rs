use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// One call into the handler: a function name and its ordered arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a flat argument list the way the host platform does: the first
    /// element is the function name, the rest are its arguments. An empty
    /// list yields an empty function name.
    pub fn from_args<I, S>(all: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = all.into_iter().map(Into::into);
        let function = iter.next().unwrap_or_default();
        Self {
            function,
            args: iter.collect(),
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.function, self.args.join(", "))
    }
}

/// The functions the handler knows, selected by exact name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Init,
    Invoke,
    Delete,
    Query,
}

impl Function {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Invoke => "invoke",
            Self::Delete => "delete",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Function {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Self::Init),
            "invoke" => Ok(Self::Invoke),
            "delete" => Ok(Self::Delete),
            "query" => Ok(Self::Query),
            other => Err(HandlerError::InvalidFunction(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_functions() {
        for f in [Function::Init, Function::Invoke, Function::Delete, Function::Query] {
            assert_eq!(f.as_str().parse::<Function>().unwrap(), f);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        let err = "Query".parse::<Function>().unwrap_err();
        assert_eq!(err, HandlerError::InvalidFunction("Query".into()));
    }

    #[test]
    fn from_args_splits_function() {
        let inv = Invocation::from_args(["invoke", "alice", "-reduce"]);
        assert_eq!(inv.function(), "invoke");
        assert_eq!(inv.args(), ["alice", "-reduce"]);
    }

    #[test]
    fn from_args_empty() {
        let inv = Invocation::from_args(Vec::<String>::new());
        assert_eq!(inv.function(), "");
        assert!(inv.args().is_empty());
    }

    #[test]
    fn display() {
        let inv = Invocation::new("init", ["a", "1", "b", "2"]);
        assert_eq!(inv.to_string(), "init(a, 1, b, 2)");
    }

    #[test]
    fn deserialize_without_args() {
        let inv: Invocation = serde_json::from_str(r#"{"function":"query"}"#).unwrap();
        assert_eq!(inv, Invocation::new("query", Vec::<String>::new()));
    }
}
