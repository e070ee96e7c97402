use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use lsh_ledger::InMemoryLedger;
use serde::Deserialize;

use crate::cli::OutputFormat;

/// Host configuration, read from TOML.
///
/// ```toml
/// halt_on_error = true
/// format = "json"
///
/// [seed]
/// alice = "100"
/// bob = "200"
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Entries written to the ledger before any invocation runs.
    pub seed: BTreeMap<String, String>,
    pub halt_on_error: bool,
    pub format: Option<OutputFormat>,
}

impl HostConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// A fresh ledger holding the seed entries.
    pub fn seeded_ledger(&self) -> InMemoryLedger {
        InMemoryLedger::with_entries(
            self.seed
                .iter()
                .map(|(k, v)| (k.clone(), v.as_bytes().to_vec())),
        )
    }
}
