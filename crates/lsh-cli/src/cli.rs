use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

#[derive(Parser)]
#[command(
    name = "lsh",
    about = "Ledger-state handler: run invocations against a local in-memory ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format; overrides the config file.
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Host configuration (TOML).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a single invocation
    Call(CallArgs),
    /// Run every invocation in a TOML script, in order
    Run(RunArgs),
}

#[derive(Args)]
pub struct CallArgs {
    /// Function name: init, invoke, delete or query
    pub function: String,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
    /// Print the ledger after the invocation
    #[arg(long)]
    pub dump: bool,
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
    /// Stop at the first failed invocation
    #[arg(long)]
    pub halt_on_error: bool,
    /// Print the ledger after the run
    #[arg(long)]
    pub dump: bool,
}
