use std::process::ExitCode;

use colored::Colorize;
use lsh_handler::{Invocation, StateHandler};
use lsh_ledger::InMemoryLedger;
use serde_json::json;

use crate::cli::*;
use crate::config::HostConfig;
use crate::host::{Host, Outcome, Script};

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };
    let format = cli.format.or(config.format).unwrap_or_default();
    let host = Host::new(StateHandler::new(), config.seeded_ledger());

    let (outcomes, dump) = match cli.command {
        Command::Call(args) => {
            let invocation = Invocation::new(args.function, args.args);
            (host.run([&invocation], false), args.dump)
        }
        Command::Run(args) => {
            let script = Script::load(&args.script)?;
            let halt = args.halt_on_error || config.halt_on_error;
            (host.run(&script.invocations, halt), args.dump)
        }
    };

    for outcome in &outcomes {
        print_outcome(outcome, format);
    }
    if dump {
        print_ledger(host.ledger(), format);
    }

    let failed = outcomes.iter().filter(|o| !o.response.is_success()).count();
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcome(outcome: &Outcome, format: OutputFormat) {
    let response = &outcome.response;
    let payload = response.payload().map(|p| String::from_utf8_lossy(p).into_owned());
    match format {
        OutputFormat::Json => {
            let doc = json!({
                "function": outcome.invocation.function(),
                "args": outcome.invocation.args(),
                "status": response.status(),
                "payload": payload,
                "message": response.message(),
            });
            println!("{doc}");
        }
        OutputFormat::Text => {
            let call = outcome.invocation.to_string();
            match response.message() {
                None => {
                    println!("{} {} {}", "✓".green().bold(), response.status(), call.bold());
                    if let Some(payload) = payload {
                        println!("  {}", payload.cyan());
                    }
                }
                Some(message) => {
                    println!("{} {} {}", "✗".red().bold(), response.status(), call.bold());
                    println!("  {}", message.red());
                }
            }
        }
    }
}

fn print_ledger(ledger: &InMemoryLedger, format: OutputFormat) {
    let entries = ledger.snapshot();
    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .iter()
                .map(|(k, v)| (k.clone(), json!(String::from_utf8_lossy(v))))
                .collect();
            println!("{}", json!({ "ledger": map }));
        }
        OutputFormat::Text => {
            println!("Ledger: {} entries", entries.len().to_string().bold());
            for (key, value) in &entries {
                println!("  {} = {}", key.yellow(), String::from_utf8_lossy(value));
            }
        }
    }
}
