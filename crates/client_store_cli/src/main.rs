//! Local invocation layer for the client store handlers.
//!
//! Reads one request envelope (JSON) from `--event` or stdin, runs the
//! selected handler against the configured store, and prints the response
//! envelope as JSON on stdout.

use clap::{Parser, ValueEnum};
use client_store_core::{core_version, init_logging};
use client_store_handlers::{invoke, load_config, parse_envelope, HandlerKind};
use log::error;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "client_store")]
#[command(version)]
#[command(about = "Invoke client store request handlers", long_about = None)]
struct Cli {
    /// Handler to run
    #[arg(value_enum)]
    handler: HandlerArg,

    /// Request envelope file; stdin when omitted
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Pretty-print the response envelope
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum HandlerArg {
    Create,
    Get,
    Update,
}

impl From<HandlerArg> for HandlerKind {
    fn from(value: HandlerArg) -> Self {
        match value {
            HandlerArg::Create => Self::Create,
            HandlerArg::Get => Self::Get,
            HandlerArg::Update => Self::Update,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("client_store: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = load_config().map_err(|err| err.to_string())?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;
    log::debug!(
        "event=invoke module=cli status=start version={} table={}",
        core_version(),
        config.table_name
    );

    let raw = read_event(cli.event.as_ref()).map_err(|err| format!("failed to read event: {err}"))?;
    let request = parse_envelope(&raw).map_err(|err| err.to_string())?;

    let kind = HandlerKind::from(cli.handler);
    let response = invoke(kind, &config, &request).map_err(|err| {
        error!("event=invoke module=cli status=error handler={kind} error={err}");
        err.to_string()
    })?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    }
    .map_err(|err| format!("failed to encode response: {err}"))?;
    println!("{rendered}");
    Ok(())
}

fn read_event(path: Option<&PathBuf>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}
