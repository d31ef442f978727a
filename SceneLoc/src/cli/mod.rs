//! `SceneLoc` CLI - read and write localized dialogue in Unity assets files
//!
//! stdout carries only the JSON result document; logs go to stderr.

pub mod commands;

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use commands::Commands;
use tracing::Level;

use crate::error::Error;

/// Exit code for failures without a more specific code
pub const EXIT_UNEXPECTED: u8 = 1;
/// Exit code when the container file does not exist
pub const EXIT_NOT_FOUND: u8 = 3;
/// Exit code when the Dialogue Data document is invalid
pub const EXIT_MALFORMED_INPUT: u8 = 4;
/// Exit code when scene names carry no recognized language prefix
pub const EXIT_UNRECOGNIZED_LANGUAGE: u8 = 5;
/// Exit code when a scene payload fails to decrypt
pub const EXIT_DECODE: u8 = 6;
/// Exit code when the container could not be replaced
pub const EXIT_PERSISTENCE: u8 = 7;

#[derive(Parser, Debug)]
#[command(name = "sceneloc", version)]
#[command(about = "SceneLoc: read and write localized scene dialogue in Unity assets files", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Also report failures as a JSON document on stdout
    #[arg(long, global = true)]
    pub json_errors: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Run the `SceneLoc` CLI
pub fn run_cli() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(EXIT_UNEXPECTED));
        }
    };

    init_logging(cli.debug);

    let stdin = io::stdin();
    let stdout = io::stdout();
    ExitCode::from(execute(&cli, &mut stdin.lock(), &mut stdout.lock()))
}

/// Run a parsed command line against the given channels and return its exit code.
pub fn execute(cli: &Cli, input: &mut dyn Read, output: &mut dyn Write) -> u8 {
    match cli.command.execute(input, output) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("{:#}", err);
            if cli.json_errors {
                report_json_error(output, &err);
            }
            exit_code(&err)
        }
    }
}

/// Map a failure to its process exit code.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(Error::NotFound { .. }) => EXIT_NOT_FOUND,
        Some(Error::MalformedInput { .. }) => EXIT_MALFORMED_INPUT,
        Some(Error::UnrecognizedLanguage { .. }) => EXIT_UNRECOGNIZED_LANGUAGE,
        Some(Error::Decode { .. }) => EXIT_DECODE,
        Some(Error::Persistence { .. }) => EXIT_PERSISTENCE,
        _ => EXIT_UNEXPECTED,
    }
}

fn report_json_error(output: &mut dyn Write, err: &anyhow::Error) {
    let kind = err.downcast_ref::<Error>().map_or("unexpected", Error::kind);
    let document = serde_json::json!({
        "result": "error",
        "kind": kind,
        "message": format!("{err:#}"),
    });
    if let Err(e) = writeln!(output, "{document}") {
        tracing::warn!("Failed to write error document: {}", e);
    }
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();
    tracing::debug!("Debug mode enabled");
}
