//! Prints the etime usage text to standard error.
//!
//! With no arguments this shows the bundled help. `--template` and `--data`
//! render a custom template instead, which is handy when editing help text:
//! a broken template still prints (sanitized) unless `--render-only` is given.
//!
//! A template that falls back logs a warning explaining why; set
//! `RUST_LOG=error` to silence it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use etime_render::help::{render_help, write_help, HelpConfig, TextOrigin};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log filter used when `RUST_LOG` is unset; fallback warnings stay visible.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "etime-help", version, about = "Print the etime usage text")]
struct Cli {
    /// Template file to render instead of the bundled help
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// JSON file with the data referenced by template fields
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Name shown wherever the template uses CommandName (defaults to argv[0])
    #[arg(long, value_name = "NAME")]
    program_name: Option<String>,

    /// Fail instead of printing the sanitized template when rendering fails
    #[arg(long)]
    render_only: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("etime-help: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .try_init();
}

/// Prints the help text. Returns false if `--render-only` rejected it.
fn run(cli: &Cli) -> Result<bool> {
    let config = load_config(cli)?;
    let help = render_help(Some(config));

    if let TextOrigin::Sanitized(err) = help.origin() {
        if cli.render_only {
            eprintln!("etime-help: {}", err);
            return Ok(false);
        }
    }

    debug!(fallback = help.is_fallback(), "writing help text");
    write_help(&mut io::stderr().lock(), &help).context("failed to write help text")?;
    Ok(true)
}

/// Builds the help configuration from command-line flags.
fn load_config(cli: &Cli) -> Result<HelpConfig> {
    let mut config = HelpConfig::default();

    if let Some(path) = &cli.template {
        config.template = Some(read_file(path, "template")?);
    }
    if let Some(path) = &cli.data {
        let raw = read_file(path, "data")?;
        let data = serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON in data file {}", path.display()))?;
        config.data = Some(data);
    }
    config.program_name = cli.program_name.clone();

    Ok(config)
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read {} file {}", what, path.display()))
}
