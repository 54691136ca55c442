//! # cadastro CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cadastro_cli::check::{run_check, CheckArgs};
use cadastro_cli::format::{run_format, run_unmask, FormatArgs, UnmaskArgs};
use cadastro_cli::lookup::{run_lookup, LookupArgs};
use cadastro_cli::validate::{run_validate, ValidateArgs};
use cadastro_cli::Context;

/// Pessoa registration toolkit.
///
/// Formats and validates CPF and phone values, checks complete pessoa
/// records against the registration form rules, and looks people up in
/// the sample registry.
#[derive(Parser, Debug)]
#[command(name = "cadastro", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    /// YAML or JSON file overriding the validation messages.
    #[arg(long, global = true)]
    messages: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply the CPF or phone mask to a value.
    Format(FormatArgs),

    /// Strip a mask, keeping only the digits.
    Unmask(UnmaskArgs),

    /// Validate a CPF or phone value.
    Validate(ValidateArgs),

    /// Check a complete pessoa record against the registration form.
    Check(CheckArgs),

    /// Look a CPF up in the sample registry.
    Lookup(LookupArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("cadastro CLI starting");

    let ctx = match Context::load(cli.json, cli.messages.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Commands::Format(args) => run_format(args, &ctx, &mut out),
        Commands::Unmask(args) => run_unmask(args, &ctx, &mut out),
        Commands::Validate(args) => run_validate(args, &ctx, &mut out),
        Commands::Check(args) => run_check(args, &ctx, &mut out),
        Commands::Lookup(args) => run_lookup(args, &ctx, &mut out),
    };
    let _ = out.flush();

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
