// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod command_dispatch;
mod command_output_adapters;
mod commands;
mod workspace;

use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

use chrono::{DateTime, Utc};
use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Generator};
use tracing_subscriber::EnvFilter;

use campus_water_core::{ExitCode, MachineError, ENV_WATER_LOG_JSON, ENV_WATER_LOG_LEVEL};
use campus_water_policies::RegistryValidationError;
use campus_water_store::StoreError;

use crate::command_output_adapters::emit_error;
use crate::commands::{Commands, CriticalityCli};

pub const CRATE_NAME: &str = "campus-water-cli";

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "campus-water")]
#[command(version)]
#[command(about = "Campus drinking-water compliance engine")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  WATER_LOG_LEVEL    Log filter override (tracing EnvFilter syntax)\n  WATER_LOG_JSON     Emit logs as JSON lines when true\n  WATER_CONFIG_DIR   Directory holding limits/ and faucets/\n  WATER_LIMITS_PATH  Alternative limits table"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Config directory; overrides WATER_CONFIG_DIR.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    /// Limits table; overrides WATER_LIMITS_PATH. Its schema must sit next to it.
    #[arg(long, global = true)]
    limits: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = CriticalityCli::AllowlistOrRegistry)]
    criticality: CriticalityCli,
    /// Sample and alert state file.
    #[arg(long, global = true, default_value = "state/campus.json")]
    state: PathBuf,
    /// Evaluate time-relative figures as of this RFC 3339 instant instead of now.
    #[arg(long, global = true)]
    at: Option<DateTime<Utc>>,
    #[arg(long = "print-config-paths", default_value_t = false)]
    print_config_paths: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy)]
pub(crate) struct LogFlags {
    quiet: bool,
    verbose: u8,
}

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

pub(crate) struct CliError {
    pub(crate) exit_code: ExitCode,
    pub(crate) machine: MachineError,
}

impl CliError {
    pub(crate) fn usage(message: &str) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", message),
        }
    }

    pub(crate) fn validation(code: &str, message: &str) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            machine: MachineError::new(code, message),
        }
    }

    pub(crate) fn dependency(message: String) -> Self {
        Self {
            exit_code: ExitCode::DependencyFailure,
            machine: MachineError::new("dependency_failure", &message),
        }
    }

    pub(crate) fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        let exit_code = match err {
            StoreError::Io(_) => ExitCode::DependencyFailure,
            _ => ExitCode::Validation,
        };
        Self {
            exit_code,
            machine: MachineError::new(err.code(), &err.to_string()),
        }
    }
}

impl From<RegistryValidationError> for CliError {
    fn from(err: RegistryValidationError) -> Self {
        Self::validation("invalid_limits", &err.0)
    }
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.code()),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code.code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError {
                    exit_code: ExitCode::Usage,
                    machine: MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                });
            }
        },
    };
    init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
    });
    let output_mode = OutputMode { json: cli.json };
    let settings = workspace::Settings::resolve(
        cli.config_dir,
        cli.limits,
        cli.criticality.into(),
        cli.state,
        cli.at.unwrap_or_else(Utc::now),
    )
    .map_err(CliError::internal)?;

    if cli.print_config_paths {
        return command_dispatch::print_config_paths(&settings, output_mode);
    }
    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;
    match command {
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
        command => command_dispatch::run_command(command, &settings, output_mode),
    }
}

/// `WATER_LOG_LEVEL` wins; otherwise `--quiet` / `-v` / `-vv` pick error, info or debug over
/// the default `warn`. Logs go to stderr so `--json` stdout stays parseable.
fn init_tracing(flags: LogFlags) {
    let fallback = if flags.quiet {
        "error"
    } else {
        match flags.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_env(ENV_WATER_LOG_LEVEL)
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    let log_json = std::env::var(ENV_WATER_LOG_JSON)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    // A subscriber may already be installed when the entry point is driven from tests.
    let _ = if log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}
