//! Folio CLI
//!
//! Replays scripted wheel, touch and keyboard input against the section
//! navigator without a window, and checks `folio.toml` files.
//!
//! ```text
//! folio run scenarios/portfolio.json --config folio.toml --report out/report.json
//! folio check-config folio.toml
//! ```

mod report;
mod runner;
mod scenario;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use folio_nav::NavConfig;
use tracing_subscriber::EnvFilter;

use crate::runner::RunConfig;
use crate::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Headless tooling for Folio section navigation")]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON scenario and report the outcome
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Navigation config (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the JSON report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Frame length while waiting, in milliseconds
        #[arg(long, default_value_t = runner::DEFAULT_FRAME_MS)]
        frame_ms: u64,
    },

    /// Parse and validate a navigation config
    CheckConfig {
        /// Config file
        path: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<NavConfig> {
    match path {
        Some(path) => NavConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(NavConfig::default()),
    }
}

fn run(
    scenario: &Path,
    config: Option<&Path>,
    report_path: Option<&Path>,
    frame_ms: u64,
) -> Result<ExitCode> {
    let nav = load_config(config)?;
    let scenario = Scenario::from_path(scenario)?;
    let report = runner::run_loaded_scenario(&scenario, &RunConfig { nav, frame_ms })?;

    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report.write_to_path(path)?;
        tracing::info!(path = %path.display(), "report written");
    }

    if report.is_failed() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn check_config(path: &Path) -> Result<ExitCode> {
    let config = load_config(Some(path))?;
    tracing::info!(
        cooldown_ms = config.cooldown_ms,
        settle_ms = config.settle_ms,
        transition = ?config.transition.kind,
        "config ok"
    );
    println!("{}: ok", path.display());
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run {
            scenario,
            config,
            report,
            frame_ms,
        } => run(&scenario, config.as_deref(), report.as_deref(), frame_ms),
        Command::CheckConfig { path } => check_config(&path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_arguments() {
        let cli = Cli::try_parse_from([
            "folio",
            "-v",
            "run",
            "scenario.json",
            "--config",
            "folio.toml",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Run {
                scenario,
                config,
                report,
                frame_ms,
            } => {
                assert_eq!(scenario, PathBuf::from("scenario.json"));
                assert_eq!(config, Some(PathBuf::from("folio.toml")));
                assert_eq!(report, None);
                assert_eq!(frame_ms, runner::DEFAULT_FRAME_MS);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_missing_config_defaults() {
        assert_eq!(load_config(None).unwrap(), NavConfig::default());
    }
}
