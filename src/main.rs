//! CLI entry point for tally.
//!
//! Provides subcommands for tracking a day's calories and for analysing a
//! gradebook of student marks.

use std::ffi::OsStr;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tally::calories::{self, log::DEFAULT_LOG_FILE, tracker::parse_calories};
use tally::console::{LinePrompter, Prompter, TermPrompter};
use tally::error::TallyError;
use tally::gradebook;
use tally::output::{print_json, print_pretty};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Daily calorie tracker and gradebook analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add up today's meals and compare the average with a daily limit
    Calories {
        /// Daily calorie limit; asked for interactively when omitted
        #[arg(short, long, value_name = "KCAL", value_parser = parse_calories)]
        limit: Option<f64>,

        /// File the session log is written to (overwritten on each save)
        #[arg(long, default_value = DEFAULT_LOG_FILE)]
        log_file: PathBuf,
    },
    /// Analyse student marks entered by hand or loaded from CSV
    Gradebook {
        /// Also print each analysis as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: quiet stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/tally.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("tally.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::from_env("RUST_LOG")
                .add_directive("warn".parse::<Directive>().context("parsing default stderr directive")?),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::from_env("RUST_LOG_JSON")
                .add_directive("debug".parse::<Directive>().context("parsing default JSON directive")?),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    if std::io::stdin().is_terminal() {
        dispatch(cli.command, &mut TermPrompter)
    } else {
        let stdin = std::io::stdin();
        let mut prompter = LinePrompter::new(stdin.lock(), std::io::stdout());
        dispatch(cli.command, &mut prompter)
    }
}

fn dispatch<P: Prompter>(command: Commands, prompter: &mut P) -> Result<()> {
    let outcome = match command {
        Commands::Calories { limit, log_file } => {
            calories::session::run(prompter, limit, &log_file).map(|summary| {
                print_pretty(&summary);
            })
        }
        Commands::Gradebook { json } => gradebook::session::run(prompter, |report| {
            print_pretty(&report.summary);
            if json {
                print_json(report)?;
            }
            Ok(())
        })
        .map(|reports| {
            info!(analyses = reports.len(), "Gradebook closed");
        }),
    };

    match outcome {
        Err(TallyError::InputClosed) => {
            warn!("Input closed, exiting");
            Ok(())
        }
        other => other.context("session failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_flag_rejects_non_finite() {
        for bad in ["NaN", "inf", "-inf"] {
            let result = Cli::try_parse_from(["tally", "calories", "--limit", bad]);
            assert!(result.is_err(), "--limit {bad} was accepted");
        }
    }

    #[test]
    fn test_limit_flag_accepts_number() {
        let cli = Cli::try_parse_from(["tally", "calories", "--limit", "1800"]).unwrap();
        match cli.command {
            Commands::Calories { limit, .. } => assert_eq!(limit, Some(1800.0)),
            Commands::Gradebook { .. } => panic!("wrong subcommand"),
        }
    }
}
