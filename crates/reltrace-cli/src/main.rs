use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use reltrace_core::config::AppConfig;
use reltrace_core::dump::DumpConfig;
use reltrace_core::engine::HandoffEngine;

mod commands;

#[derive(Parser)]
#[command(
    name = "reltrace",
    about = "Reltrace - interactive configuration for relationship-aware database dumps",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<commands::Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Application config file (YAML)
    #[arg(long, env = "RELTRACE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file while the wizard is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Format used to print the accepted dump configuration
    #[arg(long, value_enum, default_value_t = EmitFormat::Json)]
    emit: EmitFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmitFormat {
    Json,
    Yaml,
}

fn env_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// The wizard owns the terminal, so logs only go to a file when asked for.
///
/// Lines are written by a background worker. Keep the returned guard alive
/// until the wizard exits so buffered lines are flushed.
fn init_file_logging(path: &Path, verbose: u8) -> anyhow::Result<WorkerGuard> {
    let file = File::create(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn emit(config: &DumpConfig, format: EmitFormat) -> anyhow::Result<()> {
    let rendered = match format {
        EmitFormat::Json => serde_json::to_string_pretty(config)?,
        EmitFormat::Yaml => serde_yaml::to_string(config)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand: launch TUI
            let _log_guard = match &cli.log_file {
                Some(path) => Some(init_file_logging(path, cli.verbose)?),
                None => None,
            };
            let config = AppConfig::load(cli.config.as_deref())?;
            let accepted = reltrace_tui::launch_tui(config, Arc::new(HandoffEngine)).await?;
            match accepted {
                Some(dump) => emit(&dump, cli.emit),
                None => {
                    tracing::info!("Wizard exited without a dump configuration");
                    Ok(())
                }
            }
        }
        Some(command) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(cli.verbose))
                .init();

            match command {
                commands::Commands::Validate(args) => commands::validate::execute(args).await,
                commands::Commands::Modes(args) => commands::modes::execute(args).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_launches_wizard() {
        let cli = Cli::try_parse_from(["reltrace", "-vv", "--emit", "yaml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.emit, EmitFormat::Yaml));
    }

    #[test]
    fn validate_takes_a_path() {
        let cli = Cli::try_parse_from(["reltrace", "validate", "dump.yaml"]).unwrap();
        let Some(commands::Commands::Validate(args)) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.config, PathBuf::from("dump.yaml"));
    }

    #[test]
    fn file_logging_flushes_when_the_guard_drops() {
        let path = std::env::temp_dir().join(format!("reltrace-log-{}.log", std::process::id()));
        let guard = init_file_logging(&path, 0).unwrap();
        tracing::info!("wizard started");
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(contents.contains("wizard started"), "{contents}");
        assert!(!contents.contains('\u{1b}'), "log file has ANSI escapes");
    }

    #[test]
    fn unknown_emit_format_is_rejected() {
        assert!(Cli::try_parse_from(["reltrace", "--emit", "xml"]).is_err());
    }
}
