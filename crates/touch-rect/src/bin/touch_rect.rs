use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use touch_rect::io::{self, EngineConfig, IoError, Scenario};
use touch_rect::replay::{self, ReplayError};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("replay failed: {0}")]
    Replay(#[from] ReplayError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[cfg(feature = "tracing")]
    #[error("failed to install tracing subscriber: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}

#[derive(Parser, Debug)]
#[command(
    name = "touch-rect",
    version,
    about = "Replay touch-driven rectangle selection scenarios"
)]
struct Cli {
    /// Log verbosity (stderr).
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scenario file and print the replay report as JSON.
    Replay {
        scenario: PathBuf,
        /// Write the report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the default engine configuration as JSON.
    DefaultConfig {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    init_logging(cli.log_level.into())?;

    match cli.command {
        Command::Replay { scenario, output } => {
            let scenario: Scenario = io::load_json(&scenario)?;
            let report = replay::replay(&scenario)?;
            let placed = report.placements.len();
            let no_plane = report.no_plane_count();
            log::info!(
                "replayed {} steps: {placed} placed, {no_plane} without a plane",
                report.steps.len()
            );
            emit(&report, output)
        }
        Command::DefaultConfig { output } => emit(&EngineConfig::default(), output),
    }
}

fn emit<T: serde::Serialize>(value: &T, output: Option<PathBuf>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            io::write_json(&path, value)?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    use tracing_subscriber::EnvFilter;

    tracing_log::LogTracer::init()?;
    let filter = EnvFilter::try_from_env(touch_rect::core::LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    touch_rect::core::init_with_level(level)?;
    Ok(())
}
