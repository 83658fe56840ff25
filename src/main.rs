// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, Level, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use locale_sync::app_config::{self, Config};
use locale_sync::file_utils::FileManager;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// locale-sync - keep locale dictionaries in step with en_US.json
///
/// Run without arguments in the directory holding the dictionaries to
/// perform one full synchronization pass.
#[derive(Parser, Debug)]
#[command(name = "locale-sync")]
#[command(version)]
#[command(about = "Synchronize and machine-translate locale dictionaries")]
#[command(long_about = "Synchronizes every target locale dictionary with the source dictionary:
obsolete keys are removed, missing keys are added and translated, and entries
flagged (UTO) in the source are translated again.

EXAMPLES:
    locale-sync                          # Sync the dictionaries in the current directory
    locale-sync --dir locales            # Sync the dictionaries in ./locales
    locale-sync --log-level debug        # Show every request

CONFIGURATION:
    Settings are read from locale-sync.json when it exists; defaults are used
    otherwise. Every field is optional.")]
struct CommandLineOptions {
    /// Directory holding the <locale>.json files (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "locale-sync.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let options = CommandLineOptions::parse();

    let mut config = Config::load_or_default(&options.config_path)?;
    if !FileManager::file_exists(&options.config_path) {
        log::debug!("No config file at {:?}, using defaults", options.config_path);
    }

    if let Some(dir) = options.dir {
        config.dictionary_dir = dir;
    }
    if let Some(level) = options.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.into());

    locale_sync::sync::run(&config)
        .await
        .context("Synchronization aborted")?;

    Ok(())
}
