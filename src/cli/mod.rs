//! Command-line front end: emit one record, validate a config, or list backups.

use crate::config::LoggerConfig;
use crate::fmt::Field;
use crate::internal::{self, Diagnostic};
use crate::level::Level;
use crate::logger::{Logger, init};
use crate::rotation::{format_size, list_backups};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Log level for CLI arguments.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
        }
    }
}

/// tierlog - write to severity-tiered log files from the command line.
#[derive(Parser)]
#[command(name = "tierlog", version, about = "Write to severity-tiered log files")]
pub struct Cli {
    /// Config file (defaults to <config dir>/tierlog/tierlog.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print tierlog's own diagnostics to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Emit one record.
    Log {
        level: LogLevel,
        message: String,
        /// Structured fields as key=value.
        fields: Vec<String>,
    },
    /// Build the configured tiers and report them. Creates any missing tier directory.
    Check,
    /// List rotated backups of every active tier.
    Backups,
}

impl Cli {
    fn load_config(&self) -> Result<LoggerConfig, crate::Error> {
        match &self.config {
            Some(path) => LoggerConfig::load_from(path),
            None => LoggerConfig::load(),
        }
    }
}

/// Runs the parsed command.
#[must_use]
pub fn run(cli: &Cli) -> ExitCode {
    if cli.verbose {
        internal::set_hook(|d: &Diagnostic| {
            eprintln!("[{}] {}: {}", d.level.as_capital_str(), d.scope, d.message);
        });
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    match &cli.command {
        Command::Log {
            level,
            message,
            fields,
        } => cmd_log(config, (*level).into(), message, fields),
        Command::Check => cmd_check(&config),
        Command::Backups => cmd_backups(&config),
    }
}

fn cmd_log(config: LoggerConfig, level: Level, message: &str, raw_fields: &[String]) -> ExitCode {
    let mut fields = Vec::with_capacity(raw_fields.len());
    for raw in raw_fields {
        let Some(field) = Field::parse_pair(raw) else {
            eprintln!("Invalid field '{raw}', expected key=value");
            return ExitCode::FAILURE;
        };
        fields.push(field);
    }

    let logger = match init(config) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    logger.log(level, message, &fields);
    if let Err(e) = logger.flush() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn cmd_check(config: &LoggerConfig) -> ExitCode {
    if let Err(e) = Logger::from_config(config) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    for tier in config.active_tiers() {
        let tier_config = config.tier(tier);
        println!(
            "{tier:<6} >= {:<5} {}{}",
            tier.floor(),
            tier_config.dir_path().join(&tier_config.file).display(),
            if tier_config.stdout { " (+stdout)" } else { "" }
        );
    }
    let rotation = &config.rotation;
    println!(
        "rotation: {} per file, {} backups, {} days, compress={}",
        format_size(rotation.max_size_bytes()),
        rotation.max_backups,
        rotation.max_age,
        rotation.compress
    );
    println!("time format: {}", config.effective_time_format());
    ExitCode::SUCCESS
}

fn cmd_backups(config: &LoggerConfig) -> ExitCode {
    let mut failed = false;
    for tier in config.active_tiers() {
        let tier_config = config.tier(tier);
        let active = tier_config.dir_path().join(&tier_config.file);
        match list_backups(&active) {
            Ok(backups) => {
                println!("{tier}: {} backups of {}", backups.len(), active.display());
                for backup in backups {
                    let size = fs::metadata(&backup.path).map_or(0, |m| m.len());
                    println!(
                        "  {}  {:>10}  {}",
                        backup.rotated_at.format("%Y-%m-%d %H:%M:%S"),
                        format_size(size),
                        backup.path.display()
                    );
                }
            }
            Err(e) => {
                eprintln!("{tier}: {e}");
                failed = true;
            }
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
