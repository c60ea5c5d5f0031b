//! `tierlog` binary.
//!
//! Usage:
//!   tierlog log <level> <message> [key=value ...]   Emit one record
//!   tierlog check                                   Show the configured tiers
//!   tierlog backups                                 List rotated backups
//!
//! All commands accept `--config <path>` and `--verbose`.

use clap::Parser;
use std::process::ExitCode;
use tierlog::cli::{Cli, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    run(&cli)
}
