// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::loader::default_manifest_path;

/// Command-line arguments for `vixen`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vixen",
    version,
    about = "Resolve a provider manifest into a safe construction order.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the provider manifest (TOML).
    ///
    /// Default: `Vixen.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_manifest_path())]
    pub manifest: PathBuf,

    /// Print only the providers that need nothing, instead of the full order.
    #[arg(long)]
    pub roots: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `VIXEN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print providers and their needs, but don't resolve.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
