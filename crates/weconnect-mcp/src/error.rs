//! Binary error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 3;
    pub const BIND: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Configuration error")]
    #[diagnostic(
        code(weconnect::config),
        help(
            "Check the config file and WECONNECT_* environment variables.\n\
             A minimal config needs [bridge] url, or --demo to skip the bridge."
        )
    )]
    Config(#[from] weconnect_config::ConfigError),

    #[error("Could not bind to {addr}")]
    #[diagnostic(
        code(weconnect::bind_failed),
        help("Is another instance already running on this address?")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid bridge configuration: {0}")]
    #[diagnostic(code(weconnect::bridge))]
    Bridge(#[from] weconnect_garage::GarageError),

    #[error("Server error")]
    #[diagnostic(code(weconnect::server))]
    Serve(#[source] std::io::Error),

    #[error("Could not open log file {path}")]
    #[diagnostic(code(weconnect::log_file))]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::LogFile { .. } => exit_code::CONFIG,
            Self::Bind { .. } => exit_code::BIND,
            Self::Bridge(_) | Self::Serve(_) => exit_code::GENERAL,
        }
    }
}
