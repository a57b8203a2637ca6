//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "weconnect-mcp",
    version,
    about = "Vehicle telemetry and control server for Volkswagen WeConnect",
    long_about = "Serves a tool/resource registry over HTTP for AI agents: fleet \
                  listing, vehicle state projections, and remote commands \
                  (lock, climatization, charging, locator)."
)]
pub struct Cli {
    /// Path to the config file (defaults to the XDG config path).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bind address override.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Bind port override.
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Serve the built-in demo fleet instead of connecting to a bridge.
    #[arg(long)]
    pub demo: bool,

    /// Also write logs to this file (stderr stays on).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// API key clients must present as a Bearer token.
    #[arg(long, env = "WECONNECT_API_KEY", value_name = "KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
