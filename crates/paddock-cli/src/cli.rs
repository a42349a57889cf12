use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use paddock_store::IdStrategy;

#[derive(Parser)]
#[command(
    name = "paddock",
    about = "Paddock: an in-memory REST scaffold for prototyping",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the configured collections over HTTP
    Serve(ServeArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Settings that may be given on the command line instead of (or on top
/// of) a configuration file.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Collection to serve; repeat for several. Replaces the file's list.
    #[arg(long = "collection")]
    pub collections: Vec<String>,
    /// Field holding each record's identifier
    #[arg(long)]
    pub id_field: Option<String>,
    /// How missing identifiers are generated (sequential or uuid)
    #[arg(long)]
    pub id_strategy: Option<IdStrategy>,
    /// Require this bearer token for writes
    #[arg(long)]
    pub token: Option<String>,
    /// Disable per-request access logging
    #[arg(long)]
    pub no_access_log: bool,
}
