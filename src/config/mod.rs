pub mod cli;
pub mod toml_config;

use clap::Parser;

pub use cli::Command;
pub use toml_config::ConsoleConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "atm-console")]
#[command(about = "Admin console and proxy for ATM client, standard and mapping configuration")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./atm-console.toml when present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Console API base URL (overrides console.api_base_url)
    #[arg(long)]
    pub api: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}
