//! Command-line interface argument parsing.

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// House price dashboard
///
/// Serves a small web dashboard that scores a property with two fitted
/// models (price and affordability) and charts uploaded datasets by
/// geopolitical zone or town.
///
/// Examples:
///   house_price_dashboard
///   house_price_dashboard --config /etc/dashboard.toml --addr 0.0.0.0:8501
///   house_price_dashboard --check
///   house_price_dashboard --print-config > dashboard.toml
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for dashboard.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides the config file)
    #[arg(short, long, value_name = "HOST:PORT")]
    pub addr: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Load config, catalog and both models, report problems, then exit
    #[arg(long)]
    pub check: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Level forced by flags, if any. `None` defers to config / RUST_LOG.
    pub fn log_level(&self) -> Option<Level> {
        self.verbose.then_some(Level::DEBUG)
    }
}
