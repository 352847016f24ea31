//! Command-line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::controller::DEFAULT_DEBOUNCE;
use crate::model::{DEFAULT_API_URL, HOME_FRAGMENT};

/// Search the TVMaze catalog and browse show details from the terminal
#[derive(Debug, Parser)]
#[command(name = "tvfinder", version, about)]
pub struct Config {
    /// Base URL of the catalog API
    #[arg(long, env = "TVFINDER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Location to open at startup, e.g. "#/show/169"
    #[arg(long, env = "TVFINDER_LOCATION", default_value = HOME_FRAGMENT)]
    pub location: String,

    /// Pause after the last keystroke before searching, in milliseconds
    #[arg(long, env = "TVFINDER_DEBOUNCE_MS", default_value_t = DEFAULT_DEBOUNCE.as_millis() as u64)]
    pub debounce_ms: u64,

    /// Directory for log files
    #[arg(long, env = "TVFINDER_LOG_DIR", default_value = ".logs")]
    pub log_dir: PathBuf,

    /// Print the screen for --location as HTML and exit
    #[arg(long)]
    pub html: bool,

    /// Search for this text first (only with --html on the home location)
    #[arg(long, requires = "html")]
    pub query: Option<String>,
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
