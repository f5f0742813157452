pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "appmeta")]
#[command(about = "Fetch mobile app metadata from the Play Store or App Store", long_about = None)]
pub struct Cli {
    /// Overall fetch timeout in milliseconds, redirects included
    #[arg(short, long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Bearer token for the App Store catalog API
    #[arg(long, env = "APPMETA_APP_STORE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Config file (default: ~/.config/appmeta/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick the store from the identifier's shape and fetch
    Resolve {
        /// Bundle id (com.example.app) or numeric App Store id
        id: String,
    },
    /// Fetch from the Play Store
    PlayStore {
        /// Bundle id
        id: String,
    },
    /// Fetch from the App Store
    AppStore {
        /// Numeric App Store id
        id: String,
    },
}
