use clap::{Parser, Subcommand};

mod subcommands;

pub use subcommands::{AuthCommands, LgpdCommands, StatsCommands, UiCommands};

/// `DataWise` - LGPD compliance and data-governance console.
#[derive(Parser, Debug)]
#[command(name = "datawise")]
#[command(author = "DataWise Contributors")]
#[command(version)]
#[command(about = "Command-line client for the DataWise admin API.", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the API base URL for this invocation
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in, sign out and manage credentials
    Auth {
        #[command(subcommand)]
        auth_command: AuthCommands,
    },

    /// Personal-data catalogue, templates and compliance analyses
    Lgpd {
        #[command(subcommand)]
        lgpd_command: LgpdCommands,
    },

    /// Persisted interface preferences
    Ui {
        #[command(subcommand)]
        ui_command: UiCommands,
    },

    /// Dashboard statistics
    Stats {
        #[command(subcommand)]
        stats_command: StatsCommands,
    },
}
