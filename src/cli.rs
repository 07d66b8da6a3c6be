//! CLI definitions for Iron Dome.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Iron Dome CLI.
#[derive(Parser)]
#[command(name = "irondome")]
#[command(about = "Marks Iron Dome alliance members on Torn profile pages")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/irondome.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Resolve the membership list once and print the outcome
    Resolve {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Manual override management
    Manual {
        #[command(subcommand)]
        action: ManualAction,
    },

    /// Remove the cached list and the manual override
    Clear,

    /// Run the full evaluation loop against a synthetic profile page
    Simulate {
        /// Faction shown on the profile (omit for a profile without one)
        #[arg(long)]
        identity: Option<String>,

        /// Leave out the button container the marker mounts after
        #[arg(long)]
        no_container: bool,

        /// Render the profile this long after startup
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,

        /// Navigate to a second profile showing this faction
        #[arg(long)]
        navigate_to: Option<String>,

        /// Save this JSON array as the manual override while running
        #[arg(long)]
        paste: Option<String>,

        /// Show the marker regardless of membership
        #[arg(long)]
        force: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub(crate) enum ManualAction {
    /// Store a JSON array of faction names as the manual override
    Set {
        /// e.g. '["The Swarm","Stage Fright"]'
        json: String,
    },

    /// Print the current manual override
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}
