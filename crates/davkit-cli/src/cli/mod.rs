//! CLI for davkit locators and preferences.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use davkit_core::config;

use commands::{run_config, run_locate, run_prefs, LocateArgs};

/// Top-level CLI for davkit.
#[derive(Debug, Parser)]
#[command(name = "davkit")]
#[command(about = "davkit: versioned WebDAV resource locators and tooling preferences", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Build a locator for a resource URL and print it.
    Locate {
        /// Resource URL (or stable URL with --stable).
        url: String,

        /// Select the version with this label in the resource's history.
        #[arg(long, conflicts_with = "stable")]
        label: Option<String>,

        /// Treat the URL as a server-issued stable URL.
        #[arg(long)]
        stable: bool,

        /// Print the locator as JSON regardless of the configured default.
        #[arg(long)]
        json: bool,

        /// Skip scheme and stable-URL checks for this invocation.
        #[arg(long)]
        lenient: bool,
    },

    /// Inspect or change tooling preferences.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Show the config file path and effective configuration.
    Config,
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    /// List every preference with its effective value.
    List,

    /// Print one preference.
    Get {
        /// Key string (e.g. Drools.BuildAll) or its short name (build-all).
        key: String,
    },

    /// Override one preference.
    Set {
        /// Key string or short name.
        key: String,
        /// New value; parsed according to the key's type.
        value: String,
    },

    /// Drop the override for a preference.
    Reset {
        /// Key string or short name.
        key: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Locate {
                url,
                label,
                stable,
                json,
                lenient,
            } => {
                let args = LocateArgs {
                    url,
                    label,
                    stable,
                    json,
                    lenient,
                };
                run_locate(&cfg, &args)?;
            }
            CliCommand::Prefs { action } => run_prefs(action)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
