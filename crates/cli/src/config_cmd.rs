//! `subtrans config` - validate and display matching configs.

use std::path::PathBuf;

use clap::Subcommand;

use crate::{load_match_config, CliError};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Check a match.toml without running anything
    #[command(after_help = "\
Examples:
  subtrans config validate match.toml")]
    Validate {
        /// Path to the match.toml
        config: PathBuf,
    },

    /// Print the effective config with defaults filled in
    #[command(after_help = "\
Examples:
  subtrans config show match.toml
  subtrans config show")]
    Show {
        /// Path to the match.toml; built-in defaults when omitted
        config: Option<PathBuf>,

        /// JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

pub fn cmd_config(cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Validate { config } => cmd_config_validate(config),
        ConfigCommands::Show { config, json } => cmd_config_show(config, json),
    }
}

fn cmd_config_validate(path: PathBuf) -> Result<(), CliError> {
    let config = load_match_config(Some(&path))?;
    eprintln!(
        "{}: valid (tier order {:?}, threshold {}, mode {:?})",
        path.display(),
        config.tier_order,
        config.fuzzy.threshold,
        config.fuzzy.mode,
    );
    Ok(())
}

fn cmd_config_show(path: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let config = load_match_config(path.as_ref())?;
    let text = if json {
        serde_json::to_string_pretty(&config)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?
    } else {
        toml::to_string_pretty(&config)
            .map_err(|e| CliError::general(format!("TOML serialization error: {e}")))?
    };
    println!("{}", text.trim_end());
    Ok(())
}
