use std::path::{Path, PathBuf};

use anyhow::Context;
use chatlog_core::{ActivityIndex, ActivityLogConfig, DuplicatePolicy};
use chatlog_logging::LogConfig;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// Settings read from the optional TOML config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatlogConfig {
    /// Logging setup
    pub log: LogConfig,
    /// Activity log policy
    pub activity_log: ActivityLogConfig,
}

impl ChatlogConfig {
    /// Load a config file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load the file named on the command line (if any) and apply flag overrides
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(level) = &cli.log_level {
            config.log.default_level = level.clone();
        }
        if cli.allow_duplicates {
            config.activity_log.duplicates = DuplicatePolicy::Allow;
        }

        Ok(config)
    }
}

#[derive(Parser)]
#[command(name = "chatlog", about = "Inspect and merge index-ordered chat activity logs")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Keep activities that share an index instead of rejecting them
    #[arg(long, global = true)]
    pub allow_duplicates: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print every activity in index order
    List {
        /// JSON file holding an array of activities
        file: PathBuf,
    },
    /// Print the activity with the given index
    Lookup {
        /// JSON file holding an array of activities
        file: PathBuf,
        /// Activity index
        #[arg(allow_negative_numbers = true)]
        index: ActivityIndex,
    },
    /// Print whether the given index is an event or a message
    Kind {
        /// JSON file holding an array of activities
        file: PathBuf,
        /// Activity index
        #[arg(allow_negative_numbers = true)]
        index: ActivityIndex,
    },
    /// Insert the activities of OTHER into FILE and print the merged order
    Merge {
        /// JSON file holding an array of activities
        file: PathBuf,
        /// JSON file with the activities to merge in
        other: PathBuf,
    },
}
