//! # chatlog
//!
//! Command-line access to [`chatlog_core::ActivityLog`]: list a chat's
//! activities in order, look one up by index, classify it, or merge two
//! activity files.

pub mod commands;
pub mod config;

pub use commands::{Outcome, load_log, run};
pub use config::{ChatlogConfig, Cli, Command};
