//! Subcommand implementations

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use chatlog_core::{Activity, ActivityIndex, ActivityLog, ActivityLogConfig, LogError};
use tracing::{debug, info};

use crate::config::Command;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command produced its output
    Done,
    /// The requested index is not in the log
    NotFound,
}

/// Read a JSON array of activities into a log
///
/// The array may be in any order; activities are inserted one at a time.
pub fn load_log(path: &Path, config: ActivityLogConfig) -> anyhow::Result<ActivityLog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let activities: Vec<Activity> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid activity file {}", path.display()))?;

    let log = ActivityLog::from_unordered(activities, config)
        .with_context(|| format!("failed to build log from {}", path.display()))?;
    debug!(path = %path.display(), count = log.len(), "Loaded activity log");
    Ok(log)
}

/// Run a subcommand, writing its output to `out`
pub fn run(command: &Command, config: ActivityLogConfig, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    match command {
        Command::List { file } => {
            let log = load_log(file, config)?;
            print_log(&log, out)?;
            Ok(Outcome::Done)
        }

        Command::Lookup { file, index } => {
            let log = load_log(file, config)?;
            report(log.get(*index), *index, out, |activity, out| {
                writeln!(out, "{}", activity)
            })
        }

        Command::Kind { file, index } => {
            let log = load_log(file, config)?;
            report(log.kind_of(*index), *index, out, |kind, out| writeln!(out, "{}", kind))
        }

        Command::Merge { file, other } => {
            let mut log = load_log(file, config)?;
            let incoming = load_log(other, config)?;
            let added = log
                .merge(incoming)
                .with_context(|| format!("failed to merge {}", other.display()))?;
            info!(added, total = log.len(), "Merged activity logs");
            print_log(&log, out)?;
            Ok(Outcome::Done)
        }
    }
}

fn print_log(log: &ActivityLog, out: &mut dyn Write) -> anyhow::Result<()> {
    for activity in log {
        writeln!(out, "{}", activity)?;
    }
    Ok(())
}

// NotFound becomes a user-facing line; any other error propagates.
fn report<T>(
    result: Result<T, LogError>,
    index: ActivityIndex,
    out: &mut dyn Write,
    print: impl FnOnce(T, &mut dyn Write) -> std::io::Result<()>,
) -> anyhow::Result<Outcome> {
    match result {
        Ok(value) => {
            print(value, out)?;
            Ok(Outcome::Done)
        }
        Err(LogError::NotFound(_)) => {
            writeln!(out, "no such activity: {}", index)?;
            Ok(Outcome::NotFound)
        }
        Err(e) => Err(e.into()),
    }
}
