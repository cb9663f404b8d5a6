//! Tracing subscriber setup for chatlog
//!
//! Installs a global `tracing` subscriber with an [`EnvFilter`] and a single
//! console layer, either human-readable or JSONL.
//!
//! # Quick Start
//!
//! ```ignore
//! use chatlog_logging::{ChatlogSubscriberBuilder, LogConfig};
//!
//! // Defaults: warnings and above, human-readable, on stderr
//! ChatlogSubscriberBuilder::new().init()?;
//!
//! // Verbose development output
//! ChatlogSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .init()?;
//! ```
//!
//! `RUST_LOG`, when set, takes precedence over the configured level.

pub mod config;

pub use config::{ConsoleConfig, JsonlConfig, LogConfig};

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured level is not a valid filter directive
    #[error("invalid log filter {directive:?}: {reason}")]
    InvalidFilter { directive: String, reason: String },

    /// A global subscriber was already set
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Builder for configuring and initializing the chatlog logging subscriber
pub struct ChatlogSubscriberBuilder {
    config: LogConfig,
}

impl ChatlogSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
        }
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Switch between human-readable and JSONL console output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.config.console.pretty = pretty;
        self
    }

    /// Initialize the subscriber globally
    ///
    /// Fails if the level is not a valid filter or a global subscriber has
    /// already been set.
    pub fn init(self) -> Result<(), LoggingError> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => parse_filter(&self.config.default_level)?,
        };

        let registry = Registry::default().with(env_filter);
        let console = &self.config.console;
        let jsonl = &self.config.jsonl;

        // Separate arms because the layer types differ
        let result = match (console.enabled, console.pretty) {
            (true, true) => {
                let console_layer = tracing_subscriber::fmt::layer()
                    .with_ansi(console.ansi)
                    .with_target(console.target)
                    .with_writer(std::io::stderr);
                registry.with(console_layer).try_init()
            }
            (true, false) => {
                let console_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(jsonl.include_spans)
                    .flatten_event(jsonl.flatten_events)
                    .with_file(jsonl.include_location)
                    .with_line_number(jsonl.include_location)
                    .with_target(console.target)
                    .with_writer(std::io::stderr);
                registry.with(console_layer).try_init()
            }
            (false, _) => registry.try_init(),
        };

        result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
    }
}

impl Default for ChatlogSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Initialize logging for testing (minimal output)
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_testing() {
    let _ = ChatlogSubscriberBuilder::new()
        .with_config(LogConfig::testing())
        .init();
}
