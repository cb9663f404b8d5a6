//! # chatlog-core
//!
//! Ordered activity log for a single chat.
//!
//! A chat's timeline is a sequence of [`Activity`] records, each either a
//! [`Message`] from a participant or a structural [`Event`]. Every record
//! carries an externally-assigned [`ActivityIndex`] that fixes its place in
//! the timeline. [`ActivityLog`] keeps the records sorted by that index and
//! answers point lookups and event/message classification with binary
//! searches.
//!
//! ## Example
//!
//! ```
//! use chatlog_core::{ActivityLog, Event, Message};
//!
//! let mut log = ActivityLog::new();
//! log.insert(Message::new(10, "alice", "hello")).unwrap();
//! log.insert(Event::title_changed(5, "Book club")).unwrap();
//!
//! let order: Vec<_> = log.iter().map(|a| a.index()).collect();
//! assert_eq!(order, vec![5, 10]);
//! assert_eq!(log.is_event(5), Ok(true));
//! assert!(log.lookup(7).is_none());
//! ```

pub mod activity;
pub mod error;
pub mod log;

// Re-exports
pub use activity::{Activity, ActivityIndex, ActivityKind, Event, EventKind, Message, UserId};
pub use error::{LogError, LogResult};
pub use log::{ActivityLog, ActivityLogConfig, DuplicatePolicy};
