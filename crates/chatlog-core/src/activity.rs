//! Activity records: chat messages and chat events

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Externally-assigned ordering key of an activity within a chat
pub type ActivityIndex = i64;

/// Identifier of the participant who sent a message
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A message authored by a chat participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Ordering key
    pub index: ActivityIndex,
    /// Sender of the message
    pub user: UserId,
    /// When the message was sent
    pub timestamp: DateTime<Utc>,
    /// Message text
    pub text: String,
}

impl Message {
    /// Create a new message stamped with the current time
    pub fn new(index: ActivityIndex, user: impl Into<UserId>, text: impl Into<String>) -> Self {
        Self {
            index,
            user: user.into(),
            timestamp: Utc::now(),
            text: text.into(),
        }
    }

    /// Override the timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// What happened in a structural chat event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// Members were added to the chat
    MembersJoined {
        /// Display names of the new members
        members: Vec<String>,
    },
    /// A member left or was removed
    MemberLeft {
        /// Display name of the departed member
        member: String,
    },
    /// Chat title changed
    TitleChanged {
        /// The new title
        title: String,
    },
    /// A message was pinned
    MessagePinned {
        /// Index of the pinned message
        target: ActivityIndex,
    },
    /// Any other service action, by name
    Other {
        /// Upstream action name
        action: String,
    },
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MembersJoined { members } => write!(f, "joined: {}", members.join(", ")),
            Self::MemberLeft { member } => write!(f, "left: {}", member),
            Self::TitleChanged { title } => write!(f, "title changed to {:?}", title),
            Self::MessagePinned { target } => write!(f, "pinned #{}", target),
            Self::Other { action } => write!(f, "{}", action),
        }
    }
}

/// A structural chat event (no sender)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Ordering key
    pub index: ActivityIndex,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// What happened
    pub kind: EventKind,
}

impl Event {
    /// Create a new event stamped with the current time
    pub fn new(index: ActivityIndex, kind: EventKind) -> Self {
        Self {
            index,
            timestamp: Utc::now(),
            kind,
        }
    }

    /// Create a title-change event
    pub fn title_changed(index: ActivityIndex, title: impl Into<String>) -> Self {
        Self::new(index, EventKind::TitleChanged { title: title.into() })
    }

    /// Create a member-left event
    pub fn member_left(index: ActivityIndex, member: impl Into<String>) -> Self {
        Self::new(index, EventKind::MemberLeft { member: member.into() })
    }

    /// Override the timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Discriminant of an [`Activity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Message,
    Event,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// A single entry in a chat's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Activity {
    Message(Message),
    Event(Event),
}

impl Activity {
    /// Ordering key of this activity
    pub fn index(&self) -> ActivityIndex {
        match self {
            Self::Message(m) => m.index,
            Self::Event(e) => e.index,
        }
    }

    /// When this activity happened
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Message(m) => m.timestamp,
            Self::Event(e) => e.timestamp,
        }
    }

    pub fn kind(&self) -> ActivityKind {
        match self {
            Self::Message(_) => ActivityKind::Message,
            Self::Event(_) => ActivityKind::Event,
        }
    }

    /// Check if this is an event
    pub fn is_event(&self) -> bool {
        matches!(self, Self::Event(_))
    }

    /// Sender, if this is a message
    pub fn user(&self) -> Option<&UserId> {
        match self {
            Self::Message(m) => Some(&m.user),
            Self::Event(_) => None,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(m) => Some(m),
            Self::Event(_) => None,
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Self::Event(e) => Some(e),
            Self::Message(_) => None,
        }
    }
}

impl From<Message> for Activity {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<Event> for Activity {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(m) => write!(
                f,
                "#{} {} {}: {}",
                m.index,
                m.timestamp.format("%Y-%m-%d %H:%M:%S"),
                m.user,
                m.text
            ),
            Self::Event(e) => write!(
                f,
                "#{} {} [{}]",
                e.index,
                e.timestamp.format("%Y-%m-%d %H:%M:%S"),
                e.kind
            ),
        }
    }
}
