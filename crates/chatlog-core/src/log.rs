//! Index-ordered activity log
//!
//! [`ActivityLog`] keeps every activity of a chat sorted ascending by its
//! [`ActivityIndex`]. Insertion and lookup are both binary searches over the
//! backing vector, so they are only correct while that ordering holds: the
//! log validates its initial contents and never reorders them except by
//! inserting at the searched position.
//!
//! The log is plain single-owner data. Mutation needs `&mut self`; callers
//! that share a log across threads wrap it in their own lock.

use std::slice;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::activity::{Activity, ActivityIndex, ActivityKind, Event, Message, UserId};
use crate::error::{LogError, LogResult};

/// How a log treats two activities carrying the same index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Refuse the second activity with [`LogError::DuplicateIndex`]
    #[default]
    Reject,
    /// Keep both, the newer one after the older
    Allow,
}

/// Configuration for an activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityLogConfig {
    /// Duplicate index handling
    pub duplicates: DuplicatePolicy,
}

impl ActivityLogConfig {
    /// Config that tolerates duplicate indices
    pub fn allow_duplicates() -> Self {
        Self {
            duplicates: DuplicatePolicy::Allow,
        }
    }
}

/// Activities of one chat, sorted ascending by index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityLog {
    activities: Vec<Activity>,
    config: ActivityLogConfig,
}

impl ActivityLog {
    /// Create an empty log with the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log
    pub fn empty(config: ActivityLogConfig) -> Self {
        Self {
            activities: Vec::new(),
            config,
        }
    }

    /// Build a log from activities already sorted by index
    pub fn from_sorted(activities: Vec<Activity>) -> LogResult<Self> {
        Self::with_config(activities, ActivityLogConfig::default())
    }

    /// Build a log from sorted activities with an explicit config
    ///
    /// The ordering is checked up front; unsorted input fails with
    /// [`LogError::Unsorted`] and, under [`DuplicatePolicy::Reject`], a
    /// repeated index fails with [`LogError::DuplicateIndex`].
    pub fn with_config(activities: Vec<Activity>, config: ActivityLogConfig) -> LogResult<Self> {
        for (position, pair) in activities.windows(2).enumerate() {
            let (previous, next) = (pair[0].index(), pair[1].index());
            if previous > next {
                return Err(LogError::Unsorted {
                    position: position + 1,
                    previous,
                    next,
                });
            }
            if previous == next && config.duplicates == DuplicatePolicy::Reject {
                return Err(LogError::DuplicateIndex(next));
            }
        }

        debug!(count = activities.len(), "Activity log created");
        Ok(Self { activities, config })
    }

    /// Build a log from activities in any order by inserting them one at a time
    pub fn from_unordered<T>(activities: T, config: ActivityLogConfig) -> LogResult<Self>
    where
        T: IntoIterator<Item = Activity>,
    {
        let mut log = Self::empty(config);
        log.insert_all(activities)?;
        Ok(log)
    }

    pub fn config(&self) -> &ActivityLogConfig {
        &self.config
    }

    /// Number of activities
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Iterate activities in ascending index order
    pub fn iter(&self) -> slice::Iter<'_, Activity> {
        self.activities.iter()
    }

    pub fn as_slice(&self) -> &[Activity] {
        &self.activities
    }

    /// Activity with the lowest index
    pub fn first(&self) -> Option<&Activity> {
        self.activities.first()
    }

    /// Activity with the highest index
    pub fn last(&self) -> Option<&Activity> {
        self.activities.last()
    }

    /// Consume the log, returning the sorted activities
    pub fn into_inner(self) -> Vec<Activity> {
        self.activities
    }

    /// Position at which an activity with `index` keeps the log sorted
    ///
    /// This is the smallest position whose index is strictly greater than
    /// `index`, or `len()` when there is none. Equal indices therefore land
    /// after every existing activity with the same index.
    pub fn insertion_position(&self, index: ActivityIndex) -> usize {
        if self.activities.is_empty() {
            return 0;
        }

        let mut low = 0;
        let mut high = self.activities.len() - 1;
        while low < high {
            let mid = low + (high - low) / 2;
            if self.activities[mid].index() > index {
                high = mid;
            } else {
                low = mid + 1;
            }
        }

        if self.activities[low].index() > index {
            low
        } else {
            low + 1
        }
    }

    /// Position of an activity whose index equals `index`
    ///
    /// With duplicates allowed this is the leftmost matching position.
    pub fn exact_position(&self, index: ActivityIndex) -> Option<usize> {
        if self.activities.is_empty() {
            return None;
        }

        let mut low = 0;
        let mut high = self.activities.len() - 1;
        while low < high {
            let mid = low + (high - low) / 2;
            if self.activities[mid].index() >= index {
                high = mid;
            } else {
                low = mid + 1;
            }
        }

        let found = (self.activities[low].index() == index).then_some(low);
        trace!(index, position = ?found, "Exact position search");
        found
    }

    /// Insert an activity at its sorted position, returning that position
    ///
    /// Fails with [`LogError::DuplicateIndex`] when the index is already
    /// present and the log rejects duplicates; the log is left unchanged.
    pub fn insert(&mut self, activity: impl Into<Activity>) -> LogResult<usize> {
        let activity = activity.into();
        let index = activity.index();
        let position = self.insertion_position(index);

        // Everything at or before `position - 1` has an index <= `index`.
        if self.config.duplicates == DuplicatePolicy::Reject
            && position > 0
            && self.activities[position - 1].index() == index
        {
            warn!(index, "Rejected activity with duplicate index");
            return Err(LogError::DuplicateIndex(index));
        }

        self.activities.insert(position, activity);
        debug!(index, position, len = self.activities.len(), "Inserted activity");
        Ok(position)
    }

    /// Insert every activity, returning how many were added
    ///
    /// Stops at the first rejected activity; the ones before it stay inserted.
    pub fn insert_all<T>(&mut self, activities: T) -> LogResult<usize>
    where
        T: IntoIterator<Item = Activity>,
    {
        let mut added = 0;
        for activity in activities {
            self.insert(activity)?;
            added += 1;
        }
        Ok(added)
    }

    /// Insert every activity of another log
    pub fn merge(&mut self, other: ActivityLog) -> LogResult<usize> {
        self.insert_all(other.activities)
    }

    /// Find the activity with the given index
    pub fn lookup(&self, index: ActivityIndex) -> Option<&Activity> {
        self.exact_position(index).map(|position| &self.activities[position])
    }

    /// Like [`lookup`](Self::lookup), but absent indices are an error
    pub fn get(&self, index: ActivityIndex) -> LogResult<&Activity> {
        self.lookup(index).ok_or(LogError::NotFound(index))
    }

    /// Whether the activity at `index` is an event rather than a message
    pub fn is_event(&self, index: ActivityIndex) -> LogResult<bool> {
        Ok(self.kind_of(index)? == ActivityKind::Event)
    }

    /// Kind of the activity at `index`
    pub fn kind_of(&self, index: ActivityIndex) -> LogResult<ActivityKind> {
        self.get(index).map(Activity::kind)
    }

    /// Activities with `from <= index <= to`, in order
    pub fn between(&self, from: ActivityIndex, to: ActivityIndex) -> &[Activity] {
        if from > to {
            return &[];
        }
        let start = self.lower_bound(from);
        let end = self.insertion_position(to);
        &self.activities[start..end]
    }

    /// Iterate only the messages
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.activities.iter().filter_map(Activity::as_message)
    }

    /// Iterate only the events
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.activities.iter().filter_map(Activity::as_event)
    }

    /// Iterate the messages sent by `user`
    pub fn messages_from<'a>(&'a self, user: &'a UserId) -> impl Iterator<Item = &'a Message> {
        self.messages().filter(move |m| &m.user == user)
    }

    // Smallest position whose index is >= `index`.
    fn lower_bound(&self, index: ActivityIndex) -> usize {
        match self.exact_position(index) {
            Some(position) => position,
            None => self.insertion_position(index),
        }
    }
}

impl<'a> IntoIterator for &'a ActivityLog {
    type Item = &'a Activity;
    type IntoIter = slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ActivityLog {
    type Item = Activity;
    type IntoIter = std::vec::IntoIter<Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.activities.into_iter()
    }
}

impl TryFrom<Vec<Activity>> for ActivityLog {
    type Error = LogError;

    fn try_from(activities: Vec<Activity>) -> LogResult<Self> {
        Self::from_sorted(activities)
    }
}
