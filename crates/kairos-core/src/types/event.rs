//! Persisted events

use crate::ast::EventDraft;
use crate::error::Result;
use crate::types::time::{TimeOfDay, TimeRange};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned event identifier, starting at 1.
///
/// Non-positive ids mark drafts of a batch that is still being validated;
/// see [`Event::pending`].
pub type EventId = i64;

/// An event accepted into the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub requester_type: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_unit: Option<String>,
}

impl Event {
    /// Promote a draft once the store has assigned it an id
    pub fn from_draft(id: EventId, draft: &EventDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            requester_type: draft.requester_type.clone(),
            date: draft.date,
            start_time: draft.start_time.trim().to_string(),
            end_time: draft.end_time.trim().to_string(),
            location: draft.location.clone(),
            requester_unit: draft.requester_unit.clone(),
        }
    }

    /// Placeholder for the `position`-th (1-based) draft of a batch that
    /// has passed its checks but is not stored yet
    pub fn pending(position: usize, draft: &EventDraft) -> Self {
        let id = -EventId::try_from(position).unwrap_or(EventId::MAX);
        Self::from_draft(id, draft)
    }

    /// Whether the store assigned this event's id
    pub fn is_stored(&self) -> bool {
        self.id > 0
    }

    /// Parsed `[start, end)` interval of the stored times
    pub fn time_range(&self) -> Result<TimeRange> {
        Ok(TimeRange::new(
            TimeOfDay::parse(&self.start_time)?,
            TimeOfDay::parse(&self.end_time)?,
        ))
    }

    /// Whether this event sits in the same slot bucket as `date`/`location`
    pub fn shares_slot(&self, date: NaiveDate, location: &str) -> bool {
        self.date == date && self.location == location
    }
}

/// `[id] date start-end | name (requester[, unit] @ location)`, with
/// `[batch #n]` in place of the id for pending drafts
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_stored() {
            write!(f, "[{}]", self.id)?;
        } else {
            write!(f, "[batch #{}]", self.id.unsigned_abs())?;
        }
        write!(
            f,
            " {} {}-{} | {} ({}",
            self.date, self.start_time, self.end_time, self.name, self.requester_type
        )?;
        if let Some(unit) = self.requester_unit.as_deref().filter(|u| !u.is_empty()) {
            write!(f, ", {}", unit)?;
        }
        write!(f, " @ {})", self.location)
    }
}
