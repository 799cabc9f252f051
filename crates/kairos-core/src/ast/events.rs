//! Events DSL AST definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Root of a parsed events document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventsDocument {
    /// Event blocks in declaration order
    pub events: Vec<EventDraft>,
}

/// An event that has not been placed on the calendar yet.
///
/// Drafts come either from an events DSL block or from structured input
/// (HTTP, CLI). Times are kept as the caller wrote them; the scheduling
/// validator is the component that decides whether they are well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub requester_type: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_unit: Option<String>,
}

impl EventsDocument {
    pub const TYPE_TAG: &'static str = "EventsDocument";

    /// Create a document from a list of drafts
    pub fn new(events: Vec<EventDraft>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventDraft {
    pub const TYPE_TAG: &'static str = "EventDraft";

    /// Create a new draft
    pub fn new(
        name: impl Into<String>,
        requester_type: impl Into<String>,
        date: NaiveDate,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            requester_type: requester_type.into(),
            date,
            start_time: start_time.into(),
            end_time: end_time.into(),
            location: location.into(),
            requester_unit: None,
        }
    }

    /// Set the requester unit
    pub fn with_requester_unit(mut self, unit: impl Into<String>) -> Self {
        self.requester_unit = Some(unit.into());
        self
    }

    /// Copy with surrounding whitespace removed from every text attribute.
    ///
    /// Conflict slots are keyed on the exact `location` string, so drafts are
    /// normalized once before any check or write. A blank unit becomes `None`.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            requester_type: self.requester_type.trim().to_string(),
            date: self.date,
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            location: self.location.trim().to_string(),
            requester_unit: self
                .requester_unit
                .as_deref()
                .map(str::trim)
                .filter(|unit| !unit.is_empty())
                .map(str::to_string),
        }
    }

    /// One-line description: `'name' on date start-end (requester @ location)`
    pub fn describe(&self) -> String {
        format!(
            "'{}' on {} {}-{} ({} @ {})",
            self.name, self.date, self.start_time, self.end_time, self.requester_type, self.location
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_normalized_trims_text() {
        let draft = EventDraft::new(" Kickoff ", "Students\t", date("2025-03-01"), " 09:00", "10:00 ", " REC ")
            .with_requester_unit("  ");
        let clean = draft.normalized();
        assert_eq!(clean.name, "Kickoff");
        assert_eq!(clean.requester_type, "Students");
        assert_eq!(clean.start_time, "09:00");
        assert_eq!(clean.end_time, "10:00");
        assert_eq!(clean.location, "REC");
        assert!(clean.requester_unit.is_none());

        let unit = draft.with_requester_unit(" Robotics ").normalized();
        assert_eq!(unit.requester_unit.as_deref(), Some("Robotics"));
    }

    #[test]
    fn test_draft_creation() {
        let draft = EventDraft::new("Kickoff", "Students", date("2025-03-01"), "09:00", "10:00", "REC");
        assert_eq!(draft.name, "Kickoff");
        assert!(draft.requester_unit.is_none());

        let draft = draft.with_requester_unit("Robotics Club");
        assert_eq!(draft.requester_unit.as_deref(), Some("Robotics Club"));
    }

    #[test]
    fn test_describe() {
        let draft = EventDraft::new("Kickoff", "Students", date("2025-03-01"), "09:00", "10:00", "REC");
        assert_eq!(draft.describe(), "'Kickoff' on 2025-03-01 09:00-10:00 (Students @ REC)");
    }

    #[test]
    fn test_draft_json_shape() {
        let draft = EventDraft::new("Kickoff", "Students", date("2025-03-01"), "09:00", "10:00", "REC");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["date"], "2025-03-01");
        assert!(json.get("requester_unit").is_none());
    }
}
