//! Scheduling validation
//!
//! Decides whether a candidate event can be placed next to the events
//! already stored for the same date and location. Time checks run before
//! any conflict check, so callers can skip fetching existing events for
//! drafts that are malformed on their own.

use crate::error::SchedulingError;
use crate::policy::SchedulingPolicy;
use kairos_core::ast::EventDraft;
use kairos_core::{Event, TimeOfDay, TimeRange};

/// Scheduling validator
#[derive(Debug, Clone, Default)]
pub struct SchedulingValidator {
    policy: SchedulingPolicy,
}

impl SchedulingValidator {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Full check: time format, ordering, minimum duration, then conflicts
    pub fn validate(&self, draft: &EventDraft, existing: &[Event]) -> Result<(), SchedulingError> {
        let range = self.check_times(draft)?;
        self.check_conflicts(draft, range, existing)
    }

    /// Parse and check the draft's own times, returning its interval
    pub fn check_times(&self, draft: &EventDraft) -> Result<TimeRange, SchedulingError> {
        let start = parse_time(&draft.start_time)?;
        let end = parse_time(&draft.end_time)?;

        if start >= end {
            return Err(SchedulingError::StartNotBeforeEnd {
                start: draft.start_time.clone(),
                end: draft.end_time.clone(),
            });
        }

        let range = TimeRange::new(start, end);
        let minutes = range.duration_minutes();
        if minutes < self.policy.min_duration_minutes as i32 {
            return Err(SchedulingError::DurationTooShort {
                minutes,
                minimum: self.policy.min_duration_minutes,
            });
        }

        Ok(range)
    }

    /// Compare an already time-checked draft against stored events.
    ///
    /// Only events at the draft's date and location are considered, even if
    /// `existing` holds more. Every overlapping event is reported.
    pub fn check_conflicts(
        &self,
        draft: &EventDraft,
        range: TimeRange,
        existing: &[Event],
    ) -> Result<(), SchedulingError> {
        let conflicts: Vec<Event> = existing
            .iter()
            .filter(|event| event.shares_slot(draft.date, &draft.location))
            .filter(|event| match event.time_range() {
                Ok(other) => range.overlaps(&other),
                Err(err) => {
                    tracing::warn!("Skipping stored event {} with unreadable times: {}", event.id, err);
                    false
                }
            })
            .cloned()
            .collect();

        if conflicts.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                "'{}' conflicts with {} stored event(s)",
                draft.name,
                conflicts.len()
            );
            Err(SchedulingError::Conflict { conflicts })
        }
    }
}

fn parse_time(raw: &str) -> Result<TimeOfDay, SchedulingError> {
    TimeOfDay::parse(raw).map_err(|_| SchedulingError::InvalidTimeFormat(raw.to_string()))
}
