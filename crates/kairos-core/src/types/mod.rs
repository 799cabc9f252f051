//! Record and value types for Kairos
//!
//! This module contains:
//! - Time-of-day values and half-open time ranges
//! - Persisted events
//! - Persisted field rules

pub mod event;
pub mod field_rule;
pub mod time;

pub use event::{Event, EventId};
pub use field_rule::StoredFieldRule;
pub use time::{TimeOfDay, TimeRange};
