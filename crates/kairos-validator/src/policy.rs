//! Validation policies
//!
//! The constants the validators enforce. Defaults match the campus
//! deployment; every list can be overridden from configuration.

use serde::{Deserialize, Serialize};

/// Fields every form must define, each with `required = yes`
pub const DEFAULT_MANDATORY_FIELDS: [&str; 5] =
    ["event_name", "event_date", "start_time", "end_time", "location"];

/// Fields allowed to carry an `options` list
pub const DEFAULT_OPTION_FIELDS: [&str; 2] = ["location", "requester_unit"];

/// Requester types that must each have a form
pub const DEFAULT_REQUIRED_REQUESTER_TYPES: [&str; 2] = ["Academics", "Students"];

pub const DEFAULT_MIN_DURATION_MINUTES: u32 = 60;

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Constraints applied to rules documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesPolicy {
    pub mandatory_fields: Vec<String>,
    pub option_fields: Vec<String>,
    pub required_requester_types: Vec<String>,

    /// Reject single-event submissions from requester types that have
    /// neither a stored form nor a place in `required_requester_types`
    pub restrict_requester_types: bool,
}

impl Default for RulesPolicy {
    fn default() -> Self {
        Self {
            mandatory_fields: owned(&DEFAULT_MANDATORY_FIELDS),
            option_fields: owned(&DEFAULT_OPTION_FIELDS),
            required_requester_types: owned(&DEFAULT_REQUIRED_REQUESTER_TYPES),
            restrict_requester_types: true,
        }
    }
}

impl RulesPolicy {
    pub fn is_mandatory(&self, field: &str) -> bool {
        self.mandatory_fields.iter().any(|f| f == field)
    }

    pub fn allows_options(&self, field: &str) -> bool {
        self.option_fields.iter().any(|f| f == field)
    }

    /// Option-bearing fields, sorted for messages
    pub fn sorted_option_fields(&self) -> Vec<String> {
        let mut fields = self.option_fields.clone();
        fields.sort();
        fields.dedup();
        fields
    }
}

/// Constraints applied to candidate events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    pub min_duration_minutes: u32,

    /// Also check each draft of a batch against the drafts accepted before
    /// it in the same batch, not only against stored events
    pub check_within_batch: bool,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            check_within_batch: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = RulesPolicy::default();
        assert!(policy.is_mandatory("event_date"));
        assert!(!policy.is_mandatory("requester_unit"));
        assert!(policy.allows_options("requester_unit"));
        assert!(policy.restrict_requester_types);
        assert_eq!(SchedulingPolicy::default().min_duration_minutes, 60);
        assert!(SchedulingPolicy::default().check_within_batch);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let policy: RulesPolicy = serde_yaml::from_str("option_fields: [location]").unwrap();
        assert_eq!(policy.option_fields, vec!["location".to_string()]);
        assert_eq!(policy.mandatory_fields.len(), 5);
    }
}
