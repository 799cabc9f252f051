//! Submission checks for single-event creation
//!
//! A requester's stored field rules describe the form it fills in. Before a
//! submitted event reaches scheduling validation, every visible required
//! field must hold a value and option-bearing fields must hold one of their
//! options. Fields that do not map onto an event attribute (buttons,
//! free-form extras) are ignored.

use crate::error::SubmissionError;
use crate::policy::RulesPolicy;
use kairos_core::ast::EventDraft;
use kairos_core::StoredFieldRule;
use std::borrow::Cow;

/// Submission validator
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionValidator;

impl SubmissionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check a draft against the requester's stored field rules.
    ///
    /// An empty rule set means the requester has no form; nothing is checked.
    pub fn validate(&self, draft: &EventDraft, rules: &[StoredFieldRule]) -> Result<(), SubmissionError> {
        let missing: Vec<String> = rules
            .iter()
            .filter(|rule| rule.visible && rule.required)
            .filter(|rule| matches!(field_value(draft, &rule.field_name), Some(v) if v.trim().is_empty()))
            .map(|rule| rule.display_label().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SubmissionError::MissingRequired { fields: missing });
        }

        for rule in rules {
            let Some(options) = rule.options.as_ref().filter(|o| !o.is_empty()) else {
                continue;
            };
            let Some(value) = field_value(draft, &rule.field_name) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            if !options.iter().any(|option| option == value.trim()) {
                return Err(SubmissionError::NotAnOption {
                    field: rule.field_name.clone(),
                    value: value.to_string(),
                    options: options.clone(),
                });
            }
        }

        Ok(())
    }

    /// Reject requester types that are neither configured nor expected
    pub fn check_requester_type(
        &self,
        requester_type: &str,
        policy: &RulesPolicy,
        configured: bool,
    ) -> Result<(), SubmissionError> {
        let expected = policy
            .required_requester_types
            .iter()
            .any(|r| r == requester_type);
        if !policy.restrict_requester_types || configured || expected {
            Ok(())
        } else {
            Err(SubmissionError::UnknownRequesterType(requester_type.to_string()))
        }
    }
}

/// Value a form field contributes to the draft; `None` when the field has
/// no event counterpart
fn field_value<'a>(draft: &'a EventDraft, field_name: &str) -> Option<Cow<'a, str>> {
    match field_name {
        "event_name" => Some(Cow::Borrowed(&draft.name)),
        "event_date" => Some(Cow::Owned(draft.date.to_string())),
        "start_time" => Some(Cow::Borrowed(&draft.start_time)),
        "end_time" => Some(Cow::Borrowed(&draft.end_time)),
        "location" => Some(Cow::Borrowed(&draft.location)),
        "requester_unit" => Some(Cow::Borrowed(draft.requester_unit.as_deref().unwrap_or(""))),
        _ => None,
    }
}
