//! Semantic validation of rules documents
//!
//! Checks run in a fixed order so the first error reported is the most
//! actionable one: the runtime flag, then each form in declaration order
//! (duplicate requester, then per field: duplicate name, options allow-list,
//! mandatory-required; then missing mandatory fields), then requester types
//! that have no form at all.

use crate::error::RulesError;
use crate::policy::RulesPolicy;
use kairos_core::ast::{FormSpec, RulesDocument};
use std::collections::{BTreeSet, HashSet};

/// Rules document validator
#[derive(Debug, Clone, Default)]
pub struct RulesValidator {
    policy: RulesPolicy,
}

impl RulesValidator {
    pub fn new(policy: RulesPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RulesPolicy {
        &self.policy
    }

    /// Validate a document, failing on the first violation
    pub fn validate(&self, doc: &RulesDocument) -> Result<(), RulesError> {
        match self.violations(doc).into_iter().next() {
            Some(err) => {
                tracing::debug!("Rules document rejected: {}", err);
                Err(err)
            }
            None => {
                tracing::debug!("Rules document accepted ({} forms)", doc.forms.len());
                Ok(())
            }
        }
    }

    /// Every violation in the document, in check order
    pub fn violations(&self, doc: &RulesDocument) -> Vec<RulesError> {
        let mut errors = Vec::new();

        if !doc.runtime_enabled {
            errors.push(RulesError::RuntimeDisabled);
        }

        let mut seen_requesters = HashSet::new();
        for form in &doc.forms {
            if !seen_requesters.insert(form.requester_type.as_str()) {
                errors.push(RulesError::DuplicateRequester {
                    requester_type: form.requester_type.clone(),
                });
            }
            self.check_form(form, &mut errors);
        }

        let missing: BTreeSet<&str> = self
            .policy
            .required_requester_types
            .iter()
            .map(String::as_str)
            .filter(|r| !seen_requesters.contains(r))
            .collect();
        if !missing.is_empty() {
            errors.push(RulesError::MissingRequesterForms {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }

        errors
    }

    fn check_form(&self, form: &FormSpec, errors: &mut Vec<RulesError>) {
        let requester = &form.requester_type;
        let mut seen_fields = HashSet::new();

        for field in &form.fields {
            let name = field.field_name.as_str();

            if !seen_fields.insert(name) {
                errors.push(RulesError::DuplicateField {
                    requester_type: requester.clone(),
                    field: name.to_string(),
                });
                continue;
            }

            if field.has_options() && !self.policy.allows_options(name) {
                errors.push(RulesError::OptionsNotAllowed {
                    requester_type: requester.clone(),
                    field: name.to_string(),
                    allowed: self.policy.sorted_option_fields(),
                });
            }

            if self.policy.is_mandatory(name) && !field.required {
                errors.push(RulesError::MandatoryFieldNotRequired {
                    requester_type: requester.clone(),
                    field: name.to_string(),
                });
            }
        }

        let missing: BTreeSet<&str> = self
            .policy
            .mandatory_fields
            .iter()
            .map(String::as_str)
            .filter(|f| !seen_fields.contains(f))
            .collect();
        if !missing.is_empty() {
            errors.push(RulesError::MandatoryFieldsMissing {
                requester_type: requester.clone(),
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }
    }
}
