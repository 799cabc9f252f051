//! Form configuration types

use kairos_core::StoredFieldRule;
use serde::{Deserialize, Serialize};

/// One visible field of a requester's form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub field_name: String,

    /// Display label; the field name when the rule sets none
    pub label: String,

    /// Always true; hidden fields are left out of the projection
    pub visible: bool,

    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl From<&StoredFieldRule> for FormField {
    fn from(rule: &StoredFieldRule) -> Self {
        Self {
            field_name: rule.field_name.clone(),
            label: rule.display_label().to_string(),
            visible: rule.visible,
            required: rule.required,
            options: rule.options.clone().filter(|options| !options.is_empty()),
        }
    }
}

/// Form configuration of a requester type
///
/// A requester whose form hides every field is still `Configured`; only a
/// requester without any stored rule is `NotConfigured`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormConfig {
    NotConfigured,
    Configured(Vec<FormField>),
}

impl FormConfig {
    /// Project stored rules (in form order) onto the visible fields
    pub fn from_rules(rules: &[StoredFieldRule]) -> Self {
        if rules.is_empty() {
            return FormConfig::NotConfigured;
        }
        FormConfig::Configured(
            rules
                .iter()
                .filter(|rule| rule.visible)
                .map(FormField::from)
                .collect(),
        )
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, FormConfig::Configured(_))
    }

    /// Visible fields; empty when not configured
    pub fn fields(&self) -> &[FormField] {
        match self {
            FormConfig::Configured(fields) => fields,
            FormConfig::NotConfigured => &[],
        }
    }
}
