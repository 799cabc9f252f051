//! Persisted field rules
//!
//! A field rule is one row of a requester type's form configuration. The
//! store keeps them in declaration order; that order is the form order.

use crate::ast::FieldSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFieldRule {
    pub requester_type: String,
    pub field_name: String,
    pub visible: bool,
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl StoredFieldRule {
    /// Build the stored row for a field of `requester_type`'s form
    pub fn from_field(requester_type: impl Into<String>, field: &FieldSpec) -> Self {
        Self {
            requester_type: requester_type.into(),
            field_name: field.field_name.clone(),
            visible: field.visible,
            required: field.required,
            label: field.label.clone(),
            options: field.options.clone(),
        }
    }

    /// Label shown to users; falls back to the field name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.field_name)
    }

    /// Options encoded for a text column
    pub fn options_json(&self) -> Option<String> {
        self.options
            .as_ref()
            .and_then(|options| serde_json::to_string(options).ok())
    }

    /// Decode options previously written by [`options_json`](Self::options_json)
    pub fn options_from_json(raw: Option<&str>) -> Option<Vec<String>> {
        raw.and_then(|text| serde_json::from_str(text).ok())
    }
}
