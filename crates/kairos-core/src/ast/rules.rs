//! Rules DSL AST definitions
//!
//! A rules document declares, per requester type, which fields the event request
//! form shows and how each one behaves.

use serde::{Deserialize, Serialize};

/// Root of a parsed rules document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesDocument {
    /// Value of the `initialize_runtime` declaration
    pub runtime_enabled: bool,

    /// One form per requester type, in declaration order
    pub forms: Vec<FormSpec>,
}

/// `event_form <RequesterType> { ... }` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    /// Requester type this form applies to (e.g. "Academics", "Students")
    pub requester_type: String,

    /// Field blocks, in declaration order
    pub fields: Vec<FieldSpec>,
}

/// A single named field block inside a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field_name: String,
    pub visible: bool,
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Enumerated choices (only meaningful on option-bearing fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl RulesDocument {
    /// Stable type tag used by the tree view
    pub const TYPE_TAG: &'static str = "RulesDocument";

    /// Create a new rules document
    pub fn new(runtime_enabled: bool) -> Self {
        Self {
            runtime_enabled,
            forms: Vec::new(),
        }
    }

    /// Add a form
    pub fn add_form(mut self, form: FormSpec) -> Self {
        self.forms.push(form);
        self
    }

    /// Find the form declared for a requester type
    pub fn form(&self, requester_type: &str) -> Option<&FormSpec> {
        self.forms.iter().find(|f| f.requester_type == requester_type)
    }
}

impl FormSpec {
    pub const TYPE_TAG: &'static str = "FormSpec";

    /// Create a new, empty form
    pub fn new(requester_type: impl Into<String>) -> Self {
        Self {
            requester_type: requester_type.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field
    pub fn add_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Find a field by name
    pub fn field(&self, field_name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.field_name == field_name)
    }
}

impl FieldSpec {
    pub const TYPE_TAG: &'static str = "FieldSpec";

    /// Create a field with the grammar defaults (visible, not required)
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            visible: true,
            required: false,
            label: None,
            options: None,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    /// True when the field declares at least one option
    pub fn has_options(&self) -> bool {
        self.options.as_ref().is_some_and(|o| !o.is_empty())
    }
}
