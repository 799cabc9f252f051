//! JSON view of the generic AST
//!
//! Converts an [`AstNode`] into a plain `serde_json::Value` for debugging and
//! visualization. Objects become `{"type": <tag>, <attr>: <value>, ...}`.
//!
//! Two guards keep the conversion finite even when a tree is malformed:
//! - revisiting an object already emitted yields `{"type": <tag>, "note": "circular_reference"}`
//! - going deeper than `max_depth` yields `{"type": "MaxDepthReached"}`
//!
//! Attributes conventionally used for parent back-references are never followed.

use super::node::{AstNode, AstObject};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;

/// Default recursion limit for [`TreeConverter`]
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Key holding the type tag of converted objects
pub const TYPE_KEY: &str = "type";

/// Key holding the note of a circular-reference marker
pub const NOTE_KEY: &str = "note";

/// Tag of the depth-limit marker
pub const MAX_DEPTH_TAG: &str = "MaxDepthReached";

/// Note of the circular-reference marker
pub const CIRCULAR_REFERENCE: &str = "circular_reference";

const PARENT_ATTRIBUTES: [&str; 3] = ["parent", "parent_obj", "parent_ref"];

/// Converts generic trees to JSON
#[derive(Debug, Clone)]
pub struct TreeConverter {
    max_depth: usize,
    excluded_attributes: HashSet<String>,
}

impl Default for TreeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl TreeConverter {
    /// Create a converter with the given depth limit
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            excluded_attributes: PARENT_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Exclude an additional attribute name from conversion
    pub fn exclude_attribute(mut self, name: impl Into<String>) -> Self {
        self.excluded_attributes.insert(name.into());
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Convert a tree to JSON
    pub fn convert(&self, node: &AstNode) -> Value {
        let mut visited = HashSet::new();
        self.convert_node(node, 0, &mut visited)
    }

    fn convert_node(
        &self,
        node: &AstNode,
        depth: usize,
        visited: &mut HashSet<*const AstObject>,
    ) -> Value {
        if matches!(node, AstNode::Null) {
            return Value::Null;
        }

        if depth > self.max_depth {
            log::debug!("AST conversion stopped at depth {}", depth);
            return marker(MAX_DEPTH_TAG, None);
        }

        match node {
            AstNode::Null => Value::Null,
            AstNode::Bool(b) => Value::Bool(*b),
            AstNode::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            AstNode::String(s) => Value::String(s.clone()),
            AstNode::Sequence(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.convert_node(item, depth + 1, visited))
                    .collect(),
            ),
            AstNode::Object(obj) => {
                let identity = std::sync::Arc::as_ptr(obj);
                if !visited.insert(identity) {
                    return marker(&obj.type_tag, Some(CIRCULAR_REFERENCE));
                }

                let mut map = Map::new();
                map.insert(TYPE_KEY.to_string(), Value::String(obj.type_tag.clone()));
                for (name, value) in &obj.attributes {
                    if name.starts_with('_') || self.excluded_attributes.contains(name) {
                        continue;
                    }
                    map.insert(name.clone(), self.convert_node(value, depth + 1, visited));
                }
                Value::Object(map)
            }
        }
    }
}

fn marker(type_tag: &str, note: Option<&str>) -> Value {
    let mut map = Map::new();
    map.insert(TYPE_KEY.to_string(), Value::String(type_tag.to_string()));
    if let Some(note) = note {
        map.insert(NOTE_KEY.to_string(), Value::String(note.to_string()));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_object() {
        let node = AstNode::object(
            AstObject::new("FieldSpec")
                .with_attribute("field_name", "location")
                .with_attribute("visible", true)
                .with_attribute("label", None::<String>),
        );

        let value = TreeConverter::default().convert(&node);
        assert_eq!(
            value,
            json!({"type": "FieldSpec", "field_name": "location", "visible": true, "label": null})
        );
    }

    #[test]
    fn test_parent_and_private_attributes_are_skipped() {
        let parent = AstNode::object(AstObject::new("FormSpec"));
        let node = AstNode::object(
            AstObject::new("FieldSpec")
                .with_attribute("parent", parent)
                .with_attribute("_tx_position", 3.0)
                .with_attribute("field_name", "location"),
        );

        let value = TreeConverter::default().convert(&node);
        assert!(value.get("parent").is_none());
        assert!(value.get("_tx_position").is_none());
        assert_eq!(value["field_name"], "location");
    }

    #[test]
    fn test_revisited_object_becomes_marker() {
        let shared = AstNode::object(AstObject::new("FieldSpec").with_attribute("field_name", "x"));
        let node = AstNode::Sequence(vec![shared.clone(), shared]);

        let value = TreeConverter::default().convert(&node);
        assert_eq!(value[0]["field_name"], "x");
        assert_eq!(value[1], json!({"type": "FieldSpec", "note": "circular_reference"}));
    }

    #[test]
    fn test_depth_guard() {
        let mut node = AstNode::String("leaf".to_string());
        for _ in 0..10 {
            node = AstNode::Sequence(vec![node]);
        }

        let value = TreeConverter::new(3).convert(&node);
        assert_eq!(value[0][0][0][0], json!({"type": "MaxDepthReached"}));

        let value = TreeConverter::new(20).convert(&node);
        assert_eq!(value[0][0][0][0][0][0][0][0][0][0], "leaf");
    }

    #[test]
    fn test_custom_exclusion() {
        let node = AstNode::object(
            AstObject::new("FormSpec")
                .with_attribute("owner", "x")
                .with_attribute("requester_type", "Students"),
        );
        let value = TreeConverter::default().exclude_attribute("owner").convert(&node);
        assert!(value.get("owner").is_none());
        assert_eq!(value["requester_type"], "Students");
    }
}
