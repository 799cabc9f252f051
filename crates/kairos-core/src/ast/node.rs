//! Generic AST node
//!
//! `AstNode` is the grammar-independent view of a parsed document: a primitive,
//! a sequence of nodes, or a labeled object carrying a type tag and named
//! attributes. Objects are reference-counted so that one object may be reachable
//! from several places; the tree converter relies on object identity to detect
//! revisits.

use std::sync::Arc;

/// Generic tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Absent optional value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value
    Number(f64),
    /// String value
    String(String),
    /// Ordered sequence of nodes
    Sequence(Vec<AstNode>),
    /// Labeled object
    Object(Arc<AstObject>),
}

/// Labeled object: a type tag plus attributes in declaration order
#[derive(Debug, PartialEq)]
pub struct AstObject {
    pub type_tag: String,
    pub attributes: Vec<(String, AstNode)>,
}

impl AstObject {
    /// Create an object with no attributes
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AstNode>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&AstNode> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value)
    }
}

impl AstNode {
    /// Wrap an object
    pub fn object(object: AstObject) -> Self {
        AstNode::Object(Arc::new(object))
    }

    /// Type tag of an object node
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            AstNode::Object(obj) => Some(&obj.type_tag),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&AstObject> {
        match self {
            AstNode::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[AstNode]> {
        match self {
            AstNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Count object nodes carrying `type_tag`, anywhere in the tree
    pub fn count_tagged(&self, type_tag: &str) -> usize {
        match self {
            AstNode::Sequence(items) => items.iter().map(|i| i.count_tagged(type_tag)).sum(),
            AstNode::Object(obj) => {
                let own = usize::from(obj.type_tag == type_tag);
                own + obj
                    .attributes
                    .iter()
                    .map(|(_, v)| v.count_tagged(type_tag))
                    .sum::<usize>()
            }
            _ => 0,
        }
    }
}

impl From<bool> for AstNode {
    fn from(value: bool) -> Self {
        AstNode::Bool(value)
    }
}

impl From<f64> for AstNode {
    fn from(value: f64) -> Self {
        AstNode::Number(value)
    }
}

impl From<&str> for AstNode {
    fn from(value: &str) -> Self {
        AstNode::String(value.to_string())
    }
}

impl From<String> for AstNode {
    fn from(value: String) -> Self {
        AstNode::String(value)
    }
}

impl From<&String> for AstNode {
    fn from(value: &String) -> Self {
        AstNode::String(value.clone())
    }
}

impl From<AstObject> for AstNode {
    fn from(value: AstObject) -> Self {
        AstNode::object(value)
    }
}

impl<T: Into<AstNode>> From<Option<T>> for AstNode {
    fn from(value: Option<T>) -> Self {
        value.map_or(AstNode::Null, Into::into)
    }
}

impl<T: Into<AstNode>> From<Vec<T>> for AstNode {
    fn from(value: Vec<T>) -> Self {
        AstNode::Sequence(value.into_iter().map(Into::into).collect())
    }
}
