//! Visitor over the typed AST
//!
//! The typed AST is a closed set of variants per grammar. `RulesNode` and
//! `EventsNode` name those variants so a visitor can be dispatched over them;
//! `TreeBuilder` is the visitor that lowers a typed document into the generic
//! [`AstNode`] tree used by inspection tooling.

use super::events::{EventDraft, EventsDocument};
use super::node::{AstNode, AstObject};
use super::rules::{FieldSpec, FormSpec, RulesDocument};

/// Node of a rules document
#[derive(Debug, Clone, Copy)]
pub enum RulesNode<'a> {
    Document(&'a RulesDocument),
    Form(&'a FormSpec),
    Field(&'a FieldSpec),
}

/// Node of an events document
#[derive(Debug, Clone, Copy)]
pub enum EventsNode<'a> {
    Document(&'a EventsDocument),
    Event(&'a EventDraft),
}

/// Visitor over both grammars
pub trait AstVisitor {
    type Output;

    fn visit_rules_document(&mut self, doc: &RulesDocument) -> Self::Output;
    fn visit_form(&mut self, form: &FormSpec) -> Self::Output;
    fn visit_field(&mut self, field: &FieldSpec) -> Self::Output;
    fn visit_events_document(&mut self, doc: &EventsDocument) -> Self::Output;
    fn visit_event(&mut self, event: &EventDraft) -> Self::Output;
}

impl<'a> RulesNode<'a> {
    /// Stable type tag of the grammar rule that produced this node
    pub fn type_tag(&self) -> &'static str {
        match self {
            RulesNode::Document(_) => RulesDocument::TYPE_TAG,
            RulesNode::Form(_) => FormSpec::TYPE_TAG,
            RulesNode::Field(_) => FieldSpec::TYPE_TAG,
        }
    }

    /// Direct children in declaration order
    pub fn children(&self) -> Vec<RulesNode<'a>> {
        match self {
            RulesNode::Document(doc) => doc.forms.iter().map(RulesNode::Form).collect(),
            RulesNode::Form(form) => form.fields.iter().map(RulesNode::Field).collect(),
            RulesNode::Field(_) => Vec::new(),
        }
    }

    pub fn accept<V: AstVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            RulesNode::Document(doc) => visitor.visit_rules_document(doc),
            RulesNode::Form(form) => visitor.visit_form(form),
            RulesNode::Field(field) => visitor.visit_field(field),
        }
    }
}

impl<'a> EventsNode<'a> {
    pub fn type_tag(&self) -> &'static str {
        match self {
            EventsNode::Document(_) => EventsDocument::TYPE_TAG,
            EventsNode::Event(_) => EventDraft::TYPE_TAG,
        }
    }

    pub fn children(&self) -> Vec<EventsNode<'a>> {
        match self {
            EventsNode::Document(doc) => doc.events.iter().map(EventsNode::Event).collect(),
            EventsNode::Event(_) => Vec::new(),
        }
    }

    pub fn accept<V: AstVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            EventsNode::Document(doc) => visitor.visit_events_document(doc),
            EventsNode::Event(event) => visitor.visit_event(event),
        }
    }
}

/// Lowers typed documents into the generic tree
#[derive(Debug, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the generic tree of a rules document
    pub fn rules(doc: &RulesDocument) -> AstNode {
        RulesNode::Document(doc).accept(&mut TreeBuilder)
    }

    /// Build the generic tree of an events document
    pub fn events(doc: &EventsDocument) -> AstNode {
        EventsNode::Document(doc).accept(&mut TreeBuilder)
    }
}

impl AstVisitor for TreeBuilder {
    type Output = AstNode;

    fn visit_rules_document(&mut self, doc: &RulesDocument) -> AstNode {
        let forms: Vec<AstNode> = doc.forms.iter().map(|f| self.visit_form(f)).collect();
        AstObject::new(RulesDocument::TYPE_TAG)
            .with_attribute("runtime_enabled", doc.runtime_enabled)
            .with_attribute("forms", forms)
            .into()
    }

    fn visit_form(&mut self, form: &FormSpec) -> AstNode {
        let fields: Vec<AstNode> = form.fields.iter().map(|f| self.visit_field(f)).collect();
        AstObject::new(FormSpec::TYPE_TAG)
            .with_attribute("requester_type", &form.requester_type)
            .with_attribute("fields", fields)
            .into()
    }

    fn visit_field(&mut self, field: &FieldSpec) -> AstNode {
        AstObject::new(FieldSpec::TYPE_TAG)
            .with_attribute("field_name", &field.field_name)
            .with_attribute("visible", field.visible)
            .with_attribute("required", field.required)
            .with_attribute("label", field.label.clone())
            .with_attribute("options", field.options.clone())
            .into()
    }

    fn visit_events_document(&mut self, doc: &EventsDocument) -> AstNode {
        let events: Vec<AstNode> = doc.events.iter().map(|e| self.visit_event(e)).collect();
        AstObject::new(EventsDocument::TYPE_TAG)
            .with_attribute("events", events)
            .into()
    }

    fn visit_event(&mut self, event: &EventDraft) -> AstNode {
        AstObject::new(EventDraft::TYPE_TAG)
            .with_attribute("requester_type", &event.requester_type)
            .with_attribute("name", &event.name)
            .with_attribute("date", event.date.to_string())
            .with_attribute("start_time", &event.start_time)
            .with_attribute("end_time", &event.end_time)
            .with_attribute("location", &event.location)
            .with_attribute("requester_unit", event.requester_unit.clone())
            .into()
    }
}

/// Counts nodes per variant; used to cross-check the tree view against the typed AST.
#[derive(Debug, Default)]
pub struct NodeCounter {
    pub documents: usize,
    pub forms: usize,
    pub fields: usize,
    pub events: usize,
}

impl AstVisitor for NodeCounter {
    type Output = ();

    fn visit_rules_document(&mut self, doc: &RulesDocument) {
        self.documents += 1;
        for form in &doc.forms {
            self.visit_form(form);
        }
    }

    fn visit_form(&mut self, form: &FormSpec) {
        self.forms += 1;
        for field in &form.fields {
            self.visit_field(field);
        }
    }

    fn visit_field(&mut self, _field: &FieldSpec) {
        self.fields += 1;
    }

    fn visit_events_document(&mut self, doc: &EventsDocument) {
        self.documents += 1;
        for event in &doc.events {
            self.visit_event(event);
        }
    }

    fn visit_event(&mut self, _event: &EventDraft) {
        self.events += 1;
    }
}
