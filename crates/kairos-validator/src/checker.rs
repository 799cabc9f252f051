//! DSL Checker - standalone validation for rules and events documents
//!
//! Runs parsing and every validation pass without touching storage, and
//! reports all findings as diagnostics. Suited to editors, CI jobs and the
//! `kairos rules check` command.

use crate::policy::{RulesPolicy, SchedulingPolicy};
use crate::rules::RulesValidator;
use crate::scheduling::SchedulingValidator;
use kairos_core::ast::{EventsDocument, RulesDocument};
use kairos_core::TimeRange;
use kairos_parser::{EventsParser, ParseError, RulesParser};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// DSL document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DslType {
    Rules,
    Events,
    #[default]
    Auto,
}

/// Severity level for validation diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A single diagnostic message from validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,

    /// `E001` syntax, `E002` semantic, `E003` scheduling, `E004`/`W001` overlap within the batch
    pub code: String,

    pub message: String,

    /// Line number (1-based, if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Column number (1-based, if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    /// Offending source line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Diagnostic {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            code: code.into(),
            message: message.into(),
            line: None,
            column: None,
            context: None,
        }
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            ..Self::error(code, message)
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Summary of a document that parsed successfully
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub doc_type: DslType,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requester_types: Vec<String>,

    pub forms: usize,
    pub fields: usize,
    pub events: usize,
}

/// Result of DSL validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// No errors (warnings allowed)
    pub valid: bool,

    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,

    pub validation_time_ms: u64,
}

impl ValidationResult {
    fn new(metadata: Option<DocumentMetadata>, diagnostics: Vec<Diagnostic>, start: Instant) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = diagnostics
            .into_iter()
            .partition(|d| d.severity == DiagnosticSeverity::Error);
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            metadata,
            validation_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Checker for rules and events source text
#[derive(Debug, Clone, Default)]
pub struct DslChecker {
    rules_parser: RulesParser,
    events_parser: EventsParser,
    rules: RulesValidator,
    scheduling: SchedulingValidator,
}

impl DslChecker {
    pub fn new(rules_policy: RulesPolicy, scheduling_policy: SchedulingPolicy) -> Self {
        Self {
            rules_parser: RulesParser::new(),
            events_parser: EventsParser::new(),
            rules: RulesValidator::new(rules_policy),
            scheduling: SchedulingValidator::new(scheduling_policy),
        }
    }

    /// Validate source text of the given (or detected) type
    pub fn check(&self, content: &str, doc_type: DslType) -> ValidationResult {
        let doc_type = match doc_type {
            DslType::Auto => detect_type(content),
            other => other,
        };
        match doc_type {
            DslType::Events => self.check_events(content),
            DslType::Rules | DslType::Auto => self.check_rules(content),
        }
    }

    /// Parse and run every semantic check on a rules document
    pub fn check_rules(&self, content: &str) -> ValidationResult {
        let start = Instant::now();
        let doc = match self.rules_parser.parse(content) {
            Ok(doc) => doc,
            Err(err) => return ValidationResult::new(None, vec![syntax_diagnostic(content, &err)], start),
        };

        let diagnostics = self
            .rules
            .violations(&doc)
            .into_iter()
            .map(|err| Diagnostic::error("E002", err.to_string()))
            .collect();

        ValidationResult::new(Some(rules_metadata(&doc)), diagnostics, start)
    }

    /// Parse an events document and check each draft's times.
    ///
    /// Stored events are not consulted. Drafts that overlap each other in the
    /// same batch are errors when the policy checks within batches, warnings
    /// otherwise.
    pub fn check_events(&self, content: &str) -> ValidationResult {
        let start = Instant::now();
        let doc = match self.events_parser.parse(content) {
            Ok(doc) => doc,
            Err(err) => return ValidationResult::new(None, vec![syntax_diagnostic(content, &err)], start),
        };

        let mut diagnostics = Vec::new();
        let mut placed: Vec<(usize, TimeRange)> = Vec::new();

        for (index, draft) in doc.events.iter().enumerate() {
            let range = match self.scheduling.check_times(draft) {
                Ok(range) => range,
                Err(err) => {
                    diagnostics.push(Diagnostic::error(
                        "E003",
                        format!("Event {}: {}", draft.describe(), err),
                    ));
                    continue;
                }
            };

            for (other_index, other_range) in &placed {
                let other = &doc.events[*other_index];
                if other.date == draft.date && other.location == draft.location && range.overlaps(other_range) {
                    let message = format!(
                        "Event '{}' overlaps '{}' in the same batch ({} @ {})",
                        draft.name, other.name, draft.date, draft.location
                    );
                    diagnostics.push(if self.scheduling.policy().check_within_batch {
                        Diagnostic::error("E004", message)
                    } else {
                        Diagnostic::warning("W001", message)
                    });
                }
            }
            placed.push((index, range));
        }

        ValidationResult::new(Some(events_metadata(&doc)), diagnostics, start)
    }
}

fn detect_type(content: &str) -> DslType {
    if content.contains("initialize_runtime") || content.contains("event_form") {
        DslType::Rules
    } else {
        DslType::Events
    }
}

fn syntax_diagnostic(content: &str, err: &ParseError) -> Diagnostic {
    let diagnostic = Diagnostic::error("E001", err.message()).with_location(err.line(), err.column());
    match content.lines().nth(err.line().saturating_sub(1)) {
        Some(line) => diagnostic.with_context(line.trim_end()),
        None => diagnostic,
    }
}

fn rules_metadata(doc: &RulesDocument) -> DocumentMetadata {
    DocumentMetadata {
        doc_type: DslType::Rules,
        requester_types: doc.forms.iter().map(|f| f.requester_type.clone()).collect(),
        forms: doc.forms.len(),
        fields: doc.forms.iter().map(|f| f.fields.len()).sum(),
        events: 0,
    }
}

fn events_metadata(doc: &EventsDocument) -> DocumentMetadata {
    let mut requester_types: Vec<String> = doc.events.iter().map(|e| e.requester_type.clone()).collect();
    requester_types.sort();
    requester_types.dedup();
    DocumentMetadata {
        doc_type: DslType::Events,
        requester_types,
        forms: 0,
        fields: 0,
        events: doc.len(),
    }
}
