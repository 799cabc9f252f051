//! Core SchedulingEngine implementation

use super::types::FormConfig;
use crate::builder::EngineBuilder;
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use chrono::NaiveDate;
use kairos_core::ast::{EventDraft, EventsDocument, RulesDocument, TreeBuilder, TreeConverter};
use kairos_core::{Event, StoredFieldRule};
use kairos_parser::{EventsParser, RulesParser};
use kairos_repository::{Repository, WritableRepository};
use kairos_validator::{
    DslChecker, DslType, RulesValidator, SchedulingError, SchedulingValidator, SubmissionValidator,
    ValidationResult,
};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Orchestrates parsing, validation and persistence
///
/// Parsers and validators are built once from the [`EngineConfig`] and shared
/// read-only by every call. Every path that creates events goes through the
/// same scheduling validator and the same `(date, location)` conflict query.
///
/// Conflict checks and the writes that follow them run under one async
/// mutex, so two concurrent requests for the same slot cannot both succeed
/// within a process.
pub struct SchedulingEngine {
    repository: Arc<dyn WritableRepository>,
    rules_parser: RulesParser,
    events_parser: EventsParser,
    rules_validator: RulesValidator,
    scheduling_validator: SchedulingValidator,
    submission_validator: SubmissionValidator,
    checker: DslChecker,
    tree_converter: TreeConverter,
    config: EngineConfig,
    write_lock: Mutex<()>,
}

impl SchedulingEngine {
    /// Create an engine over an opened repository
    pub fn new(config: EngineConfig, repository: Arc<dyn WritableRepository>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            repository,
            rules_parser: RulesParser::new(),
            events_parser: EventsParser::new(),
            rules_validator: RulesValidator::new(config.rules.clone()),
            scheduling_validator: SchedulingValidator::new(config.scheduling.clone()),
            submission_validator: SubmissionValidator::new(),
            checker: DslChecker::new(config.rules.clone(), config.scheduling.clone()),
            tree_converter: TreeConverter::new(config.ast.max_depth),
            config,
            write_lock: Mutex::new(()),
        })
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<dyn WritableRepository> {
        &self.repository
    }

    // ========== Parsing and inspection ==========

    pub fn parse_rules(&self, source: &str) -> Result<RulesDocument> {
        Ok(self.rules_parser.parse(source)?)
    }

    pub fn parse_events(&self, source: &str) -> Result<EventsDocument> {
        Ok(self.events_parser.parse(source)?)
    }

    /// Run the semantic checks; the first violation is returned
    pub fn validate_rules(&self, doc: &RulesDocument) -> Result<()> {
        Ok(self.rules_validator.validate(doc)?)
    }

    /// Parse rules source and return its JSON tree view
    pub fn rules_ast(&self, source: &str) -> Result<serde_json::Value> {
        let doc = self.parse_rules(source)?;
        Ok(self.tree_converter.convert(&TreeBuilder::rules(&doc)))
    }

    /// Parse events source and return its JSON tree view
    pub fn events_ast(&self, source: &str) -> Result<serde_json::Value> {
        let doc = self.parse_events(source)?;
        Ok(self.tree_converter.convert(&TreeBuilder::events(&doc)))
    }

    /// Diagnostics for source text without touching storage
    pub fn check(&self, content: &str, doc_type: DslType) -> ValidationResult {
        self.checker.check(content, doc_type)
    }

    // ========== Ingestion ==========

    /// Parse, validate and store a rules document, returning its form count.
    ///
    /// The stored rule set is replaced as a whole and only after every check
    /// passed; a failing document leaves it untouched.
    pub async fn ingest_rules(&self, source: &str) -> Result<usize> {
        let doc = self.parse_rules(source)?;
        if let Err(err) = self.rules_validator.validate(&doc) {
            tracing::warn!("Rejected rules document: {}", err);
            return Err(err.into());
        }

        let rows: Vec<StoredFieldRule> = doc
            .forms
            .iter()
            .flat_map(|form| {
                form.fields
                    .iter()
                    .map(|field| StoredFieldRule::from_field(&form.requester_type, field))
            })
            .collect();

        let _guard = self.write_lock.lock().await;
        self.repository.replace_field_rules(&rows).await?;

        tracing::info!(
            "Ingested rules: {} form(s), {} field rule(s)",
            doc.forms.len(),
            rows.len()
        );
        Ok(doc.forms.len())
    }

    /// Validate every draft of a batch, then store all of them.
    ///
    /// Nothing is written unless every draft passes. The error names the
    /// first failing draft.
    pub async fn ingest_events(&self, doc: &EventsDocument) -> Result<usize> {
        let drafts: Vec<EventDraft> = doc.events.iter().map(EventDraft::normalized).collect();

        let _guard = self.write_lock.lock().await;

        let within_batch = self.scheduling_validator.policy().check_within_batch;
        let mut slots: HashMap<(NaiveDate, String), Vec<Event>> = HashMap::new();

        for (index, draft) in drafts.iter().enumerate() {
            let range = self
                .scheduling_validator
                .check_times(draft)
                .map_err(|e| self.reject(draft, e))?;

            let slot = match slots.entry((draft.date, draft.location.clone())) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(
                    self.repository
                        .list_events_for_date_location(draft.date, &draft.location)
                        .await?,
                ),
            };

            self.scheduling_validator
                .check_conflicts(draft, range, slot)
                .map_err(|e| self.reject(draft, e))?;

            if within_batch {
                slot.push(Event::pending(index + 1, draft));
            }
            tracing::debug!("Accepted {}", draft.describe());
        }

        let ids = self.repository.append_events(&drafts).await?;
        tracing::info!("Ingested {} event(s)", ids.len());
        Ok(ids.len())
    }

    /// Parse events source and ingest it
    pub async fn ingest_events_source(&self, source: &str) -> Result<usize> {
        let doc = self.parse_events(source)?;
        self.ingest_events(&doc).await
    }

    fn reject(&self, draft: &EventDraft, err: SchedulingError) -> SdkError {
        tracing::warn!("Rejected {}: {}", draft.describe(), err);
        SdkError::event_rejected(draft, err)
    }

    // ========== Single events ==========

    /// Validate and store one submitted event.
    ///
    /// Text attributes are trimmed first, so a padded copy of a stored
    /// event's location lands in the same slot. Checks then run in order:
    /// requester type, the requester's form rules, the event's own times,
    /// then conflicts with stored events.
    pub async fn create_event(&self, draft: EventDraft) -> Result<Event> {
        let draft = draft.normalized();
        let rules = self
            .repository
            .list_field_rules_for_requester(&draft.requester_type)
            .await?;

        let submission = self
            .submission_validator
            .check_requester_type(&draft.requester_type, &self.config.rules, !rules.is_empty())
            .and_then(|_| self.submission_validator.validate(&draft, &rules));
        if let Err(err) = submission {
            tracing::warn!("Rejected submission {}: {}", draft.describe(), err);
            return Err(err.into());
        }

        let range = self.scheduling_validator.check_times(&draft)?;

        let _guard = self.write_lock.lock().await;
        let existing = self
            .repository
            .list_events_for_date_location(draft.date, &draft.location)
            .await?;
        if let Err(err) = self.scheduling_validator.check_conflicts(&draft, range, &existing) {
            tracing::warn!("Rejected {}: {}", draft.describe(), err);
            return Err(err.into());
        }

        let id = self.repository.append_event(&draft).await?;
        tracing::info!("Created event {} {}", id, draft.describe());
        Ok(Event::from_draft(id, &draft))
    }

    // ========== Queries ==========

    /// Visible form fields of a requester type
    pub async fn form_config(&self, requester_type: &str) -> Result<FormConfig> {
        let rules = self
            .repository
            .list_field_rules_for_requester(requester_type.trim())
            .await?;
        Ok(FormConfig::from_rules(&rules))
    }

    /// Every stored event, ordered by date and start time
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.repository.list_events().await?)
    }

    /// Every stored field rule, ordered by requester type and field name
    pub async fn list_field_rules(&self) -> Result<Vec<StoredFieldRule>> {
        Ok(self.repository.list_all_field_rules().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_repository::MemoryRepository;

    const RULES: &str = r#"
initialize_runtime = yes
event_form Students {
    event_name { required = yes }
    event_date { required = yes }
    start_time { required = yes }
    end_time { required = yes }
    location { required = yes, options = [REC, Gym] }
}
event_form Academics {
    event_name { required = yes }
    event_date { required = yes }
    start_time { required = yes }
    end_time { required = yes }
    location { required = yes }
    requester_unit { visible = no }
}
"#;

    fn engine() -> SchedulingEngine {
        SchedulingEngine::new(EngineConfig::default(), Arc::new(MemoryRepository::new())).unwrap()
    }

    fn draft(requester: &str, start: &str, end: &str, location: &str) -> EventDraft {
        EventDraft::new(
            "Meetup",
            requester,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            start,
            end,
            location,
        )
    }

    #[tokio::test]
    async fn test_form_config_projection() {
        let engine = engine();
        assert_eq!(engine.ingest_rules(RULES).await.unwrap(), 2);

        let students = engine.form_config("Students").await.unwrap();
        assert_eq!(students.fields().len(), 5);
        assert_eq!(
            students.fields()[4].options,
            Some(vec!["REC".to_string(), "Gym".to_string()])
        );

        let academics = engine.form_config("Academics").await.unwrap();
        assert_eq!(academics.fields().len(), 5);

        assert_eq!(engine.form_config("Staff").await.unwrap(), FormConfig::NotConfigured);
    }

    #[tokio::test]
    async fn test_create_event_checks_options() {
        let engine = engine();
        engine.ingest_rules(RULES).await.unwrap();

        let err = engine
            .create_event(draft("Students", "09:00", "10:00", "Library"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Submission);

        let event = engine
            .create_event(draft("Students", "09:00", "10:00", "Gym"))
            .await
            .unwrap();
        assert_eq!(event.id, 1);
    }

    #[tokio::test]
    async fn test_unknown_requester_is_rejected() {
        let engine = engine();
        let err = engine
            .create_event(draft("Visitors", "09:00", "10:00", "REC"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid requester_type 'Visitors'");

        // Expected requester types pass even before any rules exist
        assert!(engine
            .create_event(draft("Students", "09:00", "10:00", "REC"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_ast_views() {
        let engine = engine();
        let tree = engine.rules_ast(RULES).unwrap();
        assert_eq!(tree["type"], "RulesDocument");
        assert_eq!(tree["forms"].as_array().unwrap().len(), 2);

        let tree = engine
            .events_ast(r#"event Students "A" { date = 2025-03-01 start = "09:00" end = "10:00" location = REC }"#)
            .unwrap();
        assert_eq!(tree["events"][0]["type"], "EventDraft");
    }
}
