//! In-memory repository

use async_trait::async_trait;
use chrono::NaiveDate;
use kairos_core::ast::EventDraft;
use kairos_core::{Event, EventId, StoredFieldRule};
use tokio::sync::RwLock;

use crate::{traits::*, RepositoryResult};

#[derive(Debug, Default)]
struct MemoryState {
    events: Vec<Event>,
    last_id: EventId,
    field_rules: Vec<StoredFieldRule>,
}

impl MemoryState {
    fn push_event(&mut self, draft: &EventDraft) -> EventId {
        self.last_id += 1;
        self.events.push(Event::from_draft(self.last_id, draft));
        self.last_id
    }
}

/// Repository holding everything in process memory
///
/// A single lock guards all state, so every write is atomic with respect
/// to readers.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_by_slot(events: &mut [Event]) {
    events.sort_by(|a, b| {
        (a.date, &a.start_time, a.id).cmp(&(b.date, &b.start_time, b.id))
    });
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn list_events(&self) -> RepositoryResult<Vec<Event>> {
        let mut events = self.state.read().await.events.clone();
        sort_by_slot(&mut events);
        Ok(events)
    }

    async fn list_events_for_date_location(
        &self,
        date: NaiveDate,
        location: &str,
    ) -> RepositoryResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .state
            .read()
            .await
            .events
            .iter()
            .filter(|event| event.shares_slot(date, location))
            .cloned()
            .collect();
        sort_by_slot(&mut events);
        Ok(events)
    }

    async fn list_field_rules_for_requester(
        &self,
        requester_type: &str,
    ) -> RepositoryResult<Vec<StoredFieldRule>> {
        Ok(self
            .state
            .read()
            .await
            .field_rules
            .iter()
            .filter(|rule| rule.requester_type == requester_type)
            .cloned()
            .collect())
    }

    async fn list_all_field_rules(&self) -> RepositoryResult<Vec<StoredFieldRule>> {
        let mut rules = self.state.read().await.field_rules.clone();
        // Stable sort keeps insertion order for duplicate keys
        rules.sort_by(|a, b| {
            (&a.requester_type, &a.field_name).cmp(&(&b.requester_type, &b.field_name))
        });
        Ok(rules)
    }
}

#[async_trait]
impl WritableRepository for MemoryRepository {
    async fn append_event(&self, draft: &EventDraft) -> RepositoryResult<EventId> {
        let id = self.state.write().await.push_event(draft);
        tracing::debug!("Stored event {} ('{}')", id, draft.name);
        Ok(id)
    }

    async fn append_events(&self, drafts: &[EventDraft]) -> RepositoryResult<Vec<EventId>> {
        let mut state = self.state.write().await;
        Ok(drafts.iter().map(|draft| state.push_event(draft)).collect())
    }

    async fn clear_field_rules(&self) -> RepositoryResult<()> {
        self.state.write().await.field_rules.clear();
        Ok(())
    }

    async fn append_field_rule(&self, rule: &StoredFieldRule) -> RepositoryResult<()> {
        self.state.write().await.field_rules.push(rule.clone());
        Ok(())
    }

    async fn replace_field_rules(&self, rules: &[StoredFieldRule]) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        state.field_rules = rules.to_vec();
        Ok(())
    }
}
