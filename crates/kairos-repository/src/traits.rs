//! Core trait definitions for the repository pattern
//!
//! - [`Repository`]: read-only queries over events and field rules
//! - [`WritableRepository`]: appends and rule-set replacement
//!
//! Writers take `&self`; implementations synchronise internally so one
//! repository can be shared behind an `Arc` by every request handler.
//!
//! # Examples
//!
//! ```no_run
//! use kairos_repository::{MemoryRepository, Repository, WritableRepository};
//! use kairos_core::ast::EventDraft;
//! use chrono::NaiveDate;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let repo = MemoryRepository::new();
//! let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let draft = EventDraft::new("Chess Night", "Students", date, "18:00", "20:00", "REC");
//!
//! let id = repo.append_event(&draft).await?;
//! let same_slot = repo.list_events_for_date_location(date, "REC").await?;
//! assert_eq!(same_slot[0].id, id);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use kairos_core::ast::EventDraft;
use kairos_core::{Event, EventId, StoredFieldRule};

use crate::RepositoryResult;

/// Read access to stored events and field rules
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Every event, ordered by date then start time
    async fn list_events(&self) -> RepositoryResult<Vec<Event>>;

    /// Events at one date and location, ordered by start time.
    ///
    /// This is the only query conflict checks use.
    async fn list_events_for_date_location(
        &self,
        date: NaiveDate,
        location: &str,
    ) -> RepositoryResult<Vec<Event>>;

    /// The active rule set of one requester type, in insertion order
    async fn list_field_rules_for_requester(
        &self,
        requester_type: &str,
    ) -> RepositoryResult<Vec<StoredFieldRule>>;

    /// Every stored rule, ordered by requester type then field name
    async fn list_all_field_rules(&self) -> RepositoryResult<Vec<StoredFieldRule>>;
}

/// Write access
///
/// Events are only ever appended. Field rules are replaced as a whole.
#[async_trait]
pub trait WritableRepository: Repository {
    /// Persist one event and return its new id
    async fn append_event(&self, draft: &EventDraft) -> RepositoryResult<EventId>;

    /// Persist several events atomically: all of them or none
    async fn append_events(&self, drafts: &[EventDraft]) -> RepositoryResult<Vec<EventId>>;

    /// Delete every stored field rule
    async fn clear_field_rules(&self) -> RepositoryResult<()>;

    /// Append one field rule after the existing ones
    async fn append_field_rule(&self, rule: &StoredFieldRule) -> RepositoryResult<()>;

    /// Clear all rules and write `rules` in order, atomically.
    ///
    /// Readers observe either the previous rule set or the new one.
    async fn replace_field_rules(&self, rules: &[StoredFieldRule]) -> RepositoryResult<()>;
}
