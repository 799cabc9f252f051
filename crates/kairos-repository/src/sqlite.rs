//! SQLite repository implementation
//!
//! Two tables: `events` (append-only, indexed by date and location) and
//! `form_fields` (the active form configuration, rewritten as a whole on
//! every rules ingestion). Dates are stored as ISO `YYYY-MM-DD` text so the
//! natural text order is the calendar order.

use async_trait::async_trait;
use chrono::NaiveDate;
use kairos_core::ast::EventDraft;
use kairos_core::{Event, EventId, StoredFieldRule};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, Transaction};
use std::str::FromStr;

use crate::{error::RepositoryError, traits::*, RepositoryResult};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        requester_type TEXT NOT NULL,
        requester_unit TEXT,
        date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        location TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_events_date_location ON events (date, location)",
    r#"
    CREATE TABLE IF NOT EXISTS form_fields (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        requester_type TEXT NOT NULL,
        field_name TEXT NOT NULL,
        visible INTEGER NOT NULL,
        required INTEGER NOT NULL,
        label TEXT,
        options_json TEXT
    )
    "#,
];

const EVENT_COLUMNS: &str =
    "id, name, requester_type, requester_unit, date, start_time, end_time, location";

const RULE_COLUMNS: &str = "requester_type, field_name, visible, required, label, options_json";

/// SQLite database repository
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connect to a database and create the schema if needed
    ///
    /// Accepts `sqlite:` URLs (`sqlite://events.db`, `sqlite::memory:`) or a
    /// plain file path. Files are created when missing.
    ///
    /// # Example
    /// ```no_run
    /// use kairos_repository::SqliteRepository;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let repo = SqliteRepository::connect("sqlite://events.db", None).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn connect(url: &str, max_connections: Option<u32>) -> RepositoryResult<Self> {
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let options = if url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(url)?
        } else {
            SqliteConnectOptions::new().filename(url)
        };
        let options = options.create_if_missing(true);

        // Every connection to an in-memory database opens a fresh database,
        // so the pool must hold exactly one that never gets recycled.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS).max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::info!("Connected to SQLite database at {}", url);

        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if needed
    pub async fn with_pool(pool: SqlitePool) -> RepositoryResult<Self> {
        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    async fn migrate(&self) -> RepositoryResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn insert_event(
        tx: &mut Transaction<'_, Sqlite>,
        draft: &EventDraft,
    ) -> RepositoryResult<EventId> {
        let result = sqlx::query(
            r#"
            INSERT INTO events (name, requester_type, requester_unit, date, start_time, end_time, location)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.requester_type)
        .bind(draft.requester_unit.as_deref())
        .bind(draft.date.format("%Y-%m-%d").to_string())
        .bind(draft.start_time.trim())
        .bind(draft.end_time.trim())
        .bind(&draft.location)
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn insert_rule(
        tx: &mut Transaction<'_, Sqlite>,
        rule: &StoredFieldRule,
    ) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO form_fields (requester_type, field_name, visible, required, label, options_json)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&rule.requester_type)
        .bind(&rule.field_name)
        .bind(rule.visible)
        .bind(rule.required)
        .bind(rule.label.as_deref())
        .bind(rule.options_json())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

fn event_from_row(row: &SqliteRow) -> RepositoryResult<Event> {
    let raw_date: String = row.try_get("date")?;
    let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|e| {
        RepositoryError::corrupt("events", format!("bad date '{}': {}", raw_date, e))
    })?;

    Ok(Event {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        requester_type: row.try_get("requester_type")?,
        date,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        location: row.try_get("location")?,
        requester_unit: row.try_get("requester_unit")?,
    })
}

fn rule_from_row(row: &SqliteRow) -> RepositoryResult<StoredFieldRule> {
    let options_json: Option<String> = row.try_get("options_json")?;
    let options = StoredFieldRule::options_from_json(options_json.as_deref());
    if options_json.is_some() && options.is_none() {
        return Err(RepositoryError::corrupt(
            "form_fields",
            format!("unreadable options_json {:?}", options_json),
        ));
    }

    Ok(StoredFieldRule {
        requester_type: row.try_get("requester_type")?,
        field_name: row.try_get("field_name")?,
        visible: row.try_get("visible")?,
        required: row.try_get("required")?,
        label: row.try_get("label")?,
        options,
    })
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn list_events(&self) -> RepositoryResult<Vec<Event>> {
        let query = format!(
            "SELECT {} FROM events ORDER BY date, start_time, id",
            EVENT_COLUMNS
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(event_from_row).collect()
    }

    async fn list_events_for_date_location(
        &self,
        date: NaiveDate,
        location: &str,
    ) -> RepositoryResult<Vec<Event>> {
        let query = format!(
            "SELECT {} FROM events WHERE date = ?1 AND location = ?2 ORDER BY start_time, id",
            EVENT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(date.format("%Y-%m-%d").to_string())
            .bind(location)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(event_from_row).collect()
    }

    async fn list_field_rules_for_requester(
        &self,
        requester_type: &str,
    ) -> RepositoryResult<Vec<StoredFieldRule>> {
        let query = format!(
            "SELECT {} FROM form_fields WHERE requester_type = ?1 ORDER BY id",
            RULE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(requester_type)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(rule_from_row).collect()
    }

    async fn list_all_field_rules(&self) -> RepositoryResult<Vec<StoredFieldRule>> {
        let query = format!(
            "SELECT {} FROM form_fields ORDER BY requester_type, field_name, id",
            RULE_COLUMNS
        );
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(rule_from_row).collect()
    }
}

#[async_trait]
impl WritableRepository for SqliteRepository {
    async fn append_event(&self, draft: &EventDraft) -> RepositoryResult<EventId> {
        let mut tx = self.pool.begin().await?;
        let id = Self::insert_event(&mut tx, draft).await?;
        tx.commit().await?;
        tracing::debug!("Stored event {} ('{}')", id, draft.name);
        Ok(id)
    }

    async fn append_events(&self, drafts: &[EventDraft]) -> RepositoryResult<Vec<EventId>> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            ids.push(Self::insert_event(&mut tx, draft).await?);
        }
        tx.commit().await?;
        tracing::debug!("Stored {} events in one transaction", ids.len());
        Ok(ids)
    }

    async fn clear_field_rules(&self) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM form_fields")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn append_field_rule(&self, rule: &StoredFieldRule) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;
        Self::insert_rule(&mut tx, rule).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn replace_field_rules(&self, rules: &[StoredFieldRule]) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM form_fields")
            .execute(&mut *tx)
            .await?;
        for rule in rules {
            Self::insert_rule(&mut tx, rule).await?;
        }
        tx.commit().await?;
        tracing::info!("Replaced form configuration with {} field rules", rules.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteRepository {
        SqliteRepository::connect("sqlite::memory:", None).await.unwrap()
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let repo = repo().await;
        repo.migrate().await.unwrap();
        assert!(repo.list_all_field_rules().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_event_roundtrip_keeps_unit_and_trims_times() {
        let repo = repo().await;
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let draft = EventDraft::new("Kickoff", "Students", date, " 09:00", "10:00 ", "REC")
            .with_requester_unit("Robotics Club");

        let id = repo.append_event(&draft).await.unwrap();
        let events = repo.list_events_for_date_location(date, "REC").await.unwrap();
        assert_eq!(events, vec![Event::from_draft(id, &draft)]);
    }

    #[tokio::test]
    async fn test_corrupt_date_is_reported() {
        let repo = repo().await;
        sqlx::query(
            "INSERT INTO events (name, requester_type, date, start_time, end_time, location) \
             VALUES ('x', 'Students', 'March 1st', '09:00', '10:00', 'REC')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        let err = repo.list_events().await.unwrap_err();
        assert!(matches!(err, RepositoryError::CorruptRecord { ref table, .. } if table == "events"));
    }

    #[tokio::test]
    async fn test_null_options_stay_none() {
        let repo = repo().await;
        let rule = StoredFieldRule {
            requester_type: "Students".to_string(),
            field_name: "event_name".to_string(),
            visible: true,
            required: true,
            label: None,
            options: None,
        };
        repo.append_field_rule(&rule).await.unwrap();
        assert_eq!(repo.list_all_field_rules().await.unwrap(), vec![rule]);
    }
}
