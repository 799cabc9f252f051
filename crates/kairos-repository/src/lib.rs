//! Storage layer for Kairos events and form field rules
//!
//! The rest of the workspace only ever talks to the [`Repository`] and
//! [`WritableRepository`] traits, so the backend can be swapped through
//! [`RepositoryConfig`] without touching the engine.
//!
//! # Features
//!
//! - **Memory Repository**: process-local store for tests and demos
//! - **SQLite Repository**: durable store (enable the `sqlite` feature)
//! - **Atomic batches**: `append_events` and `replace_field_rules` are all-or-nothing
//! - **Async API**: Non-blocking operations with Tokio
//!
//! # Quick Start
//!
//! ```no_run
//! use kairos_repository::{RepositoryConfig, Repository};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = RepositoryConfig::memory().open().await?;
//!     for event in repo.list_events().await? {
//!         println!("{}", event);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## SQLite
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! use kairos_repository::{RepositoryConfig, WritableRepository};
//!
//! # #[cfg(feature = "sqlite")]
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = RepositoryConfig::sqlite("sqlite://events.db").open().await?;
//!     repo.clear_field_rules().await?;
//!     Ok(())
//! }
//! # #[cfg(not(feature = "sqlite"))]
//! # fn main() {}
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use config::{ConfigError, RepositoryConfig, RepositorySource};
pub use error::{RepositoryError, RepositoryResult};
pub use memory::MemoryRepository;
pub use traits::{Repository, WritableRepository};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
