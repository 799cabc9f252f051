//! SQLite storage example
//!
//! Stores rules and events in a SQLite file, reopens it and shows that both
//! survived.
//!
//! Run with: cargo run --example sqlite_store [path/to/file.db]

use kairos_repository::{Repository, RepositoryConfig};
use kairos_sdk::EngineBuilder;

const RULES: &str = include_str!("campus.evrules");
const EVENTS: &str = include_str!("spring.evdsl");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    println!("=== SQLite Storage Example ===\n");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| std::env::temp_dir().join("kairos-demo.db").display().to_string());
    let url = format!("sqlite://{}", path);
    println!("Database: {}\n", url);

    {
        let engine = EngineBuilder::new()
            .with_repository(RepositoryConfig::sqlite(url.clone()))
            .build()
            .await?;
        engine.ingest_rules(RULES).await?;

        if engine.list_events().await?.is_empty() {
            let count = engine.ingest_events_source(EVENTS).await?;
            println!("Stored {} events", count);
        } else {
            // A second run overlaps the stored events
            match engine.ingest_events_source(EVENTS).await {
                Ok(count) => println!("Stored {} events", count),
                Err(err) => println!("Batch rejected on rerun: {}", err.kind().as_str()),
            }
        }
    }

    let repository = RepositoryConfig::sqlite(url).open().await?;
    println!("\nAfter reopening:");
    for event in repository.list_events().await? {
        println!("  #{} {} {} {}", event.id, event.date, event.location, event.name);
    }
    for rule in repository.list_field_rules_for_requester("Students").await? {
        println!(
            "  Students.{} required={} options={}",
            rule.field_name,
            rule.required,
            rule.options_json().unwrap_or_else(|| "-".to_string())
        );
    }

    Ok(())
}
