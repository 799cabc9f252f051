//! Event batch example
//!
//! Ingests `demos/spring.evdsl`, then shows a batch that is rejected as a
//! whole because one of its events overlaps a stored one.
//!
//! Run with: cargo run --example batch_events

use chrono::NaiveDate;
use kairos_sdk::{EngineBuilder, EventDraft};

const EVENTS: &str = include_str!("spring.evdsl");

const CLASHING: &str = r#"
event Students "Board games" {
    date = 2025-03-04
    start = "10:00"
    end = "11:00"
    location = REC
}

event Students "Film night" {
    date = 2025-03-04
    start = "15:00"
    end = "17:00"
    location = REC
}
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    println!("=== Event Batch Example ===\n");

    let engine = EngineBuilder::new().build().await?;

    let stored = engine.ingest_events_source(EVENTS).await?;
    println!("Stored {} events:", stored);
    for event in engine.list_events().await? {
        println!(
            "  #{} {} {}-{} {} {}",
            event.id, event.date, event.start_time, event.end_time, event.location, event.name
        );
    }

    println!("\nIngesting a batch where 'Film night' overlaps 'Robotics demo'...");
    match engine.ingest_events_source(CLASHING).await {
        Ok(count) => println!("Unexpectedly stored {} events", count),
        Err(err) => {
            println!("Rejected:\n{}", err);
            if let Some(scheduling) = err.scheduling_error() {
                println!("Conflicting events: {}", scheduling.conflicts().len());
            }
        }
    }
    println!("Events stored: {}", engine.list_events().await?.len());

    // The single-event path applies the same checks
    let date = NaiveDate::parse_from_str("2025-03-04", "%Y-%m-%d")?;
    let draft = EventDraft::new("Quick sync", "Academics", date, "16:00", "16:30", "REC");
    if let Err(err) = engine.create_event(draft).await {
        println!("\nSingle event rejected: {}", err);
    }

    Ok(())
}
