//! Rules ingestion example
//!
//! Parses `demos/campus.evrules`, stores it and prints the form each
//! requester type gets.
//!
//! Run with: cargo run --example ingest_rules

use kairos_sdk::{EngineBuilder, FormConfig};

const RULES: &str = include_str!("campus.evrules");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    println!("=== Rules Ingestion Example ===\n");

    let engine = EngineBuilder::new().build().await?;
    let forms = engine.ingest_rules(RULES).await?;
    println!("Stored {} forms\n", forms);

    for requester_type in ["Students", "Academics", "Visitors"] {
        match engine.form_config(requester_type).await? {
            FormConfig::NotConfigured => println!("{}: no form configured\n", requester_type),
            FormConfig::Configured(fields) => {
                println!("{}:", requester_type);
                for field in fields {
                    let marker = if field.required { "*" } else { " " };
                    match field.options {
                        Some(options) => {
                            println!("  {} {:<16} one of {}", marker, field.label, options.join(", "))
                        }
                        None => println!("  {} {}", marker, field.label),
                    }
                }
                println!();
            }
        }
    }

    // Rejected documents leave the stored rules untouched
    let broken = RULES.replace("initialize_runtime = yes", "initialize_runtime = no");
    if let Err(err) = engine.ingest_rules(&broken).await {
        println!("Rejected ({}): {}", err.kind().as_str(), err);
    }
    println!("Rules still stored: {}", engine.list_field_rules().await?.len());

    Ok(())
}
