//! `kairos` command-line tool
//!
//! Ingests and checks DSL files against the configured storage:
//! - `kairos rules ingest <file>` / `kairos rules check <file>` / `kairos rules list`
//! - `kairos events ingest <file>` / `kairos events check <file>` / `kairos events list`

use crate::config::{LogFormat, ServerConfig};
use crate::logging;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kairos_sdk::validator::{DiagnosticSeverity, DslType, ValidationResult};
use kairos_sdk::{
    EngineBuilder, Event, RepositoryConfig, RepositorySource, SchedulingEngine, StoredFieldRule,
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Database used when neither the flag nor the configuration names persistent storage
pub const DEFAULT_DATABASE_URL: &str = "sqlite://events.db";

/// Kairos CLI application
#[derive(Parser)]
#[command(name = "kairos")]
#[command(about = "Kairos - event rules and scheduling DSL tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "KAIROS_CONFIG")]
    config: Option<String>,

    /// SQLite database URL or file
    #[arg(short, long, env = "KAIROS_DATABASE")]
    database: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage form rules
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },

    /// Manage events
    Events {
        #[command(subcommand)]
        command: EventsCommands,
    },
}

#[derive(Subcommand)]
enum RulesCommands {
    /// Replace the stored rules with an `.evrules` file
    Ingest { file: PathBuf },

    /// Parse and validate an `.evrules` file without storing it
    Check { file: PathBuf },

    /// Print the stored rules
    List,
}

#[derive(Subcommand)]
enum EventsCommands {
    /// Store every event of an `.evdsl` file, or none of them
    Ingest { file: PathBuf },

    /// Parse and validate an `.evdsl` file without storing it
    Check { file: PathBuf },

    /// Print the stored events
    List,
}

/// Run using the current process arguments.
pub async fn run() -> Result<()> {
    run_with_args(std::env::args_os()).await
}

/// Run using the provided argument iterator.
pub async fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let level = if cli.verbose { "debug" } else { "warn" };
    // A subscriber may already be installed when embedded in another binary
    logging::init_tracing(level, LogFormat::Text).ok();

    let config = match cli.config.as_deref() {
        Some(path) => ServerConfig::load_from(path)?,
        None => ServerConfig::load()?,
    };
    let repository = storage_for(cli.database, &config.repository);
    tracing::debug!("Using storage {:?}", repository);

    let engine = EngineBuilder::new()
        .with_config(config.engine)
        .with_repository(repository)
        .build()
        .await
        .context("Failed to open storage")?;

    match cli.command {
        Commands::Rules { command } => rules_command(&engine, command).await,
        Commands::Events { command } => events_command(&engine, command).await,
    }
}

/// Storage for a CLI invocation
///
/// The `--database` flag wins; a memory configuration would lose every write
/// when the process exits, so it is replaced by [`DEFAULT_DATABASE_URL`].
fn storage_for(database: Option<String>, configured: &RepositoryConfig) -> RepositoryConfig {
    match database {
        Some(url) => RepositoryConfig::sqlite(url),
        None if configured.source == RepositorySource::Memory => {
            RepositoryConfig::sqlite(DEFAULT_DATABASE_URL)
        }
        None => configured.clone(),
    }
}

async fn rules_command(engine: &SchedulingEngine, command: RulesCommands) -> Result<()> {
    match command {
        RulesCommands::Ingest { file } => {
            let source = read_source(&file)?;
            let forms = engine.ingest_rules(&source).await?;
            println!("Stored rules for {} form(s) from {}", forms, file.display());
            print!("{}", render_rules(&engine.list_field_rules().await?));
        }
        RulesCommands::Check { file } => {
            let result = engine.check(&read_source(&file)?, DslType::Rules);
            report(&file, &result)?;
        }
        RulesCommands::List => {
            print!("{}", render_rules(&engine.list_field_rules().await?));
        }
    }
    Ok(())
}

async fn events_command(engine: &SchedulingEngine, command: EventsCommands) -> Result<()> {
    match command {
        EventsCommands::Ingest { file } => {
            let source = read_source(&file)?;
            let count = engine.ingest_events_source(&source).await?;
            println!("Stored {} event(s) from {}", count, file.display());
            print!("{}", render_events(&engine.list_events().await?));
        }
        EventsCommands::Check { file } => {
            let result = engine.check(&read_source(&file)?, DslType::Events);
            report(&file, &result)?;
        }
        EventsCommands::List => {
            print!("{}", render_events(&engine.list_events().await?));
        }
    }
    Ok(())
}

fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn report(file: &Path, result: &ValidationResult) -> Result<()> {
    print!("{}", render_diagnostics(result));
    if !result.valid {
        bail!(
            "{} is invalid ({} error(s))",
            file.display(),
            result.errors.len()
        );
    }
    println!("{} is valid", file.display());
    Ok(())
}

/// One line per stored rule
pub fn render_rules(rules: &[StoredFieldRule]) -> String {
    if rules.is_empty() {
        return "No form rules stored\n".to_string();
    }

    let mut out = String::from("Form rules:\n");
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for rule in rules {
        out.push_str(&format!(
            "{} | {} | visible={} required={} label={} options={}\n",
            rule.requester_type,
            rule.field_name,
            rule.visible,
            rule.required,
            rule.label.as_deref().map_or("-".to_string(), |l| format!("{:?}", l)),
            rule.options_json().unwrap_or_else(|| "-".to_string()),
        ));
    }
    out
}

/// One line per stored event
pub fn render_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events stored\n".to_string();
    }

    let mut out = String::from("Events:\n");
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for event in events {
        let requester = match &event.requester_unit {
            Some(unit) => format!("{}/{}", event.requester_type, unit),
            None => event.requester_type.clone(),
        };
        out.push_str(&format!(
            "#{} {} {}-{} | {} | {} ({})\n",
            event.id,
            event.date,
            event.start_time,
            event.end_time,
            event.location,
            event.name,
            requester,
        ));
    }
    out
}

/// Diagnostics in `severity[code] line:column: message` form
pub fn render_diagnostics(result: &ValidationResult) -> String {
    let mut out = String::new();
    for diagnostic in result.errors.iter().chain(&result.warnings) {
        let severity = match diagnostic.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        out.push_str(&format!("{}[{}]", severity, diagnostic.code));
        if let (Some(line), Some(column)) = (diagnostic.line, diagnostic.column) {
            out.push_str(&format!(" {}:{}", line, column));
        }
        out.push_str(&format!(": {}\n", diagnostic.message));
    }
    out
}
