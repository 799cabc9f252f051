//! Basic usage example for kairos-core
//!
//! Run with: cargo run --example basic_usage

use chrono::NaiveDate;
use kairos_core::ast::{EventDraft, EventsDocument, FieldSpec, FormSpec, RulesDocument, TreeBuilder};
use kairos_core::{TimeOfDay, TimeRange, TreeConverter};

fn main() {
    println!("=== Kairos Core Basic Usage Example ===\n");

    // Example 1: Building a rules document by hand
    println!("1. Rules document:");
    let rules = RulesDocument::new(true).add_form(
        FormSpec::new("Students")
            .add_field(FieldSpec::new("event_name").with_required(true))
            .add_field(
                FieldSpec::new("location")
                    .with_required(true)
                    .with_options(vec!["REC".to_string(), "Gym".to_string()]),
            ),
    );
    println!("   {:#?}\n", rules);

    // Example 2: Time ranges
    println!("2. Time ranges:");
    let morning = TimeRange::new(
        TimeOfDay::new(9, 0).unwrap(),
        TimeOfDay::new(10, 0).unwrap(),
    );
    let late_morning = TimeRange::new(
        TimeOfDay::new(10, 0).unwrap(),
        TimeOfDay::new(11, 0).unwrap(),
    );
    println!("   {} lasts {} minutes", morning, morning.duration_minutes());
    println!(
        "   {} overlaps {}: {}\n",
        morning,
        late_morning,
        morning.overlaps(&late_morning)
    );

    // Example 3: Tree view as JSON
    println!("3. Tree view:");
    let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    let events = EventsDocument::new(vec![EventDraft::new(
        "Welcome", "Students", date, "09:00", "10:00", "REC",
    )]);
    let json = TreeConverter::default().convert(&TreeBuilder::events(&events));
    println!("   {}", json);
    println!("   {}", TreeConverter::default().convert(&TreeBuilder::rules(&rules)));

    println!("\n=== Example Complete ===");
}
