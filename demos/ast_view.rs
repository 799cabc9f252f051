//! AST view example
//!
//! Prints the JSON tree of both sample documents, the same view served by
//! `POST /rules-ast` and `POST /events-ast`.
//!
//! Run with: cargo run --example ast_view

use kairos_core::ast::{TreeBuilder, TreeConverter};
use kairos_parser::{EventsParser, RulesParser};

const RULES: &str = include_str!("campus.evrules");
const EVENTS: &str = include_str!("spring.evdsl");

fn main() -> anyhow::Result<()> {
    println!("=== AST View Example ===\n");

    let rules = RulesParser::new().parse(RULES)?;
    let tree = TreeConverter::default().convert(&TreeBuilder::rules(&rules));
    println!("Rules document:\n{}\n", serde_json::to_string_pretty(&tree)?);

    let events = EventsParser::new().parse(EVENTS)?;
    let tree = TreeConverter::default().convert(&TreeBuilder::events(&events));
    println!("Events document:\n{}\n", serde_json::to_string_pretty(&tree)?);

    // A shallow depth limit cuts the tree off with a marker object
    let shallow = TreeConverter::new(2).convert(&TreeBuilder::rules(&rules));
    println!("Rules document at depth 2:\n{}\n", serde_json::to_string_pretty(&shallow)?);

    // Syntax errors carry their position
    match RulesParser::new().parse("initialize_runtime = yes\nevent_form Students {\n  location { required = maybe }\n}") {
        Ok(_) => println!("Unexpectedly parsed"),
        Err(err) => println!(
            "Syntax error at {}:{}: {}",
            err.line(),
            err.column(),
            err.message()
        ),
    }

    Ok(())
}
