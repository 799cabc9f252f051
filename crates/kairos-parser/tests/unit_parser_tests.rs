//! Unit tests for the rules and events DSL parsers
//!
//! Covers the documented surface syntax, error positions and the
//! parse-then-tree-view path used by the visualization endpoints.

use kairos_core::ast::{TreeBuilder, TreeConverter};
use kairos_core::{FieldSpec, FormSpec};
use kairos_parser::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const CAMPUS_RULES: &str = r#"
# Campus event request forms
initialize_runtime = yes

event_form Students {
    event_name{required=yes}
    event_date{required=yes}
    start_time{required=yes}
    end_time{required=yes}
    location{required=yes, options=[REC]}
}

// Academic staff get a unit selector
event_form Academics {
    event_name { required = yes label = "Lecture title" }
    event_date { required = yes }
    start_time { required = yes }
    end_time { required = yes }
    location { required = yes options = [REC, "Main Hall", Library] }
    requester_unit { visible = yes required = no options = [Physics, Chemistry] }
    submit_button { label = "Request slot" }
}
"#;

// =============================================================================
// Rules Parser Tests
// =============================================================================

#[test]
fn test_parse_campus_rules() {
    let doc = RulesParser::new().parse(CAMPUS_RULES).unwrap();
    assert!(doc.runtime_enabled);
    assert_eq!(doc.forms.len(), 2);

    let students = doc.form("Students").unwrap();
    let names: Vec<&str> = students.fields.iter().map(|f| f.field_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["event_name", "event_date", "start_time", "end_time", "location"]
    );
    assert!(students.fields.iter().all(|f| f.required && f.visible));
    assert_eq!(
        students.field("location").unwrap().options,
        Some(vec!["REC".to_string()])
    );

    let academics = doc.form("Academics").unwrap();
    assert_eq!(academics.fields.len(), 7);
    assert_eq!(
        academics.field("event_name").unwrap().label.as_deref(),
        Some("Lecture title")
    );
    let unit = academics.field("requester_unit").unwrap();
    assert!(!unit.required);
    assert_eq!(unit.options.as_ref().unwrap()[1], "Chemistry");
}

#[test]
fn test_parse_rules_via_trait_object() {
    fn parse_with<P: DslParser>(parser: &P, src: &str) -> Result<P::Document> {
        parser.parse(src)
    }
    let doc = parse_with(&RulesParser::new(), "initialize_runtime = no").unwrap();
    assert!(!doc.runtime_enabled);
}

#[test]
fn test_rules_syntax_error_position() {
    let src = "initialize_runtime = yes\nevent_form Students {\n    location { options = [REC Gym] }\n}\n";
    let err = RulesParser::new().parse(src).unwrap_err();
    match &err {
        ParseError::Syntax { line, column, message } => {
            assert_eq!(*line, 3);
            assert_eq!(*column, 31);
            assert!(message.contains("']'"), "{}", message);
        }
    }
    assert!(err.to_string().starts_with("Syntax error at line 3, column 31"));
}

#[test]
fn test_rules_unterminated_form() {
    let err = RulesParser::new()
        .parse("initialize_runtime = yes\nevent_form Students {\n  event_name { }\n")
        .unwrap_err();
    assert_eq!(err.line(), 4);
    assert!(err.message().contains("at end of input"), "{}", err);
}

#[test]
fn test_rules_bad_runtime_value() {
    let err = RulesParser::new().parse("initialize_runtime = maybe").unwrap_err();
    assert_eq!((err.line(), err.column()), (1, 22));
}

// =============================================================================
// Events Parser Tests
// =============================================================================

#[test]
fn test_parse_event_batch() {
    let src = r#"
    # March bookings
    event Students "Chess Night" {
        date = 2025-03-01
        start = "09:00"
        end = "10:00"
        location = REC
    }
    event Academics "Guest Lecture" {
        date = 2025-03-01
        start = 09:30
        end = 10:30
        location = "Main Hall"
    }
    "#;

    let doc = EventsParser::new().parse(src).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.events[0].name, "Chess Night");
    assert_eq!(doc.events[1].requester_type, "Academics");
    assert_eq!(doc.events[1].start_time, "09:30");
    assert_eq!(doc.events[1].location, "Main Hall");
}

#[test]
fn test_events_unknown_top_level() {
    let err = EventsParser::new()
        .parse("event A \"x\" { date = 2025-03-01 start = \"09:00\" end = \"10:00\" location = REC }\nmeeting B")
        .unwrap_err();
    assert_eq!((err.line(), err.column()), (2, 1));
    assert!(err.message().contains("'event'"), "{}", err);
}

#[test]
fn test_events_unquoted_name_rejected() {
    let err = EventsParser::new()
        .parse("event A Party { date = 2025-03-01 start = \"09:00\" end = \"10:00\" location = REC }")
        .unwrap_err();
    assert_eq!(err.column(), 9);
}

// =============================================================================
// Parse then tree view
// =============================================================================

#[test]
fn test_rules_tree_has_form_nodes() {
    let doc = RulesParser::new().parse(CAMPUS_RULES).unwrap();
    let json = TreeConverter::default().convert(&TreeBuilder::rules(&doc));

    let forms = json["forms"].as_array().unwrap();
    assert_eq!(forms.len(), 2);
    assert!(forms.iter().all(|f| f["type"] == FormSpec::TYPE_TAG));
    assert_eq!(forms[1]["fields"][0]["type"], FieldSpec::TYPE_TAG);
}

fn ident() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,8}"
}

fn field_source() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z_]{0,10}",
        any::<bool>(),
        any::<bool>(),
        proptest::option::of("[A-Za-z ]{0,12}"),
        proptest::option::of(proptest::collection::vec("[A-Za-z]{1,6}", 0..4)),
    )
        .prop_map(|(name, visible, required, label, options)| {
            let yn = |b: bool| if b { "yes" } else { "no" };
            let mut attrs = vec![
                format!("visible = {}", yn(visible)),
                format!("required = {}", yn(required)),
            ];
            if let Some(label) = label {
                attrs.push(format!("label = \"{}\"", label));
            }
            if let Some(options) = options {
                attrs.push(format!("options = [{}]", options.join(", ")));
            }
            format!("{} {{ {} }}", name, attrs.join(", "))
        })
}

fn rules_source() -> impl Strategy<Value = (usize, String)> {
    proptest::collection::vec((ident(), proptest::collection::vec(field_source(), 0..6)), 0..5)
        .prop_map(|forms| {
            let mut src = String::from("initialize_runtime = yes\n");
            for (requester, fields) in &forms {
                src.push_str(&format!("event_form {} {{\n", requester));
                for field in fields {
                    src.push_str("    ");
                    src.push_str(field);
                    src.push('\n');
                }
                src.push_str("}\n");
            }
            (forms.len(), src)
        })
}

proptest! {
    #[test]
    fn prop_parsed_rules_tree_is_bounded((form_count, src) in rules_source()) {
        let doc = RulesParser::new().parse(&src).unwrap();
        prop_assert_eq!(doc.forms.len(), form_count);

        let tree = TreeBuilder::rules(&doc);
        prop_assert_eq!(tree.count_tagged(FormSpec::TYPE_TAG), form_count);

        let json = TreeConverter::default().convert(&tree);
        let forms = json["forms"].as_array().cloned().unwrap_or_default();
        prop_assert_eq!(forms.len(), form_count);
        prop_assert!(!json.to_string().contains("MaxDepthReached"));
    }

    #[test]
    fn prop_garbage_never_panics(src in "\\PC{0,64}") {
        let _ = RulesParser::new().parse(&src);
        let _ = EventsParser::new().parse(&src);
    }
}
