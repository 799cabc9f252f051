//! Unit tests for the validators
//!
//! Property tests cover the scheduling guarantees that must hold for every
//! input: ordering is checked before conflicts, the duration threshold is
//! exact, and adjacent events never conflict.

use chrono::NaiveDate;
use kairos_core::ast::{EventDraft, FieldSpec, FormSpec, RulesDocument};
use kairos_core::{Event, TimeOfDay};
use kairos_parser::RulesParser;
use kairos_validator::*;
use proptest::prelude::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn hhmm(minutes: u16) -> String {
    TimeOfDay::from_minutes(minutes).unwrap().to_string()
}

fn draft(start: u16, end: u16) -> EventDraft {
    EventDraft::new("Candidate", "Students", date(), hhmm(start), hhmm(end), "REC")
}

fn stored(id: i64, start: u16, end: u16) -> Event {
    Event::from_draft(
        id,
        &EventDraft::new(format!("E{}", id), "Academics", date(), hhmm(start), hhmm(end), "REC"),
    )
}

// =============================================================================
// Rules validation
// =============================================================================

#[test]
fn test_campus_rules_document_is_valid() {
    let src = r#"
        initialize_runtime = yes
        event_form Students {
            event_name{required=yes}
            event_date{required=yes}
            start_time{required=yes}
            end_time{required=yes}
            location{required=yes, options=[REC]}
        }
        event_form Academics {
            event_name{required=yes}
            event_date{required=yes}
            start_time{required=yes}
            end_time{required=yes}
            location{required=yes, options=[REC, Library]}
            requester_unit{options=[Physics]}
        }
    "#;
    let doc = RulesParser::new().parse(src).unwrap();
    assert_eq!(RulesValidator::default().validate(&doc), Ok(()));
}

#[test]
fn test_missing_mandatory_field_names_field_and_requester() {
    let policy = RulesPolicy::default();
    for omitted in &policy.mandatory_fields {
        let form = policy
            .mandatory_fields
            .iter()
            .filter(|f| *f != omitted)
            .fold(FormSpec::new("Students"), |form, f| {
                form.add_field(FieldSpec::new(f.clone()).with_required(true))
            });
        let doc = RulesDocument::new(true).add_form(form);

        let err = RulesValidator::new(policy.clone()).validate(&doc).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(omitted.as_str()), "{}", message);
        assert!(message.contains("Students"), "{}", message);
    }
}

// =============================================================================
// Scheduling properties
// =============================================================================

proptest! {
    #[test]
    fn prop_inverted_or_empty_ranges_fail_before_conflicts(
        start in 0u16..1440,
        back in 0u16..600,
    ) {
        let end = start.saturating_sub(back);
        let existing = vec![stored(1, 0, 1439)];
        let err = SchedulingValidator::default()
            .validate(&draft(start, end), &existing)
            .unwrap_err();
        let is_ordering_error = matches!(err, SchedulingError::StartNotBeforeEnd { .. });
        prop_assert!(is_ordering_error);
    }

    #[test]
    fn prop_duration_threshold_is_exact(start in 0u16..(1440 - 60)) {
        let validator = SchedulingValidator::default();
        let too_short = validator.validate(&draft(start, start + 59), &[]);
        let is_duration_error = matches!(too_short, Err(SchedulingError::DurationTooShort { minutes: 59, .. }));
        prop_assert!(is_duration_error);
        prop_assert!(validator.validate(&draft(start, start + 60), &[]).is_ok());
    }

    #[test]
    fn prop_adjacent_events_do_not_conflict(start in 60u16..(1440 - 120), len in 60u16..120) {
        let existing = vec![stored(1, start, start + len)];
        let validator = SchedulingValidator::default();

        prop_assert!(validator.validate(&draft(start - 60, start), &existing).is_ok());
        let end = (start + len + 60).min(1439);
        if end - (start + len) >= 60 {
            prop_assert!(validator.validate(&draft(start + len, end), &existing).is_ok());
        }

        let overlapping = validator.validate(&draft(start - 59, start + 1), &existing);
        prop_assert!(overlapping.is_err());
    }

    #[test]
    fn prop_conflicts_are_complete(count in 1usize..6) {
        let existing: Vec<Event> = (0..count).map(|i| stored(i as i64 + 1, 600, 720)).collect();
        let err = SchedulingValidator::default()
            .validate(&draft(630, 700), &existing)
            .unwrap_err();
        prop_assert_eq!(err.conflicts().len(), count);
    }
}

#[test]
fn test_three_overlapping_events_all_listed() {
    let existing = vec![stored(1, 540, 600), stored(2, 570, 660), stored(3, 600, 720)];
    let err = SchedulingValidator::default()
        .validate(&draft(580, 640), &existing)
        .unwrap_err();
    let message = err.to_string();
    for id in ["[1]", "[2]", "[3]"] {
        assert!(message.contains(id), "{}", message);
    }
}

#[test]
fn test_other_location_or_date_ignored() {
    let mut elsewhere = stored(1, 540, 660);
    elsewhere.location = "Gym".to_string();
    let mut other_day = stored(2, 540, 660);
    other_day.date = date().succ_opt().unwrap();

    assert!(SchedulingValidator::default()
        .validate(&draft(540, 660), &[elsewhere, other_day])
        .is_ok());
}
