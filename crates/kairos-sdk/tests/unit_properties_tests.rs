//! Property tests of the ingestion paths

use chrono::NaiveDate;
use kairos_sdk::{EngineBuilder, EventDraft, EventsDocument, SdkError};
use proptest::prelude::*;

fn hhmm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn draft(name: &str, start: u16, end: u16) -> EventDraft {
    EventDraft::new(
        name,
        "Students",
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        hhmm(start),
        hhmm(end),
        "REC",
    )
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A rejected batch never leaves partial writes behind
    #[test]
    fn prop_batches_are_all_or_nothing(
        slots in prop::collection::vec((0u16..1380, 30u16..180), 1..6)
    ) {
        let rt = runtime();
        rt.block_on(async {
            let engine = EngineBuilder::new().build().await.unwrap();
            engine.create_event(draft("Anchor", 600, 660)).await.unwrap();

            let drafts: Vec<EventDraft> = slots
                .iter()
                .enumerate()
                .map(|(i, (start, length))| {
                    let end = (start + length).min(1439);
                    draft(&format!("E{}", i), *start, end)
                })
                .collect();
            let count = drafts.len();

            match engine.ingest_events(&EventsDocument::new(drafts)).await {
                Ok(n) => {
                    prop_assert_eq!(n, count);
                    prop_assert_eq!(engine.list_events().await.unwrap().len(), count + 1);
                }
                Err(SdkError::EventRejected { .. }) => {
                    prop_assert_eq!(engine.list_events().await.unwrap().len(), 1);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
            Ok(())
        })?;
    }

    /// Stored events never overlap within a slot
    #[test]
    fn prop_stored_events_never_overlap(
        requests in prop::collection::vec((0u16..1380, 60u16..180), 1..10)
    ) {
        let rt = runtime();
        rt.block_on(async {
            let engine = EngineBuilder::new().build().await.unwrap();
            for (i, (start, length)) in requests.iter().enumerate() {
                let end = (start + length).min(1439);
                let _ = engine.create_event(draft(&format!("E{}", i), *start, end)).await;
            }

            let events = engine.list_events().await.unwrap();
            for pair in events.windows(2) {
                let first = pair[0].time_range().unwrap();
                let second = pair[1].time_range().unwrap();
                prop_assert!(!first.overlaps(&second));
            }
            Ok(())
        })?;
    }
}
