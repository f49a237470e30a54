//! Property tests for complete inquiry flows

mod helpers;

use std::sync::Arc;

use helpers::*;
use intake_bot::flow::{FlowProfile, MenuAction};
use intake_bot::services::MemorySubmissionStore;
use intake_bot::state::Session;
use proptest::prelude::*;

const CATEGORY_KEYS: [&str; 5] = ["infra", "core", "research", "dapps", "audit"];

fn answer() -> impl Strategy<Value = String> {
    "[A-Za-z0-9<>&@. ]{0,24}[A-Za-z0-9<>&@.]"
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_any_answers_produce_one_matching_record(
        category in 0usize..CATEGORY_KEYS.len(),
        description in answer(),
        meeting in answer(),
        contact in answer(),
        timeline in answer(),
    ) {
        let (record_count, record, label, session) = run(async {
            let (conversation, store) = Conversation::builtin();
            let key = CATEGORY_KEYS[category];
            let label = conversation.engine.profile().category_by_key(key).unwrap().label.clone();

            conversation.press(MenuAction::Category(key.to_string())).await;
            conversation.say(&description).await;
            conversation.say(&meeting).await;
            conversation.say(&contact).await;
            conversation.say(&timeline).await;

            let records = store.records().await;
            (records.len(), records.into_iter().next(), label, conversation.session().await)
        });

        prop_assert_eq!(record_count, 1);
        let record = record.unwrap();
        prop_assert_eq!(record.category, Some(label));
        prop_assert_eq!(record.project_description, Some(description.trim().to_string()));
        prop_assert_eq!(record.meeting_context, Some(meeting.trim().to_string()));
        prop_assert_eq!(record.contact_info, Some(contact.trim().to_string()));
        prop_assert_eq!(record.timeline, Some(timeline.trim().to_string()));
        prop_assert_eq!(session, Session::default());
    }

    #[test]
    fn test_abandoned_flows_store_nothing(steps in 0usize..4) {
        let records = run(async {
            let store = Arc::new(MemorySubmissionStore::new());
            let conversation = Conversation::new(FlowProfile::builtin().unwrap(), None, store.clone());

            conversation.press(MenuAction::Inquiry).await;
            conversation.say("research").await;
            for i in 0..steps {
                conversation.say(&format!("answer {}", i)).await;
            }
            conversation.start().await;
            conversation.say("late answer").await;

            store.len().await
        });

        prop_assert_eq!(records, 0);
    }
}
