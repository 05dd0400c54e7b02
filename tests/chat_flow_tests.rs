// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::sync::Arc;

use proptest::prelude::*;
use tutor::chat::{ChatDispatcher, ModuleChatController, SYSTEM_PROMPT};
use tutor::error::{DispatchError, TurnError};
use tutor::llm::message::Message;
use tutor::llm::mock_provider::{MockProvider, MockResponse};
use tutor::session::{EntryType, Session};

const STARTER: &str = "Goal: X.";

fn controller_with(provider: &MockProvider, credential: Option<&str>) -> ModuleChatController {
    let session = Arc::new(Session::new());
    if let Some(key) = credential {
        session.submit_credential(key);
    }
    ModuleChatController::new(session, ChatDispatcher::new(Arc::new(provider.clone())))
}

// ==================== Scenarios ====================

#[tokio::test]
async fn test_first_turn_shows_starter_and_records_exchange() {
    let provider = MockProvider::new().with_response("Good point.");
    let controller = controller_with(&provider, Some("sk-test"));

    let outcome = controller
        .handle_turn("Scientific Method", "my answer", STARTER)
        .await
        .unwrap();

    assert_eq!(
        outcome.history.messages(),
        &[
            Message::assistant(STARTER),
            Message::user("my answer"),
            Message::assistant("Good point."),
        ]
    );

    let audit = controller.session().export_audit();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].module, "Scientific Method");
    assert_eq!(audit[0].entry_type, EntryType::Interaction);
    assert_eq!(audit[0].prompt, "my answer");
    assert_eq!(audit[0].response, "Good point.");
}

#[tokio::test]
async fn test_missing_credential_keeps_message_without_audit() {
    let provider = MockProvider::new();
    let controller = controller_with(&provider, None);

    let err = controller
        .handle_turn("Scientific Method", "hello", "")
        .await
        .unwrap_err();

    assert_eq!(err, TurnError::Dispatch(DispatchError::MissingCredential));
    assert_eq!(
        controller.session().history("Scientific Method").messages(),
        &[Message::user("hello")]
    );
    assert!(controller.session().export_audit().is_empty());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_whitespace_only_text_is_a_submission() {
    let provider = MockProvider::new();
    let controller = controller_with(&provider, None);

    let err = controller.handle_turn("A", "   ", "").await.unwrap_err();

    assert_eq!(err, TurnError::Dispatch(DispatchError::MissingCredential));
    assert_eq!(
        controller.session().history("A").messages(),
        &[Message::user("   ")]
    );
    assert!(controller.session().export_audit().is_empty());
}

#[tokio::test]
async fn test_rejected_key_is_invalid_credential() {
    let provider = MockProvider::new().with_failure(401, "Incorrect API key provided: sk-bad");
    let controller = controller_with(&provider, Some("sk-bad"));

    let err = controller
        .handle_turn("Hypothesis Design", "my hypothesis", "")
        .await
        .unwrap_err();

    assert_eq!(err, TurnError::Dispatch(DispatchError::InvalidCredential));
    assert_eq!(
        controller.session().history("Hypothesis Design").messages(),
        &[Message::user("my hypothesis")]
    );
    assert!(controller.session().export_audit().is_empty());
}

#[tokio::test]
async fn test_two_modules_stay_independent() {
    let provider = MockProvider::new().with_responses(vec![
        "About method.".to_string(),
        "About hypotheses.".to_string(),
    ]);
    let controller = controller_with(&provider, Some("sk-test"));

    controller
        .handle_turn("Scientific Method", "q1", "")
        .await
        .unwrap();
    controller
        .handle_turn("Hypothesis Design", "q2", "")
        .await
        .unwrap();

    let session = controller.session();
    assert_eq!(
        session.history("Scientific Method").messages(),
        &[Message::user("q1"), Message::assistant("About method.")]
    );
    assert_eq!(
        session.history("Hypothesis Design").messages(),
        &[Message::user("q2"), Message::assistant("About hypotheses.")]
    );

    let method = session.audit_entries_for("Scientific Method");
    let hypothesis = session.audit_entries_for("Hypothesis Design");
    assert_eq!(method.len(), 1);
    assert_eq!(hypothesis.len(), 1);
    assert_eq!(method[0].response, "About method.");
    assert_eq!(hypothesis[0].response, "About hypotheses.");
}

// ==================== Request shape ====================

#[tokio::test]
async fn test_request_is_system_then_full_history() {
    let provider = MockProvider::new().with_responses(vec!["r1".to_string(), "r2".to_string()]);
    let controller = controller_with(&provider, Some("sk-test"));

    controller.handle_turn("A", "u1", STARTER).await.unwrap();
    controller.handle_turn("A", "u2", STARTER).await.unwrap();

    let requests = provider.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].messages,
        vec![
            Message::system(SYSTEM_PROMPT),
            Message::assistant(STARTER),
            Message::user("u1"),
        ]
    );
    assert_eq!(
        requests[1].messages,
        vec![
            Message::system(SYSTEM_PROMPT),
            Message::assistant(STARTER),
            Message::user("u1"),
            Message::assistant("r1"),
            Message::user("u2"),
        ]
    );
    assert!(requests.iter().all(|r| r.model == "gpt-4o-mini"));
}

#[tokio::test]
async fn test_model_switch_applies_to_every_module() {
    let provider = MockProvider::new();
    let controller = controller_with(&provider, Some("sk-test"));

    controller.handle_turn("A", "before", "").await.unwrap();
    controller.session().select_model("gpt-4o").unwrap();
    controller.handle_turn("B", "after", "").await.unwrap();

    let models: Vec<String> = provider
        .recorded_requests()
        .into_iter()
        .map(|r| r.model)
        .collect();
    assert_eq!(models, vec!["gpt-4o-mini", "gpt-4o"]);
}

#[tokio::test]
async fn test_notes_and_turns_share_one_log() {
    let provider = MockProvider::new().with_response("ok");
    let controller = controller_with(&provider, Some("sk-test"));
    let session = controller.session();

    session.log_note("AI Research Workflow", "You are a research assistant", "", EntryType::CustomPrompt);
    controller.handle_turn("Reflection Log", "I verified a DOI", "").await.unwrap();
    session.log_note("AI Research Workflow", "Smith (2023)", "", EntryType::Notes);

    let kinds: Vec<EntryType> = session.export_audit().into_iter().map(|e| e.entry_type).collect();
    assert_eq!(
        kinds,
        vec![EntryType::CustomPrompt, EntryType::Interaction, EntryType::Notes]
    );

    let json: serde_json::Value = serde_json::from_str(&session.export_audit_json().unwrap()).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(3));
    assert_eq!(json[1]["type"], "interaction");
}

// ==================== Properties ====================

fn outcome_strategy() -> impl Strategy<Value = MockResponse> {
    prop_oneof![
        "[a-z]{1,12}".prop_map(MockResponse::Text),
        Just(MockResponse::Empty),
        Just(MockResponse::Failure {
            status: 500,
            message: "server error".to_string(),
        }),
    ]
}

proptest! {
    #[test]
    fn prop_starter_inserted_once(turns in 1usize..8) {
        let provider = MockProvider::new().with_response("reply");
        let controller = controller_with(&provider, Some("sk-test"));

        tokio_test::block_on(async {
            for i in 0..turns {
                let _ = controller.handle_turn("A", &format!("turn {}", i), STARTER).await;
            }
        });

        let history = controller.session().history("A");
        let starters = history.iter().filter(|m| **m == Message::assistant(STARTER)).count();
        prop_assert_eq!(starters, 1);
        prop_assert_eq!(&history.messages()[0], &Message::assistant(STARTER));
    }

    #[test]
    fn prop_audit_matches_successful_replies(outcomes in prop::collection::vec(outcome_strategy(), 1..10)) {
        let successes = outcomes
            .iter()
            .filter(|o| matches!(o, MockResponse::Text(_)))
            .count();
        let turns = outcomes.len();
        let provider = MockProvider::new().with_outcomes(outcomes);
        let controller = controller_with(&provider, Some("sk-test"));

        let mut replies = 0;
        tokio_test::block_on(async {
            for i in 0..turns {
                if controller.handle_turn("A", &format!("q{}", i), "").await.is_ok() {
                    replies += 1;
                }
            }
        });

        prop_assert_eq!(replies, successes);
        prop_assert_eq!(controller.session().audit_entries_for("A").len(), successes);
    }

    #[test]
    fn prop_modules_are_isolated(
        a_turns in prop::collection::vec("[a-z ]{1,10}", 0..5),
        b_turns in prop::collection::vec("[a-z ]{1,10}", 0..5),
    ) {
        let provider = MockProvider::new().with_response("noted");
        let controller = controller_with(&provider, Some("sk-test"));

        tokio_test::block_on(async {
            for text in &b_turns {
                let _ = controller.handle_turn("B", text, "").await;
            }
        });
        let b_history = controller.session().history("B");
        let b_audit = controller.session().audit_entries_for("B");

        tokio_test::block_on(async {
            for text in &a_turns {
                let _ = controller.handle_turn("A", text, "start A").await;
            }
        });

        prop_assert_eq!(controller.session().history("B"), b_history);
        prop_assert_eq!(controller.session().audit_entries_for("B"), b_audit);
    }

    #[test]
    fn prop_no_credential_never_calls_provider(text in "\\PC{1,40}") {
        let provider = MockProvider::new();
        let controller = controller_with(&provider, None);

        let result = tokio_test::block_on(controller.handle_turn("A", &text, ""));

        prop_assert_eq!(result, Err(TurnError::Dispatch(DispatchError::MissingCredential)));
        let history = controller.session().history("A");
        prop_assert_eq!(history.messages(), &[Message::user(text.as_str())][..]);
        prop_assert_eq!(provider.call_count(), 0);
    }
}
