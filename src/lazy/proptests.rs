//! Property-based tests for session invariants
//!
//! Drives a client through arbitrary sequences of backend replies,
//! failures and questions, checking after every operation that:
//! - the step count always equals the current step index
//! - completion never reverts, and advancing a complete session is a no-op
//! - failures and questions never change the session

use super::testing::MockLlmClient;
use super::{is_completion_signal, LazyEvaluationClient, LazyState, StepOutcome};
use crate::llm::LlmError;
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Arbitrary Generators
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Advance(String),
    AdvanceFails,
    Ask(String),
}

fn arb_step_text() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => "[a-zA-Z0-9 .,:+=\n]{0,40}",
        1 => "[a-z ]{0,10}(final answer|Final Answer|SOLUTION COMPLETE)[a-z .]{0,10}",
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => arb_step_text().prop_map(Op::Advance),
        1 => Just(Op::AdvanceFails),
        2 => "[a-z ?]{1,20}".prop_map(Op::Ask),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn assert_consistent(state: &LazyState) {
    assert_eq!(state.steps().len(), state.current_step());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_session_invariants(problem in "[a-z0-9+ ]{1,20}", ops in proptest::collection::vec(arb_op(), 0..25)) {
        let rt = runtime();
        rt.block_on(async {
            let mock = Arc::new(MockLlmClient::new("mock"));
            let mut client = LazyEvaluationClient::with_problem(mock.clone(), problem.clone());
            let mut was_complete = false;

            for op in ops {
                let before = client.state().clone();
                let calls_before = mock.request_count();

                match op {
                    Op::Advance(text) => {
                        if !before.is_complete() {
                            mock.queue_text(text.clone());
                        }
                        let outcome = client.next_step().await.unwrap();
                        if before.is_complete() {
                            assert!(matches!(outcome, StepOutcome::AlreadyComplete(_)));
                            assert_eq!(client.state(), &before);
                            assert_eq!(mock.request_count(), calls_before);
                        } else {
                            let step = outcome.step().unwrap();
                            assert_eq!(step.step_number, before.current_step() + 1);
                            assert_eq!(step.step_content, text.trim());
                            assert_eq!(client.steps().last().map(String::as_str), Some(text.trim()));
                        }
                    }
                    Op::AdvanceFails => {
                        if !before.is_complete() {
                            mock.queue_error(LlmError::network("boom"));
                            assert!(client.next_step().await.is_err());
                            assert_eq!(client.state(), &before);
                        }
                    }
                    Op::Ask(question) => {
                        mock.queue_text("answer");
                        let answer = client.ask_question(&question).await.unwrap();
                        assert_eq!(answer.answer, "answer");
                        assert_eq!(client.state(), &before);
                    }
                }

                assert_consistent(client.state());
                assert_eq!(client.problem(), problem);
                if was_complete {
                    assert!(client.is_complete());
                }
                was_complete = client.is_complete();
            }
        });
    }

    #[test]
    fn prop_completion_matches_signal(texts in proptest::collection::vec(arb_step_text(), 1..10)) {
        let rt = runtime();
        rt.block_on(async {
            let mock = Arc::new(MockLlmClient::new("mock"));
            let mut client = LazyEvaluationClient::with_problem(mock.clone(), "p");

            for text in &texts {
                if client.is_complete() {
                    break;
                }
                mock.queue_text(text.clone());
                let outcome = client.next_step().await.unwrap();
                assert_eq!(outcome.is_complete(), is_completion_signal(text));
            }
        });
    }
}
