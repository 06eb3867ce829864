//! Tests driving the board through a mocked id generator
//!
//! Run with: cargo test --features test-mocks

#![cfg(feature = "test-mocks")]

use std::sync::Arc;

use taskboard::board::{Board, ColumnKey};
use taskboard::ids::MockIdGenerator;
use taskboard::tui::board::BoardState;

#[test]
fn test_seeded_board_asks_for_two_ids() {
    let mut ids = MockIdGenerator::new();
    let mut next = 0;
    ids.expect_next_id().times(2).returning(move || {
        next += 1;
        format!("seed-{}", next)
    });

    let board = Board::seeded(&ids);
    assert_eq!(board.task_ids(), vec!["seed-1", "seed-2"]);
}

#[test]
fn test_blank_title_never_requests_an_id() {
    let mut ids = MockIdGenerator::new();
    ids.expect_next_id().never();

    let board = Board::empty();
    assert!(board.create_task("   ", &ids).is_none());
}

#[test]
fn test_board_state_uses_injected_ids() {
    let mut ids = MockIdGenerator::new();
    ids.expect_next_id().times(1).return_const("fixed-id".to_string());

    let mut state = BoardState::with_board(Board::empty(), Arc::new(ids));
    assert!(state.create_task("From mock"));

    let todo = &state.board().column(ColumnKey::Todo).tasks;
    assert_eq!(todo.len(), 1);
    assert_eq!(todo[0].id, "fixed-id");
    assert_eq!(todo[0].title, "From mock");
}
