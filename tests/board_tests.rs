use std::sync::Arc;

use taskboard::board::{Board, ColumnKey, Task};
use taskboard::ids::SequentialIds;
use taskboard::tui::board::BoardState;

fn test_board(todo: &[&str], in_progress: &[&str], done: &[&str]) -> BoardState {
    let tasks = |ids: &[&str]| -> Vec<Task> {
        ids.iter().map(|id| Task::new(*id, format!("Title {}", id))).collect()
    };
    BoardState::with_board(
        Board::from_tasks(tasks(todo), tasks(in_progress), tasks(done)),
        Arc::new(SequentialIds::new("new")),
    )
}

fn column_ids(board: &BoardState, column: usize) -> Vec<&str> {
    board.tasks_in_column(column).iter().map(|t| t.id.as_str()).collect()
}

// === BoardState Tests ===

#[test]
fn test_board_state_seeded() {
    let board = BoardState::with_ids(Arc::new(SequentialIds::new("t")));

    assert_eq!(column_ids(&board, 0), vec!["t-1", "t-2"]);
    assert_eq!(board.tasks_in_column(0)[0].title, "Task 1");
    assert_eq!(board.tasks_in_column(0)[1].title, "Task 2");
    assert!(board.tasks_in_column(1).is_empty());
    assert!(board.tasks_in_column(2).is_empty());
    assert_eq!(board.selected_column, 0);
    assert_eq!(board.selected_row, 0);
}

#[test]
fn test_board_state_default_uses_unique_ids() {
    let board = BoardState::default();
    let tasks = board.tasks_in_column(0);

    assert_eq!(tasks.len(), 2);
    assert_ne!(tasks[0].id, tasks[1].id);
}

#[test]
fn test_tasks_in_column_invalid_column() {
    let board = test_board(&["a"], &[], &[]);

    assert!(board.tasks_in_column(99).is_empty());
}

#[test]
fn test_selected_task_empty_column() {
    let mut board = test_board(&["a"], &[], &[]);
    board.selected_column = 1;

    assert!(board.selected_task().is_none());
}

#[test]
fn test_selected_task_with_tasks() {
    let mut board = test_board(&["a", "b"], &[], &[]);
    board.selected_row = 1;

    assert_eq!(board.selected_task().unwrap().id, "b");
}

#[test]
fn test_move_right_and_left() {
    let mut board = test_board(&[], &[], &[]);

    board.move_right();
    assert_eq!(board.selected_column, 1);
    board.move_right();
    board.move_right();
    assert_eq!(board.selected_column, 2);

    board.move_left();
    board.move_left();
    board.move_left();
    assert_eq!(board.selected_column, 0);
}

#[test]
fn test_move_down_and_up() {
    let mut board = test_board(&["a", "b", "c"], &[], &[]);

    board.move_down();
    board.move_down();
    board.move_down();
    assert_eq!(board.selected_row, 2);

    board.move_up();
    board.move_up();
    board.move_up();
    assert_eq!(board.selected_row, 0);
}

#[test]
fn test_move_right_clamps_row() {
    let mut board = test_board(&["a", "b", "c"], &["d"], &[]);
    board.selected_row = 2;

    board.move_right();
    assert_eq!(board.selected_row, 0);
    assert_eq!(board.selected_task().unwrap().id, "d");

    board.move_right();
    assert_eq!(board.selected_row, 0);
    assert!(board.selected_task().is_none());
}

#[test]
fn test_select_task_and_column() {
    let mut board = test_board(&["a"], &["b", "c"], &[]);

    assert!(board.select_task("c"));
    assert_eq!((board.selected_column, board.selected_row), (1, 1));
    assert!(!board.select_task("missing"));
    assert_eq!((board.selected_column, board.selected_row), (1, 1));

    board.select_column(0);
    assert_eq!((board.selected_column, board.selected_row), (0, 0));
    board.select_column(7);
    assert_eq!(board.selected_column, 0);
}

// === Create / Delete ===

#[test]
fn test_create_task_appends_to_todo() {
    let mut board = test_board(&["a"], &["b"], &[]);

    assert!(board.create_task("Write tests"));
    let todo = board.tasks_in_column(0);
    assert_eq!(todo.len(), 2);
    assert_eq!(todo[1].id, "new-1");
    assert_eq!(todo[1].title, "Write tests");
    assert_eq!(column_ids(&board, 1), vec!["b"]);
}

#[test]
fn test_create_task_keeps_title_as_typed() {
    let mut board = test_board(&[], &[], &[]);

    assert!(board.create_task("  padded  "));
    assert_eq!(board.tasks_in_column(0)[0].title, "  padded  ");
}

#[test]
fn test_create_task_rejects_blank_title() {
    let mut board = test_board(&["a"], &[], &[]);
    let before = Arc::clone(board.board());

    assert!(!board.create_task(""));
    assert!(!board.create_task(" \t "));
    assert!(Arc::ptr_eq(&before, board.board()));
}

#[test]
fn test_delete_task_from_any_column() {
    let mut board = test_board(&["a"], &["b"], &["c"]);

    assert!(board.delete_task("b"));
    assert!(board.tasks_in_column(1).is_empty());
    assert_eq!(column_ids(&board, 0), vec!["a"]);
    assert_eq!(column_ids(&board, 2), vec!["c"]);
}

#[test]
fn test_delete_unknown_task_is_noop() {
    let mut board = test_board(&["a"], &[], &[]);
    let before = Arc::clone(board.board());

    assert!(!board.delete_task("zzz"));
    assert!(Arc::ptr_eq(&before, board.board()));
}

#[test]
fn test_delete_selected_clamps_row() {
    let mut board = test_board(&["a", "b"], &[], &[]);
    board.selected_row = 1;

    assert!(board.delete_selected());
    assert_eq!(column_ids(&board, 0), vec!["a"]);
    assert_eq!(board.selected_row, 0);

    assert!(board.delete_selected());
    assert!(!board.delete_selected());
}

// === Keyboard moves ===

#[test]
fn test_move_selected_right_appends_to_next_column() {
    let mut board = test_board(&["a", "b"], &["c"], &[]);

    assert!(board.move_selected_right());
    assert_eq!(column_ids(&board, 0), vec!["b"]);
    assert_eq!(column_ids(&board, 1), vec!["c", "a"]);
    assert_eq!((board.selected_column, board.selected_row), (1, 1));
}

#[test]
fn test_move_selected_at_edges_is_noop() {
    let mut board = test_board(&["a"], &[], &["z"]);

    assert!(!board.move_selected_left());
    assert!(!board.move_selected_up());
    assert!(!board.move_selected_down());

    board.selected_column = 2;
    assert!(!board.move_selected_right());
    assert_eq!(column_ids(&board, 2), vec!["z"]);
}

#[test]
fn test_move_selected_down_and_up() {
    let mut board = test_board(&["a", "b", "c"], &[], &[]);

    assert!(board.move_selected_down());
    assert_eq!(column_ids(&board, 0), vec!["b", "a", "c"]);
    assert_eq!(board.selected_row, 1);

    assert!(board.move_selected_down());
    assert_eq!(column_ids(&board, 0), vec!["b", "c", "a"]);
    assert_eq!(board.selected_row, 2);

    assert!(board.move_selected_up());
    assert_eq!(column_ids(&board, 0), vec!["b", "a", "c"]);
    assert_eq!(board.selected_row, 1);
}

#[test]
fn test_move_selected_left_from_done() {
    let mut board = test_board(&[], &["b"], &["c"]);
    board.select_column(2);

    assert!(board.move_selected_left());
    assert_eq!(column_ids(&board, 1), vec!["b", "c"]);
    assert!(board.tasks_in_column(ColumnKey::Done.index()).is_empty());
}
