use std::fmt;
use std::sync::Arc;

use crate::board::{Board, ColumnKey, Task};
use crate::dnd::DragEndEvent;
use crate::ids::{IdGenerator, UuidGenerator};

/// State for the kanban board view: the current snapshot plus selection.
///
/// The snapshot is only replaced when a transition changed something, so a
/// no-op leaves the very same `Arc<Board>` in place.
pub struct BoardState {
    board: Arc<Board>,
    ids: Arc<dyn IdGenerator>,
    pub selected_column: usize,
    pub selected_row: usize,
}

impl BoardState {
    pub fn new() -> Self {
        Self::with_ids(Arc::new(UuidGenerator))
    }

    /// Seeded board using the given id generator
    pub fn with_ids(ids: Arc<dyn IdGenerator>) -> Self {
        let board = Board::seeded(ids.as_ref());
        Self::with_board(board, ids)
    }

    pub fn with_board(board: Board, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            board: Arc::new(board),
            ids,
            selected_column: 0,
            selected_row: 0,
        }
    }

    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    /// Get tasks in a specific column
    pub fn tasks_in_column(&self, column: usize) -> &[Task] {
        match ColumnKey::from_index(column) {
            Some(key) => &self.board.column(key).tasks,
            None => &[],
        }
    }

    /// Get the currently selected task
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks_in_column(self.selected_column).get(self.selected_row)
    }

    /// Move selection onto a task, wherever it is
    pub fn select_task(&mut self, task_id: &str) -> bool {
        match self.board.locate(task_id) {
            Some((key, index)) => {
                self.selected_column = key.index();
                self.selected_row = index;
                true
            }
            None => false,
        }
    }

    /// Move selection to a column, keeping the row in range
    pub fn select_column(&mut self, column: usize) {
        if column < ColumnKey::columns().len() {
            self.selected_column = column;
            self.clamp_row();
        }
    }

    /// Move selection left
    pub fn move_left(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
            self.clamp_row();
        }
    }

    /// Move selection right
    pub fn move_right(&mut self) {
        if self.selected_column < ColumnKey::columns().len() - 1 {
            self.selected_column += 1;
            self.clamp_row();
        }
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        let column_count = self.tasks_in_column(self.selected_column).len();
        if self.selected_row < column_count.saturating_sub(1) {
            self.selected_row += 1;
        }
    }

    /// Add a task to To Do. Returns false when the title was rejected.
    pub fn create_task(&mut self, title: &str) -> bool {
        let next = self.board.create_task(title, self.ids.as_ref());
        self.commit(next)
    }

    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let next = self.board.delete_task(task_id);
        let changed = self.commit(next);
        if changed {
            self.clamp_row();
        }
        changed
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected_task().map(|t| t.id.clone()) {
            Some(id) => self.delete_task(&id),
            None => false,
        }
    }

    /// Reorder/move from a finished drag. Selection follows the moved task.
    pub fn apply_drag_end(&mut self, event: &DragEndEvent) -> bool {
        let next = self.board.move_task(event);
        let changed = self.commit(next);
        if changed {
            self.select_task(&event.active);
        }
        changed
    }

    /// Keyboard move: drop the selected task onto the neighbouring column
    pub fn move_selected_left(&mut self) -> bool {
        if self.selected_column == 0 {
            return false;
        }
        self.move_selected_to_column(self.selected_column - 1)
    }

    pub fn move_selected_right(&mut self) -> bool {
        self.move_selected_to_column(self.selected_column + 1)
    }

    /// Keyboard reorder: drop the selected task onto the task above it
    pub fn move_selected_up(&mut self) -> bool {
        if self.selected_row == 0 {
            return false;
        }
        self.move_selected_onto_row(self.selected_row - 1)
    }

    pub fn move_selected_down(&mut self) -> bool {
        self.move_selected_onto_row(self.selected_row + 1)
    }

    fn move_selected_to_column(&mut self, column: usize) -> bool {
        let (Some(task), Some(key)) = (self.selected_task(), ColumnKey::from_index(column)) else {
            return false;
        };
        let event = DragEndEvent::dropped(task.id.clone(), key.as_str());
        self.apply_drag_end(&event)
    }

    fn move_selected_onto_row(&mut self, row: usize) -> bool {
        let column = self.tasks_in_column(self.selected_column);
        let (Some(task), Some(target)) = (column.get(self.selected_row), column.get(row)) else {
            return false;
        };
        let event = DragEndEvent::dropped(task.id.clone(), target.id.clone());
        self.apply_drag_end(&event)
    }

    fn commit(&mut self, next: Option<Board>) -> bool {
        match next {
            Some(board) => {
                self.board = Arc::new(board);
                true
            }
            None => false,
        }
    }

    /// Ensure selected_row is valid for current column
    fn clamp_row(&mut self) {
        let column_count = self.tasks_in_column(self.selected_column).len();
        if column_count == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= column_count {
            self.selected_row = column_count - 1;
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("board", &self.board)
            .field("selected_column", &self.selected_column)
            .field("selected_row", &self.selected_row)
            .finish_non_exhaustive()
    }
}
