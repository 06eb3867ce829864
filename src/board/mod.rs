//! Board data and the pure transitions applied to it.
//!
//! A [`Board`] is an immutable snapshot. Every transition returns
//! `Some(next)` when it changed something and `None` when the event was a
//! no-op, so callers can keep the exact same snapshot around. Columns are
//! reference counted: a transition only allocates the columns it touches.

mod models;

pub use models::{Column, ColumnKey, Task};

use std::sync::Arc;

use crate::dnd::DragEndEvent;
use crate::ids::IdGenerator;

const COLUMN_COUNT: usize = 3;

/// Immutable snapshot of all columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: [Arc<Column>; COLUMN_COUNT],
}

impl Board {
    /// Board with every column empty
    pub fn empty() -> Self {
        Self::from_tasks(vec![], vec![], vec![])
    }

    /// Startup board: two seed tasks in To Do
    pub fn seeded(ids: &dyn IdGenerator) -> Self {
        Self::from_tasks(
            vec![
                Task::new(ids.next_id(), "Task 1"),
                Task::new(ids.next_id(), "Task 2"),
            ],
            vec![],
            vec![],
        )
    }

    pub fn from_tasks(todo: Vec<Task>, in_progress: Vec<Task>, done: Vec<Task>) -> Self {
        Self {
            columns: [
                Arc::new(Column::new(ColumnKey::Todo, todo)),
                Arc::new(Column::new(ColumnKey::InProgress, in_progress)),
                Arc::new(Column::new(ColumnKey::Done, done)),
            ],
        }
    }

    pub fn column(&self, key: ColumnKey) -> &Column {
        &self.columns[key.index()]
    }

    /// Shared handle to a column, for identity checks across snapshots
    pub fn column_arc(&self, key: ColumnKey) -> &Arc<Column> {
        &self.columns[key.index()]
    }

    pub fn columns(&self) -> impl Iterator<Item = (ColumnKey, &Column)> {
        ColumnKey::columns()
            .iter()
            .map(move |key| (*key, self.column(*key)))
    }

    /// Find the column and index holding a task
    pub fn locate(&self, task_id: &str) -> Option<(ColumnKey, usize)> {
        self.columns()
            .find_map(|(key, column)| column.position(task_id).map(|index| (key, index)))
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        let (key, index) = self.locate(task_id)?;
        self.column(key).tasks.get(index)
    }

    /// All task ids in render order (column by column)
    pub fn task_ids(&self) -> Vec<&str> {
        self.columns()
            .flat_map(|(_, column)| column.tasks.iter().map(|t| t.id.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a drop target id: a task first, then a column key (end of column).
    pub fn resolve_destination(&self, over: &str) -> Option<(ColumnKey, usize)> {
        self.locate(over).or_else(|| {
            ColumnKey::from_key(over).map(|key| (key, self.column(key).tasks.len()))
        })
    }

    /// Apply a drag-end event: reorder within a column or move across columns.
    pub fn move_task(&self, event: &DragEndEvent) -> Option<Board> {
        tracing::debug!(active = %event.active, over = ?event.over, "drag end");

        let Some(over) = event.over.as_deref() else {
            tracing::debug!(active = %event.active, "no drop target");
            return None;
        };

        let Some((source, source_index)) = self.locate(&event.active) else {
            tracing::warn!(active = %event.active, "source column not found for task");
            return None;
        };

        let Some((destination, destination_index)) = self.resolve_destination(over) else {
            tracing::warn!(over, "destination column not found");
            return None;
        };

        if source == destination {
            let mut tasks = self.column(source).tasks.clone();
            // Dropping on the column area of the task's own column means "last".
            let destination_index = destination_index.min(tasks.len() - 1);
            if destination_index == source_index {
                tracing::debug!(task = %event.active, "task dropped in place");
                return None;
            }

            let task = tasks.remove(source_index);
            tasks.insert(destination_index, task);

            tracing::debug!(
                task = %event.active,
                column = source.as_str(),
                from = source_index,
                to = destination_index,
                "reordered task"
            );
            return Some(self.replace(&mut [(source, tasks)]));
        }

        let mut source_tasks = self.column(source).tasks.clone();
        let mut destination_tasks = self.column(destination).tasks.clone();
        let task = source_tasks.remove(source_index);
        let destination_index = destination_index.min(destination_tasks.len());
        destination_tasks.insert(destination_index, task);

        tracing::debug!(
            task = %event.active,
            from = source.as_str(),
            to = destination.as_str(),
            index = destination_index,
            "moved task"
        );
        Some(self.replace(&mut [(source, source_tasks), (destination, destination_tasks)]))
    }

    /// Append a new task to To Do. Blank titles are rejected.
    pub fn create_task(&self, title: &str, ids: &dyn IdGenerator) -> Option<Board> {
        if title.trim().is_empty() {
            tracing::debug!("rejected blank task title");
            return None;
        }

        let task = Task::new(ids.next_id(), title);
        tracing::debug!(task = %task.id, "created task");

        let mut tasks = self.column(ColumnKey::Todo).tasks.clone();
        tasks.push(task);
        Some(self.replace(&mut [(ColumnKey::Todo, tasks)]))
    }

    /// Remove a task from whichever column holds it.
    pub fn delete_task(&self, task_id: &str) -> Option<Board> {
        let Some((key, index)) = self.locate(task_id) else {
            tracing::debug!(task = task_id, "delete ignored, task not on board");
            return None;
        };

        let mut tasks = self.column(key).tasks.clone();
        tasks.remove(index);
        tracing::debug!(task = task_id, column = key.as_str(), "deleted task");
        Some(self.replace(&mut [(key, tasks)]))
    }

    /// New snapshot with the given columns swapped out; the rest are shared.
    fn replace(&self, updates: &mut [(ColumnKey, Vec<Task>)]) -> Board {
        let mut columns = self.columns.clone();
        for (key, tasks) in updates.iter_mut() {
            columns[key.index()] = Arc::new(Column {
                name: self.column(*key).name.clone(),
                tasks: std::mem::take(tasks),
            });
        }
        Board { columns }
    }
}
