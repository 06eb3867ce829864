/// A column on the kanban board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Todo,
    InProgress,
    Done,
}

impl ColumnKey {
    /// Stable key, also used as the column's drop target id
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKey::Todo => "todo",
            ColumnKey::InProgress => "inProgress",
            ColumnKey::Done => "done",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(ColumnKey::Todo),
            "inProgress" => Some(ColumnKey::InProgress),
            "done" => Some(ColumnKey::Done),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ColumnKey::Todo => "To Do",
            ColumnKey::InProgress => "In Progress",
            ColumnKey::Done => "Done",
        }
    }

    /// Columns in render order
    pub fn columns() -> &'static [ColumnKey] {
        &[ColumnKey::Todo, ColumnKey::InProgress, ColumnKey::Done]
    }

    pub fn index(&self) -> usize {
        match self {
            ColumnKey::Todo => 0,
            ColumnKey::InProgress => 1,
            ColumnKey::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::columns().get(index).copied()
    }
}

/// A task on the kanban board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A named, ordered bucket of tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(key: ColumnKey, tasks: Vec<Task>) -> Self {
        Self {
            name: key.display_name().to_string(),
            tasks,
        }
    }

    pub fn position(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}
