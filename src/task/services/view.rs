//! Listing modes and the grouped board.

use crate::task::domain::{Task, TaskStatus};
use std::cmp::Reverse;

/// How a task listing is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Flat list, newest first.
    #[default]
    List,
    /// Grouped by status, then by column position, newest first among
    /// tied positions.
    ///
    /// Reordering resolves ties the other way, oldest first, and compacts
    /// the column, so tied positions only show up before a column's first
    /// reorder or append.
    Kanban,
}

impl ViewMode {
    /// Parses the `view` query value. Absent or unknown values select the
    /// list view.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
            Some("kanban") => Self::Kanban,
            _ => Self::List,
        }
    }

    /// Sorts tasks for this view.
    pub(crate) fn sort(self, tasks: &mut [Task]) {
        match self {
            Self::List => tasks.sort_by_key(|task| Reverse((task.created_at(), task.id()))),
            Self::Kanban => {
                tasks.sort_by_key(|task| (task.status(), task.position(), Reverse(task.id())));
            }
        }
    }
}

/// An owner's tasks split into the three workflow columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl TaskBoard {
    /// Groups tasks into columns, each ordered as in [`ViewMode::Kanban`].
    #[must_use]
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        ViewMode::Kanban.sort(&mut tasks);
        let mut board = Self::default();
        for task in tasks {
            board.column_mut(task.status()).push(task);
        }
        board
    }

    /// Returns one column in position order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Returns the total number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns whether the board has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    const fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }
}
