//! Pure ordering logic for a single `(owner, status)` column.
//!
//! A [`Column`] is loaded from whatever the store currently holds, put into
//! display order, rearranged in memory, and then renumbered into a
//! [`ColumnLayout`] that the store writes back in one step. Renumbering
//! always produces the contiguous positions `0..n`.

use super::{OwnerId, Position, Task, TaskDomainError, TaskId, TaskStatus};

/// Target position assigned to one task by a column rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionAssignment {
    /// Task being positioned.
    pub task_id: TaskId,
    /// Zero-based slot within the column.
    pub position: Position,
}

/// Complete set of positions for one column, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    owner: OwnerId,
    status: TaskStatus,
    assignments: Vec<PositionAssignment>,
}

impl ColumnLayout {
    /// Returns the column owner.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignments in display order.
    #[must_use]
    pub fn assignments(&self) -> &[PositionAssignment] {
        &self.assignments
    }

    /// Returns the task identifiers in display order.
    pub fn task_ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.assignments.iter().map(|assignment| assignment.task_id)
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns whether the column has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Tasks of one column in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    owner: OwnerId,
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl Column {
    /// Builds a column from stored tasks.
    ///
    /// Tasks belonging to another owner or status are discarded. The rest are
    /// ordered by stored position, with ties (legacy rows sharing a position)
    /// broken by ascending identifier so the order is reproducible.
    #[must_use]
    pub fn from_tasks(owner: OwnerId, status: TaskStatus, tasks: Vec<Task>) -> Self {
        let mut members: Vec<Task> = tasks
            .into_iter()
            .filter(|task| task.owner() == owner && task.status() == status)
            .collect();
        members.sort_by_key(|task| (task.position(), task.id()));
        Self {
            owner,
            status,
            tasks: members,
        }
    }

    /// Returns the column owner.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the column has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns whether the task is a member of this column.
    #[must_use]
    pub fn contains(&self, task_id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id() == task_id)
    }

    /// Returns the position a task appended to this column would take.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ColumnTooLarge`] when the column is full.
    pub fn next_position(&self) -> Result<Position, TaskDomainError> {
        Position::from_index(self.tasks.len())
    }

    /// Moves a task to `target`, clamped to the last slot.
    ///
    /// Returns `false` without changing anything when the task is not in the
    /// column.
    pub fn move_task(&mut self, task_id: TaskId, target: usize) -> bool {
        let Some(current) = self.tasks.iter().position(|task| task.id() == task_id) else {
            return false;
        };
        let task = self.tasks.remove(current);
        let slot = target.min(self.tasks.len());
        self.tasks.insert(slot, task);
        true
    }

    /// Returns whether stored positions already read `0..n` in display order.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.tasks
            .iter()
            .enumerate()
            .all(|(index, task)| Position::from_index(index).is_ok_and(|slot| slot == task.position()))
    }

    /// Assigns every task its display index as position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ColumnTooLarge`] when the column holds more
    /// tasks than positions can represent.
    pub fn renumber(&mut self) -> Result<ColumnLayout, TaskDomainError> {
        let mut assignments = Vec::with_capacity(self.tasks.len());
        for (index, task) in self.tasks.iter_mut().enumerate() {
            let position = Position::from_index(index)?;
            task.set_position(position);
            assignments.push(PositionAssignment {
                task_id: task.id(),
                position,
            });
        }
        Ok(ColumnLayout {
            owner: self.owner,
            status: self.status,
            assignments,
        })
    }

    /// Consumes the column, returning its tasks in display order.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}
