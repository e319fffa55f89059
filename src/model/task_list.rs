use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates;
use super::task::{Category, DateRange, Task};
use crate::error::{PlannerError, Result};

/// The planner's task collection. All mutations go through here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Three tasks around `today`, used on first run and when storage is
    /// unreadable.
    pub fn sample(today: NaiveDate) -> Self {
        let at = |n| dates::add_days(today, n);
        Self::new(vec![
            Task::new("Task 1", at(3), at(6), Category::ToDo),
            Task::new("Task 2", at(10), at(12), Category::InProgress),
            Task::new("Task 3", at(5), at(10), Category::Review),
        ])
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PlannerError::TaskNotFound(id.to_string()))
    }

    /// Append a new task.
    pub fn add(&mut self, task: Task) {
        log::debug!("adding task '{}' ({})", task.title, task.id);
        self.tasks.push(task);
    }

    /// Replace the stored task that has the same id.
    pub fn update(&mut self, task: Task) -> Result<()> {
        let slot = self.get_mut(&task.id)?;
        *slot = task;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PlannerError::TaskNotFound(id.to_string()))?;
        Ok(self.tasks.remove(pos))
    }

    /// Overwrite a task's dates, returning the range it had before.
    pub fn set_range(&mut self, id: &str, range: DateRange) -> Result<DateRange> {
        let task = self.get_mut(id)?;
        let previous = task.range();
        task.set_range(range);
        Ok(previous)
    }

    /// Move a task so it starts on `day`, keeping its length.
    pub fn move_to_day(&mut self, id: &str, day: NaiveDate) -> Result<DateRange> {
        let task = self.get_mut(id)?;
        let moved = task.range().moved_to(day);
        task.set_range(moved);
        Ok(moved)
    }
}
