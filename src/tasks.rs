//! The task collection and the position/alias addressing built on it.
//!
//! Positions are 1-based indexes into the list as last sorted. They are not stable
//! identifiers: any sort, reload or undo may renumber every task.

use crate::error::{Result, TaskError};
use crate::model::{Task, is_reserved_alias};
use crate::sort::sort_tasks;
use crate::util::parse_integer;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn insert(&mut self, index: usize, task: Task) {
        let index = index.min(self.tasks.len());
        self.tasks.insert(index, task);
    }

    pub fn remove(&mut self, index: usize) -> Option<Task> {
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    pub fn sort(&mut self) {
        sort_tasks(&mut self.tasks);
    }

    /// Replaces the whole collection, returning the previous contents.
    pub fn replace(&mut self, tasks: Vec<Task>) -> Vec<Task> {
        std::mem::replace(&mut self.tasks, tasks)
    }

    pub fn index_of_alias(&self, alias: &str) -> Option<usize> {
        self.tasks
            .iter()
            .position(|task| task.alias.as_deref() == Some(alias))
    }

    pub fn is_alias_in_use(&self, alias: &str) -> bool {
        self.index_of_alias(alias).is_some()
    }

    /// Checks whether `alias` could be bound to a task that is not in the list.
    pub fn is_alias_available(&self, alias: &str) -> bool {
        is_valid_alias_syntax(alias) && !is_reserved_alias(alias) && !self.is_alias_in_use(alias)
    }

    /// Resolves a 1-based position or an alias to a zero-based index.
    ///
    /// Anything that parses as an integer is treated as a position, so a numeric
    /// position outside the list is `OutOfRange` even if an alias spells the same.
    pub fn resolve_target(&self, target: &str) -> Result<usize> {
        let target = target.trim();
        if let Some(position) = parse_integer(target) {
            return usize::try_from(position)
                .ok()
                .filter(|p| (1..=self.len()).contains(p))
                .map(|p| p - 1)
                .ok_or(TaskError::OutOfRange {
                    index: position,
                    len: self.len(),
                });
        }

        self.index_of_alias(target)
            .ok_or_else(|| TaskError::NoSuchTask(target.to_string()))
    }
}

/// An alias is a single token that cannot be mistaken for a position or break the
/// storage line.
pub fn is_valid_alias_syntax(alias: &str) -> bool {
    !alias.is_empty()
        && !alias.chars().any(char::is_whitespace)
        && !alias.contains("~~")
        && parse_integer(alias).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> TaskList {
        TaskList::new(vec![
            Task::new("buy milk", None, None, Some("milk".to_string())),
            Task::new("walk dog", None, None, None),
        ])
    }

    #[test]
    fn resolves_positions_and_aliases() {
        let tasks = list();
        assert_eq!(tasks.resolve_target("1").unwrap(), 0);
        assert_eq!(tasks.resolve_target(" 2 ").unwrap(), 1);
        assert_eq!(tasks.resolve_target("milk").unwrap(), 0);
    }

    #[test]
    fn positions_outside_the_list_are_out_of_range() {
        let tasks = list();
        for target in ["0", "3", "-1"] {
            assert!(matches!(
                tasks.resolve_target(target),
                Err(TaskError::OutOfRange { len: 2, .. })
            ));
        }
    }

    #[test]
    fn unknown_alias_is_no_such_task() {
        assert!(matches!(
            list().resolve_target("Milk"),
            Err(TaskError::NoSuchTask(alias)) if alias == "Milk"
        ));
    }

    #[test]
    fn alias_availability() {
        let tasks = list();
        assert!(tasks.is_alias_available("dog"));
        assert!(!tasks.is_alias_available("milk"));
        assert!(!tasks.is_alias_available("All"));
        assert!(!tasks.is_alias_available("42"));
        assert!(!tasks.is_alias_available(""));
        assert!(!tasks.is_alias_available("a~~b"));
    }

    #[test]
    fn remove_out_of_bounds_is_none() {
        let mut tasks = list();
        assert!(tasks.remove(5).is_none());
        assert_eq!(tasks.len(), 2);
    }
}
