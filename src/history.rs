//! Undo/redo history as a list of collection snapshots.

use std::collections::VecDeque;

use crate::model::Task;

/// History the command handler records mutations into.
///
/// Callers push the state *before* a mutation and purge redo after it.
pub trait History {
    fn push_undo(&mut self, tasks: &[Task]);

    fn purge_redo(&mut self);

    /// Returns the state to restore, saving `current` for redo.
    fn undo(&mut self, current: &[Task]) -> Option<Vec<Task>>;

    /// Returns the state to restore, saving `current` for undo.
    fn redo(&mut self, current: &[Task]) -> Option<Vec<Task>>;
}

#[derive(Clone, Debug)]
pub struct SnapshotHistory {
    limit: usize,
    undo: VecDeque<Vec<Task>>,
    redo: Vec<Vec<Task>>,
}

impl SnapshotHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            undo: VecDeque::new(),
            redo: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    #[cfg(test)]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    fn push_bounded(&mut self, tasks: Vec<Task>) {
        if self.undo.len() == self.limit {
            self.undo.pop_front();
        }
        self.undo.push_back(tasks);
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(50)
    }
}

impl History for SnapshotHistory {
    fn push_undo(&mut self, tasks: &[Task]) {
        self.push_bounded(tasks.to_vec());
    }

    fn purge_redo(&mut self) {
        self.redo.clear();
    }

    fn undo(&mut self, current: &[Task]) -> Option<Vec<Task>> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current.to_vec());
        Some(previous)
    }

    fn redo(&mut self, current: &[Task]) -> Option<Vec<Task>> {
        let next = self.redo.pop()?;
        self.push_bounded(current.to_vec());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(descs: &[&str]) -> Vec<Task> {
        descs.iter().map(|d| Task::new(*d, None, None, None)).collect()
    }

    #[test]
    fn undo_then_redo_walks_back_and_forth() {
        let mut history = SnapshotHistory::default();
        let empty = snapshot(&[]);
        let one = snapshot(&["a"]);

        history.push_undo(&empty);
        history.purge_redo();

        assert_eq!(history.undo(&one), Some(empty.clone()));
        assert_eq!(history.redo(&empty), Some(one.clone()));
        assert_eq!(history.undo(&one), Some(empty));
        assert_eq!(history.undo(&one), None);
    }

    #[test]
    fn new_mutation_purges_redo() {
        let mut history = SnapshotHistory::default();
        history.push_undo(&snapshot(&[]));
        history.undo(&snapshot(&["a"]));
        assert_eq!(history.redo_depth(), 1);

        history.push_undo(&snapshot(&[]));
        history.purge_redo();
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.redo(&snapshot(&["b"])), None);
    }

    #[test]
    fn undo_stack_is_bounded() {
        let mut history = SnapshotHistory::new(2);
        history.push_undo(&snapshot(&["1"]));
        history.push_undo(&snapshot(&["2"]));
        history.push_undo(&snapshot(&["3"]));
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.undo(&[]), Some(snapshot(&["3"])));
        assert_eq!(history.undo(&[]), Some(snapshot(&["2"])));
        assert_eq!(history.undo(&[]), None);
    }
}
