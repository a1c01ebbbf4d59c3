//! Task commands: add, update, delete, list, plus mark, search, undo and redo.
//!
//! Every mutating command snapshots the collection into the history first, then
//! re-sorts, persists and purges the redo stack.

use chrono::NaiveDateTime;
use tracing::{error, info, warn};

use crate::display::{EMPTY_LIST, format_task_list};
use crate::error::{Result, StorageError, TaskError};
use crate::feedback::Feedback;
use crate::history::{History, SnapshotHistory};
use crate::model::Task;
use crate::parser::{is_input_valid, parse_command, split_first_word};
use crate::resolve::{at, date, resolve};
use crate::storage::Storage;
use crate::tasks::TaskList;
use crate::util::{END_OF_DAY, local_now};

const MESSAGE_UPDATED_TASK: &str = "Task has been updated.";
const MESSAGE_DELETE_COMPLETED: &str = "Deleting completed tasks is not supported yet.";
const MESSAGE_UNDONE: &str = "Undid the last change.";
const MESSAGE_REDONE: &str = "Redid the last undone change.";

/// The field an `update` command targets. Any unknown field name makes the rest of
/// the command a full replacement task.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpdateField {
    Start,
    End,
    Time,
    Alias,
    Description,
    Replace,
}

impl UpdateField {
    pub fn parse(field: &str) -> Self {
        match field.to_ascii_lowercase().as_str() {
            "start" => UpdateField::Start,
            "end" => UpdateField::End,
            "time" => UpdateField::Time,
            "alias" => UpdateField::Alias,
            "desc" | "description" => UpdateField::Description,
            _ => UpdateField::Replace,
        }
    }
}

pub struct TaskHandler<H: History = SnapshotHistory> {
    tasks: TaskList,
    history: H,
    storage: Storage,
    clock: fn() -> NaiveDateTime,
}

impl TaskHandler<SnapshotHistory> {
    /// Loads the task file under `storage` and sorts it.
    pub fn open(storage: Storage, history_limit: usize) -> std::result::Result<Self, StorageError> {
        let tasks = storage.load_tasks()?;
        Ok(Self::new(
            TaskList::new(tasks),
            SnapshotHistory::new(history_limit),
            storage,
        ))
    }
}

impl<H: History> TaskHandler<H> {
    pub fn new(mut tasks: TaskList, history: H, storage: Storage) -> Self {
        tasks.sort();
        Self {
            tasks,
            history,
            storage,
            clock: local_now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub fn add(&mut self, text: &str) -> Result<Feedback> {
        let task = self.create_task(text)?;
        info!(description = %task.description, alias = ?task.alias, "adding task");

        self.history.push_undo(self.tasks.tasks());
        self.tasks.push(task);
        self.commit()?;
        Ok(Feedback::new(format!("Added \"{}\".", text.trim())))
    }

    /// Builds a task from free text. An alias that cannot be bound is dropped.
    fn create_task(&self, text: &str) -> Result<Task> {
        let today = self.now().date();
        let parsed = parse_command(text, today);
        if parsed.description.trim().is_empty() {
            return Err(TaskError::EmptyDescription);
        }

        let alias = parsed.alias.filter(|alias| {
            let available = self.tasks.is_alias_available(alias);
            if !available {
                warn!(%alias, "alias unavailable, adding task without it");
            }
            available
        });
        let moments = resolve(&parsed.fields, today)?;
        Ok(Task::new(parsed.description, moments.start, moments.end, alias))
    }

    /// Runs `<target> <field> [value]`.
    ///
    /// The target is detached while it is being changed, so alias checks only see
    /// the other tasks. On failure it goes back to its old position untouched.
    pub fn update(&mut self, text: &str) -> Result<Feedback> {
        if !is_input_valid(text, 2) {
            return Err(TaskError::InvalidUpdateFormat);
        }

        let (target, remainder) = split_first_word(text);
        let (field, value) = split_first_word(remainder);
        let index = self
            .tasks
            .resolve_target(target)
            .map_err(|_| TaskError::NoSuchTask(target.to_string()))?;

        let before = self.tasks.tasks().to_vec();
        let Some(task) = self.tasks.remove(index) else {
            return Err(TaskError::NoSuchTask(target.to_string()));
        };

        match self.apply_update(task.clone(), UpdateField::parse(field), value, remainder) {
            Ok(updated) => {
                info!(%target, %field, "updated task");
                self.history.push_undo(&before);
                self.tasks.push(updated);
                self.commit()?;
                Ok(Feedback::new(MESSAGE_UPDATED_TASK))
            }
            Err(err) => {
                self.tasks.insert(index, task);
                Err(err)
            }
        }
    }

    fn apply_update(
        &self,
        mut task: Task,
        field: UpdateField,
        value: &str,
        remainder: &str,
    ) -> Result<Task> {
        match field {
            UpdateField::Start | UpdateField::End | UpdateField::Time => {
                if !is_input_valid(value, 1) {
                    return Err(TaskError::InvalidUpdateFormat);
                }
                self.update_moments(&mut task, field, value)?;
            }
            UpdateField::Alias => {
                let alias = value
                    .split_whitespace()
                    .next()
                    .map(|token| token.strip_prefix('@').unwrap_or(token))
                    .unwrap_or_default();
                if !self.tasks.is_alias_available(alias) {
                    return Err(TaskError::AliasConflict(alias.to_string()));
                }
                task.alias = Some(alias.to_string());
            }
            UpdateField::Description => {
                if !is_input_valid(value, 1) {
                    return Err(TaskError::InvalidUpdateFormat);
                }
                task.description = value.to_string();
            }
            UpdateField::Replace => task = self.create_task(remainder)?,
        }
        Ok(task)
    }

    fn update_moments(&self, task: &mut Task, field: UpdateField, value: &str) -> Result<()> {
        let today = self.now().date();
        let fields = parse_command(value, today).fields;

        if field == UpdateField::Time {
            let moments = resolve(&fields, today)?;
            task.start = moments.start;
            task.end = moments.end;
            return Ok(());
        }

        // a single moment may have been written as `to 5pm`
        let day = fields.start_date.or(fields.end_date);
        let time = fields.start_time.or(fields.end_time);
        let moment = match (day.as_deref(), time.as_deref()) {
            (None, None) => return Ok(()),
            (None, Some(time)) => {
                let anchor = task.start.map_or(today, |start| start.date());
                at(anchor, time)?
            }
            (Some(day), None) => at(date(day, today)?, END_OF_DAY)?,
            (Some(day), Some(time)) => at(date(day, today)?, time)?,
        };

        if field == UpdateField::Start {
            task.start = Some(moment);
        } else {
            task.end = Some(moment);
        }
        Ok(())
    }

    pub fn delete(&mut self, target: &str) -> Result<Feedback> {
        let target = target.trim();
        if !is_input_valid(target, 1) {
            return Err(TaskError::InvalidDeleteFormat);
        }
        if target.eq_ignore_ascii_case("completed") {
            return Ok(Feedback::new(MESSAGE_DELETE_COMPLETED));
        }

        let index = self.tasks.resolve_target(target)?;
        self.history.push_undo(self.tasks.tasks());
        let Some(removed) = self.tasks.remove(index) else {
            return Err(TaskError::NoSuchTask(target.to_string()));
        };
        info!(description = %removed.description, "deleted task");
        self.commit()?;
        Ok(Feedback::new(format!(
            "\"{}\" has been deleted from the task list.",
            removed.description
        )))
    }

    pub fn list(&mut self, color: bool) -> Feedback {
        self.tasks.sort();
        if self.tasks.is_empty() {
            return Feedback::new(EMPTY_LIST);
        }
        let now = self.now();
        let positions = self.tasks.tasks().iter().enumerate().map(|(i, t)| (i + 1, t));
        Feedback::multi_line(format_task_list(positions, now, color))
    }

    /// Lists tasks whose description or alias contains `keyword`, numbered by their
    /// position in the full list.
    pub fn search(&mut self, keyword: &str, color: bool) -> Result<Feedback> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(TaskError::EmptyKeyword);
        }

        self.tasks.sort();
        let needle = keyword.to_lowercase();
        let matches: Vec<(usize, &Task)> = self
            .tasks
            .tasks()
            .iter()
            .enumerate()
            .filter(|(_, task)| {
                task.description.to_lowercase().contains(&needle)
                    || task
                        .alias
                        .as_deref()
                        .is_some_and(|alias| alias.to_lowercase().contains(&needle))
            })
            .map(|(i, task)| (i + 1, task))
            .collect();

        if matches.is_empty() {
            return Ok(Feedback::new(format!("\"{keyword}\" not found.")));
        }
        Ok(Feedback::multi_line(format_task_list(
            matches,
            self.now(),
            color,
        )))
    }

    /// Toggles completion of one task.
    pub fn mark(&mut self, target: &str) -> Result<Feedback> {
        let target = target.trim();
        if target.is_empty() {
            return Err(TaskError::MissingTarget("mark"));
        }

        let index = self.tasks.resolve_target(target)?;
        self.history.push_undo(self.tasks.tasks());
        let Some(task) = self.tasks.get_mut(index) else {
            return Err(TaskError::NoSuchTask(target.to_string()));
        };
        task.toggle_completed();
        let message = if task.completed {
            format!("\"{}\" marked as completed.", task.description)
        } else {
            format!("\"{}\" marked as not completed.", task.description)
        };
        info!(%target, completed = task.completed, "toggled task");
        self.commit()?;
        Ok(Feedback::new(message))
    }

    pub fn undo(&mut self) -> Result<Feedback> {
        let previous = self
            .history
            .undo(self.tasks.tasks())
            .ok_or(TaskError::NothingToUndo)?;
        self.tasks.replace(previous);
        info!("undo");
        self.persist()?;
        Ok(Feedback::new(MESSAGE_UNDONE))
    }

    pub fn redo(&mut self) -> Result<Feedback> {
        let next = self
            .history
            .redo(self.tasks.tasks())
            .ok_or(TaskError::NothingToRedo)?;
        self.tasks.replace(next);
        info!("redo");
        self.persist()?;
        Ok(Feedback::new(MESSAGE_REDONE))
    }

    /// Finishes a new mutation: invalidates redo, then sorts and saves.
    fn commit(&mut self) -> Result<()> {
        self.history.purge_redo();
        self.persist()
    }

    /// Sorts and saves. The in-memory list stays sorted even when the save fails.
    fn persist(&mut self) -> Result<()> {
        self.tasks.sort();
        self.storage.save_tasks(self.tasks.tasks()).map_err(|err| {
            error!(%err, "failed to save tasks");
            TaskError::from(err)
        })
    }
}
