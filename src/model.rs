use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::StorageError;

const DELIMITER: &str = " ~~ ";
const NULL_START: &str = "NO_START_TIME";
const NULL_END: &str = "NO_END_TIME";
const NULL_ALIAS: &str = "NO_ALIAS";
const MOMENT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Aliases that are never stored; "completed" also names a delete target.
pub const RESERVED_ALIASES: [&str; 2] = ["completed", "all"];

pub fn is_reserved_alias(alias: &str) -> bool {
    RESERVED_ALIASES
        .iter()
        .any(|reserved| alias.eq_ignore_ascii_case(reserved))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub completed: bool,
    pub alias: Option<String>,
}

impl Task {
    pub fn new(
        description: impl Into<String>,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        alias: Option<String>,
    ) -> Self {
        Self {
            description: description.into(),
            start,
            end,
            completed: false,
            alias,
        }
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    pub fn is_unscheduled(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// A task is overdue once its end (or, lacking one, its start) has passed.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.end.or(self.start).is_some_and(|moment| moment < now)
    }

    pub fn is_on(&self, day: chrono::NaiveDate) -> bool {
        self.start
            .or(self.end)
            .is_some_and(|moment| moment.date() == day)
    }

    /// Serializes the task to its single-line storage form.
    pub fn to_line(&self) -> String {
        let start = self
            .start
            .map(|m| m.format(MOMENT_FORMAT).to_string())
            .unwrap_or_else(|| NULL_START.to_string());
        let end = self
            .end
            .map(|m| m.format(MOMENT_FORMAT).to_string())
            .unwrap_or_else(|| NULL_END.to_string());
        let alias = self.alias.as_deref().unwrap_or(NULL_ALIAS);

        [
            start.as_str(),
            end.as_str(),
            alias,
            if self.completed { "true" } else { "false" },
            self.description.as_str(),
        ]
        .join(DELIMITER)
    }

    pub fn from_line(line: &str) -> Result<Self, StorageError> {
        let tokens: Vec<&str> = line.splitn(5, DELIMITER).collect();
        let &[start, end, alias, completed, description] = tokens.as_slice() else {
            return Err(StorageError::MalformedLine(line.to_string()));
        };

        Ok(Self {
            description: description.to_string(),
            start: parse_moment(start, NULL_START)?,
            end: parse_moment(end, NULL_END)?,
            completed: completed == "true",
            alias: (alias != NULL_ALIAS).then(|| alias.to_string()),
        })
    }
}

fn parse_moment(token: &str, null: &str) -> Result<Option<NaiveDateTime>, StorageError> {
    if token == null {
        return Ok(None);
    }
    if let Ok(moment) = NaiveDateTime::parse_from_str(token, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(moment));
    }
    // older files carry an offset; keep the wall-clock time
    DateTime::parse_from_rfc3339(token)
        .map(|moment| Some(moment.naive_local()))
        .map_err(|_| StorageError::InvalidMoment(token.to_string()))
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Add,
    List,
    Update,
    Delete,
    Search,
    Mark,
    Undo,
    Redo,
    Custom,
    Uncustom,
    Help,
    Exit,
}

impl CommandKind {
    pub const ALL: [CommandKind; 12] = [
        CommandKind::Add,
        CommandKind::List,
        CommandKind::Update,
        CommandKind::Delete,
        CommandKind::Search,
        CommandKind::Mark,
        CommandKind::Undo,
        CommandKind::Redo,
        CommandKind::Custom,
        CommandKind::Uncustom,
        CommandKind::Help,
        CommandKind::Exit,
    ];

    /// Built-in words for the command; the first one is the canonical name.
    pub fn builtin_words(self) -> &'static [&'static str] {
        match self {
            CommandKind::Add => &["add", "a", "new"],
            CommandKind::List => &["list", "ls", "display"],
            CommandKind::Update => &["update", "edit", "u"],
            CommandKind::Delete => &["delete", "del", "rm"],
            CommandKind::Search => &["search", "find"],
            CommandKind::Mark => &["mark", "done", "toggle"],
            CommandKind::Undo => &["undo"],
            CommandKind::Redo => &["redo"],
            CommandKind::Custom => &["custom"],
            CommandKind::Uncustom => &["uncustom", "delete-custom"],
            CommandKind::Help => &["help", "?"],
            CommandKind::Exit => &["exit", "quit", "q"],
        }
    }

    pub fn name(self) -> &'static str {
        self.builtin_words()[0]
    }

    pub fn from_builtin_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            kind.builtin_words()
                .iter()
                .any(|w| w.eq_ignore_ascii_case(word))
        })
    }
}

fn default_color() -> bool {
    true
}

fn default_history_limit() -> usize {
    50
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    /// Maximum number of undo snapshots kept per session.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppState {
    #[serde(default)]
    pub config: AppConfig,
    /// User-defined command words, keyed by the built-in command they stand for.
    #[serde(default)]
    pub custom_commands: BTreeMap<CommandKind, Vec<String>>,
}
