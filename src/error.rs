//! Error types for task commands and storage.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskError>;

/// Errors produced while running a task command.
///
/// Every variant is recoverable: the command loop turns it into a message and
/// keeps going.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Error, please add a task description.")]
    EmptyDescription,

    #[error("Error, no task matches \"{0}\".")]
    NoSuchTask(String),

    #[error("Error, alias \"{0}\" is reserved, malformed or already in use.")]
    AliasConflict(String),

    #[error("Error, incorrect update format. Usage: update <number|alias> <field> <value>")]
    InvalidUpdateFormat,

    #[error("Error, incorrect delete format. Usage: delete <number|alias>")]
    InvalidDeleteFormat,

    #[error("No such task, please enter a number between 1 and {len} (got {index}).")]
    OutOfRange { index: i64, len: usize },

    #[error("Error, please enter a task number or alias to {0}.")]
    MissingTarget(&'static str),

    #[error("Error, please enter a keyword to search for.")]
    EmptyKeyword,

    #[error("Error, could not understand date/time \"{0}\".")]
    InvalidDateTime(String),

    #[error("Invalid command \"{0}\". Type \"help\" to see the available commands.")]
    InvalidCommand(String),

    #[error("Nothing to undo.")]
    NothingToUndo,

    #[error("Nothing to redo.")]
    NothingToRedo,

    #[error("{0}")]
    CustomCommand(String),

    #[error("Warning, tasks could not be saved: {0}")]
    Storage(#[from] StorageError),
}

/// Errors raised by the line store and the state file.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed task line: {0}")]
    MalformedLine(String),

    #[error("Invalid moment \"{0}\" in task line")]
    InvalidMoment(String),
}
