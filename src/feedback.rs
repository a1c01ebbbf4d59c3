use std::fmt;

use crate::error::TaskError;

/// Result of one command as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    /// False for multi-line output such as the task list.
    pub single_line: bool,
    pub exit: bool,
}

impl Feedback {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            single_line: true,
            exit: false,
        }
    }

    pub fn multi_line(message: impl Into<String>) -> Self {
        Self {
            single_line: false,
            ..Self::new(message)
        }
    }

    pub fn exit(message: impl Into<String>) -> Self {
        Self {
            exit: true,
            ..Self::new(message)
        }
    }
}

impl From<TaskError> for Feedback {
    fn from(err: TaskError) -> Self {
        Self::new(err.to_string())
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
