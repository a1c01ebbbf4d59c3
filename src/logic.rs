//! Dispatches one line of user input to the command it names.

use tracing::{debug, error};

use crate::custom::{
    add_custom_command, custom_words, remove_custom_command, resolve_command_word,
};
use crate::error::{Result, StorageError, TaskError};
use crate::feedback::Feedback;
use crate::handler::TaskHandler;
use crate::model::{AppState, CommandKind};
use crate::parser::split_first_word;
use crate::storage::Storage;

const MESSAGE_GOODBYE: &str = "Goodbye!";
const MESSAGE_NO_COMMAND: &str = "Please enter a command.";

/// One user's state for the lifetime of the process: tasks, history, settings.
pub struct Session {
    handler: TaskHandler,
    state: AppState,
    color: bool,
}

impl Session {
    pub fn open(storage: Storage) -> std::result::Result<Self, StorageError> {
        let state = storage.load_state();
        let handler = TaskHandler::open(storage, state.config.history_limit)?;
        Ok(Self::new(handler, state))
    }

    pub fn new(handler: TaskHandler, state: AppState) -> Self {
        let color = state.config.color;
        Self {
            handler,
            state,
            color,
        }
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn handler(&self) -> &TaskHandler {
        &self.handler
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn execute(&mut self, input: &str) -> Feedback {
        let (word, rest) = split_first_word(input);
        if word.is_empty() {
            return Feedback::new(MESSAGE_NO_COMMAND);
        }

        let Some(kind) = resolve_command_word(&self.state, word) else {
            return TaskError::InvalidCommand(word.to_string()).into();
        };
        debug!(command = kind.name(), %rest, "executing");

        self.dispatch(kind, rest).unwrap_or_else(Feedback::from)
    }

    fn dispatch(&mut self, kind: CommandKind, rest: &str) -> Result<Feedback> {
        match kind {
            CommandKind::Add => self.handler.add(rest),
            CommandKind::List => Ok(self.handler.list(self.color)),
            CommandKind::Update => self.handler.update(rest),
            CommandKind::Delete => self.handler.delete(rest),
            CommandKind::Search => self.handler.search(rest, self.color),
            CommandKind::Mark => self.handler.mark(rest),
            CommandKind::Undo => self.handler.undo(),
            CommandKind::Redo => self.handler.redo(),
            CommandKind::Custom => {
                let message = add_custom_command(&mut self.state, rest)?;
                self.save_state()?;
                Ok(Feedback::new(message))
            }
            CommandKind::Uncustom => {
                let message = remove_custom_command(&mut self.state, rest)?;
                self.save_state()?;
                Ok(Feedback::new(message))
            }
            CommandKind::Help => Ok(Feedback::multi_line(self.help())),
            CommandKind::Exit => Ok(Feedback::exit(MESSAGE_GOODBYE)),
        }
    }

    fn save_state(&self) -> Result<()> {
        self.handler
            .storage()
            .save_state(&self.state)
            .map_err(|err| {
                error!(%err, "failed to save custom commands");
                TaskError::from(err)
            })
    }

    fn help(&self) -> String {
        let mut out = String::from("Available commands:\n");
        for kind in CommandKind::ALL {
            let mut words: Vec<&str> = kind.builtin_words().to_vec();
            words.extend(custom_words(&self.state, kind).iter().map(String::as_str));
            out.push_str(&format!("  {:<10} {}\n", kind.name(), words[1..].join(" ")));
            out.push_str(&format!("  {:<10} {}\n", "", usage(kind)));
        }
        out
    }
}

fn usage(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Add => "add <description> [date] [time] [to [date] [time]] [@alias]",
        CommandKind::List => "list",
        CommandKind::Update => "update <number|alias> <start|end|time|alias|desc|...> <value>",
        CommandKind::Delete => "delete <number|alias>",
        CommandKind::Search => "search <keyword>",
        CommandKind::Mark => "mark <number|alias>",
        CommandKind::Undo => "undo",
        CommandKind::Redo => "redo",
        CommandKind::Custom => "custom <command> <new word>",
        CommandKind::Uncustom => "uncustom <word>",
        CommandKind::Help => "help",
        CommandKind::Exit => "exit",
    }
}
