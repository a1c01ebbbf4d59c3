//! User-defined command words layered over the built-in command words.

use tracing::info;

use crate::error::{Result, TaskError};
use crate::model::{AppState, CommandKind};
use crate::parser::split_first_word;

const MESSAGE_DUPLICATE: &str = "Sorry, but this word is already in use.";
const MESSAGE_NONEXISTENT: &str = "Error deleting. No such word in command list.";
const MESSAGE_USAGE: &str = "Usage: custom <command> <new word>";

/// Built-in words match case-insensitively; custom words must match exactly.
pub fn resolve_command_word(state: &AppState, word: &str) -> Option<CommandKind> {
    CommandKind::from_builtin_word(word).or_else(|| {
        state
            .custom_commands
            .iter()
            .find(|(_, words)| words.iter().any(|w| w == word))
            .map(|(kind, _)| *kind)
    })
}

pub fn custom_words(state: &AppState, kind: CommandKind) -> &[String] {
    state
        .custom_commands
        .get(&kind)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn is_word_in_use(state: &AppState, word: &str) -> bool {
    resolve_command_word(state, word).is_some()
}

/// Binds a new word to a built-in command: `<command> <new word>`. Only the first
/// token of the new word is used.
pub fn add_custom_command(state: &mut AppState, text: &str) -> Result<String> {
    let (command, rest) = split_first_word(text);
    let Some(kind) = CommandKind::from_builtin_word(command) else {
        return Err(TaskError::CustomCommand(MESSAGE_USAGE.to_string()));
    };
    let Some(word) = rest.split_whitespace().next() else {
        return Err(TaskError::CustomCommand(MESSAGE_USAGE.to_string()));
    };

    if is_word_in_use(state, word) {
        return Err(TaskError::CustomCommand(MESSAGE_DUPLICATE.to_string()));
    }

    state
        .custom_commands
        .entry(kind)
        .or_default()
        .push(word.to_string());
    info!(%word, command = kind.name(), "added custom command");
    Ok(format!("\"{word}\" has been added to the command list."))
}

pub fn remove_custom_command(state: &mut AppState, text: &str) -> Result<String> {
    let (word, _) = split_first_word(text);
    let removed_from = state.custom_commands.iter_mut().find_map(|(kind, words)| {
        let pos = words.iter().position(|w| w == word)?;
        words.remove(pos);
        Some(*kind)
    });
    let Some(kind) = removed_from else {
        return Err(TaskError::CustomCommand(MESSAGE_NONEXISTENT.to_string()));
    };

    state.custom_commands.retain(|_, words| !words.is_empty());
    info!(%word, command = kind.name(), "deleted custom command");
    Ok(format!("\"{word}\" has been deleted from the command list."))
}
