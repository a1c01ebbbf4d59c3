//! Free-text command tokenizer.
//!
//! Splits a command into its date/time field literals, an optional `@alias` and the
//! remaining description. Literal recognition is delegated to [`crate::util`].

use chrono::NaiveDate;
use tracing::debug;

use crate::resolve::TaskFields;
use crate::util::{is_date_literal, is_time_literal};

/// Words that switch the following literals to the end slots.
const RANGE_WORDS: [&str; 4] = ["to", "till", "until", "-"];
/// Words dropped from the description when they introduce a literal.
const CONNECTOR_WORDS: [&str; 5] = ["on", "at", "by", "from", "due"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub fields: TaskFields,
    pub alias: Option<String>,
    pub description: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Literal {
    Date,
    Time,
}

fn classify(token: &str, today: NaiveDate) -> Option<Literal> {
    if is_date_literal(token, today) {
        Some(Literal::Date)
    } else if is_time_literal(token) {
        Some(Literal::Time)
    } else {
        None
    }
}

fn is_range_word(word: &str) -> bool {
    RANGE_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
}

fn is_connector_word(word: &str) -> bool {
    is_range_word(word) || CONNECTOR_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
}

/// Parses a task command such as `submit report @report from mon 9am to fri 5pm`.
pub fn parse_command(text: &str, today: NaiveDate) -> ParsedCommand {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut fields = TaskFields::default();
    let mut alias: Option<String> = None;
    let mut kept: Vec<(usize, &str)> = Vec::with_capacity(tokens.len());
    // date and time slots switch to their end slots independently
    let mut dates_in_end = false;
    let mut times_in_end = false;

    for (i, &token) in tokens.iter().enumerate() {
        if let Some(name) = token.strip_prefix('@').filter(|name| !name.is_empty()) {
            if alias.is_none() {
                alias = Some(name.to_string());
            }
            continue;
        }

        let placed = match classify(token, today) {
            Some(Literal::Date) => place(
                token,
                &mut fields.start_date,
                &mut fields.end_date,
                &mut dates_in_end,
            ),
            Some(Literal::Time) => place(
                token,
                &mut fields.start_time,
                &mut fields.end_time,
                &mut times_in_end,
            ),
            None => false,
        };

        if placed {
            if kept
                .last()
                .is_some_and(|&(j, word)| j + 1 == i && is_connector_word(word))
            {
                kept.pop();
            }
            continue;
        }

        if is_range_word(token) {
            match tokens.get(i + 1).and_then(|next| classify(next, today)) {
                Some(Literal::Date) => dates_in_end = true,
                Some(Literal::Time) => times_in_end = true,
                None => {}
            }
        }
        kept.push((i, token));
    }

    let description = kept
        .into_iter()
        .map(|(_, word)| word)
        .collect::<Vec<_>>()
        .join(" ");

    debug!(?fields, ?alias, %description, "parsed command");
    ParsedCommand {
        fields,
        alias,
        description,
    }
}

/// Puts a literal into the start slot, or the end slot once the start is taken or
/// a range word was seen. Returns false when both slots are full.
fn place(
    token: &str,
    start: &mut Option<String>,
    end: &mut Option<String>,
    in_end: &mut bool,
) -> bool {
    if !*in_end && start.is_none() {
        *start = Some(token.to_string());
        return true;
    }
    if end.is_none() {
        *end = Some(token.to_string());
        *in_end = true;
        return true;
    }
    false
}

/// True when `text` has at least `min_tokens` whitespace-separated tokens.
pub fn is_input_valid(text: &str, min_tokens: usize) -> bool {
    text.split_whitespace().count() >= min_tokens
}

/// Splits off the first word; the remainder is trimmed.
pub fn split_first_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (text, ""),
    }
}
