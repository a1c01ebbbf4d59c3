use chrono::NaiveDateTime;
use owo_colors::OwoColorize;

use crate::model::Task;

pub const EMPTY_LIST: &str = "You have no tasks scheduled.";

/// One numbered line per `(position, task)` pair; positions are 1-based.
pub fn format_task_list<'a>(
    tasks: impl IntoIterator<Item = (usize, &'a Task)>,
    now: NaiveDateTime,
    color: bool,
) -> String {
    let mut out = String::new();
    for (position, task) in tasks {
        out.push_str(&format!("{position}. {}\n", task_line(task, now, color)));
    }
    out
}

pub fn task_line(task: &Task, now: NaiveDateTime, color: bool) -> String {
    let status = format_status(task.completed, color);
    let mut line = format!("[{status}] {}", format_description(task, color));

    if let Some(alias) = task.alias.as_deref() {
        line.push_str(&format!("  {}", format_alias(alias, color)));
    }

    if !task.is_unscheduled() {
        let when = date_time_string(task);
        line.push_str(&format!("  ({})", format_when(&when, task, now, color)));
    }

    line
}

/// `dd/Mon/YYYY HH:MM`, or a `start  to  end` pair when both moments exist.
pub fn date_time_string(task: &Task) -> String {
    match (task.start, task.end) {
        (Some(start), Some(end)) => format!("{}  to  {}", format_moment(start), format_moment(end)),
        (Some(moment), None) | (None, Some(moment)) => format_moment(moment),
        (None, None) => String::new(),
    }
}

pub fn format_moment(moment: NaiveDateTime) -> String {
    moment.format("%d/%b/%Y %H:%M").to_string()
}

fn format_status(completed: bool, color: bool) -> String {
    match (completed, color) {
        (true, true) => format!("{}", "x".green()),
        (true, false) => "x".to_string(),
        (false, _) => " ".to_string(),
    }
}

fn format_description(task: &Task, color: bool) -> String {
    if color && task.completed {
        format!("{}", task.description.dimmed())
    } else if color {
        format!("{}", task.description.bold())
    } else {
        task.description.clone()
    }
}

fn format_alias(alias: &str, color: bool) -> String {
    let text = format!("@{alias}");
    if color {
        format!("{}", text.cyan())
    } else {
        text
    }
}

fn format_when(text: &str, task: &Task, now: NaiveDateTime, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    if task.completed {
        return format!("{}", text.dimmed());
    }
    if task.is_overdue(now) {
        format!("{}", text.red())
    } else if task.is_on(now.date()) {
        format!("{}", text.yellow())
    } else {
        text.to_string()
    }
}
