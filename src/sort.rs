use std::cmp::Ordering;

use crate::model::Task;

/// Stable sort; tasks that compare equal keep their current relative order.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

/// Display order: scheduled tasks by their first moment, then unscheduled tasks
/// by description.
///
/// A task without a start is placed by its end when compared against a task that
/// has one. A task with no moment at all sinks below every task that has one.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    match (a.start, b.start) {
        (Some(a_start), Some(b_start)) => a_start.cmp(&b_start),
        (None, Some(b_start)) => match a.end {
            Some(a_end) => a_end.cmp(&b_start),
            None => Ordering::Greater,
        },
        (Some(a_start), None) => match b.end {
            Some(b_end) => a_start.cmp(&b_end),
            None => Ordering::Less,
        },
        (None, None) => compare_end_only(a, b),
    }
}

fn compare_end_only(a: &Task, b: &Task) -> Ordering {
    match (a.end, b.end) {
        (Some(a_end), Some(b_end)) => a_end.cmp(&b_end),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_descriptions(&a.description, &b.description),
    }
}

fn compare_descriptions(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn task(desc: &str, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Task {
        Task::new(desc, start, end, None)
    }

    /// Every start/end combination over a few colliding moments and descriptions.
    fn grid() -> Vec<Task> {
        let moments = [None, Some(at(10, 9)), Some(at(10, 12)), Some(at(11, 9))];
        let mut tasks = Vec::new();
        for start in moments {
            for end in moments {
                for desc in ["alpha", "Beta"] {
                    tasks.push(task(desc, start, end));
                }
            }
        }
        tasks
    }

    #[test]
    fn comparator_is_a_strict_weak_order() {
        let tasks = grid();
        for a in &tasks {
            assert_eq!(compare_tasks(a, a), Ordering::Equal);
            for b in &tasks {
                assert_eq!(compare_tasks(a, b), compare_tasks(b, a).reverse());
                for c in &tasks {
                    let ab = compare_tasks(a, b);
                    let bc = compare_tasks(b, c);
                    let ac = compare_tasks(a, c);
                    if ab != Ordering::Greater && bc != Ordering::Greater {
                        assert_ne!(ac, Ordering::Greater, "{a:?} <= {b:?} <= {c:?}");
                    }
                    if ab == Ordering::Equal && bc == Ordering::Equal {
                        assert_eq!(ac, Ordering::Equal, "{a:?} == {b:?} == {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let mut tasks = grid();
        tasks.reverse();
        sort_tasks(&mut tasks);
        let once = tasks.clone();
        sort_tasks(&mut tasks);
        assert_eq!(tasks, once);
    }

    #[test]
    fn end_only_sorts_before_unscheduled() {
        let mut tasks = vec![
            task("aaa unscheduled", None, None),
            task("zzz end only", None, Some(at(20, 9))),
        ];
        sort_tasks(&mut tasks);
        assert_eq!(tasks[0].description, "zzz end only");
    }

    #[test]
    fn mixed_tasks_interleave_by_first_moment() {
        let mut tasks = vec![
            task("unscheduled", None, None),
            task("deadline late", Some(at(12, 23)), None),
            task("end only", None, Some(at(11, 9))),
            task("start early", Some(at(10, 9)), Some(at(15, 9))),
        ];
        sort_tasks(&mut tasks);
        let order: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(
            order,
            ["start early", "end only", "deadline late", "unscheduled"]
        );
    }

    #[test]
    fn unscheduled_tasks_sort_by_description_ignoring_case() {
        let mut tasks = vec![
            task("walk dog", None, None),
            task("Buy milk", None, None),
            task("call mum", None, None),
        ];
        sort_tasks(&mut tasks);
        let order: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, ["Buy milk", "call mum", "walk dog"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut tasks = vec![
            task("second", Some(at(10, 9)), None),
            task("first", Some(at(10, 9)), Some(at(10, 12))),
            task("third", None, Some(at(10, 9))),
        ];
        sort_tasks(&mut tasks);
        let order: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, ["second", "first", "third"]);
    }
}
