//! Turns the four optional date/time fields of a command into concrete moments.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{Result, TaskError};
use crate::util::{END_OF_DAY, START_OF_DAY, parse_date, set_time};

/// Date/time literals extracted from a command, in slot order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
}

impl TaskFields {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.start_time.is_none()
            && self.end_date.is_none()
            && self.end_time.is_none()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Moments {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

/// Resolves `fields` into a start/end pair.
///
/// The resolver is purely mechanical: an end before the start is returned as is.
pub fn resolve(fields: &TaskFields, today: NaiveDate) -> Result<Moments> {
    let TaskFields {
        start_date,
        start_time,
        end_date,
        end_time,
    } = fields;

    let moments = match (start_date.as_deref(), start_time.as_deref()) {
        (None, None) => Moments::default(),

        // time without a date happens today; an end time alone makes it a timed task
        (None, Some(start_time)) => Moments {
            start: Some(at(today, start_time)?),
            end: end_time.as_deref().map(|t| at(today, t)).transpose()?,
        },

        (Some(start_date), None) => {
            let start_day = date(start_date, today)?;
            match end_date.as_deref() {
                // deadline, due by the end of the day
                None => Moments {
                    start: Some(at(start_day, END_OF_DAY)?),
                    end: None,
                },
                // whole days
                Some(end_date) => Moments {
                    start: Some(at(start_day, START_OF_DAY)?),
                    end: Some(at(date(end_date, today)?, END_OF_DAY)?),
                },
            }
        }

        (Some(start_date), Some(start_time)) => {
            let start_day = date(start_date, today)?;
            let end = match (end_date.as_deref(), end_time.as_deref()) {
                (None, None) => None,
                (None, Some(end_time)) => Some(at(start_day, end_time)?),
                (Some(end_date), end_time) => Some(at(
                    date(end_date, today)?,
                    end_time.unwrap_or(END_OF_DAY),
                )?),
            };
            Moments {
                start: Some(at(start_day, start_time)?),
                end,
            }
        }
    };

    debug!(?fields, ?moments, "resolved task fields");
    Ok(moments)
}

pub(crate) fn date(token: &str, today: NaiveDate) -> Result<NaiveDate> {
    parse_date(token, today).map_err(|_| TaskError::InvalidDateTime(token.to_string()))
}

pub(crate) fn at(day: NaiveDate, time: &str) -> Result<NaiveDateTime> {
    set_time(day, time).map_err(|_| TaskError::InvalidDateTime(time.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    fn moment(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn fields(sd: Option<&str>, st: Option<&str>, ed: Option<&str>, et: Option<&str>) -> TaskFields {
        TaskFields {
            start_date: sd.map(str::to_string),
            start_time: st.map(str::to_string),
            end_date: ed.map(str::to_string),
            end_time: et.map(str::to_string),
        }
    }

    fn run(sd: Option<&str>, st: Option<&str>, ed: Option<&str>, et: Option<&str>) -> Moments {
        resolve(&fields(sd, st, ed, et), today()).unwrap()
    }

    #[test]
    fn no_start_date_or_time_is_unscheduled() {
        let ends = [None, Some("2024-01-12")];
        let times = [None, Some("10:00")];
        for ed in ends {
            for et in times {
                assert_eq!(run(None, None, ed, et), Moments::default());
            }
        }
    }

    #[test]
    fn time_only_happens_today() {
        let m = run(None, Some("09:00"), None, None);
        assert_eq!(m.start, Some(moment("2024-01-08 09:00")));
        assert_eq!(m.end, None);

        let m = run(None, Some("09:00"), None, Some("11:30"));
        assert_eq!(m.start, Some(moment("2024-01-08 09:00")));
        assert_eq!(m.end, Some(moment("2024-01-08 11:30")));
    }

    #[test]
    fn date_only_is_a_deadline_at_end_of_day() {
        let m = run(Some("2024-01-10"), None, None, None);
        assert_eq!(m.start, Some(moment("2024-01-10 23:59")));
        assert_eq!(m.end, None);
    }

    #[test]
    fn date_range_without_times_spans_whole_days() {
        let m = run(Some("2024-01-10"), None, Some("2024-01-12"), None);
        assert_eq!(m.start, Some(moment("2024-01-10 00:00")));
        assert_eq!(m.end, Some(moment("2024-01-12 23:59")));
    }

    #[test]
    fn timed_start_variants() {
        let m = run(Some("2024-01-10"), Some("14:00"), None, None);
        assert_eq!(m.start, Some(moment("2024-01-10 14:00")));
        assert_eq!(m.end, None);

        let m = run(Some("2024-01-10"), Some("14:00"), None, Some("16:00"));
        assert_eq!(m.end, Some(moment("2024-01-10 16:00")));

        let m = run(Some("2024-01-10"), Some("14:00"), Some("2024-01-11"), None);
        assert_eq!(m.end, Some(moment("2024-01-11 23:59")));

        let m = run(Some("2024-01-10"), Some("14:00"), Some("2024-01-11"), Some("9am"));
        assert_eq!(m.end, Some(moment("2024-01-11 09:00")));
    }

    #[test]
    fn inverted_ranges_are_kept() {
        let m = run(Some("2024-01-12"), Some("14:00"), Some("2024-01-10"), Some("10:00"));
        assert!(m.end < m.start);
    }

    #[test]
    fn unknown_literal_is_an_error() {
        let err = resolve(&fields(Some("someday"), None, None, None), today()).unwrap_err();
        assert!(matches!(err, TaskError::InvalidDateTime(token) if token == "someday"));
    }
}
