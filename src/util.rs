use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::io::{self, Write};

/// Implicit time for a date given without a time, meaning "by the end of that day".
pub const END_OF_DAY: &str = "23:59";
/// Implicit start time for a date range given without times.
pub const START_OF_DAY: &str = "00:00";

const ORDINARY_WORD_WEEKDAYS: [&str; 2] = ["sat", "sun"];

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_date(s: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let s = s.trim().to_lowercase();

    if s == "today" {
        return Ok(today);
    }
    if s == "tomorrow" {
        return Ok(today.succ_opt().ok_or("date overflow")?);
    }

    // mon, monday, ... resolve to the next such day, today included
    if let Some(weekday) = parse_weekday(&s) {
        return next_weekday(today, weekday).ok_or_else(|| "date overflow".to_string());
    }

    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(d);
    }

    // DD/MM/YYYY
    if let Ok(d) = NaiveDate::parse_from_str(&s, "%d/%m/%Y") {
        return Ok(d);
    }

    // DD/MM in the current year
    if let Some((day, month)) = s.split_once('/') {
        if let (Ok(day), Ok(month)) = (day.parse::<u32>(), month.parse::<u32>()) {
            return NaiveDate::from_ymd_opt(today.year(), month, day)
                .ok_or_else(|| "expected DD/MM like 18/02".to_string());
        }
    }

    // DDMMYYYY (e.g. 18022026)
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return NaiveDate::parse_from_str(&s, "%d%m%Y")
            .map_err(|_| "expected DDMMYYYY like 18022026".to_string());
    }

    Err("expected today|tomorrow|<weekday>|YYYY-MM-DD|DD/MM/YYYY|DD/MM|DDMMYYYY".into())
}

pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0).ok_or_else(|| "bad time".into()),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0).ok_or_else(|| "bad time".into()),
        _ => {}
    }

    if let Some(clock) = s.strip_suffix("am") {
        return parse_twelve_hour(clock, false);
    }
    if let Some(clock) = s.strip_suffix("pm") {
        return parse_twelve_hour(clock, true);
    }

    // HH:MM
    if s.contains(':') {
        return NaiveTime::parse_from_str(&s, "%H:%M")
            .map_err(|_| "expected HH:MM like 18:30".to_string());
    }

    Err("expected HH:MM|H[:MM]am|H[:MM]pm|noon|midnight".into())
}

fn parse_twelve_hour(clock: &str, pm: bool) -> Result<NaiveTime, String> {
    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) => (h, m),
        None => (clock, "0"),
    };
    let err = || "expected H[:MM]am or H[:MM]pm like 3:30pm".to_string();
    if hour.is_empty() || minute.is_empty() {
        return Err(err());
    }
    let hour: u32 = hour.parse().map_err(|_| err())?;
    let minute: u32 = minute.parse().map_err(|_| err())?;
    if !(1..=12).contains(&hour) {
        return Err(err());
    }
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(err)
}

/// Returns `date` at the clock time named by `token`.
pub fn set_time(date: NaiveDate, token: &str) -> Result<NaiveDateTime, String> {
    Ok(date.and_time(parse_time(token)?))
}

pub fn is_date_literal(token: &str, today: NaiveDate) -> bool {
    parse_date(token, today).is_ok()
}

pub fn is_time_literal(token: &str) -> bool {
    parse_time(token).is_ok()
}

/// Weekday names and abbreviations, except the ones that are also everyday words.
fn parse_weekday(s: &str) -> Option<Weekday> {
    if ORDINARY_WORD_WEEKDAYS.contains(&s) {
        return None;
    }
    s.parse::<Weekday>().ok()
}

fn next_weekday(today: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today.checked_add_days(Days::new(u64::from(ahead)))
}

/// Parses a task position the way the command line accepts it, sign included.
pub fn parse_integer(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}

pub fn prompt_input(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim_end().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_relative_and_absolute_dates() {
        // 2024-01-10 is a Wednesday
        let today = date(2024, 1, 10);
        assert_eq!(parse_date("today", today), Ok(today));
        assert_eq!(parse_date("Tomorrow", today), Ok(date(2024, 1, 11)));
        assert_eq!(parse_date("2024-03-05", today), Ok(date(2024, 3, 5)));
        assert_eq!(parse_date("05/03/2024", today), Ok(date(2024, 3, 5)));
        assert_eq!(parse_date("5/3", today), Ok(date(2024, 3, 5)));
        assert_eq!(parse_date("18022026", today), Ok(date(2026, 2, 18)));
    }

    #[test]
    fn weekday_names_resolve_to_next_occurrence() {
        let today = date(2024, 1, 10);
        assert_eq!(parse_date("wed", today), Ok(today));
        assert_eq!(parse_date("friday", today), Ok(date(2024, 1, 12)));
        assert_eq!(parse_date("Mon", today), Ok(date(2024, 1, 15)));
        assert_eq!(parse_date("saturday", today), Ok(date(2024, 1, 13)));
    }

    #[test]
    fn sat_and_sun_are_plain_words() {
        let today = date(2024, 1, 10);
        assert!(parse_date("sat", today).is_err());
        assert!(parse_date("Sun", today).is_err());
        assert!(!is_date_literal("sun", today));
    }

    #[test]
    fn rejects_non_dates() {
        let today = date(2024, 1, 10);
        assert!(parse_date("milk", today).is_err());
        assert!(parse_date("12", today).is_err());
        assert!(parse_date("31/02", today).is_err());
        assert!(parse_date("2024-13-01", today).is_err());
    }

    #[test]
    fn parses_clock_times() {
        assert_eq!(parse_time("18:30"), Ok(time(18, 30)));
        assert_eq!(parse_time("9:05"), Ok(time(9, 5)));
        assert_eq!(parse_time("3pm"), Ok(time(15, 0)));
        assert_eq!(parse_time("10:15AM"), Ok(time(10, 15)));
        assert_eq!(parse_time("12am"), Ok(time(0, 0)));
        assert_eq!(parse_time("12pm"), Ok(time(12, 0)));
        assert_eq!(parse_time("noon"), Ok(time(12, 0)));
        assert_eq!(parse_time(END_OF_DAY), Ok(time(23, 59)));
    }

    #[test]
    fn rejects_non_times() {
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("13pm").is_err());
        assert!(parse_time("pm").is_err());
        assert!(parse_time("1530").is_err());
        assert!(parse_time("team").is_err());
    }

    #[test]
    fn set_time_keeps_the_date() {
        let moment = set_time(date(2024, 1, 10), "7:45pm").unwrap();
        assert_eq!(moment, date(2024, 1, 10).and_time(time(19, 45)));
    }

    #[test]
    fn integers_accept_signs() {
        assert_eq!(parse_integer("3"), Some(3));
        assert_eq!(parse_integer("-2"), Some(-2));
        assert_eq!(parse_integer("groceries"), None);
    }
}
