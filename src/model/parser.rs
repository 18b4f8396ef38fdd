// File: ./src/model/parser.rs
// Handles the "when" part of task creation: "@tomorrow 14:30", "@2024-05-01", "9:00"
use crate::clock::Clock;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

fn parse_weekday(name: &str) -> Option<Weekday> {
    let wd = match name {
        "mon" | "monday" => Weekday::Mon,
        "tue" | "tuesday" => Weekday::Tue,
        "wed" | "wednesday" => Weekday::Wed,
        "thu" | "thursday" => Weekday::Thu,
        "fri" | "friday" => Weekday::Fri,
        "sat" | "saturday" => Weekday::Sat,
        "sun" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(wd)
}

/// Date part of a schedule expression, relative to `today`.
pub fn parse_day(word: &str, today: NaiveDate) -> Option<NaiveDate> {
    let val = word.strip_prefix('@').unwrap_or(word).to_lowercase();
    if let Ok(date) = NaiveDate::parse_from_str(&val, "%Y-%m-%d") {
        return Some(date);
    }
    match val.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.checked_add_days(Days::new(1)),
        "yesterday" => return today.checked_sub_days(Days::new(1)),
        _ => {}
    }
    // Next occurrence of that weekday, today included.
    let target = parse_weekday(&val)?;
    let ahead = (target.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    today.checked_add_days(Days::new(u64::from(ahead)))
}

fn parse_time(word: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(word, "%H:%M").ok()
}

/// Resolves `input` to an instant in the clock's zone.
///
/// Missing date means today, missing time means the current time of day.
pub fn parse_schedule<C: Clock>(input: &str, clock: &C) -> Result<DateTime<Utc>> {
    let now = clock.now();
    let today = now.date_naive();
    let mut day = None;
    let mut time = None;

    for word in input.split_whitespace() {
        if day.is_none()
            && let Some(d) = parse_day(word, today)
        {
            day = Some(d);
            continue;
        }
        if time.is_none()
            && let Some(t) = parse_time(word)
        {
            time = Some(t);
            continue;
        }
        bail!("Cannot understand '{}' as a date or time", word);
    }

    let local = day
        .unwrap_or(today)
        .and_time(time.unwrap_or_else(|| now.time()));
    let resolved = now
        .timezone()
        .from_local_datetime(&local)
        .earliest()
        .with_context(|| format!("{} does not exist in the local time zone", local))?;
    Ok(resolved.with_timezone(&Utc))
}
