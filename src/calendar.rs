// File: ./src/calendar.rs
// Week strip computation and "today" / "current hour" classification
use crate::clock::Clock;
use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Weekday,
};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub const DAYS_IN_WEEK: usize = 7;

/// First day of the displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Tuesday => Weekday::Tue,
            WeekStart::Wednesday => Weekday::Wed,
            WeekStart::Thursday => Weekday::Thu,
            WeekStart::Friday => Weekday::Fri,
            WeekStart::Saturday => Weekday::Sat,
        }
    }

    /// First date of the week containing `day`.
    ///
    /// Clamped to chrono's range: the earliest representable week starts at
    /// `NaiveDate::MIN`, the latest ends at `NaiveDate::MAX`.
    pub fn first_day_of_week(self, day: NaiveDate) -> NaiveDate {
        let back = (day.weekday().num_days_from_monday() + 7
            - self.weekday().num_days_from_monday())
            % 7;
        let first = day
            .checked_sub_days(Days::new(u64::from(back)))
            .unwrap_or(NaiveDate::MIN);
        match NaiveDate::MAX.checked_sub_days(Days::new(DAYS_IN_WEEK as u64 - 1)) {
            Some(last_start) => first.min(last_start),
            None => first,
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
            WeekStart::Tuesday => "tuesday",
            WeekStart::Wednesday => "wednesday",
            WeekStart::Thursday => "thursday",
            WeekStart::Friday => "friday",
            WeekStart::Saturday => "saturday",
        };
        f.write_str(name)
    }
}

impl FromStr for WeekStart {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sun" | "sunday" => Ok(WeekStart::Sunday),
            "mon" | "monday" => Ok(WeekStart::Monday),
            "tue" | "tuesday" => Ok(WeekStart::Tuesday),
            "wed" | "wednesday" => Ok(WeekStart::Wednesday),
            "thu" | "thursday" => Ok(WeekStart::Thursday),
            "fri" | "friday" => Ok(WeekStart::Friday),
            "sat" | "saturday" => Ok(WeekStart::Saturday),
            other => anyhow::bail!("Unknown week start '{}'", other),
        }
    }
}

/// One cell of the week strip. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub day_label: String,
    pub weekday_label: String,
    pub is_today: bool,
}

impl WeekDay {
    fn new(date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            day_label: day_label(date),
            weekday_label: weekday_label(date),
            is_today: date == today,
        }
    }
}

/// The 7 days of the week containing `reference`, as seen from the clock's zone.
///
/// `is_today` is judged against the clock's "now", not against `reference`, so
/// browsing another week flags nothing unless today is in it.
pub fn current_week<Tz: TimeZone, C: Clock>(
    reference: &DateTime<Tz>,
    week_start: WeekStart,
    clock: &C,
) -> [WeekDay; DAYS_IN_WEEK] {
    let day = reference.with_timezone(&clock.timezone()).date_naive();
    week_of(day, week_start, clock)
}

/// Same as [`current_week`] for an already-resolved calendar date.
pub fn week_of<C: Clock>(day: NaiveDate, week_start: WeekStart, clock: &C) -> [WeekDay; DAYS_IN_WEEK] {
    let first = week_start.first_day_of_week(day);
    let today = clock.today();
    // Date arithmetic, not 24h steps: DST weeks still get 7 distinct dates.
    std::array::from_fn(|i| {
        let date = first.checked_add_days(Days::new(i as u64)).unwrap_or(NaiveDate::MAX);
        WeekDay::new(date, today)
    })
}

pub fn is_today<Tz: TimeZone, C: Clock>(date: &DateTime<Tz>, clock: &C) -> bool {
    let now = clock.now();
    date.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

/// Same calendar day and same hour field as "now".
pub fn is_current_hour<Tz: TimeZone, C: Clock>(date: &DateTime<Tz>, clock: &C) -> bool {
    let now = clock.now();
    let local = date.with_timezone(&now.timezone());
    local.date_naive() == now.date_naive() && local.hour() == now.hour()
}

/// Two-digit day of month ("05").
pub fn day_label(date: NaiveDate) -> String {
    date.format("%d").to_string()
}

/// Three-letter weekday abbreviation ("Tue").
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// First instant of `date` in `tz`.
///
/// Usually midnight. When a zone shift skips midnight it is the first instant
/// whose local date is `date`; when the shift skips the whole day it is the
/// start of the next existing day, so that day's window is empty.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(dt) = tz.from_local_datetime(&midnight).earliest() {
        return dt;
    }
    // Offsets stay under a day, so the bracket holds: local(lo) < date <= local(hi).
    let reached = |utc: &NaiveDateTime| tz.from_utc_datetime(utc).date_naive() >= date;
    let mut lo = midnight
        .checked_sub_signed(Duration::days(2))
        .unwrap_or(NaiveDateTime::MIN);
    let mut hi = midnight
        .checked_add_signed(Duration::days(2))
        .unwrap_or(NaiveDateTime::MAX);
    // Whole-second steps: zone transitions fall on whole seconds.
    while (hi - lo).num_seconds() > 1 {
        let mid = lo + Duration::seconds((hi - lo).num_seconds() / 2);
        if reached(&mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    tz.from_utc_datetime(&hi)
}
