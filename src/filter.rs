// File: ./src/filter.rs
// Per-day task view: which tasks fall on a calendar day, newest first
use crate::calendar::start_of_day;
use crate::clock::Clock;
use crate::model::Task;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

/// Tasks scheduled on the calendar day of `day`, most recent first.
///
/// The day is read in the clock's zone. Never fails; no match is an empty Vec.
pub fn tasks_on<'a, Tz: TimeZone, C: Clock>(
    day: &DateTime<Tz>,
    tasks: &'a [Task],
    clock: &C,
) -> Vec<&'a Task> {
    let date = day.with_timezone(&clock.timezone()).date_naive();
    tasks_on_date(date, tasks, clock)
}

/// [`tasks_on`] for a date already resolved in the clock's zone.
pub fn tasks_on_date<'a, C: Clock>(date: NaiveDate, tasks: &'a [Task], clock: &C) -> Vec<&'a Task> {
    let (start, end) = day_window(date, clock);
    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|t| start <= t.scheduled_at && t.scheduled_at < end)
        .collect();
    // sort_by is stable: equal timestamps keep their input order.
    selected.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));
    selected
}

/// Half-open `[start, end)` window covering `date` in the clock's zone.
///
/// The end is the start of the next calendar day, so 23h and 25h DST days are
/// covered exactly.
pub fn day_window<C: Clock>(date: NaiveDate, clock: &C) -> (DateTime<Utc>, DateTime<Utc>) {
    let tz = clock.timezone();
    let start = start_of_day(&tz, date).with_timezone(&Utc);
    let end = match date.checked_add_days(Days::new(1)) {
        Some(next) => start_of_day(&tz, next).with_timezone(&Utc),
        None => DateTime::<Utc>::MAX_UTC,
    };
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::FixedOffset;

    fn task(uid: &str, at: DateTime<Utc>) -> Task {
        Task {
            uid: uid.to_string(),
            title: uid.to_string(),
            description: String::new(),
            scheduled_at: at,
            completed: false,
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn window_follows_clock_zone() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let clock = FixedClock::new(tz.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let (start, end) = day_window(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &clock);
        assert_eq!(start, utc(2023, 12, 31, 15, 0));
        assert_eq!(end, utc(2024, 1, 1, 15, 0));
    }

    #[test]
    fn end_bound_is_exclusive() {
        let clock = FixedClock::new(utc(2024, 1, 1, 12, 0));
        let tasks = vec![
            task("midnight", utc(2024, 1, 1, 0, 0)),
            task("next-midnight", utc(2024, 1, 2, 0, 0)),
        ];
        let day = tasks_on(&utc(2024, 1, 1, 18, 0), &tasks, &clock);
        let uids: Vec<&str> = day.iter().map(|t| t.uid.as_str()).collect();
        assert_eq!(uids, ["midnight"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let clock = FixedClock::new(utc(2024, 1, 1, 12, 0));
        let at = utc(2024, 1, 1, 9, 0);
        let tasks = vec![
            task("first", at),
            task("early", utc(2024, 1, 1, 7, 0)),
            task("second", at),
            task("third", at),
        ];
        let day = tasks_on(&at, &tasks, &clock);
        let uids: Vec<&str> = day.iter().map(|t| t.uid.as_str()).collect();
        assert_eq!(uids, ["first", "second", "third", "early"]);
    }

    #[test]
    fn day_read_in_clock_zone() {
        // 20:00 UTC on Jan 1 is Jan 2 at UTC+5.
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let clock = FixedClock::new(tz.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap());
        let tasks = vec![task("jan2-local", utc(2024, 1, 1, 20, 0))];

        assert_eq!(tasks_on(&utc(2024, 1, 1, 20, 30), &tasks, &clock).len(), 1);
        assert!(tasks_on(&utc(2024, 1, 1, 10, 0), &tasks, &clock).is_empty());
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dst_days_are_23_and_25_hours() {
        let ny = chrono_tz::America::New_York;
        let clock = FixedClock::new(ny.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());

        let (start, end) = day_window(ymd(2024, 3, 10), &clock);
        assert_eq!((end - start).num_hours(), 23);
        let (start, end) = day_window(ymd(2024, 11, 3), &clock);
        assert_eq!((end - start).num_hours(), 25);
    }

    #[test]
    fn dst_day_boundaries_in_new_york() {
        let ny = chrono_tz::America::New_York;
        let clock = FixedClock::new(ny.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());
        let at = |y, m, d, h, min| ny.with_ymd_and_hms(y, m, d, h, min, 0).unwrap().with_timezone(&Utc);
        let tasks = vec![
            task("spring-late", at(2024, 3, 10, 23, 30)),
            task("spring-next", at(2024, 3, 11, 0, 30)),
            task("fall-early", at(2024, 11, 3, 0, 30)),
            task("fall-late", at(2024, 11, 3, 23, 30)),
            task("fall-next", at(2024, 11, 4, 0, 30)),
        ];

        let uids = |date| -> Vec<String> {
            tasks_on_date(date, &tasks, &clock).iter().map(|t| t.uid.clone()).collect()
        };
        assert_eq!(uids(ymd(2024, 3, 10)), ["spring-late"]);
        assert_eq!(uids(ymd(2024, 3, 11)), ["spring-next"]);
        assert_eq!(uids(ymd(2024, 11, 3)), ["fall-late", "fall-early"]);
    }

    #[test]
    fn skipped_day_lists_nothing() {
        // Samoa went from Dec 29 2011 straight to Dec 31.
        let apia = chrono_tz::Pacific::Apia;
        let clock = FixedClock::new(apia.with_ymd_and_hms(2011, 12, 29, 12, 0, 0).unwrap());
        let evening = apia.with_ymd_and_hms(2011, 12, 29, 20, 0, 0).unwrap().with_timezone(&Utc);
        let tasks = vec![task("evening", evening)];

        assert_eq!(tasks_on_date(ymd(2011, 12, 29), &tasks, &clock).len(), 1);
        assert!(tasks_on_date(ymd(2011, 12, 30), &tasks, &clock).is_empty());
        assert!(tasks_on_date(ymd(2011, 12, 31), &tasks, &clock).is_empty());
    }

    #[test]
    fn skipped_midnight_keeps_early_tasks_on_their_day() {
        // Havana springs forward at midnight: 01:00 is the first minute of Mar 10.
        let havana = chrono_tz::America::Havana;
        let clock = FixedClock::new(havana.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());
        let first = havana.with_ymd_and_hms(2024, 3, 10, 1, 0, 0).unwrap().with_timezone(&Utc);
        let last_before = first - chrono::Duration::seconds(1);
        let tasks = vec![task("first", first), task("eve", last_before)];

        let on_tenth: Vec<&str> = tasks_on_date(ymd(2024, 3, 10), &tasks, &clock)
            .iter()
            .map(|t| t.uid.as_str())
            .collect();
        assert_eq!(on_tenth, ["first"]);
        assert_eq!(tasks_on_date(ymd(2024, 3, 9), &tasks, &clock)[0].uid, "eve");
    }
}
