// File: ./src/cli/view.rs
// Plain-text rendering of the week strip and the day list
use crate::calendar::{WeekDay, is_current_hour};
use crate::clock::Clock;
use crate::model::Task;
use chrono::NaiveDate;

pub const EMPTY_DAY: &str = "No tasks found!!";

/// Two rows (weekday, day of month). Today gets a `*`, the selected day brackets.
pub fn render_week(week: &[WeekDay], selected: NaiveDate) -> String {
    let mut names = String::new();
    let mut days = String::new();
    for day in week {
        let (open, close) = if day.date == selected { ('[', ']') } else { (' ', ' ') };
        let mark = if day.is_today { '*' } else { ' ' };
        names.push_str(&format!(" {} ", day.weekday_label));
        days.push_str(&format!("{}{}{}{}", open, day.day_label, mark, close));
    }
    format!("{}\n{}", names.trim_end(), days.trim_end())
}

pub fn render_task<C: Clock>(task: &Task, clock: &C) -> String {
    let local = task.scheduled_at.with_timezone(&clock.timezone()).naive_local();
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    // The task of the current hour is the one to act on.
    let lead = if is_current_hour(&task.scheduled_at, clock) { '>' } else { ' ' };
    let mut line = format!(
        "{} {} {} {} {}",
        lead,
        task.short_id(),
        local.format("%H:%M"),
        checkbox,
        task.title
    );
    if !task.description.is_empty() {
        line.push_str(&format!(" - {}", task.description));
    }
    line
}

pub fn render_day<C: Clock>(date: NaiveDate, tasks: &[&Task], clock: &C) -> String {
    let mut out = date.format("%A, %b %d %Y").to_string();
    if tasks.is_empty() {
        out.push_str(&format!("\n  {}", EMPTY_DAY));
        return out;
    }
    for task in tasks {
        out.push('\n');
        out.push_str(&render_task(task, clock));
    }
    out
}
