// File: ./src/cli/mod.rs
pub mod args;
pub mod view;

use crate::calendar::{WeekStart, week_of};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::filter::tasks_on_date;
use crate::model::parser::parse_day;
use crate::model::{NewTask, parse_schedule};
use crate::storage::LocalStorage;
use anyhow::{Context, Result};
use args::{Cli, Command};
use chrono::NaiveDate;
use clap::Parser;
use std::io::{self, Write};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
}

fn resolve_date<C: Clock>(arg: Option<&str>, clock: &C) -> Result<NaiveDate> {
    let today = clock.today();
    match arg {
        None => Ok(today),
        Some(word) => parse_day(word, today).with_context(|| format!("Cannot understand '{}' as a date", word)),
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let week_start = cli.week_start.unwrap_or(config.week_start);
    let storage = LocalStorage::open(config.data_dir.as_deref())?;
    log::info!("Using task file {}", storage.path().display());

    let command = cli.command.unwrap_or(Command::Day { date: None });
    let mut stdout = io::stdout().lock();
    execute(command, week_start, &storage, &SystemClock, &mut stdout)
}

/// Runs one command against `storage`, printing to `out`.
pub fn execute<C: Clock, W: Write>(
    command: Command,
    week_start: WeekStart,
    storage: &LocalStorage,
    clock: &C,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Week { date } => {
            let date = resolve_date(date.as_deref(), clock)?;
            let week = week_of(date, week_start, clock);
            writeln!(out, "{}", view::render_week(&week, date))?;
        }
        Command::Day { date } => {
            let date = resolve_date(date.as_deref(), clock)?;
            let store = storage.load()?;
            let week = week_of(date, week_start, clock);
            let tasks = tasks_on_date(date, store.tasks(), clock);
            writeln!(out, "{}", view::render_week(&week, date))?;
            writeln!(out)?;
            writeln!(out, "{}", view::render_day(date, &tasks, clock))?;
        }
        Command::Add {
            title,
            description,
            when,
        } => {
            let scheduled_at = parse_schedule(&when.join(" "), clock)?;
            let task = storage.modify(|store| {
                let task = store.add(NewTask::new(&title, &description, scheduled_at))?;
                Ok(task.clone())
            })?;
            writeln!(out, "Created {}", view::render_task(&task, clock))?;
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            let task = storage.modify(|store| Ok(store.edit(&id, &title, &description, clock)?.clone()))?;
            writeln!(out, "Updated {}", view::render_task(&task, clock))?;
        }
        Command::Done { id } => {
            let task = storage.modify(|store| Ok(store.set_completed(&id, true)?.clone()))?;
            writeln!(out, "Marked as Completed {}", view::render_task(&task, clock))?;
        }
        Command::Undo { id } => {
            let task = storage.modify(|store| Ok(store.set_completed(&id, false)?.clone()))?;
            writeln!(out, "Reopened {}", view::render_task(&task, clock))?;
        }
        Command::Delete { id } => {
            let task = storage.modify(|store| store.delete(&id))?;
            writeln!(out, "Deleted {}", view::render_task(&task, clock))?;
        }
    }
    Ok(())
}
