// File: ./src/cli/args.rs
use crate::calendar::WeekStart;
use clap::{ArgAction, Parser, Subcommand};

/// Week-strip to-do planner.
#[derive(Parser, Debug)]
#[command(name = "dayplan", version, about)]
pub struct Cli {
    /// First day of the week (overrides the config file).
    #[arg(long, value_enum, env = "DAYPLAN_WEEK_START", global = true)]
    pub week_start: Option<WeekStart>,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the week strip around DATE (default: today).
    Week { date: Option<String> },
    /// Show the tasks of DATE (default: today), newest first.
    Day { date: Option<String> },
    /// Create a task. WHEN is e.g. "@tomorrow 14:30" (default: now).
    Add {
        title: String,
        description: String,
        when: Vec<String>,
    },
    /// Change title and description of a task scheduled today or later.
    Edit {
        id: String,
        title: String,
        description: String,
    },
    /// Mark a task as completed.
    Done { id: String },
    /// Mark a task as not completed.
    Undo { id: String },
    /// Remove a task.
    Delete { id: String },
}
