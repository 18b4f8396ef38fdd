pub mod calendar;
pub mod clock;
pub mod config;
pub mod filter;
pub mod model;
pub mod storage;
pub mod store;

pub use calendar::{WeekDay, WeekStart, current_week, is_current_hour, is_today, week_of};
pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::{tasks_on, tasks_on_date};

#[cfg(feature = "cli")]
pub mod cli;
