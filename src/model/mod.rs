// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod adapter;
pub mod item;
pub mod parser;

pub use adapter::StoredTask;
pub use item::{NewTask, Task};
pub use parser::parse_schedule;
