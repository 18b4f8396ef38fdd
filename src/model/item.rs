// File: ./src/model/item.rs
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub uid: String,
    pub title: String,
    pub description: String,
    /// Fixed at creation; edits only touch title and description.
    pub scheduled_at: DateTime<Utc>,
    pub completed: bool,
}

/// Creation form: everything a new task needs except its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
}

impl NewTask {
    pub fn new(title: &str, description: &str, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            scheduled_at,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_text(&self.title, &self.description)
    }

    pub fn into_task(self) -> Result<Task> {
        self.validate()?;
        Ok(Task {
            uid: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            scheduled_at: self.scheduled_at,
            completed: false,
        })
    }
}

/// Title and description must both carry text.
pub fn validate_text(title: &str, description: &str) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Task title cannot be empty");
    }
    if description.trim().is_empty() {
        bail!("Task description cannot be empty");
    }
    Ok(())
}

impl Task {
    /// First 8 chars of the uid, what the CLI prints.
    pub fn short_id(&self) -> &str {
        self.uid.get(..8).unwrap_or(&self.uid)
    }
}
