// File: ./src/model/adapter.rs
// Boundary between what is on disk and the strict Task type
use crate::model::item::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// On-disk shape of a task. Every field may be missing in files written by
/// older or foreign tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredTask {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl StoredTask {
    /// Applies the defaulting policy. A record without a timestamp cannot be
    /// placed on any day and is dropped.
    pub fn into_task(self) -> Option<Task> {
        let Some(scheduled_at) = self.scheduled_at else {
            log::warn!(
                "Dropping stored task {:?} ({:?}): no scheduled time",
                self.uid,
                self.title
            );
            return None;
        };
        Some(Task {
            uid: self
                .uid
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            scheduled_at,
            completed: self.completed.unwrap_or(false),
        })
    }
}

impl From<&Task> for StoredTask {
    fn from(task: &Task) -> Self {
        Self {
            uid: Some(task.uid.clone()),
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            scheduled_at: Some(task.scheduled_at),
            completed: Some(task.completed),
        }
    }
}

/// Converts a batch of stored records, skipping those that cannot be placed.
pub fn tasks_from_records(records: Vec<StoredTask>) -> Vec<Task> {
    records.into_iter().filter_map(StoredTask::into_task).collect()
}
