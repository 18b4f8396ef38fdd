// File: ./src/store.rs
// In-memory task collection and the add / edit / complete / delete rules
use crate::calendar::is_today;
use crate::clock::Clock;
use crate::model::item::validate_text;
use crate::model::{NewTask, Task};
use anyhow::{Result, bail};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Read-only snapshot for the calendar/filter functions.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Resolves a full uid, or a prefix of one as long as it is unambiguous.
    fn index_of(&self, id: &str) -> Result<usize> {
        if let Some(idx) = self.tasks.iter().position(|t| t.uid == id) {
            return Ok(idx);
        }
        if id.is_empty() {
            bail!("Empty task id");
        }
        let mut matches = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.uid.starts_with(id))
            .map(|(i, _)| i);
        match (matches.next(), matches.next()) {
            (Some(idx), None) => Ok(idx),
            (Some(_), Some(_)) => bail!("Task id '{}' is ambiguous", id),
            (None, _) => bail!("No task with id '{}'", id),
        }
    }

    pub fn get(&self, id: &str) -> Result<&Task> {
        let idx = self.index_of(id)?;
        Ok(&self.tasks[idx])
    }

    pub fn add(&mut self, draft: NewTask) -> Result<&Task> {
        let task = draft.into_task()?;
        log::debug!("Adding task {} at {}", task.uid, task.scheduled_at);
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Only tasks scheduled in the future or earlier today can be edited.
    pub fn is_editable<C: Clock>(task: &Task, clock: &C) -> bool {
        task.scheduled_at > clock.now() || is_today(&task.scheduled_at, clock)
    }

    /// Replaces title and description. The schedule never changes.
    pub fn edit<C: Clock>(&mut self, id: &str, title: &str, description: &str, clock: &C) -> Result<&Task> {
        validate_text(title, description)?;
        let idx = self.index_of(id)?;
        let task = &mut self.tasks[idx];
        if !Self::is_editable(task, clock) {
            bail!("Task '{}' is in the past and can no longer be edited", task.title);
        }
        task.title = title.trim().to_string();
        task.description = description.trim().to_string();
        log::debug!("Edited task {}", task.uid);
        Ok(&*task)
    }

    pub fn set_completed(&mut self, id: &str, completed: bool) -> Result<&Task> {
        let idx = self.index_of(id)?;
        let task = &mut self.tasks[idx];
        task.completed = completed;
        log::debug!("Task {} completed={}", task.uid, completed);
        Ok(&*task)
    }

    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let idx = self.index_of(id)?;
        let task = self.tasks.remove(idx);
        log::debug!("Deleted task {}", task.uid);
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{DateTime, TimeZone, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn clock() -> FixedClock<Utc> {
        FixedClock::new(utc(2024, 1, 10, 12, 0))
    }

    fn store_with(uid: &str, at: DateTime<Utc>) -> TaskStore {
        TaskStore::from_tasks(vec![Task {
            uid: uid.to_string(),
            title: "Title".to_string(),
            description: "Desc".to_string(),
            scheduled_at: at,
            completed: false,
        }])
    }

    #[test]
    fn add_then_get_by_prefix() {
        let mut store = TaskStore::new();
        let uid = store
            .add(NewTask::new("Go to work", "Take the bus", utc(2024, 1, 10, 8, 0)))
            .unwrap()
            .uid
            .clone();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&uid[..6]).unwrap().title, "Go to work");
    }

    #[test]
    fn add_rejects_blank_title() {
        let mut store = TaskStore::new();
        assert!(store.add(NewTask::new(" ", "x", utc(2024, 1, 10, 8, 0))).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn edit_keeps_schedule() {
        let at = utc(2024, 1, 10, 8, 0);
        let mut store = store_with("u1", at);
        let task = store.edit("u1", "New title", "New desc", &clock()).unwrap();
        assert_eq!(task.title, "New title");
        assert_eq!(task.description, "New desc");
        assert_eq!(task.scheduled_at, at);
    }

    #[test]
    fn edit_of_past_day_is_refused() {
        let mut store = store_with("u1", utc(2024, 1, 9, 23, 0));
        assert!(store.edit("u1", "a", "b", &clock()).is_err());
        assert_eq!(store.get("u1").unwrap().title, "Title");
    }

    #[test]
    fn edit_of_future_task_allowed() {
        let mut store = store_with("u1", utc(2025, 1, 1, 0, 0));
        assert!(store.edit("u1", "a", "b", &clock()).is_ok());
    }

    #[test]
    fn complete_and_delete() {
        let mut store = store_with("u1", utc(2024, 1, 10, 8, 0));
        assert!(store.set_completed("u1", true).unwrap().completed);
        assert!(!store.set_completed("u1", false).unwrap().completed);
        assert_eq!(store.delete("u1").unwrap().uid, "u1");
        assert!(store.delete("u1").is_err());
    }

    #[test]
    fn ambiguous_prefix() {
        let mut store = store_with("abc1", utc(2024, 1, 10, 8, 0));
        let twin = Task {
            uid: "abc2".to_string(),
            ..store.tasks[0].clone()
        };
        store.tasks.push(twin);
        assert!(store.get("abc").is_err());
        assert_eq!(store.get("abc2").unwrap().uid, "abc2");
        assert!(store.get("").is_err());
    }
}
