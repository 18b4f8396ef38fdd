// File: ./src/storage.rs
use crate::model::{StoredTask, Task};
use crate::model::adapter::tasks_from_records;
use crate::store::TaskStore;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use fs2::FileExt;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "DAYPLAN_DATA_DIR";
pub const TASKS_FILE: &str = "tasks.json";

pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Data directory: env override, then the configured one, then the platform default.
    pub fn data_dir(configured: Option<&Path>) -> Option<PathBuf> {
        // ISOLATION: Check env var first
        if let Ok(dir) = env::var(DATA_DIR_ENV)
            && !dir.is_empty()
        {
            return Some(PathBuf::from(dir));
        }
        if let Some(dir) = configured {
            return Some(dir.to_path_buf());
        }
        ProjectDirs::from("org", "dayplan", "dayplan").map(|proj| proj.data_dir().to_path_buf())
    }

    pub fn open(configured: Option<&Path>) -> Result<Self> {
        let dir = Self::data_dir(configured).context("Could not determine a data directory")?;
        Self::in_dir(dir)
    }

    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create data directory {}", dir.display()))?;
        }
        Ok(Self {
            path: dir.join(TASKS_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Runs `f` while holding an exclusive lock on `<path>.lock`.
    pub fn with_lock<T, F>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("Cannot open lock file {}", lock_path.display()))?;
        FileExt::lock_exclusive(&lock_file)?;
        let result = f();
        let _ = FileExt::unlock(&lock_file);
        result
    }

    /// Internal load helper (no locking)
    fn load_internal(path: &Path) -> Result<Vec<Task>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        if json.trim().is_empty() {
            return Ok(vec![]);
        }
        let records: Vec<StoredTask> = serde_json::from_str(&json)
            .with_context(|| format!("Corrupt task file {}", path.display()))?;
        let tasks = tasks_from_records(records);
        log::debug!("Loaded {} tasks from {}", tasks.len(), path.display());
        Ok(tasks)
    }

    fn save_internal(path: &Path, tasks: &[Task]) -> Result<()> {
        let records: Vec<StoredTask> = tasks.iter().map(StoredTask::from).collect();
        let json = serde_json::to_string_pretty(&records)?;
        Self::atomic_write(path, json)?;
        log::debug!("Saved {} tasks to {}", tasks.len(), path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<TaskStore> {
        let tasks = Self::with_lock(&self.path, || Self::load_internal(&self.path))?;
        Ok(TaskStore::from_tasks(tasks))
    }

    pub fn save(&self, store: &TaskStore) -> Result<()> {
        Self::with_lock(&self.path, || Self::save_internal(&self.path, store.tasks()))
    }

    /// Transactional modification of the task file.
    /// Locks -> Loads -> Applies Closure -> Saves -> Unlocks.
    /// Nothing is written when the closure fails.
    pub fn modify<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut TaskStore) -> Result<T>,
    {
        Self::with_lock(&self.path, || {
            let mut store = TaskStore::from_tasks(Self::load_internal(&self.path)?);
            let out = f(&mut store)?;
            Self::save_internal(&self.path, store.tasks())?;
            Ok(out)
        })
    }
}
