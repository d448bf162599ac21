// File: ./src/storage.rs
// Local JSON store for imported tasks.
//
// Changes to the Task struct require incrementing LOCAL_STORAGE_VERSION.
use crate::config::Config;
use crate::context::AppContext;
use crate::import::{MarkdownDialect, import_markdown_file};
use crate::model::Task;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: Current format. Bare arrays written by early builds are read as v0.
const LOCAL_STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct LocalStorageData {
    #[serde(default)]
    version: u32,
    tasks: Vec<Task>,
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on a sibling `.lock` file.
    /// Not reentrant: `f` must not take the same lock again.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Reads the store without locking. Upgrades old formats in place.
    fn read_unlocked(path: &Path) -> Result<Vec<Task>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read task store '{}'", path.display()))?;

        let (tasks, needs_upgrade) =
            if let Ok(data) = serde_json::from_str::<LocalStorageData>(&json) {
                if data.version > LOCAL_STORAGE_VERSION {
                    anyhow::bail!(
                        "Task store '{}' has version {} but this build only reads up to {}",
                        path.display(),
                        data.version,
                        LOCAL_STORAGE_VERSION
                    );
                }
                let outdated = data.version < LOCAL_STORAGE_VERSION;
                (data.tasks, outdated)
            } else {
                let tasks = serde_json::from_str::<Vec<Task>>(&json).with_context(|| {
                    format!("Failed to parse task store '{}'", path.display())
                })?;
                log::info!(
                    "Migrating {} from an unversioned list to v{}",
                    path.display(),
                    LOCAL_STORAGE_VERSION
                );
                (tasks, true)
            };

        if needs_upgrade {
            Self::write_unlocked(path, &tasks)?;
        }
        Ok(tasks)
    }

    fn write_unlocked(path: &Path, tasks: &[Task]) -> Result<()> {
        let data = LocalStorageData {
            version: LOCAL_STORAGE_VERSION,
            tasks: tasks.to_vec(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        Self::atomic_write(path, json)
    }

    pub fn load(ctx: &dyn AppContext) -> Result<Vec<Task>> {
        let path = ctx.get_task_store_path()?;
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(&path, || Self::read_unlocked(&path))
    }

    pub fn save(ctx: &dyn AppContext, tasks: &[Task]) -> Result<()> {
        let path = ctx.get_task_store_path()?;
        Self::with_lock(&path, || Self::write_unlocked(&path, tasks))
    }

    /// Appends `tasks` to the store and returns how many were added.
    pub fn append(ctx: &dyn AppContext, tasks: Vec<Task>) -> Result<usize> {
        let path = ctx.get_task_store_path()?;
        Self::with_lock(&path, || {
            let mut existing = Self::read_unlocked(&path)?;
            let count = tasks.len();
            existing.extend(tasks);
            Self::write_unlocked(&path, &existing)?;
            Ok(count)
        })
    }

    /// Imports a Markdown file and merges its tasks into the store.
    /// Returns the number of tasks imported.
    pub fn import_markdown(
        ctx: &dyn AppContext,
        file: &Path,
        dialect: MarkdownDialect,
        config: &Config,
    ) -> Result<usize> {
        let tasks = import_markdown_file(file, dialect, config)?;
        let count = Self::append(ctx, tasks)?;
        log::info!("Imported {} task(s) from {}", count, file.display());
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_path_keeps_extension() {
        assert_eq!(
            LocalStorage::get_lock_path(Path::new("/tmp/tasks.json")),
            PathBuf::from("/tmp/tasks.json.lock")
        );
        assert_eq!(
            LocalStorage::get_lock_path(Path::new("/tmp/tasks")),
            PathBuf::from("/tmp/tasks.lock")
        );
    }
}
