//! Persistence of day task lists and the script library.
//!
//! The interaction layer talks to a [`Store`]; [`FileStore`] keeps one pretty
//! JSON file per day plus `scripts.json`, and [`MemoryStore`] keeps everything
//! in process.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::io::paths;
use crate::model::{Script, Task};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not serialize: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Load/save contract consumed by the UI and the CLI.
///
/// Loading a day that was never saved is an empty list, and loading scripts
/// before any were saved is the built-in default entry. Saves overwrite.
pub trait Store {
    fn load_tasks(&self, date: NaiveDate) -> Result<Vec<Task>, StorageError>;
    fn save_tasks(&mut self, date: NaiveDate, tasks: &[Task]) -> Result<(), StorageError>;
    fn load_scripts(&self) -> Result<Vec<Script>, StorageError>;
    fn save_scripts(&mut self, scripts: &[Script]) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// JSON files in a data directory, created on first write
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Store for FileStore {
    fn load_tasks(&self, date: NaiveDate) -> Result<Vec<Task>, StorageError> {
        let path = paths::tasks_file(&self.dir, date);
        let tasks = read_json::<Option<Vec<Task>>>(&path)?.flatten();
        Ok(tasks.unwrap_or_default())
    }

    fn save_tasks(&mut self, date: NaiveDate, tasks: &[Task]) -> Result<(), StorageError> {
        let path = paths::tasks_file(&self.dir, date);
        write_json(&path, &tasks)?;
        info!(path = %path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn load_scripts(&self) -> Result<Vec<Script>, StorageError> {
        let path = paths::scripts_file(&self.dir);
        match read_json::<Option<Vec<Script>>>(&path)? {
            Some(scripts) => Ok(scripts.unwrap_or_default()),
            None => {
                debug!(path = %path.display(), "no script store, using default");
                Ok(vec![Script::builtin_default()])
            }
        }
    }

    fn save_scripts(&mut self, scripts: &[Script]) -> Result<(), StorageError> {
        let path = paths::scripts_file(&self.dir);
        write_json(&path, &scripts)?;
        info!(path = %path.display(), count = scripts.len(), "saved scripts");
        Ok(())
    }
}

/// Read and parse a JSON file. `Ok(None)` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::ReadError {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StorageError::ParseError {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let content = serde_json::to_string_pretty(value)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| StorageError::WriteError {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    atomic_write(path, content.as_bytes()).map_err(|source| StorageError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryInner {
    tasks: HashMap<NaiveDate, Vec<Task>>,
    scripts: Option<Vec<Script>>,
    saves: usize,
    fail_writes: bool,
    fail_loads: bool,
}

/// Store kept entirely in memory. Clones share the same contents, so a
/// handle kept outside the UI sees every save the UI makes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_tasks(self, date: NaiveDate, tasks: Vec<Task>) -> Self {
        self.inner.borrow_mut().tasks.insert(date, tasks);
        self
    }

    pub fn with_scripts(self, scripts: Vec<Script>) -> Self {
        self.inner.borrow_mut().scripts = Some(scripts);
        self
    }

    /// Make every later save fail with a write error
    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Make every later load fail with a read error
    pub fn fail_loads(&self, fail: bool) {
        self.inner.borrow_mut().fail_loads = fail;
    }

    /// Tasks saved for `date`, if any
    pub fn tasks(&self, date: NaiveDate) -> Option<Vec<Task>> {
        self.inner.borrow().tasks.get(&date).cloned()
    }

    /// Scripts saved so far, if any
    pub fn scripts(&self) -> Option<Vec<Script>> {
        self.inner.borrow().scripts.clone()
    }

    /// Number of successful saves of either kind
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }

    fn check_write(&self, what: &str) -> Result<(), StorageError> {
        if self.inner.borrow().fail_writes {
            return Err(StorageError::WriteError {
                path: PathBuf::from(what),
                source: io::Error::other("writes disabled"),
            });
        }
        Ok(())
    }

    fn check_read(&self, what: &str) -> Result<(), StorageError> {
        if self.inner.borrow().fail_loads {
            return Err(StorageError::ReadError {
                path: PathBuf::from(what),
                source: io::Error::other("reads disabled"),
            });
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn load_tasks(&self, date: NaiveDate) -> Result<Vec<Task>, StorageError> {
        self.check_read("tasks")?;
        Ok(self.tasks(date).unwrap_or_default())
    }

    fn save_tasks(&mut self, date: NaiveDate, tasks: &[Task]) -> Result<(), StorageError> {
        self.check_write("tasks")?;
        let mut inner = self.inner.borrow_mut();
        inner.tasks.insert(date, tasks.to_vec());
        inner.saves += 1;
        Ok(())
    }

    fn load_scripts(&self) -> Result<Vec<Script>, StorageError> {
        self.check_read("scripts")?;
        Ok(self
            .scripts()
            .unwrap_or_else(|| vec![Script::builtin_default()]))
    }

    fn save_scripts(&mut self, scripts: &[Script]) -> Result<(), StorageError> {
        self.check_write("scripts")?;
        let mut inner = self.inner.borrow_mut();
        inner.scripts = Some(scripts.to_vec());
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
    }

    #[test]
    fn missing_day_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert!(store.load_tasks(day()).unwrap().is_empty());
    }

    #[test]
    fn tasks_round_trip_through_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        let created = Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap();
        let mut done = Task::new("file taxes", created);
        done.completed = true;
        let tasks = vec![Task::new("buy milk", created), done];

        store.save_tasks(day(), &tasks).unwrap();
        assert!(dir.path().join("nested/tasks_2024-05-14.json").exists());
        assert_eq!(store.load_tasks(day()).unwrap(), tasks);

        let other = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        assert!(store.load_tasks(other).unwrap().is_empty());
    }

    #[test]
    fn reads_files_with_offset_timestamps() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tasks_2024-05-14.json"),
            r#"[{"title":"standup","completed":false,"created_at":"2024-05-14T09:00:00.123456789+02:00"}]"#,
        )
        .unwrap();
        let store = FileStore::new(dir.path());
        let tasks = store.load_tasks(day()).unwrap();
        assert_eq!(tasks[0].title, "standup");
        assert_eq!(
            tasks[0].created_at.timestamp(),
            Utc.with_ymd_and_hms(2024, 5, 14, 7, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn null_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tasks_2024-05-14.json"), "null").unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.load_tasks(day()).unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("scripts.json"), "not json {{{").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.load_scripts(),
            Err(StorageError::ParseError { .. })
        ));
    }

    #[test]
    fn scripts_default_until_saved() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        assert_eq!(store.load_scripts().unwrap(), vec![Script::builtin_default()]);

        store.save_scripts(&[]).unwrap();
        assert!(store.load_scripts().unwrap().is_empty());

        let scripts = vec![Script::new("build", "make {{target}}", "")];
        store.save_scripts(&scripts).unwrap();
        assert_eq!(store.load_scripts().unwrap(), scripts);
    }

    #[test]
    fn memory_store_clones_share_contents() {
        let handle = MemoryStore::new();
        let mut store = handle.clone();
        store.save_tasks(day(), &[]).unwrap();
        assert_eq!(handle.tasks(day()), Some(vec![]));
        assert_eq!(handle.save_count(), 1);

        handle.fail_writes(true);
        assert!(store.save_scripts(&[]).is_err());
        assert_eq!(handle.save_count(), 1);
    }
}
