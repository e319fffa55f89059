use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{PlannerError, Result};
use crate::model::TaskList;

/// Schema tag the task list is stored under.
pub const TASKS_KEY: &str = "tasks_v1";

/// Flat string key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform data directory.
    pub fn in_data_dir() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "MonthPlanner").ok_or(PlannerError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes a sibling `.json.tmp` and renames it over the target.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the whole task list under one key.
pub struct TaskRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, TASKS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored tasks, or the sample set when nothing usable is stored.
    pub fn load(&self, today: NaiveDate) -> TaskList {
        match self.try_load() {
            Ok(Some(tasks)) => {
                log::info!("loaded {} tasks from '{}'", tasks.len(), self.key);
                tasks
            }
            Ok(None) => {
                log::info!("no stored tasks under '{}', using samples", self.key);
                TaskList::sample(today)
            }
            Err(e) => {
                log::warn!("ignoring stored tasks under '{}': {e}", self.key);
                TaskList::sample(today)
            }
        }
    }

    fn try_load(&self) -> Result<Option<TaskList>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let tasks: TaskList = serde_json::from_str(&raw)?;
        Ok(Some(tasks))
    }

    /// Persist the full list.
    pub fn save(&mut self, tasks: &TaskList) -> Result<()> {
        let json = serde_json::to_string(tasks)?;
        self.store.set(&self.key, &json)?;
        log::debug!("saved {} tasks under '{}'", tasks.len(), self.key);
        Ok(())
    }
}
