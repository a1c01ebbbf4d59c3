use dirs::data_local_dir;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::model::{AppState, Task};

const TASKS_FILE: &str = "tasks.txt";
const STATE_FILE: &str = "state.json";
const DATA_DIR_ENV: &str = "DOTHINGS_DIR";

/// Resolves the data directory: explicit path, then `$DOTHINGS_DIR`, then the
/// platform data dir (e.g. `~/.local/share/dothings`).
pub fn data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    let mut base = data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push("dothings");
    base
}

/// Line-oriented task file plus the JSON state file, both under one directory.
#[derive(Clone, Debug)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.dir.join(TASKS_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    /// Loads every well-formed task line. A missing file is an empty list; lines
    /// that are malformed or not valid UTF-8 are skipped.
    pub fn load_tasks(&self) -> Result<Vec<Task>, StorageError> {
        let path = self.tasks_path();
        let Some(bytes) = read_optional(&path)? else {
            return Ok(vec![]);
        };

        let mut tasks = Vec::new();
        for (number, raw) in bytes.split(|&b| b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(err) => {
                    warn!(line = number + 1, %err, "skipping task line");
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match Task::from_line(line) {
                Ok(task) => tasks.push(task),
                Err(err) => warn!(line = number + 1, %err, "skipping task line"),
            }
        }
        debug!(count = tasks.len(), path = %path.display(), "loaded tasks");
        Ok(tasks)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let mut text = String::new();
        for task in tasks {
            text.push_str(&task.to_line());
            text.push('\n');
        }
        self.write(&self.tasks_path(), text.as_bytes())
    }

    /// Unreadable or invalid state falls back to defaults.
    pub fn load_state(&self) -> AppState {
        let path = self.state_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return AppState::default(),
            Err(err) => {
                warn!(%err, path = %path.display(), "could not read state, using defaults");
                return AppState::default();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            warn!(%err, path = %path.display(), "invalid state, using defaults");
            AppState::default()
        })
    }

    pub fn save_state(&self, state: &AppState) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(state)?;
        self.write(&self.state_path(), &bytes)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(path, bytes).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
