//! Small persisted key-value store, organised in named groups.
//!
//! On disk it is a single JSON object: `{ "<group>": { "<key>": <value> } }`.
//! Edits are staged on an [`Editor`] and written by `commit()` through a
//! temp file + rename, so a crash never leaves half of an edit behind.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::warn;

use crate::errors::{AppError, AppResult};

pub type Group = BTreeMap<String, Value>;
type Document = BTreeMap<String, Group>;

pub struct Preferences {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl Preferences {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> AppResult<Document> {
        if !self.path.exists() {
            return Ok(Document::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Document::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, doc: &Document) -> AppResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(serde_json::to_string_pretty(doc)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Snapshot of one group (empty when absent).
    pub fn group(&self, name: &str) -> AppResult<Group> {
        Ok(self.read_all()?.remove(name).unwrap_or_default())
    }

    pub fn get_string(&self, group: &str, key: &str) -> AppResult<Option<String>> {
        Ok(self
            .group(group)?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    pub fn get_bool(&self, group: &str, key: &str) -> AppResult<Option<bool>> {
        Ok(self.group(group)?.get(key).and_then(Value::as_bool))
    }

    pub fn edit(&self, group: &str) -> Editor<'_> {
        Editor {
            prefs: self,
            group: group.to_string(),
            clear: false,
            changes: Vec::new(),
        }
    }
}

/// Staged changes to one group; nothing is written until `commit()`.
pub struct Editor<'a> {
    prefs: &'a Preferences,
    group: String,
    clear: bool,
    changes: Vec<(String, Option<Value>)>,
}

impl Editor<'_> {
    pub fn put_string(mut self, key: &str, value: &str) -> Self {
        self.changes
            .push((key.to_string(), Some(Value::String(value.to_string()))));
        self
    }

    pub fn put_bool(mut self, key: &str, value: bool) -> Self {
        self.changes.push((key.to_string(), Some(Value::Bool(value))));
        self
    }

    pub fn remove(mut self, key: &str) -> Self {
        self.changes.push((key.to_string(), None));
        self
    }

    /// Drop every key of the group before applying the other changes.
    pub fn clear(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn commit(self) -> AppResult<()> {
        let _guard = self.prefs.write_lock.lock();
        // an unparseable file is replaced, not kept as a permanent failure
        let mut doc = match self.prefs.read_all() {
            Ok(doc) => doc,
            Err(AppError::Prefs(e)) => {
                warn!(
                    path = %self.prefs.path.display(),
                    error = %e,
                    "discarding unreadable preferences"
                );
                Document::new()
            }
            Err(e) => return Err(e),
        };

        let group = doc.entry(self.group.clone()).or_default();
        if self.clear {
            group.clear();
        }
        for (key, value) in self.changes {
            match value {
                Some(v) => {
                    group.insert(key, v);
                }
                None => {
                    group.remove(&key);
                }
            }
        }
        if group.is_empty() {
            doc.remove(&self.group);
        }

        self.prefs.write_all(&doc)
    }
}
