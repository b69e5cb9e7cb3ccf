use super::DataStore;
use crate::error::{Result, TodoError};
use crate::model::{Record, RecordId};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const EMPTY_COLLECTION: &str = "[]";

/// File-backed store: one JSON array per collection, loaded on open and
/// rewritten in full on close.
pub struct FileStore<T> {
    name: String,
    path: PathBuf,
    items: BTreeMap<RecordId, T>,
    pretty: bool,
}

impl<T: Record> FileStore<T> {
    /// Open the collection `name` stored at `<dir>/<name>.json`.
    ///
    /// A missing file is created holding an empty array. An unreadable or
    /// unparseable file is an error: the caller cannot work with it.
    pub fn open<P: AsRef<Path>>(dir: P, name: &str) -> Result<Self> {
        let path = dir.as_ref().join(format!("{}.json", name));
        let items = load_items::<T>(&path)?;
        tracing::debug!(
            collection = name,
            path = %path.display(),
            count = items.len(),
            "loaded collection"
        );
        Ok(Self {
            name: name.to_string(),
            path,
            items,
            pretty: false,
        })
    }

    /// Open the collection named after the record type (`tasks`, `categories`).
    pub fn for_record<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::open(dir, T::KIND.collection())
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn serialize(&self) -> Result<String> {
        let records: Vec<&T> = self.items.values().collect();
        let content = if self.pretty {
            serde_json::to_string_pretty(&records)
        } else {
            serde_json::to_string(&records)
        };
        content.map_err(TodoError::Serialization)
    }
}

impl<T: Record> DataStore<T> for FileStore<T> {
    fn save_item(&mut self, id: RecordId, item: T) -> Result<()> {
        self.items.insert(id, item);
        Ok(())
    }

    fn remove_item(&mut self, id: RecordId) -> Result<()> {
        self.items.remove(&id);
        Ok(())
    }

    fn get_item(&self, id: RecordId) -> Result<T> {
        self.items
            .get(&id)
            .cloned()
            .ok_or(TodoError::ItemNotFound(id))
    }

    fn get_items(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn close(&mut self) -> Result<()> {
        let content = self.serialize()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }

        // Write next to the target, then rename over it
        let tmp_path = self
            .path
            .with_file_name(format!(".{}-{}.tmp", self.name, std::process::id()));
        let written = fs::write(&tmp_path, content).and_then(|_| fs::rename(&tmp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(TodoError::Io(e));
        }

        tracing::debug!(
            collection = %self.name,
            path = %self.path.display(),
            count = self.items.len(),
            "flushed collection"
        );
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(TodoError::Io)?;
    }
    Ok(())
}

fn load_items<T: Record>(path: &Path) -> Result<BTreeMap<RecordId, T>> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        fs::write(path, EMPTY_COLLECTION).map_err(TodoError::Io)?;
        tracing::info!(path = %path.display(), "created empty collection file");
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path).map_err(TodoError::Io)?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let records: Vec<T> = serde_json::from_str(&content).map_err(|source| TodoError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(key_by_id(records))
}

/// Key records by their own id. The first record claiming an id keeps it;
/// records with id 0 or a duplicate id get the next id past the highest one.
fn key_by_id<T: Record>(records: Vec<T>) -> BTreeMap<RecordId, T> {
    let mut items = BTreeMap::new();
    let mut displaced = Vec::new();

    for record in records {
        let id = record.id();
        if id == 0 || items.contains_key(&id) {
            displaced.push(record);
        } else {
            items.insert(id, record);
        }
    }

    for mut record in displaced {
        let old_id = record.id();
        let new_id = items.keys().next_back().map_or(1, |last| last + 1);
        tracing::warn!(
            kind = %T::KIND,
            old_id,
            new_id,
            "renumbered record with a missing or duplicate id"
        );
        record.set_id(new_id);
        items.insert(new_id, record);
    }

    items
}
