//! Generic JSON-file repository
//!
//! Records live in memory in a `RwLock<HashMap>` keyed by ID and are written
//! back as a whole file on `save`. Queries return records ordered by
//! [`Record::sort_key`] so output and files are stable across runs.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{FairshareError, FairshareResult};

use super::file_io::{read_json, write_json_atomic};

/// A record that can be kept in a [`Repository`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash;
    type SortKey: Ord;

    fn id(&self) -> Self::Id;

    /// Key giving the canonical order of records
    fn sort_key(&self) -> Self::SortKey;
}

/// On-disk layout of a repository file
#[derive(Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct RecordFile<T> {
    #[serde(default)]
    records: Vec<T>,
}

impl<T> Default for RecordFile<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// Repository for one record type backed by one JSON file
pub struct Repository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> FairshareResult<RwLockReadGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .read()
            .map_err(|e| FairshareError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FairshareResult<RwLockWriteGuard<'_, HashMap<T::Id, T>>> {
        self.data
            .write()
            .map_err(|e| FairshareError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn sorted(mut records: Vec<T>) -> Vec<T> {
        records.sort_by_key(T::sort_key);
        records
    }

    /// Replace the in-memory records with the file's contents
    pub fn load(&self) -> FairshareResult<()> {
        let file: RecordFile<T> = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        data.extend(file.records.into_iter().map(|record| (record.id(), record)));
        Ok(())
    }

    /// Write all records to disk
    pub fn save(&self) -> FairshareResult<()> {
        let records = Self::sorted(self.read()?.values().cloned().collect());
        write_json_atomic(&self.path, &RecordFile { records })
    }

    pub fn get(&self, id: T::Id) -> FairshareResult<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    pub fn get_all(&self) -> FairshareResult<Vec<T>> {
        Ok(Self::sorted(self.read()?.values().cloned().collect()))
    }

    /// Records matching a predicate, in canonical order
    pub fn filter<F>(&self, predicate: F) -> FairshareResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(Self::sorted(
            self.read()?
                .values()
                .filter(|record| predicate(record))
                .cloned()
                .collect(),
        ))
    }

    /// First record (in canonical order) matching a predicate
    pub fn find<F>(&self, predicate: F) -> FairshareResult<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.filter(predicate)?.into_iter().next())
    }

    /// Insert or replace a record
    pub fn upsert(&self, record: T) -> FairshareResult<()> {
        self.write()?.insert(record.id(), record);
        Ok(())
    }

    /// Remove a record; false if it was not present
    pub fn delete(&self, id: T::Id) -> FairshareResult<bool> {
        Ok(self.write()?.remove(&id).is_some())
    }

    /// Remove every record matching a predicate and return them
    pub fn delete_where<F>(&self, predicate: F) -> FairshareResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut data = self.write()?;
        let ids: Vec<T::Id> = data
            .values()
            .filter(|record| predicate(record))
            .map(T::id)
            .collect();

        let removed = ids.iter().filter_map(|id| data.remove(id)).collect();
        Ok(Self::sorted(removed))
    }

    pub fn count(&self) -> FairshareResult<usize> {
        Ok(self.read()?.len())
    }
}
