//! Generic JSON-file record store.
//!
//! # Responsibility
//! - Load/save one record sequence and provide id-based lookup and delete.
//! - Give kind-specific stores a commit path that only updates memory after
//!   the backing file was replaced.
//!
//! # Invariants
//! - Records keep insertion order; nothing is ever sorted or renumbered.
//! - Loaded files must have positive, unique ids.

use super::json_file::{read_records, write_records};
use super::{StoreError, StoreResult};
use crate::model::{local_timestamp, Record, RecordId};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Source of `created_at` / `updated_at` values.
pub type Clock = fn() -> String;

/// Ordered records persisted as one JSON array file.
#[derive(Debug, Clone)]
pub struct JsonRecordStore<R> {
    path: PathBuf,
    records: Vec<R>,
    clock: Clock,
}

impl<R> JsonRecordStore<R>
where
    R: Record + Clone + Serialize + DeserializeOwned,
{
    /// Opens a store over `path`, loading it when the file exists.
    ///
    /// # Errors
    /// - `Parse` when the file is not a JSON array of records.
    /// - `InvalidData` when ids are zero or duplicated.
    /// - `Io` when the file exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            records: Vec::new(),
            clock: local_timestamp,
        };
        store.load()?;
        Ok(store)
    }

    /// Replaces the timestamp source. Used to make timestamps deterministic.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Re-reads the backing file, replacing the in-memory sequence.
    ///
    /// A missing file yields an empty store.
    pub fn load(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();
        let loaded = read_records::<R>(&self.path).and_then(|records| {
            let records = records.unwrap_or_default();
            check_ids(&records)?;
            Ok(records)
        });

        match loaded {
            Ok(records) => {
                info!(
                    "event=store_load module=store status=ok kind={} count={} duration_ms={}",
                    R::KIND,
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                self.records = records;
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error kind={} path={} error={}",
                    R::KIND,
                    self.path.display(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Writes the whole sequence to the backing file.
    pub fn save(&self) -> StoreResult<()> {
        persist(&self.path, &self.records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[R] {
        &self.records
    }

    /// Records accepted by `predicate`, in insertion order.
    pub fn list_where(&self, mut predicate: impl FnMut(&R) -> bool) -> Vec<&R> {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    pub fn find_by_id(&self, id: RecordId) -> StoreResult<&R> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound { kind: R::KIND, id })
    }

    /// Id the next inserted record receives.
    ///
    /// Fails with `InvalidData` when the highest live id is `u64::MAX`.
    pub fn next_id(&self) -> StoreResult<RecordId> {
        let highest = self.records.iter().map(Record::id).max().unwrap_or(0);
        highest.checked_add(1).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "{} id {highest} leaves no room for a new id",
                R::KIND
            ))
        })
    }

    /// Removes the record with `id` and returns it.
    pub fn delete(&mut self, id: RecordId) -> StoreResult<R> {
        let index = self.position(id)?;
        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        info!(
            "event=record_delete module=store status=ok kind={} id={id} count={}",
            R::KIND,
            self.records.len()
        );
        Ok(removed)
    }

    pub(crate) fn now(&self) -> String {
        (self.clock)()
    }

    /// Appends `record` and flushes.
    pub(crate) fn insert(&mut self, record: R) -> StoreResult<R> {
        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;
        info!(
            "event=record_add module=store status=ok kind={} id={} count={}",
            R::KIND,
            record.id(),
            self.records.len()
        );
        Ok(record)
    }

    /// Applies `change` to the record with `id` and flushes.
    pub(crate) fn modify(
        &mut self,
        id: RecordId,
        change: impl FnOnce(&mut R),
    ) -> StoreResult<R> {
        let index = self.position(id)?;
        let mut next = self.records.clone();
        change(&mut next[index]);
        let updated = next[index].clone();
        self.commit(next)?;
        Ok(updated)
    }

    fn position(&self, id: RecordId) -> StoreResult<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound { kind: R::KIND, id })
    }

    fn commit(&mut self, next: Vec<R>) -> StoreResult<()> {
        persist(&self.path, &next)?;
        self.records = next;
        Ok(())
    }
}

fn persist<R: Record + Serialize>(path: &Path, records: &[R]) -> StoreResult<()> {
    let started_at = Instant::now();
    match write_records(path, records) {
        Ok(()) => {
            info!(
                "event=store_save module=store status=ok kind={} count={} duration_ms={}",
                R::KIND,
                records.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=store_save module=store status=error kind={} path={} error={}",
                R::KIND,
                path.display(),
                err
            );
            Err(err)
        }
    }
}

fn check_ids<R: Record>(records: &[R]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.id();
        if id == 0 {
            return Err(StoreError::InvalidData(format!(
                "{} id must be positive, found 0",
                R::KIND
            )));
        }
        if !seen.insert(id) {
            return Err(StoreError::InvalidData(format!(
                "duplicate {} id {id}",
                R::KIND
            )));
        }
    }
    Ok(())
}
