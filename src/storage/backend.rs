//! Diary store abstraction.
//!
//! This module defines the [`Store`] trait, the capability every form and the
//! CLI receive explicitly instead of reaching for a global. Swapping the backing
//! area (files on disk, an in-memory map in tests) never changes the callers.
//!
//! # Contract
//!
//! - Reads fail soft: a missing or unparsable entry loads as an empty sequence.
//! - Every mutation is a full read-modify-write of one storage entry.
//! - Mutating an id that does not exist is a no-op, not an error.

use crate::domain::error::Result;
use crate::domain::{DiaryPatch, DiaryRecord, NewDiary};

/// Durable, ordered collection of diary records.
///
/// # Implementations
///
/// - [`DiaryStore`](crate::storage::DiaryStore): JSON array in a single
///   [`StorageArea`](crate::storage::StorageArea) entry
///
/// # Examples
///
/// ```
/// use daybook::storage::{DiaryStore, MemoryArea, Store};
/// use daybook::{Emotion, NewDiary};
///
/// let mut store = DiaryStore::new(MemoryArea::default());
/// let created = store.append(NewDiary::new("제목", "내용", Emotion::Happy))?;
/// assert_eq!(created.id, 1);
/// assert_eq!(store.load().len(), 1);
/// # Ok::<(), daybook::DaybookError>(())
/// ```
pub trait Store {
    /// Returns every record in store order.
    ///
    /// Never fails: absent or malformed data yields an empty vector.
    fn load(&self) -> Vec<DiaryRecord>;

    /// Returns the record with the given id, if present.
    fn get(&self, id: u64) -> Option<DiaryRecord> {
        self.load().into_iter().find(|record| record.id == id)
    }

    /// Appends a new diary, assigning `max(id) + 1` and stamping `createdAt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated sequence cannot be persisted.
    fn append(&mut self, diary: NewDiary) -> Result<DiaryRecord>;

    /// Merges `patch` into the record with the given id.
    ///
    /// Returns the updated record, or `Ok(None)` when the id is absent (nothing
    /// is written in that case).
    ///
    /// # Errors
    ///
    /// Returns an error if the updated sequence cannot be persisted.
    fn update(&mut self, id: u64, patch: &DiaryPatch) -> Result<Option<DiaryRecord>>;

    /// Removes the record with the given id.
    ///
    /// Returns whether a record was removed. Removing an absent id leaves the
    /// store unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated sequence cannot be persisted.
    fn remove(&mut self, id: u64) -> Result<bool>;
}
