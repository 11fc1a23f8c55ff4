//! JSON diary store.
//!
//! [`DiaryStore`] keeps the whole diary list as one pretty-printed JSON array in
//! a single [`StorageArea`] entry. Every mutation re-reads the entry, applies
//! the change and writes the full array back.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(n), parses the entire entry on every call
//! - **Write**: O(n), serializes and writes the entire list
//! - **Best for**: hundreds of diaries written by hand, one writer at a time

use crate::domain::error::{DaybookError, Result};
use crate::domain::{DiaryPatch, DiaryRecord, NewDiary};
use crate::storage::area::StorageArea;
use crate::storage::backend::Store;

/// Entry key the diary list is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "diaries";

/// Diary store backed by one JSON entry of a storage area.
///
/// # File Format
///
/// ```json
/// [
///   {
///     "id": 1,
///     "title": "첫 번째 일기",
///     "content": "오늘은 맑음",
///     "emotion": "HAPPY",
///     "createdAt": "2024-05-01T09:30:00Z"
///   }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct DiaryStore<A> {
    area: A,
    key: String,
}

impl<A: StorageArea> DiaryStore<A> {
    /// Creates a store over `area` using [`DEFAULT_STORAGE_KEY`].
    pub fn new(area: A) -> Self {
        Self::with_key(area, DEFAULT_STORAGE_KEY)
    }

    /// Creates a store over `area` using a custom entry key.
    pub fn with_key(area: A, key: impl Into<String>) -> Self {
        Self {
            area,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub const fn area(&self) -> &A {
        &self.area
    }

    pub fn into_area(self) -> A {
        self.area
    }

    /// Reads and parses the entry, discarding anything unreadable.
    fn read_all(&self) -> Vec<DiaryRecord> {
        let raw = match self.area.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored diaries, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read diaries, treating store as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<DiaryRecord>>(&raw) {
            Ok(records) => {
                tracing::debug!(count = records.len(), "loaded diaries");
                records
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "malformed diary data discarded");
                Vec::new()
            }
        }
    }

    fn write_all(&mut self, records: &[DiaryRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| DaybookError::Storage(format!("failed to serialize JSON: {e}")))?;
        self.area.set_item(&self.key, &json)?;
        tracing::debug!(count = records.len(), "diaries saved");
        Ok(())
    }

    /// Returns `max(id) + 1`, or 1 for an empty list.
    fn next_id(records: &[DiaryRecord]) -> u64 {
        records
            .iter()
            .map(|record| record.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }
}

impl<A: StorageArea> Store for DiaryStore<A> {
    fn load(&self) -> Vec<DiaryRecord> {
        let _span = tracing::debug_span!("diary_load", key = %self.key).entered();
        self.read_all()
    }

    fn append(&mut self, diary: NewDiary) -> Result<DiaryRecord> {
        let _span = tracing::debug_span!("diary_append",
            title = %diary.title,
            emotion = %diary.emotion
        ).entered();

        let mut records = self.read_all();
        let record = diary.into_record(Self::next_id(&records), chrono::Utc::now());
        records.push(record.clone());
        self.write_all(&records)?;

        tracing::debug!(diary_id = record.id, "diary appended");
        Ok(record)
    }

    fn update(&mut self, id: u64, patch: &DiaryPatch) -> Result<Option<DiaryRecord>> {
        let _span = tracing::debug_span!("diary_update", diary_id = id).entered();

        let mut records = self.read_all();
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            tracing::debug!("diary not found, update skipped");
            return Ok(None);
        };
        patch.apply_to(record);
        let updated = record.clone();
        self.write_all(&records)?;

        tracing::debug!("diary updated");
        Ok(Some(updated))
    }

    fn remove(&mut self, id: u64) -> Result<bool> {
        let _span = tracing::debug_span!("diary_remove", diary_id = id).entered();

        let mut records = self.read_all();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            tracing::debug!("diary not found, remove skipped");
            return Ok(false);
        }
        self.write_all(&records)?;

        tracing::debug!(remaining = records.len(), "diary removed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Emotion;
    use crate::storage::area::MemoryArea;

    fn draft(title: &str) -> NewDiary {
        NewDiary::new(title, "내용", Emotion::Happy)
    }

    fn stored(ids: &[u64]) -> MemoryArea {
        let records: Vec<DiaryRecord> = ids
            .iter()
            .map(|&id| draft(&format!("일기 {id}")).into_record(id, chrono::Utc::now()))
            .collect();
        MemoryArea::with_item(DEFAULT_STORAGE_KEY, serde_json::to_string(&records).unwrap())
    }

    #[test]
    fn sequential_appends_assign_one_to_n() {
        let mut store = DiaryStore::new(MemoryArea::default());
        for n in 1..=20 {
            assert_eq!(store.append(draft("a")).unwrap().id, n);
        }
        let ids: Vec<u64> = store.load().iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn append_uses_max_plus_one_not_first_gap() {
        let mut store = DiaryStore::new(stored(&[1, 3]));
        assert_eq!(store.append(draft("b")).unwrap().id, 4);
    }

    #[test]
    fn append_stamps_creation_time() {
        let mut store = DiaryStore::new(MemoryArea::default());
        let before = chrono::Utc::now();
        let record = store.append(draft("a")).unwrap();
        let after = chrono::Utc::now();
        assert!(record.created_at >= before && record.created_at <= after);
        assert_eq!(record.retrospect, None);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = DiaryStore::new(stored(&[1, 2]));
        assert!(store.remove(1).unwrap());
        let after_first = store.load();
        assert!(!store.remove(1).unwrap());
        assert!(!store.remove(42).unwrap());
        assert_eq!(store.load(), after_first);
    }

    #[test]
    fn update_merges_fields_and_ignores_missing_ids() {
        let mut store = DiaryStore::new(stored(&[1]));
        let created_at = store.load()[0].created_at;

        let patch = DiaryPatch {
            content: Some("바뀐 내용".into()),
            ..DiaryPatch::default()
        };
        let updated = store.update(1, &patch).unwrap().unwrap();
        assert_eq!(updated.content, "바뀐 내용");
        assert_eq!(updated.title, "일기 1");
        assert_eq!(updated.created_at, created_at);
        assert_eq!(store.load(), vec![updated]);

        assert_eq!(store.update(9, &patch).unwrap(), None);
    }

    #[test]
    fn mixed_operations_match_in_memory_model() {
        let mut store = DiaryStore::new(MemoryArea::default());
        let mut model: Vec<DiaryRecord> = Vec::new();

        for title in ["월", "화", "수", "목"] {
            model.push(store.append(draft(title)).unwrap());
        }

        assert!(store.remove(2).unwrap());
        model.retain(|record| record.id != 2);

        let patch = DiaryPatch {
            title: Some("수요일".into()),
            emotion: Some(Emotion::Sad),
            ..DiaryPatch::default()
        };
        let updated = store.update(3, &patch).unwrap().unwrap();
        patch.apply_to(model.iter_mut().find(|r| r.id == 3).unwrap());
        assert_eq!(Some(&updated), model.iter().find(|r| r.id == 3));

        let retro = DiaryPatch::retrospect("다음 주에는 일찍 자기");
        store.update(1, &retro).unwrap();
        retro.apply_to(&mut model[0]);

        model.push(store.append(draft("금")).unwrap());
        assert_eq!(model.last().map(|r| r.id), Some(5));

        assert!(store.remove(4).unwrap());
        model.retain(|record| record.id != 4);
        assert!(!store.remove(4).unwrap());
        assert_eq!(store.update(2, &patch).unwrap(), None);

        assert_eq!(store.load(), model);
        let ids: Vec<u64> = store.load().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn malformed_entry_loads_empty() {
        let store = DiaryStore::new(MemoryArea::with_item(DEFAULT_STORAGE_KEY, "{not json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn append_over_malformed_entry_starts_fresh() {
        let mut store = DiaryStore::new(MemoryArea::with_item(DEFAULT_STORAGE_KEY, "[{\"id\":"));
        assert_eq!(store.append(draft("a")).unwrap().id, 1);
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn custom_key_is_isolated_from_default() {
        let mut store = DiaryStore::with_key(MemoryArea::default(), "drafts");
        store.append(draft("a")).unwrap();
        let area = store.into_area();
        assert!(area.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
        assert!(area.get_item("drafts").unwrap().is_some());
    }
}
