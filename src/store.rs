//! The cycle log store.
//!
//! Owns the date-keyed symptom log, hydrates it from a [`KeyValueStorage`]
//! when opened and writes the whole log back after every committed change.
//! Commands return the updated [`DayRecord`]; readers that need to notice
//! changes compare [`CycleLogStore::revision`] between renders.

use crate::errors::StoreResult;
use crate::models::{
    CrampsLevel, CycleLog, DateKey, DayRecord, FlowLevel, MoodType, SnapshotEntry, Symptom,
};
use crate::storage::KeyValueStorage;
use tracing::{debug, error, info, warn};

pub const STORAGE_KEY: &str = "cycle-tracker.log";

pub struct CycleLogStore<S> {
    storage: S,
    subject_id: String,
    log: CycleLog,
    revision: u64,
}

impl<S: KeyValueStorage> CycleLogStore<S> {
    pub fn open(storage: S, subject_id: impl Into<String>) -> Self {
        let log = hydrate(&storage, STORAGE_KEY);
        info!("cycle log opened with {} day(s)", log.len());
        Self {
            storage,
            subject_id: subject_id.into(),
            log,
            revision: 0,
        }
    }

    pub fn get(&self, date: DateKey) -> Option<&DayRecord> {
        self.log.get(&date)
    }

    pub fn log(&self) -> &CycleLog {
        &self.log
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Materializes a default record for `date` if the day was never visited.
    pub fn ensure_day(&mut self, date: DateKey) -> StoreResult<DayRecord> {
        match self.log.get(&date) {
            Some(record) => Ok(record.clone()),
            None => self.commit(date, DayRecord::default()),
        }
    }

    pub fn toggle(&mut self, date: DateKey, field: Symptom) -> StoreResult<DayRecord> {
        debug!("toggle {field:?} on {date}");
        self.update(date, |record| record.toggle(field))
    }

    /// Setting a level also checks the matching symptom.
    pub fn set_flow_level(&mut self, date: DateKey, level: FlowLevel) -> StoreResult<DayRecord> {
        self.update(date, |record| {
            record.flow_present = true;
            record.flow_level = Some(level);
        })
    }

    pub fn set_cramps_level(&mut self, date: DateKey, level: CrampsLevel) -> StoreResult<DayRecord> {
        self.update(date, |record| {
            record.cramps_present = true;
            record.cramps_level = Some(level);
        })
    }

    pub fn set_mood_type(&mut self, date: DateKey, mood: MoodType) -> StoreResult<DayRecord> {
        self.update(date, |record| {
            record.mood_present = true;
            record.mood_type = Some(mood);
        })
    }

    /// Resets the day to the default record. The key stays in the log.
    pub fn clear_day(&mut self, date: DateKey) -> StoreResult<DayRecord> {
        self.commit(date, DayRecord::default())
    }

    pub fn export_snapshot(&self) -> Vec<SnapshotEntry> {
        self.log
            .iter()
            .map(|(date, record)| SnapshotEntry {
                subject_id: self.subject_id.clone(),
                date: *date,
                record: record.clone(),
            })
            .collect()
    }

    fn update(&mut self, date: DateKey, apply: impl FnOnce(&mut DayRecord)) -> StoreResult<DayRecord> {
        let mut record = self.log.get(&date).cloned().unwrap_or_default();
        apply(&mut record);
        self.commit(date, record)
    }

    fn commit(&mut self, date: DateKey, record: DayRecord) -> StoreResult<DayRecord> {
        let previous = self.log.insert(date, record.clone());
        if let Err(err) = self.persist() {
            error!("failed to persist cycle log: {err}");
            match previous {
                Some(previous) => {
                    self.log.insert(date, previous);
                }
                None => {
                    self.log.remove(&date);
                }
            }
            return Err(err);
        }
        self.revision += 1;
        Ok(record)
    }

    fn persist(&self) -> StoreResult<()> {
        let payload = serde_json::to_string_pretty(&self.log)?;
        self.storage.write(STORAGE_KEY, &payload)
    }
}

fn hydrate<S: KeyValueStorage>(storage: &S, key: &str) -> CycleLog {
    match storage.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(log) => log,
            Err(err) => {
                warn!("ignoring malformed cycle log under '{key}': {err}");
                CycleLog::default()
            }
        },
        Ok(None) => CycleLog::default(),
        Err(err) => {
            warn!("failed to read cycle log under '{key}': {err}");
            CycleLog::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use crate::storage::{FileStorage, MemoryStorage};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn day(raw: &str) -> DateKey {
        raw.parse().unwrap()
    }

    fn memory_store() -> CycleLogStore<MemoryStorage> {
        CycleLogStore::open(MemoryStorage::new(), "local-user")
    }

    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl KeyValueStorage for FlakyStorage {
        fn read(&self, key: &str) -> StoreResult<Option<String>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StoreError::Io(std::io::Error::other("permission denied")));
            }
            self.inner.read(key)
        }

        fn write(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.inner.write(key, value)
        }
    }

    #[test]
    fn ensure_day_materializes_default_record() {
        let mut store = memory_store();
        let date = day("2024-03-10");
        assert!(store.get(date).is_none());

        store.ensure_day(date).unwrap();
        assert_eq!(store.get(date), Some(&DayRecord::default()));

        store.ensure_day(date).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut store = memory_store();
        let date = day("2024-03-11");
        for field in [Symptom::Flow, Symptom::Cramps, Symptom::Mood] {
            let before = store.get(date).cloned().unwrap_or_default();
            store.toggle(date, field).unwrap();
            let after = store.toggle(date, field).unwrap();
            assert_eq!(after, before);
        }
    }

    #[test]
    fn toggle_on_unseen_date_creates_it() {
        let mut store = memory_store();
        let record = store.toggle(day("2024-01-01"), Symptom::Mood).unwrap();
        assert!(record.mood_present);
        assert!(!record.flow_present);
    }

    #[test]
    fn clear_day_keeps_key() {
        let mut store = memory_store();
        let date = day("2024-03-12");
        store.set_flow_level(date, FlowLevel::Heavy).unwrap();
        store.set_cramps_level(date, CrampsLevel::new(8).unwrap()).unwrap();

        let cleared = store.clear_day(date).unwrap();
        assert_eq!(cleared, DayRecord::default());
        assert_eq!(store.get(date), Some(&DayRecord::default()));
    }

    #[test]
    fn setting_level_checks_symptom() {
        let mut store = memory_store();
        let date = day("2024-03-13");
        let record = store.set_mood_type(date, MoodType::Good).unwrap();
        assert!(record.mood_present);
        assert_eq!(record.effective_mood(), Some(MoodType::Good));

        let record = store.toggle(date, Symptom::Mood).unwrap();
        assert!(!record.mood_present);
        assert_eq!(record.mood_type, Some(MoodType::Good));
    }

    #[test]
    fn snapshot_has_one_entry_per_materialized_day() {
        let mut store = memory_store();
        store.ensure_day(day("2024-03-01")).unwrap();
        store.toggle(day("2024-03-02"), Symptom::Flow).unwrap();
        store.toggle(day("2024-03-02"), Symptom::Cramps).unwrap();
        store.clear_day(day("2024-03-03")).unwrap();

        let snapshot = store.export_snapshot();
        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.iter().all(|entry| entry.subject_id == "local-user"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn heavy_flow_shows_up_in_snapshot() {
        let mut store = memory_store();
        let date = day("2024-03-10");
        store.toggle(date, Symptom::Flow).unwrap();
        store.set_flow_level(date, FlowLevel::Heavy).unwrap();

        let snapshot = store.export_snapshot();
        assert_eq!(snapshot.len(), 1);
        let json = serde_json::to_value(&snapshot[0]).unwrap();
        assert_eq!(json["date"], "2024-03-10");
        assert_eq!(json["record"]["flowPresent"], true);
        assert_eq!(json["record"]["flowLevel"], "heavy");
    }

    #[test]
    fn reopening_restores_the_same_log() {
        let storage = MemoryStorage::new();
        let original = {
            let mut store = CycleLogStore::open(&storage, "local-user");
            store.set_flow_level(day("2024-02-27"), FlowLevel::Regular).unwrap();
            store.set_cramps_level(day("2024-02-28"), CrampsLevel::new(3).unwrap()).unwrap();
            store.toggle(day("2024-02-28"), Symptom::Cramps).unwrap();
            store.set_mood_type(day("2024-02-29"), MoodType::Fair).unwrap();
            store.log().clone()
        };

        let reopened = CycleLogStore::open(&storage, "local-user");
        assert_eq!(reopened.log(), &original);
    }

    #[test]
    fn reopening_from_disk_restores_the_same_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CycleLogStore::open(FileStorage::new(dir.path()), "local-user");
        store.set_flow_level(day("2024-05-01"), FlowLevel::Light).unwrap();
        let original = store.log().clone();
        drop(store);

        let reopened = CycleLogStore::open(FileStorage::new(dir.path()), "local-user");
        assert_eq!(reopened.log(), &original);
    }

    #[test]
    fn malformed_storage_hydrates_empty_log() {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, "{ not json");
        let store = CycleLogStore::open(storage, "local-user");
        assert!(store.is_empty());
    }

    #[test]
    fn unreadable_storage_opens_empty_usable_store() {
        let storage = FlakyStorage::default();
        storage.inner.write(STORAGE_KEY, r#"{"2024-03-01":{"flowPresent":true}}"#).unwrap();
        storage.fail_reads.store(true, Ordering::SeqCst);

        let mut store = CycleLogStore::open(&storage, "local-user");
        assert!(store.is_empty());

        let record = store.toggle(day("2024-03-10"), Symptom::Flow).unwrap();
        assert!(record.flow_present);
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn out_of_range_stored_level_is_treated_as_malformed() {
        let raw = r#"{"2024-03-10":{"flowPresent":false,"crampsPresent":true,"crampsLevel":42,"moodPresent":false}}"#;
        let store = CycleLogStore::open(MemoryStorage::with_entry(STORAGE_KEY, raw), "local-user");
        assert!(store.is_empty());
    }

    #[test]
    fn failed_write_rolls_back() {
        let storage = FlakyStorage::default();
        let mut store = CycleLogStore::open(&storage, "local-user");
        let date = day("2024-03-10");
        store.set_flow_level(date, FlowLevel::Light).unwrap();
        let before = store.log().clone();

        storage.fail_writes.store(true, Ordering::SeqCst);
        assert!(store.set_flow_level(date, FlowLevel::Heavy).is_err());
        assert!(store.ensure_day(day("2024-03-11")).is_err());

        assert_eq!(store.log(), &before);
        assert_eq!(store.revision(), 1);
    }
}
