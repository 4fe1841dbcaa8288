use crate::notification::{CommitListeners, CommitNotice};
use crate::storage::{SettingsStore, StorageResult};
use crate::taxonomy::{all_categories, ElementCategory};

use super::{HighlightId, HighlightRecord};

/// Settings blob holding every highlight as a JSON array. Bump the suffix on format changes.
pub const HIGHLIGHTS_STORAGE_KEY: &str = "scene_highlights_v1";

/// Sole owner and mutator of highlight records. Every mutation writes the
/// full collection through to the settings blob.
pub struct HighlightStore {
    records: Vec<HighlightRecord>,
    settings: Box<dyn SettingsStore>,
    listeners: CommitListeners,
}

impl HighlightStore {
    /// Opens the store and loads whatever the blob holds.
    pub fn load(settings: Box<dyn SettingsStore>) -> Self {
        let records = read_records(settings.as_ref());
        tracing::debug!(count = records.len(), "loaded highlight records");
        Self {
            records,
            settings,
            listeners: CommitListeners::new(),
        }
    }

    /// Drops in-memory records and re-reads the blob.
    pub fn reload(&mut self) {
        self.records = read_records(self.settings.as_ref());
    }

    pub fn on_committed<F>(&mut self, listener: F)
    where
        F: FnMut(&CommitNotice) + 'static,
    {
        self.listeners.subscribe(listener);
    }

    pub fn add(
        &mut self,
        scene_id: &str,
        category: ElementCategory,
        text: &str,
    ) -> Option<HighlightRecord> {
        let Some(record) = HighlightRecord::new(scene_id, category, text) else {
            tracing::debug!(scene_id, "ignoring highlight with blank text or scene");
            return None;
        };

        tracing::info!(
            id = %record.id,
            scene_id = %record.scene_id,
            category = ?record.category,
            "add highlight"
        );
        self.records.push(record.clone());
        self.persist();
        self.listeners.send(&CommitNotice {
            category: record.category,
            text: record.text.clone(),
            scene_id: record.scene_id.clone(),
        });
        Some(record)
    }

    /// Returns whether a record was removed. Unknown ids are a no-op.
    pub fn remove(&mut self, id: HighlightId) -> bool {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return false;
        };
        let record = self.records.remove(index);
        tracing::info!(id = %record.id, scene_id = %record.scene_id, "remove highlight");
        self.persist();
        true
    }

    /// Returns how many records were removed.
    pub fn clear_scene(&mut self, scene_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.scene_id != scene_id);
        let removed = before - self.records.len();
        if removed > 0 {
            tracing::info!(scene_id, removed, "clear scene highlights");
            self.persist();
        }
        removed
    }

    pub fn records(&self) -> &[HighlightRecord] {
        &self.records
    }

    pub fn records_for_scene(&self, scene_id: &str) -> Vec<HighlightRecord> {
        self.records
            .iter()
            .filter(|record| record.scene_id == scene_id)
            .cloned()
            .collect()
    }

    /// Non-zero record counts per category for one scene, in taxonomy order.
    pub fn category_counts(&self, scene_id: &str) -> Vec<(ElementCategory, usize)> {
        all_categories()
            .iter()
            .filter_map(|&category| {
                let count = self
                    .records
                    .iter()
                    .filter(|record| record.scene_id == scene_id && record.category == category)
                    .count();
                (count > 0).then_some((category, count))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn save(&self) -> StorageResult<()> {
        let serialized = serde_json::to_string(&self.records)?;
        self.settings.write(HIGHLIGHTS_STORAGE_KEY, &serialized)
    }

    fn persist(&self) {
        if let Err(err) = self.save() {
            tracing::warn!(?err, "failed to persist highlights; keeping in-memory state");
        }
    }
}

impl std::fmt::Debug for HighlightStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightStore")
            .field("records", &self.records.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}

fn read_records(settings: &dyn SettingsStore) -> Vec<HighlightRecord> {
    let serialized = match settings.read(HIGHLIGHTS_STORAGE_KEY) {
        Ok(Some(serialized)) => serialized,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(?err, "failed to read highlights; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HighlightRecord>>(&serialized) {
        Ok(records) => {
            let total = records.len();
            let records: Vec<_> = records.into_iter().filter(HighlightRecord::is_valid).collect();
            if records.len() != total {
                tracing::warn!(
                    dropped = total - records.len(),
                    "dropped persisted highlights with blank text or scene"
                );
            }
            records
        }
        Err(err) => {
            tracing::warn!(?err, "failed to parse highlights; starting empty");
            Vec::new()
        }
    }
}
