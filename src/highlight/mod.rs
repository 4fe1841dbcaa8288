//! Per-scene highlight records and the store that owns them.

mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::taxonomy::ElementCategory;

pub use store::{HighlightStore, HIGHLIGHTS_STORAGE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightId(Uuid);

impl HighlightId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }
}

impl Default for HighlightId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HighlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// One tagged span of scene text. `text` and `scene_id` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRecord {
    pub id: HighlightId,
    #[serde(rename = "sceneID")]
    pub scene_id: String,
    pub category: ElementCategory,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl HighlightRecord {
    /// Builds a record with trimmed `text`, or `None` when the text or scene id
    /// is blank. The scene id is kept verbatim so lookups match it exactly.
    pub fn new(scene_id: &str, category: ElementCategory, text: &str) -> Option<Self> {
        let text = text.trim();
        if scene_id.trim().is_empty() || text.is_empty() {
            return None;
        }
        Some(Self {
            id: HighlightId::new(),
            scene_id: scene_id.to_string(),
            category,
            text: text.to_string(),
            created_at: Utc::now(),
        })
    }

    fn is_valid(&self) -> bool {
        !self.scene_id.trim().is_empty() && !self.text.trim().is_empty()
    }
}
