use crate::taxonomy::ElementCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    #[default]
    Idle,
    Armed,
    ArmedWithSelection,
}

/// Transient tagging state; rebuilt per interaction and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub armed_category: Option<ElementCategory>,
    pub pending_text: String,
    pub pending_scene_id: String,
}

impl SelectionState {
    pub fn phase(&self) -> SelectionPhase {
        match self.armed_category {
            None => SelectionPhase::Idle,
            Some(_) if self.pending_text.is_empty() => SelectionPhase::Armed,
            Some(_) => SelectionPhase::ArmedWithSelection,
        }
    }

    pub(super) fn clear_pending(&mut self) {
        self.pending_text.clear();
        self.pending_scene_id.clear();
    }
}
