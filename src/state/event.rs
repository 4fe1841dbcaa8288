use crate::taxonomy::ElementCategory;

use super::SelectionPhase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    ArmCategory(ElementCategory),
    Disarm,
    ReportSelection { text: String, scene_id: String },
    ReportSelectionCleared,
    Commit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEventKind {
    ArmCategory,
    Disarm,
    ReportSelection,
    ReportSelectionCleared,
    Commit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: SelectionPhase,
    pub event: SelectionEventKind,
    pub to: SelectionPhase,
}

impl StateTransition {
    pub const fn new(from: SelectionPhase, event: SelectionEventKind, to: SelectionPhase) -> Self {
        Self { from, event, to }
    }
}
