use std::collections::VecDeque;

use crate::highlight::{HighlightRecord, HighlightStore};
use crate::taxonomy::ElementCategory;

use super::event::{SelectionEventKind, StateTransition};
use super::{SelectionEvent, SelectionPhase, SelectionState};

const TRANSITION_HISTORY_LIMIT: usize = 128;

/// Arbitrates between the armed category and the editor's live text selection.
#[derive(Debug, Default)]
pub struct SelectionStateMachine {
    state: SelectionState,
    display_selection: Option<String>,
    transition_history: VecDeque<StateTransition>,
}

impl SelectionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SelectionPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn armed_category(&self) -> Option<ElementCategory> {
        self.state.armed_category
    }

    /// Latest reported selection, including reports made while idle.
    pub fn display_selection(&self) -> Option<&str> {
        self.display_selection.as_deref()
    }

    pub fn can_commit(&self) -> bool {
        self.phase() == SelectionPhase::ArmedWithSelection
    }

    pub fn history(&self) -> impl Iterator<Item = &StateTransition> {
        self.transition_history.iter()
    }

    pub fn apply(
        &mut self,
        event: SelectionEvent,
        store: &mut HighlightStore,
    ) -> Option<HighlightRecord> {
        match event {
            SelectionEvent::ArmCategory(category) => self.arm_category(category),
            SelectionEvent::Disarm => self.disarm(),
            SelectionEvent::ReportSelection { text, scene_id } => {
                self.report_selection(&text, &scene_id)
            }
            SelectionEvent::ReportSelectionCleared => self.report_selection_cleared(),
            SelectionEvent::Commit => return self.commit(store),
        }
        None
    }

    pub fn arm_category(&mut self, category: ElementCategory) {
        let from = self.phase();
        self.state.armed_category = Some(category);
        self.record(from, SelectionEventKind::ArmCategory);
    }

    pub fn disarm(&mut self) {
        let from = self.phase();
        self.state.armed_category = None;
        self.state.clear_pending();
        self.record(from, SelectionEventKind::Disarm);
    }

    /// Later reports replace earlier ones. A blank report counts as a clear.
    pub fn report_selection(&mut self, text: &str, scene_id: &str) {
        let text = text.trim();
        let scene_id = scene_id.trim();
        if text.is_empty() || scene_id.is_empty() {
            self.report_selection_cleared();
            return;
        }

        self.display_selection = Some(text.to_string());
        let from = self.phase();
        if from == SelectionPhase::Idle {
            tracing::debug!("selection reported while idle; display only");
            return;
        }

        self.state.pending_text = text.to_string();
        self.state.pending_scene_id = scene_id.to_string();
        self.record(from, SelectionEventKind::ReportSelection);
    }

    pub fn report_selection_cleared(&mut self) {
        self.display_selection = None;
        let from = self.phase();
        if from != SelectionPhase::ArmedWithSelection {
            return;
        }
        self.state.clear_pending();
        self.record(from, SelectionEventKind::ReportSelectionCleared);
    }

    /// Stores the pending selection under the armed category. The category
    /// stays armed so the next selection can be tagged right away.
    pub fn commit(&mut self, store: &mut HighlightStore) -> Option<HighlightRecord> {
        let from = self.phase();
        let category = match (from, self.state.armed_category) {
            (SelectionPhase::ArmedWithSelection, Some(category)) => category,
            _ => {
                tracing::debug!(phase = ?from, "nothing to commit");
                return None;
            }
        };

        let record = store.add(&self.state.pending_scene_id, category, &self.state.pending_text)?;
        self.state.clear_pending();
        self.display_selection = None;
        self.record(from, SelectionEventKind::Commit);
        Some(record)
    }

    fn record(&mut self, from: SelectionPhase, event: SelectionEventKind) {
        let to = self.phase();
        tracing::debug!(?from, ?event, ?to, "selection transition");
        if self.transition_history.len() == TRANSITION_HISTORY_LIMIT {
            self.transition_history.pop_front();
        }
        self.transition_history
            .push_back(StateTransition::new(from, event, to));
    }
}

impl std::fmt::Display for SelectionStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SelectionPhase::{:?}", self.phase())
    }
}
