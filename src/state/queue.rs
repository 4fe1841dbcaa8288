use std::sync::mpsc;

use super::SelectionEvent;

/// Cloneable handle handed to editor callbacks. Reports are queued here and
/// only applied when the owning session drains the queue on its next tick,
/// so a callback fired during view evaluation never mutates tagging state.
#[derive(Debug, Clone)]
pub struct SelectionReporter {
    tx: mpsc::Sender<SelectionEvent>,
}

impl SelectionReporter {
    pub fn report_selection(&self, text: impl Into<String>, scene_id: impl Into<String>) {
        self.send(SelectionEvent::ReportSelection {
            text: text.into(),
            scene_id: scene_id.into(),
        });
    }

    pub fn report_selection_cleared(&self) {
        self.send(SelectionEvent::ReportSelectionCleared);
    }

    fn send(&self, event: SelectionEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("selection queue closed; dropping report");
        }
    }
}

#[derive(Debug)]
pub struct SelectionEventQueue {
    tx: mpsc::Sender<SelectionEvent>,
    rx: mpsc::Receiver<SelectionEvent>,
}

impl Default for SelectionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionEventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn reporter(&self) -> SelectionReporter {
        SelectionReporter {
            tx: self.tx.clone(),
        }
    }

    /// Everything queued so far, in receipt order.
    pub fn drain(&self) -> Vec<SelectionEvent> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_are_deferred_until_drained_in_receipt_order() {
        let queue = SelectionEventQueue::new();
        let reporter = queue.reporter();
        let second = reporter.clone();

        reporter.report_selection("lamp", "s1");
        second.report_selection_cleared();
        reporter.report_selection("table", "s1");

        assert_eq!(
            queue.drain(),
            vec![
                SelectionEvent::ReportSelection {
                    text: "lamp".to_string(),
                    scene_id: "s1".to_string(),
                },
                SelectionEvent::ReportSelectionCleared,
                SelectionEvent::ReportSelection {
                    text: "table".to_string(),
                    scene_id: "s1".to_string(),
                },
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn reporter_outliving_queue_drops_reports_quietly() {
        let queue = SelectionEventQueue::new();
        let reporter = queue.reporter();
        drop(queue);
        reporter.report_selection("lamp", "s1");
    }
}
