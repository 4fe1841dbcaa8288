//! One tagging session: the explicitly owned store, selection machine and
//! deferred selection queue behind a screen.

use crate::config::AppConfig;
use crate::geometry::BadgeSize;
use crate::highlight::{HighlightId, HighlightRecord, HighlightStore};
use crate::layout::{layout_badges, TagLayout};
use crate::matcher::{paint_ranges, PaintRange};
use crate::notification::CommitNotice;
use crate::state::{
    SelectionEventQueue, SelectionPhase, SelectionReporter, SelectionStateMachine,
};
use crate::storage::{FileSettingsStore, MemorySettingsStore, SettingsStore, StorageResult};
use crate::taxonomy::ElementCategory;

/// Badges of one scene and where to draw them.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeSummary {
    pub records: Vec<HighlightRecord>,
    pub layout: TagLayout,
}

#[derive(Debug)]
pub struct TaggingSession {
    store: HighlightStore,
    machine: SelectionStateMachine,
    queue: SelectionEventQueue,
    config: AppConfig,
}

impl TaggingSession {
    pub fn new(settings: Box<dyn SettingsStore>, config: AppConfig) -> Self {
        Self {
            store: HighlightStore::load(settings),
            machine: SelectionStateMachine::new(),
            queue: SelectionEventQueue::new(),
            config,
        }
    }

    /// Opens the file-backed store under `data_dir` or the default data directory.
    pub fn open(config: AppConfig) -> StorageResult<Self> {
        let settings = match &config.data_dir {
            Some(dir) => FileSettingsStore::with_root(dir.clone()),
            None => FileSettingsStore::with_default_root()?,
        };
        tracing::debug!(root = %settings.root().display(), "open tagging session");
        Ok(Self::new(Box::new(settings), config))
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Box::new(MemorySettingsStore::new()), config)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &HighlightStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionStateMachine {
        &self.machine
    }

    pub fn phase(&self) -> SelectionPhase {
        self.machine.phase()
    }

    /// Handle for editor selection callbacks; reports wait for the next [`tick`](Self::tick).
    pub fn reporter(&self) -> SelectionReporter {
        self.queue.reporter()
    }

    pub fn on_committed<F>(&mut self, listener: F)
    where
        F: FnMut(&CommitNotice) + 'static,
    {
        self.store.on_committed(listener);
    }

    /// Applies queued selection reports in receipt order. With `auto_tag`
    /// on, a resulting armed selection is committed straight away.
    pub fn tick(&mut self) -> Option<HighlightRecord> {
        self.apply_queued();
        if self.config.auto_tag && self.machine.can_commit() {
            return self.machine.commit(&mut self.store);
        }
        None
    }

    pub fn arm_category(&mut self, category: ElementCategory) {
        self.apply_queued();
        self.machine.arm_category(category);
    }

    pub fn disarm(&mut self) {
        self.apply_queued();
        self.machine.disarm();
    }

    pub fn commit(&mut self) -> Option<HighlightRecord> {
        self.apply_queued();
        self.machine.commit(&mut self.store)
    }

    /// Tags text directly, bypassing the selection machine.
    pub fn tag(
        &mut self,
        scene_id: &str,
        category: ElementCategory,
        text: &str,
    ) -> Option<HighlightRecord> {
        self.store.add(scene_id, category, text)
    }

    pub fn remove(&mut self, id: HighlightId) -> bool {
        self.store.remove(id)
    }

    pub fn clear_scene(&mut self, scene_id: &str) -> usize {
        self.store.clear_scene(scene_id)
    }

    pub fn paint_ranges(&self, scene_id: &str, text: &str) -> Vec<PaintRange> {
        paint_ranges(text, &self.store.records_for_scene(scene_id))
    }

    /// Lays out one badge per scene record; `measure` supplies each badge's size.
    pub fn badge_summary<F>(&self, scene_id: &str, max_width: f64, measure: F) -> BadgeSummary
    where
        F: Fn(&HighlightRecord) -> BadgeSize,
    {
        let records = self.store.records_for_scene(scene_id);
        let sizes: Vec<_> = records.iter().map(measure).collect();
        let layout = layout_badges(&sizes, max_width, self.config.badge_spacing);
        BadgeSummary { records, layout }
    }

    fn apply_queued(&mut self) {
        for event in self.queue.drain() {
            self.machine.apply(event, &mut self.store);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn session() -> TaggingSession {
        TaggingSession::in_memory(AppConfig::default())
    }

    #[test]
    fn selection_reports_wait_for_tick() {
        let mut session = session();
        let reporter = session.reporter();
        session.arm_category(ElementCategory::Props);

        reporter.report_selection("lamp", "scene1");
        assert_eq!(session.phase(), SelectionPhase::Armed);

        assert!(session.tick().is_none());
        assert_eq!(session.phase(), SelectionPhase::ArmedWithSelection);
        assert_eq!(session.selection().state().pending_text, "lamp");
    }

    #[test]
    fn latest_queued_report_wins() {
        let mut session = session();
        let reporter = session.reporter();
        session.arm_category(ElementCategory::Props);

        reporter.report_selection("lam", "scene1");
        reporter.report_selection("lamp", "scene1");
        let record = session.commit().expect("queued selection should commit");
        assert_eq!(record.text, "lamp");
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn clear_after_report_leaves_nothing_to_commit() {
        let mut session = session();
        let reporter = session.reporter();
        session.arm_category(ElementCategory::Cast);
        reporter.report_selection("MARY", "scene1");
        reporter.report_selection_cleared();

        assert!(session.commit().is_none());
        assert!(session.store().is_empty());
    }

    #[test]
    fn auto_tag_commits_on_tick() {
        let config = AppConfig {
            auto_tag: true,
            ..AppConfig::default()
        };
        let mut session = TaggingSession::in_memory(config);
        let reporter = session.reporter();

        reporter.report_selection("lamp", "scene1");
        assert!(session.tick().is_none());

        session.arm_category(ElementCategory::Props);
        reporter.report_selection("desk", "scene1");
        reporter.report_selection("chair", "scene1");
        let record = session.tick().expect("auto tag should commit");
        assert_eq!(record.text, "chair");
        assert_eq!(session.phase(), SelectionPhase::Armed);
        assert!(session.tick().is_none());
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn commit_notifies_listeners_at_most_once() {
        let mut session = session();
        let notices = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notices);
        session.on_committed(move |notice: &CommitNotice| sink.borrow_mut().push(notice.clone()));

        session.arm_category(ElementCategory::Animals);
        session.reporter().report_selection("horse", "s3");
        session.commit();
        session.commit();

        assert_eq!(notices.borrow().len(), 1);
        assert_eq!(notices.borrow()[0].text, "horse");
    }

    #[test]
    fn paint_ranges_only_use_the_requested_scene() {
        let mut session = session();
        session.tag("s1", ElementCategory::Props, "lamp").unwrap();
        session.tag("s2", ElementCategory::Cast, "MARY").unwrap();

        let ranges = session.paint_ranges("s1", "MARY turns on the lamp.");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].range(), 18..22);
        assert_eq!(ranges[0].category, ElementCategory::Props);
    }

    #[test]
    fn badge_summary_uses_configured_spacing() {
        let config = AppConfig {
            badge_spacing: 10.0,
            ..AppConfig::default()
        };
        let mut session = TaggingSession::in_memory(config);
        session.tag("s1", ElementCategory::Props, "lamp").unwrap();
        session.tag("s1", ElementCategory::Cast, "MARY").unwrap();
        session.tag("s2", ElementCategory::Cast, "JOHN").unwrap();

        let summary = session.badge_summary("s1", 100.0, |_| BadgeSize::new(50.0, 20.0));
        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.layout.rows, 2);
        assert_eq!(summary.layout.height, 50.0);
    }

    #[test]
    fn open_persists_to_configured_data_dir() {
        let mut root = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        root.push(format!("scenetag-session-{}-{nanos}", std::process::id()));
        let config = AppConfig {
            data_dir: Some(PathBuf::from(&root)),
            ..AppConfig::default()
        };

        let mut session = TaggingSession::open(config.clone()).expect("session should open");
        let record = session.tag("s1", ElementCategory::Wardrobe, "coat").unwrap();
        drop(session);

        let reopened = TaggingSession::open(config).expect("session should reopen");
        assert_eq!(reopened.store().records(), &[record]);
        let _ = fs::remove_dir_all(&root);
    }
}
