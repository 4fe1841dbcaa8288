use crate::taxonomy::ElementCategory;

/// Sent to commit listeners after a highlight record is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNotice {
    pub category: ElementCategory,
    pub text: String,
    pub scene_id: String,
}

pub type CommitListener = Box<dyn FnMut(&CommitNotice)>;

#[derive(Default)]
pub struct CommitListeners {
    listeners: Vec<CommitListener>,
}

impl CommitListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&CommitNotice) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn send(&mut self, notice: &CommitNotice) {
        if self.is_empty() {
            return;
        }
        tracing::debug!(
            listeners = self.listeners.len(),
            category = ?notice.category,
            scene_id = %notice.scene_id,
            "notify commit listeners"
        );
        for listener in &mut self.listeners {
            listener(notice);
        }
    }
}

impl std::fmt::Debug for CommitListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitListeners")
            .field("len", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn send_reaches_every_listener_once_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = CommitListeners::new();
        assert!(listeners.is_empty());
        for name in ["catalog", "summary"] {
            let seen = Rc::clone(&seen);
            listeners.subscribe(move |notice: &CommitNotice| {
                seen.borrow_mut().push(format!("{name}:{}", notice.text));
            });
        }

        listeners.send(&CommitNotice {
            category: ElementCategory::Cast,
            text: "MARY".to_string(),
            scene_id: "1".to_string(),
        });

        assert_eq!(listeners.len(), 2);
        assert_eq!(*seen.borrow(), vec!["catalog:MARY", "summary:MARY"]);
    }
}
