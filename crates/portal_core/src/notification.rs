//! Transient status messages.
//!
//! Notifications stack newest-first. Only a bounded number stay fully
//! visible; presenting past that bound retires the oldest visible one early.
//! The center only tracks state; the controller owns the timers that move a
//! notification from `Visible` to `Leaving` to removed.

use serde::Serialize;
use shared::domain::{NotificationId, NotificationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at_ms: u64,
    pub phase: NotificationPhase,
}

impl Notification {
    pub fn new(
        id: NotificationId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at_ms: u64,
    ) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            message: message.into(),
            created_at_ms,
            phase: NotificationPhase::Visible,
        }
    }
}

#[derive(Debug)]
pub struct NotificationCenter {
    // insertion order, oldest first
    items: Vec<Notification>,
    next_id: u64,
    max_visible: usize,
}

impl NotificationCenter {
    pub fn new(max_visible: usize) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            max_visible: max_visible.max(1),
        }
    }

    pub fn present(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now_ms: u64,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.items
            .push(Notification::new(id, kind, title, message, now_ms));
        id
    }

    /// Visible notifications beyond the limit, oldest first.
    pub fn overflow(&self) -> Vec<NotificationId> {
        let visible: Vec<NotificationId> = self
            .items
            .iter()
            .filter(|n| n.phase == NotificationPhase::Visible)
            .map(|n| n.id)
            .collect();
        let excess = visible.len().saturating_sub(self.max_visible);
        visible.into_iter().take(excess).collect()
    }

    /// Moves a visible notification into its exit phase. Returns false when
    /// it is already leaving or gone.
    pub fn begin_exit(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) if n.phase == NotificationPhase::Visible => {
                n.phase = NotificationPhase::Leaving;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: NotificationId) -> Option<Notification> {
        let index = self.items.iter().position(|n| n.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    /// Newest first; the index is the stack slot.
    pub fn stack(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_newest_first() {
        let mut center = NotificationCenter::new(4);
        let first = center.present(NotificationKind::Info, "One", "first", 0);
        let second = center.present(NotificationKind::Error, "Two", "second", 10);

        let order: Vec<NotificationId> = center.stack().map(|n| n.id).collect();
        assert_eq!(order, vec![second, first]);
        assert_eq!(center.get(first).map(|n| n.created_at_ms), Some(0));
    }

    #[test]
    fn overflow_names_the_oldest_visible() {
        let mut center = NotificationCenter::new(2);
        let a = center.present(NotificationKind::Info, "a", "a", 0);
        let b = center.present(NotificationKind::Info, "b", "b", 0);
        assert!(center.overflow().is_empty());

        center.present(NotificationKind::Info, "c", "c", 0);
        assert_eq!(center.overflow(), vec![a]);

        assert!(center.begin_exit(a));
        assert!(center.overflow().is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn exit_and_removal_happen_once() {
        let mut center = NotificationCenter::new(4);
        let id = center.present(NotificationKind::Success, "Done", "ok", 0);

        assert!(center.begin_exit(id));
        assert!(!center.begin_exit(id));
        assert!(center.remove(id).is_some());
        assert!(center.remove(id).is_none());
        assert!(center.is_empty());
    }
}
