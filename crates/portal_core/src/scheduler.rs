//! Keyed, cancellable timers driven by an external millisecond clock.

use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

/// Queue of pending tasks. Each key is queued at most once: scheduling a key
/// that is already pending replaces its deadline.
#[derive(Debug)]
pub struct Scheduler<K> {
    queue: BTreeMap<(u64, u64), K>,
    slots: HashMap<K, (u64, u64)>,
    next_seq: u64,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            slots: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Clone + Eq + Hash> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when an earlier pending run of `key` was superseded.
    pub fn schedule(&mut self, key: K, due_ms: u64) -> bool {
        let replaced = self.cancel(&key);
        let slot = (due_ms, self.next_seq);
        self.next_seq += 1;
        self.queue.insert(slot, key.clone());
        self.slots.insert(key, slot);
        replaced
    }

    pub fn cancel(&mut self, key: &K) -> bool {
        match self.slots.remove(key) {
            Some(slot) => {
                self.queue.remove(&slot);
                true
            }
            None => false,
        }
    }

    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K) -> bool) -> usize {
        let doomed: Vec<K> = self
            .slots
            .keys()
            .filter(|key| predicate(key))
            .cloned()
            .collect();
        for key in &doomed {
            self.cancel(key);
        }
        doomed.len()
    }

    pub fn is_scheduled(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    pub fn deadline(&self, key: &K) -> Option<u64> {
        self.slots.get(key).map(|(due, _)| *due)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Removes the earliest task due at or before `now_ms` and returns it
    /// with its deadline. Tasks sharing a deadline come out in the order
    /// they were scheduled.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, K)> {
        let (&slot, _) = self.queue.iter().next()?;
        if slot.0 > now_ms {
            return None;
        }
        let key = self.queue.remove(&slot)?;
        self.slots.remove(&key);
        Some((slot.0, key))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Scheduler;

    #[test]
    fn pops_in_deadline_then_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule("late", 50);
        scheduler.schedule("first", 10);
        scheduler.schedule("second", 10);

        assert_eq!(scheduler.next_deadline(), Some(10));
        assert_eq!(scheduler.pop_due(9), None);
        assert_eq!(scheduler.pop_due(10), Some((10, "first")));
        assert_eq!(scheduler.pop_due(10), Some((10, "second")));
        assert_eq!(scheduler.pop_due(49), None);
        assert_eq!(scheduler.pop_due(100), Some((50, "late")));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn rescheduling_supersedes_the_pending_run() {
        let mut scheduler = Scheduler::new();
        assert!(!scheduler.schedule("validate", 300));
        assert!(scheduler.schedule("validate", 450));

        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.deadline(&"validate"), Some(450));
        assert_eq!(scheduler.pop_due(300), None);
        assert_eq!(scheduler.pop_due(450), Some((450, "validate")));
        assert_eq!(scheduler.pop_due(1_000), None);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1_u32, 5);
        scheduler.schedule(2_u32, 5);
        scheduler.schedule(3_u32, 5);

        assert!(scheduler.cancel(&2));
        assert!(!scheduler.cancel(&2));
        assert_eq!(scheduler.cancel_where(|key| *key == 3), 1);

        assert_eq!(scheduler.pop_due(5), Some((5, 1)));
        assert_eq!(scheduler.pop_due(5), None);
        assert!(!scheduler.is_scheduled(&3));
    }
}
