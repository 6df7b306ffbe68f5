// Cancellable delayed actions driven by the tick loop
//
// Each pending action is identified by a purpose key. At most one action per
// key is ever pending: scheduling a key that is already pending cancels the
// old action first, so a transition can never fire twice.

/// A single pending action
#[derive(Debug, Clone, Copy)]
struct PendingAction<K> {
    key: K,
    remaining: f32,
    /// Insertion order, used to break ties between actions due on the same tick
    sequence: u64,
}

/// Delayed-action scheduler
#[derive(Debug)]
pub struct Scheduler<K> {
    pending: Vec<PendingAction<K>>,
    next_sequence: u64,
}

impl<K: Copy + Eq + std::fmt::Debug> Scheduler<K> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Schedule `key` to fire after `delay` seconds
    ///
    /// Returns true if a pending action with the same key was cancelled.
    pub fn schedule(&mut self, key: K, delay: f32) -> bool {
        let replaced = self.cancel(key);
        if replaced {
            log::debug!("Rescheduled {:?} ({}s)", key, delay);
        }

        self.pending.push(PendingAction {
            key,
            remaining: delay.max(0.0),
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        replaced
    }

    /// Cancel the pending action for `key`, returns true if one existed
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|action| action.key != key);
        self.pending.len() != before
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    /// Check whether `key` is pending
    pub fn is_pending(&self, key: K) -> bool {
        self.pending.iter().any(|action| action.key == key)
    }

    #[cfg(test)]
    /// Seconds left before `key` fires
    pub fn remaining(&self, key: K) -> Option<f32> {
        self.pending
            .iter()
            .find(|action| action.key == key)
            .map(|action| action.remaining)
    }

    #[cfg(test)]
    /// Number of pending actions
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance time by `dt` seconds and return the keys that came due,
    /// earliest first
    /// Call this once per tick
    pub fn advance(&mut self, dt: f32) -> Vec<K> {
        for action in &mut self.pending {
            action.remaining -= dt;
        }

        let mut due: Vec<PendingAction<K>> = Vec::new();
        self.pending.retain(|action| {
            if action.remaining <= 0.0 {
                due.push(*action);
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| {
            a.remaining
                .total_cmp(&b.remaining)
                .then(a.sequence.cmp(&b.sequence))
        });
        due.into_iter().map(|action| action.key).collect()
    }
}

impl<K: Copy + Eq + std::fmt::Debug> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Job {
        Countdown,
        Transition,
    }

    #[test]
    fn test_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Job::Countdown, 0.5);

        assert!(scheduler.advance(0.25).is_empty());
        assert_eq!(scheduler.advance(0.25), vec![Job::Countdown]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_fires_once() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Job::Countdown, 0.1);
        assert_eq!(scheduler.advance(1.0).len(), 1);
        assert!(scheduler.advance(1.0).is_empty());
    }

    #[test]
    fn test_reschedule_cancels_previous() {
        let mut scheduler = Scheduler::new();
        assert!(!scheduler.schedule(Job::Transition, 1.0));
        scheduler.advance(0.5);
        assert!(scheduler.schedule(Job::Transition, 1.0));
        assert_eq!(scheduler.len(), 1);

        // The first deadline passes without firing
        assert!(scheduler.advance(0.6).is_empty());
        assert_eq!(scheduler.advance(0.4), vec![Job::Transition]);
        assert!(scheduler.advance(5.0).is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Job::Countdown, 1.0);
        assert!(scheduler.cancel(Job::Countdown));
        assert!(!scheduler.cancel(Job::Countdown));
        assert!(scheduler.advance(2.0).is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Job::Transition, 0.3);
        scheduler.schedule(Job::Countdown, 0.1);
        assert_eq!(
            scheduler.advance(1.0),
            vec![Job::Countdown, Job::Transition]
        );
    }

    #[test]
    fn test_zero_delay_fires_next_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Job::Countdown, 0.0);
        assert!(scheduler.is_pending(Job::Countdown));
        assert_eq!(scheduler.advance(0.0), vec![Job::Countdown]);
    }

    #[test]
    fn test_remaining() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Job::Countdown, 2.0);
        scheduler.advance(0.5);
        assert_eq!(scheduler.remaining(Job::Countdown), Some(1.5));
        assert_eq!(scheduler.remaining(Job::Transition), None);
    }
}
