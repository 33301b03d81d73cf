//! Delayed simulation events keyed by the entity they belong to.
//!
//! At most one entry per key. Rescheduling a key replaces its entry and
//! cancelling is a single ordered-map removal, so a sold firewall never
//! leaves a stale reactivation behind.

use std::collections::{BTreeMap, HashMap};

use crate::model::VirusId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Firewall in this slot comes off cooldown.
    FirewallReactivate(usize),
    /// Beam on this virus finishes and the virus explodes.
    BeamComplete(VirusId),
}

/// Sort key: due time in whole microseconds, then insertion order.
type Slot = (u64, u64);

fn to_micros(ms: f64) -> u64 {
    if !ms.is_finite() || ms <= 0.0 {
        return 0;
    }
    (ms * 1000.0).ceil() as u64
}

#[derive(Debug, Default, Clone)]
pub struct TimerQueue {
    queue: BTreeMap<Slot, TimerKey>,
    index: HashMap<TimerKey, Slot>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, key: TimerKey, due_ms: f64) {
        self.cancel(key);
        let slot = (to_micros(due_ms), self.seq);
        self.seq = self.seq.wrapping_add(1);
        self.queue.insert(slot, key);
        self.index.insert(key, slot);
    }

    /// Returns whether an entry was pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        match self.index.remove(&key) {
            Some(slot) => {
                self.queue.remove(&slot);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_scheduled(&self, key: TimerKey) -> bool {
        self.index.contains_key(&key)
    }

    pub fn due_at(&self, key: TimerKey) -> Option<f64> {
        self.index.get(&key).map(|(us, _)| *us as f64 / 1000.0)
    }

    /// Earliest entry due at or before `now_ms`, removed from the queue.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<TimerKey> {
        let now = to_micros(now_ms);
        let (&slot, &key) = self.queue.iter().next()?;
        if slot.0 > now {
            return None;
        }
        self.queue.remove(&slot);
        self.index.remove(&key);
        Some(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
