//! Deterministic delayed events
//!
//! A logical clock plus a queue of scheduled events. Hosts feed elapsed time
//! and owners pop whatever came due, so delayed effects are reproducible in
//! tests. Dropping the owner drops its pending events.

/// A scheduled event
#[derive(Debug, Clone)]
struct Scheduled<E> {
    due_ms: u64,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
    event: E,
}

/// Queue of events keyed by a deadline on a logical millisecond clock
#[derive(Debug, Clone)]
pub struct Timers<E> {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<Scheduled<E>>,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timers<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current logical time
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `event` to fire `delay_ms` after the current logical time
    pub fn schedule(&mut self, delay_ms: u64, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            event,
        });
    }

    /// Target time for advancing by `dt_ms`
    pub fn horizon(&self, dt_ms: u64) -> u64 {
        self.now_ms.saturating_add(dt_ms)
    }

    /// Pop the earliest event due at or before `until`, moving the clock to
    /// its deadline. Events scheduled while handling it are relative to that
    /// deadline, so chained delays add up exactly.
    pub fn pop_due(&mut self, until: u64) -> Option<E> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= until)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))
            .map(|(i, _)| i)?;
        let scheduled = self.pending.swap_remove(idx);
        self.now_ms = self.now_ms.max(scheduled.due_ms);
        Some(scheduled.event)
    }

    /// Move the clock to `until` once nothing else is due
    pub fn settle(&mut self, until: u64) {
        self.now_ms = self.now_ms.max(until);
    }

    /// Number of events still waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
