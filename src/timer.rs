//! Timers: scheduled future work on a virtual clock.
//!
//! Timers are the only source of scheduled work in the runtime (carousel
//! autoplay, alert auto-dismiss). The queue keeps at most one active timer per
//! `(owner, key)` pair: setting a timer always replaces the previous one, so a
//! reinstalled interval can never fire twice. The clock only moves when the
//! document is advanced, either directly in tests or by the async driver.

use std::time::Duration;

use crate::dom::NodeId;

/// Shortest period a repeating timer may have.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct Timer {
    owner: NodeId,
    key: &'static str,
    deadline: Duration,
    period: Option<Duration>,
    seq: u64,
}

/// The timer queue and its virtual clock.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    timers: Vec<Timer>,
    seq: u64,
}

impl TimerQueue {
    /// An empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Install a timer for `(owner, key)` firing after `delay`, and every
    /// `delay` afterwards when `repeat` is set. Any timer already installed
    /// under the same pair is stopped first.
    ///
    /// Returns `true` if a previous timer was replaced.
    pub fn set(&mut self, owner: NodeId, key: &'static str, delay: Duration, repeat: bool) -> bool {
        let replaced = self.clear(owner, key);
        let delay = if repeat { delay.max(MIN_PERIOD) } else { delay };
        self.seq += 1;
        self.timers.push(Timer {
            owner,
            key,
            deadline: self.now.saturating_add(delay),
            period: repeat.then_some(delay),
            seq: self.seq,
        });
        tracing::debug!(?owner, key, ?delay, repeat, replaced, "timer installed");
        replaced
    }

    /// Stop the `(owner, key)` timer. Returns `false` if none was active.
    pub fn clear(&mut self, owner: NodeId, key: &'static str) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| !(t.owner == owner && t.key == key));
        let cleared = self.timers.len() != before;
        if cleared {
            tracing::debug!(?owner, key, "timer cleared");
        }
        cleared
    }

    /// Stop every timer owned by `owner`. Returns how many were active.
    pub fn cancel_owner(&mut self, owner: NodeId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.owner != owner);
        let cancelled = before - self.timers.len();
        if cancelled > 0 {
            tracing::debug!(?owner, cancelled, "timers cancelled");
        }
        cancelled
    }

    /// Whether `(owner, key)` has an active timer.
    pub fn is_active(&self, owner: NodeId, key: &str) -> bool {
        self.timers.iter().any(|t| t.owner == owner && t.key == key)
    }

    /// Number of active timers owned by `owner`.
    pub fn count_for(&self, owner: NodeId) -> usize {
        self.timers.iter().filter(|t| t.owner == owner).count()
    }

    /// Total number of active timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timer is active.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest deadline among active timers.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Repeating timers are rescheduled one period later; one-shot
    /// timers are removed. Ties fire in installation order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(NodeId, &'static str)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[index];
        self.now = self.now.max(timer.deadline);
        let fired = (timer.owner, timer.key);
        match timer.period {
            Some(period) => {
                timer.deadline = timer.deadline.saturating_add(period);
                self.seq += 1;
                timer.seq = self.seq;
            }
            None => {
                self.timers.remove(index);
            }
        }
        Some(fired)
    }

    /// Move the clock forward to `until` (never backwards).
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
