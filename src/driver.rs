//! Async driver: ties the document's virtual clock to tokio time.
//!
//! The document never waits on its own; its timers only fire when the clock
//! is advanced. [`run_for`] sleeps on the tokio timer until the next deadline
//! and advances the document by exactly the time slept, so autoplay and
//! auto-dismiss behave as they would on a real event loop. With a paused
//! tokio clock (`start_paused = true`) the sleeps complete instantly and
//! deterministically.

use std::time::Duration;

use crate::document::Document;

/// Drive `doc` for `budget` of tokio time. Returns how many timers fired.
pub async fn run_for(doc: &mut Document, budget: Duration) -> usize {
    let mut elapsed = Duration::ZERO;
    let mut fired = 0;
    loop {
        let remaining = budget.saturating_sub(elapsed);
        let wait = match doc.next_deadline() {
            Some(deadline) => deadline.saturating_sub(doc.now()).min(remaining),
            None => remaining,
        };
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        elapsed += wait;
        fired += doc.advance(wait);
        if elapsed >= budget {
            break;
        }
    }
    tracing::debug!(?budget, fired, "driver finished");
    fired
}

/// Drive `doc` until no timer is pending or `limit` of tokio time has
/// passed, whichever comes first. Returns how many timers fired.
pub async fn run_until_idle(doc: &mut Document, limit: Duration) -> usize {
    let mut elapsed = Duration::ZERO;
    let mut fired = 0;
    while let Some(deadline) = doc.next_deadline() {
        let wait = deadline.saturating_sub(doc.now());
        if elapsed + wait > limit {
            break;
        }
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        elapsed += wait;
        fired += doc.advance(wait);
    }
    fired
}
