//! Dispatch support: bubble path computation and the document event log.
//!
//! [`EventLog`] records the most recent events that reached the document
//! body, in the order they got there. [`bubble_path`] computes the traversal order from a
//! node up to the root for bubble-phase delivery.

use std::collections::VecDeque;

use super::event::Event;
use crate::dom::{Dom, NodeId};

// ---------------------------------------------------------------------------
// bubble_path
// ---------------------------------------------------------------------------

/// Compute the bubble path from `start` up to the root (inclusive).
///
/// Returns `[start, parent, grandparent, ..., root]`. A detached node yields a
/// path ending at its topmost ancestor. If `start` does not exist in the DOM,
/// returns an empty vec.
pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
    if !dom.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(dom.ancestors(start));
    path
}

// ---------------------------------------------------------------------------
// EventLog
// ---------------------------------------------------------------------------

/// Events that bubbled all the way to the document body.
///
/// A ring buffer: once `limit` events are held, each new one evicts the
/// oldest. A limit of `0` records nothing.
#[derive(Debug)]
pub struct EventLog {
    events: VecDeque<Event>,
    limit: usize,
}

impl EventLog {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: VecDeque::new(),
            limit,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.limit > 0
    }

    pub fn push(&mut self, event: Event) {
        if self.limit == 0 {
            return;
        }
        while self.events.len() >= self.limit {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take every recorded event, oldest first.
    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Recorded events named `name`, oldest first.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
