//! Lifecycle log: which hosts are connected and which callbacks ran.
//!
//! The document records every connect, disconnect, attribute callback,
//! child notification and render in order. Draining the log lets tests check
//! ordering guarantees such as "connected runs before the first render" or
//! "an unobserved attribute never reaches the component".

use std::collections::HashSet;
use std::mem;

use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// One recorded lifecycle callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Connected { node_id: NodeId },
    Disconnected { node_id: NodeId },
    /// An observed attribute changed and `attribute_changed` ran.
    AttributeChanged { node_id: NodeId, name: String },
    /// A structural or child-attribute change reached `children_changed`.
    ChildrenChanged { node_id: NodeId },
    /// The shadow subtree was replaced.
    Rendered { node_id: NodeId },
}

impl LifecycleEvent {
    /// The host the callback ran for.
    pub fn node(&self) -> NodeId {
        match self {
            Self::Connected { node_id }
            | Self::Disconnected { node_id }
            | Self::AttributeChanged { node_id, .. }
            | Self::ChildrenChanged { node_id }
            | Self::Rendered { node_id } => *node_id,
        }
    }
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Connected hosts plus the callbacks recorded since the last drain.
///
/// Callbacks for hosts that are not connected are dropped, so a detached
/// host never shows up between its `Disconnected` and a later `Connected`.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    connected: HashSet<NodeId>,
    log: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` connected. Reconnecting a connected host records nothing.
    pub fn on_connect(&mut self, id: NodeId) {
        if self.connected.insert(id) {
            self.log.push(LifecycleEvent::Connected { node_id: id });
        }
    }

    /// Mark `id` disconnected. Unknown hosts record nothing.
    pub fn on_disconnect(&mut self, id: NodeId) {
        if self.connected.remove(&id) {
            self.log.push(LifecycleEvent::Disconnected { node_id: id });
        }
    }

    pub fn on_attribute_changed(&mut self, id: NodeId, name: &str) {
        self.record(id, LifecycleEvent::AttributeChanged {
            node_id: id,
            name: name.to_owned(),
        });
    }

    pub fn on_children_changed(&mut self, id: NodeId) {
        self.record(id, LifecycleEvent::ChildrenChanged { node_id: id });
    }

    pub fn on_render(&mut self, id: NodeId) {
        self.record(id, LifecycleEvent::Rendered { node_id: id });
    }

    fn record(&mut self, id: NodeId, event: LifecycleEvent) {
        if self.connected.contains(&id) {
            self.log.push(event);
        }
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.connected.contains(&id)
    }

    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }

    /// Take every recorded event, oldest first.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        mem::take(&mut self.log)
    }

    pub fn has_pending(&self) -> bool {
        !self.log.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
