//! Document-level listener registrations and external listeners.
//!
//! Composite widgets that must hear clicks and key presses outside their own
//! subtree acquire a registration from the [`ListenerRegistry`]. Each
//! registration is bound to exactly one owner node, so several open widgets
//! never clobber each other. The document releases every registration a node
//! still holds when that node leaves the tree, whichever path removed it.

use std::collections::HashMap;
use std::fmt;

use super::event::Event;
use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// ListenerKind / ListenerId
// ---------------------------------------------------------------------------

/// Event types a document-level listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer clicks anywhere in the document.
    Click,
    /// Key presses anywhere in the document.
    KeyDown,
}

impl ListenerKind {
    /// The listener kind that receives events named `name`.
    pub fn for_event(name: &str) -> Option<Self> {
        match name {
            "click" => Some(Self::Click),
            "keydown" => Some(Self::KeyDown),
            _ => None,
        }
    }
}

/// Handle to a single registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

// ---------------------------------------------------------------------------
// ListenerRegistry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Registration {
    id: ListenerId,
    owner: NodeId,
    kind: ListenerKind,
}

/// Active document-level registrations, kept in acquisition order.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    active: Vec<Registration>,
}

impl ListenerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `owner` for document-level `kind` events.
    pub fn acquire(&mut self, owner: NodeId, kind: ListenerKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.active.push(Registration { id, owner, kind });
        tracing::debug!(?owner, ?kind, ?id, "document listener acquired");
        id
    }

    /// Release a single registration. Returns `false` if it was not active.
    pub fn release(&mut self, id: ListenerId) -> bool {
        let before = self.active.len();
        self.active.retain(|r| r.id != id);
        let released = self.active.len() != before;
        if released {
            tracing::debug!(?id, "document listener released");
        }
        released
    }

    /// Release every registration held by `owner`. Returns how many there were.
    pub fn release_owner(&mut self, owner: NodeId) -> usize {
        let before = self.active.len();
        self.active.retain(|r| r.owner != owner);
        let released = before - self.active.len();
        if released > 0 {
            tracing::debug!(?owner, released, "document listeners force-released");
        }
        released
    }

    /// Whether the registration is still active.
    pub fn is_active(&self, id: ListenerId) -> bool {
        self.active.iter().any(|r| r.id == id)
    }

    /// `(id, owner)` of every `kind` registration, in acquisition order.
    pub fn snapshot(&self, kind: ListenerKind) -> Vec<(ListenerId, NodeId)> {
        self.active
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| (r.id, r.owner))
            .collect()
    }

    /// Number of registrations held by `owner`.
    pub fn count_for(&self, owner: NodeId) -> usize {
        self.active.iter().filter(|r| r.owner == owner).count()
    }

    /// Total number of active registrations.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no registration is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ExternalListeners
// ---------------------------------------------------------------------------

/// Callback installed by code outside any component.
pub type Callback = Box<dyn FnMut(&mut Event)>;

/// Listeners attached to nodes by consumers of the document, keyed by node
/// and event name. They run during the bubble phase, after the node's own
/// component hook.
#[derive(Default)]
pub struct ExternalListeners {
    by_node: HashMap<(NodeId, String), Vec<Callback>>,
}

impl ExternalListeners {
    /// An empty set of listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener for `name` events reaching `node`.
    pub fn add(&mut self, node: NodeId, name: &str, callback: Callback) {
        self.by_node
            .entry((node, name.to_owned()))
            .or_default()
            .push(callback);
    }

    /// Run the listeners for `event.name` on `node`, in insertion order.
    pub fn fire(&mut self, node: NodeId, event: &mut Event) {
        let Some(callbacks) = self.by_node.get_mut(&(node, event.name.clone())) else {
            return;
        };
        for callback in callbacks.iter_mut() {
            callback(event);
        }
    }

    /// Drop every listener attached to `node`.
    pub fn remove_node(&mut self, node: NodeId) {
        self.by_node.retain(|(owner, _), _| *owner != node);
    }

    /// Number of listeners attached to `node` for `name`.
    pub fn count(&self, node: NodeId, name: &str) -> usize {
        self.by_node
            .get(&(node, name.to_owned()))
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for ExternalListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalListeners")
            .field("keys", &self.by_node.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
