//! Render and hook contexts.
//!
//! [`RenderContext`] is the read-only view a render function gets: the host
//! node, the light DOM, the runtime config, and measured boxes. [`Context`]
//! wraps it for lifecycle and event hooks, adding timer and document-listener
//! management (applied immediately) and a queue of [`Effect`]s (attribute
//! writes, emitted events, render requests) that the document applies once the
//! hook returns.

use std::ops::Deref;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;
use slotmap::SecondaryMap;

use super::props::Property;
use crate::config::RuntimeConfig;
use crate::dom::{Attributes, Dom, NodeId};
use crate::event::{into_detail, Detail, ListenerId, ListenerKind, ListenerRegistry};
use crate::geometry::Size;
use crate::timer::TimerQueue;

// ---------------------------------------------------------------------------
// RenderContext
// ---------------------------------------------------------------------------

/// Read-only view of a component's surroundings.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub host: NodeId,
    pub dom: &'a Dom,
    pub config: &'a RuntimeConfig,
    pub boxes: &'a SecondaryMap<NodeId, Size>,
}

static NO_ATTRIBUTES: Attributes = Attributes::new();

impl<'a> RenderContext<'a> {
    /// The host's attributes.
    pub fn attrs(&self) -> &'a Attributes {
        self.attrs_of(self.host)
    }

    /// Attributes of any node (empty for unknown nodes).
    pub fn attrs_of(&self, node: NodeId) -> &'a Attributes {
        self.dom
            .get(node)
            .map(|d| &d.attributes)
            .unwrap_or(&NO_ATTRIBUTES)
    }

    /// Read a typed property of the host.
    pub fn prop<P: Property>(&self, prop: &P) -> P::Value {
        prop.read(self.attrs())
    }

    /// Read a typed property of another node.
    pub fn prop_of<P: Property>(&self, node: NodeId, prop: &P) -> P::Value {
        prop.read(self.attrs_of(node))
    }

    /// The host's direct children with tag `tag`, in document order.
    pub fn children_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.dom.children_by_tag(self.host, tag)
    }

    /// The host's direct element children.
    pub fn element_children(&self) -> Vec<NodeId> {
        self.dom
            .children(self.host)
            .iter()
            .copied()
            .filter(|&c| self.dom.get(c).is_some_and(|d| !d.is_text()))
            .collect()
    }

    /// Nearest inclusive ancestor of `node` with tag `tag`.
    pub fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let root = self.dom.root()?;
        self.dom.closest(node, tag, root)
    }

    /// Trimmed text content of `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        self.dom.text_content(node)
    }

    /// Full tag name for a built-in component.
    pub fn tag(&self, name: &str) -> String {
        self.config.tag(name)
    }

    /// Measured box of `node`, if one was recorded.
    pub fn box_size(&self, node: NodeId) -> Option<Size> {
        self.boxes.get(node).copied()
    }

    /// Width of the host: its measured box or the viewport width.
    pub fn host_width(&self) -> f32 {
        self.box_size(self.host)
            .map(|s| s.width)
            .unwrap_or(self.config.viewport_width)
    }

    /// Today's date per the config.
    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A deferred mutation requested by a hook.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write (`Some`) or remove (`None`) an attribute.
    SetAttribute {
        node: NodeId,
        name: String,
        value: Option<String>,
    },
    /// Dispatch a bubbling, composed, cancelable event from `from`.
    Emit {
        from: NodeId,
        name: String,
        detail: Detail,
    },
    /// Re-render the component at `node`.
    Render(NodeId),
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Hook context: read access plus effects, timers, and listeners.
pub struct Context<'a> {
    view: RenderContext<'a>,
    listeners: &'a mut ListenerRegistry,
    timers: &'a mut TimerQueue,
    effects: &'a mut Vec<Effect>,
}

impl<'a> Deref for Context<'a> {
    type Target = RenderContext<'a>;

    fn deref(&self) -> &Self::Target {
        &self.view
    }
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        view: RenderContext<'a>,
        listeners: &'a mut ListenerRegistry,
        timers: &'a mut TimerQueue,
        effects: &'a mut Vec<Effect>,
    ) -> Self {
        Self {
            view,
            listeners,
            timers,
            effects,
        }
    }

    /// The read-only view.
    pub fn view(&self) -> RenderContext<'a> {
        self.view
    }

    // ── Attributes ──────────────────────────────────────────────────

    /// Set an attribute on the host.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let host = self.view.host;
        self.set_node_attribute(host, name, value);
    }

    /// Remove an attribute from the host.
    pub fn remove_attribute(&mut self, name: &str) {
        let host = self.view.host;
        self.remove_node_attribute(host, name);
    }

    /// Set or remove a presence attribute on the host.
    pub fn set_flag(&mut self, name: &str, on: bool) {
        let host = self.view.host;
        self.set_node_flag(host, name, on);
    }

    /// Write a typed property of the host.
    pub fn set_prop<P: Property>(&mut self, prop: &P, value: P::Value) {
        let host = self.view.host;
        self.set_node_prop(host, prop, value);
    }

    /// Set an attribute on any node (typically a light-DOM child).
    pub fn set_node_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        self.effects.push(Effect::SetAttribute {
            node,
            name: name.to_owned(),
            value: Some(value.into()),
        });
    }

    /// Remove an attribute from any node.
    pub fn remove_node_attribute(&mut self, node: NodeId, name: &str) {
        self.effects.push(Effect::SetAttribute {
            node,
            name: name.to_owned(),
            value: None,
        });
    }

    /// Set or remove a presence attribute on any node.
    pub fn set_node_flag(&mut self, node: NodeId, name: &str, on: bool) {
        self.effects.push(Effect::SetAttribute {
            node,
            name: name.to_owned(),
            value: on.then(String::new),
        });
    }

    /// Write a typed property of any node.
    pub fn set_node_prop<P: Property>(&mut self, node: NodeId, prop: &P, value: P::Value) {
        self.effects.push(Effect::SetAttribute {
            node,
            name: prop.name().to_owned(),
            value: prop.write(&value),
        });
    }

    // ── Events ──────────────────────────────────────────────────────

    /// Emit a bubbling, composed, cancelable event from the host.
    ///
    /// `detail` should be a JSON object; other values give an empty detail.
    pub fn emit(&mut self, name: &str, detail: Value) {
        self.effects.push(Effect::Emit {
            from: self.view.host,
            name: name.to_owned(),
            detail: into_detail(detail),
        });
    }

    /// Re-render the host once pending effects are applied.
    pub fn request_render(&mut self) {
        self.effects.push(Effect::Render(self.view.host));
    }

    /// Re-render another component (e.g. the container of this node).
    pub fn request_render_of(&mut self, node: NodeId) {
        self.effects.push(Effect::Render(node));
    }

    // ── Timers ──────────────────────────────────────────────────────

    /// Install the host's `key` timer, replacing any running one.
    pub fn set_timer(&mut self, key: &'static str, delay: Duration, repeat: bool) {
        self.timers.set(self.view.host, key, delay, repeat);
    }

    /// Stop the host's `key` timer.
    pub fn clear_timer(&mut self, key: &'static str) -> bool {
        self.timers.clear(self.view.host, key)
    }

    /// Whether the host's `key` timer is running.
    pub fn timer_active(&self, key: &str) -> bool {
        self.timers.is_active(self.view.host, key)
    }

    // ── Document listeners ──────────────────────────────────────────

    /// Acquire a document-level listener bound to the host.
    pub fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        self.listeners.acquire(self.view.host, kind)
    }

    /// Release a document-level listener.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.listeners.release(id)
    }
}
