//! The document runtime.
//!
//! A [`Document`] owns the light DOM, the component registry, every mounted
//! component with its shadow root, the timer queue, and the document-level
//! listener registry. It is the only place where hooks run, which lets it
//! guarantee the ordering rules the components depend on:
//!
//! - Inserting into the document connects the subtree in pre-order: upgrade,
//!   `connected`, first render.
//! - Removing disconnects children before parents. After a component's
//!   `disconnected` hook the runtime releases every document listener and
//!   timer the node still holds, so nothing outlives the node whichever way it
//!   left the tree.
//! - An observed attribute change with `old != new` runs `attribute_changed`
//!   and re-renders; a change to an unobserved attribute does nothing.
//! - Dispatch walks the bubble path first and only then runs document-level
//!   listeners, so a component has fully handled a click inside itself before
//!   any outside-click check looks at it.

use std::time::Duration;

use serde_json::Value;
use slotmap::SecondaryMap;
use thiserror::Error;

use crate::config::RuntimeConfig;
use crate::dom::{Dom, NodeData, NodeId};
use crate::element::{
    Component, ComponentRegistry, Context, Effect, LifecycleEvent, LifecycleTracker, Property,
    RenderContext,
};
use crate::event::{
    bubble_path, into_detail, Callback, Event, EventLog, ExternalListeners, Key, ListenerKind,
    ListenerRegistry,
};
use crate::geometry::Size;
use crate::markup::{self, MarkupError};
use crate::render::ShadowRoot;
use crate::timer::TimerQueue;

// ---------------------------------------------------------------------------
// DocumentError
// ---------------------------------------------------------------------------

/// Errors from structural document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("unknown node")]
    UnknownNode,

    #[error("node is not connected to the document")]
    NotConnected,

    #[error("the document body cannot be removed")]
    RemoveBody,

    #[error("a node cannot be inserted into its own subtree")]
    Cycle,

    #[error(transparent)]
    Markup(#[from] MarkupError),
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

struct Mounted {
    /// `None` only while one of the component's own hooks is running.
    component: Option<Box<dyn Component>>,
    shadow: ShadowRoot,
}

/// A headless document hosting custom elements.
pub struct Document {
    dom: Dom,
    body: NodeId,
    registry: ComponentRegistry,
    config: RuntimeConfig,
    mounted: SecondaryMap<NodeId, Mounted>,
    lifecycle: LifecycleTracker,
    listeners: ListenerRegistry,
    external: ExternalListeners,
    timers: TimerQueue,
    boxes: SecondaryMap<NodeId, Size>,
    log: EventLog,
}

impl Document {
    /// An empty document with a `body` root.
    pub fn new(registry: ComponentRegistry, config: RuntimeConfig) -> Self {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::element("body"));
        dom.set_root(body);
        let log = EventLog::with_limit(config.event_log_limit);
        Self {
            dom,
            body,
            registry,
            config,
            mounted: SecondaryMap::new(),
            lifecycle: LifecycleTracker::new(),
            listeners: ListenerRegistry::new(),
            external: ExternalListeners::new(),
            timers: TimerQueue::new(),
            boxes: SecondaryMap::new(),
            log,
        }
    }

    /// A document with every built-in component registered under the
    /// config's tag prefix.
    pub fn with_defaults(config: RuntimeConfig) -> Self {
        let registry = ComponentRegistry::with_defaults(&config.tag_prefix);
        Self::new(registry, config)
    }

    /// The body node.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The light DOM.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// The runtime configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The component registry.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Whether `node` is in the document (the body or one of its descendants).
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.dom.contains(node) && self.dom.is_inclusive_ancestor(self.body, node)
    }

    /// Descendants of the body with tag `tag`, in tree order.
    pub fn query(&self, tag: &str) -> Vec<NodeId> {
        self.dom.descendants_by_tag(self.body, tag)
    }

    /// The first descendant of the body with tag `tag`.
    pub fn query_one(&self, tag: &str) -> Option<NodeId> {
        self.query(tag).into_iter().next()
    }

    // ── Structure ───────────────────────────────────────────────────

    /// Append a new node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId, DocumentError> {
        self.ensure_exists(parent)?;
        let node = self.dom.insert(data);
        self.insert_nodes(parent, &[node], None)?;
        Ok(node)
    }

    /// Parse `markup` and append the resulting nodes to `parent`.
    pub fn append_markup(
        &mut self,
        parent: NodeId,
        markup: &str,
    ) -> Result<Vec<NodeId>, DocumentError> {
        self.ensure_exists(parent)?;
        let roots = markup::parse_into(&mut self.dom, markup)?;
        self.insert_nodes(parent, &roots, None)?;
        Ok(roots)
    }

    /// Insert a new node into `parent` before its child `before`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        data: NodeData,
        before: NodeId,
    ) -> Result<NodeId, DocumentError> {
        self.ensure_exists(parent)?;
        let node = self.dom.insert(data);
        self.insert_nodes(parent, &[node], Some(before))?;
        Ok(node)
    }

    /// Move an existing node under `parent`, before `before` (or last).
    ///
    /// Reordering within the document keeps components connected; moving a
    /// node into or out of the document connects or disconnects it.
    pub fn move_before(
        &mut self,
        node: NodeId,
        parent: NodeId,
        before: Option<NodeId>,
    ) -> Result<(), DocumentError> {
        self.ensure_exists(node)?;
        self.ensure_exists(parent)?;
        if node == self.body {
            return Err(DocumentError::RemoveBody);
        }
        if self.dom.is_inclusive_ancestor(node, parent) {
            return Err(DocumentError::Cycle);
        }

        let was_connected = self.is_connected(node);
        let now_connected = self.is_connected(parent);
        let old_parent = self.dom.parent(node);

        if was_connected && !now_connected {
            self.disconnect_subtree(node);
        }
        self.dom.attach(node, parent, before);
        if !was_connected && now_connected {
            self.connect_subtree(node);
        }

        if let Some(old) = old_parent.filter(|&p| p != parent) {
            self.notify_children_changed(old);
        }
        self.notify_children_changed(parent);
        Ok(())
    }

    /// Remove `node` and its subtree from the document and the arena.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DocumentError> {
        self.ensure_exists(node)?;
        if node == self.body {
            return Err(DocumentError::RemoveBody);
        }
        if self.is_connected(node) {
            self.disconnect_subtree(node);
        }
        let parent = self.dom.parent(node);
        for id in self.dom.walk_depth_first(node) {
            self.boxes.remove(id);
            self.external.remove_node(id);
            self.mounted.remove(id);
        }
        self.dom.remove(node);
        if let Some(parent) = parent {
            self.notify_children_changed(parent);
        }
        Ok(())
    }

    fn insert_nodes(
        &mut self,
        parent: NodeId,
        nodes: &[NodeId],
        before: Option<NodeId>,
    ) -> Result<(), DocumentError> {
        for &node in nodes {
            if self.dom.is_inclusive_ancestor(node, parent) {
                return Err(DocumentError::Cycle);
            }
            self.dom.attach(node, parent, before);
        }
        if self.is_connected(parent) {
            for &node in nodes {
                self.connect_subtree(node);
            }
        }
        self.notify_children_changed(parent);
        Ok(())
    }

    fn ensure_exists(&self, node: NodeId) -> Result<(), DocumentError> {
        if self.dom.contains(node) {
            Ok(())
        } else {
            Err(DocumentError::UnknownNode)
        }
    }

    fn ensure_connected(&self, node: NodeId) -> Result<(), DocumentError> {
        self.ensure_exists(node)?;
        if self.is_connected(node) {
            Ok(())
        } else {
            Err(DocumentError::NotConnected)
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    fn connect_subtree(&mut self, root: NodeId) {
        for node in self.dom.walk_depth_first(root) {
            if !self.is_connected(node) || self.mounted.contains_key(node) {
                continue;
            }
            let Some(tag) = self.dom.get(node).map(|d| d.tag.clone()) else {
                continue;
            };
            let Some(component) = self.registry.create(&tag) else {
                continue;
            };
            tracing::debug!(?node, %tag, "component connected");
            self.mounted.insert(
                node,
                Mounted {
                    component: Some(component),
                    shadow: ShadowRoot::new(node),
                },
            );
            self.lifecycle.on_connect(node);
            self.run_hook(node, |c, cx| c.connected(cx));
            self.render(node);
        }
    }

    fn disconnect_subtree(&mut self, root: NodeId) {
        let mut nodes = self.dom.walk_depth_first(root);
        nodes.reverse();
        for node in nodes {
            if !self.mounted.contains_key(node) {
                continue;
            }
            self.run_hook(node, |c, cx| c.disconnected(cx));
            self.listeners.release_owner(node);
            self.timers.cancel_owner(node);
            self.lifecycle.on_disconnect(node);
            self.mounted.remove(node);
            tracing::debug!(?node, "component disconnected");
        }
    }

    /// Run `hook` on the component mounted at `node` and apply the effects it
    /// queued. Returns `None` if no component is mounted there.
    fn run_hook<R>(
        &mut self,
        node: NodeId,
        hook: impl FnOnce(&mut dyn Component, &mut Context<'_>) -> R,
    ) -> Option<R> {
        let mut component = self.mounted.get_mut(node)?.component.take()?;
        let mut effects = Vec::new();
        let result = {
            let view = RenderContext {
                host: node,
                dom: &self.dom,
                config: &self.config,
                boxes: &self.boxes,
            };
            let mut cx = Context::new(view, &mut self.listeners, &mut self.timers, &mut effects);
            hook(&mut *component, &mut cx)
        };
        if let Some(mounted) = self.mounted.get_mut(node) {
            mounted.component = Some(component);
        }
        self.apply_effects(effects);
        Some(result)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SetAttribute { node, name, value } => {
                    if let Err(err) = self.write_attribute(node, &name, value) {
                        tracing::debug!(?node, %name, %err, "attribute effect dropped");
                    }
                }
                Effect::Emit { from, name, detail } => {
                    if self.is_connected(from) {
                        let mut event = Event::custom(&name, from, detail);
                        self.dispatch_event(&mut event);
                    }
                }
                Effect::Render(node) => self.render(node),
            }
        }
    }

    fn render(&mut self, node: NodeId) {
        let tree = {
            let Some(component) = self.mounted.get(node).and_then(|m| m.component.as_deref())
            else {
                return;
            };
            let view = RenderContext {
                host: node,
                dom: &self.dom,
                config: &self.config,
                boxes: &self.boxes,
            };
            component.render(&view)
        };
        if let Some(mounted) = self.mounted.get_mut(node) {
            mounted.shadow.replace(tree);
            tracing::debug!(?node, renders = mounted.shadow.render_count(), "rendered");
        }
        self.lifecycle.on_render(node);
    }

    fn observes(&self, node: NodeId, name: &str) -> bool {
        self.mounted
            .get(node)
            .and_then(|m| m.component.as_deref())
            .is_some_and(|c| c.observed_attributes().contains(&name))
    }

    fn observes_child_attribute(&self, parent: NodeId, name: &str) -> bool {
        self.mounted
            .get(parent)
            .and_then(|m| m.component.as_deref())
            .is_some_and(|c| c.observes_children() && c.observed_child_attributes().contains(&name))
    }

    fn notify_children_changed(&mut self, parent: NodeId) {
        let observes = self
            .mounted
            .get(parent)
            .and_then(|m| m.component.as_deref())
            .is_some_and(|c| c.observes_children());
        if observes {
            self.lifecycle.on_children_changed(parent);
            self.run_hook(parent, |c, cx| c.children_changed(cx));
            self.render(parent);
        }
    }

    /// Drain the recorded lifecycle events.
    pub fn lifecycle_events(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.pending_events()
    }

    // ── Attributes ──────────────────────────────────────────────────

    fn write_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: Option<String>,
    ) -> Result<bool, DocumentError> {
        let name = name.to_ascii_lowercase();
        let data = self.dom.get_mut(node).ok_or(DocumentError::UnknownNode)?;
        if data.is_text() {
            return Ok(false);
        }
        let old = match &value {
            Some(v) => data.attributes.set(&name, v.clone()),
            None => data.attributes.remove(&name),
        };
        if old == value {
            return Ok(false);
        }
        tracing::trace!(?node, %name, ?old, new = ?value, "attribute changed");

        if self.observes(node, &name) {
            self.lifecycle.on_attribute_changed(node, &name);
            self.run_hook(node, |c, cx| {
                c.attribute_changed(cx, &name, old.as_deref(), value.as_deref())
            });
            self.render(node);
        }
        if let Some(parent) = self.dom.parent(node) {
            if self.observes_child_attribute(parent, &name) {
                self.notify_children_changed(parent);
            }
        }
        Ok(true)
    }

    /// Set an attribute. Observed changes re-render the component.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.write_attribute(node, name, Some(value.into()))
            .map(drop)
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DocumentError> {
        self.write_attribute(node, name, None).map(drop)
    }

    /// Toggle a presence attribute, or force it with `force`. Returns whether
    /// the attribute is present afterwards.
    pub fn toggle_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        force: Option<bool>,
    ) -> Result<bool, DocumentError> {
        let present = self.get_attribute(node, name).is_some();
        let on = force.unwrap_or(!present);
        self.write_attribute(node, name, on.then(String::new))?;
        Ok(on)
    }

    /// Current value of an attribute.
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.dom.get(node)?.attr(&name.to_ascii_lowercase())
    }

    /// Read a typed property (defaults for unknown nodes).
    pub fn prop<P: Property>(&self, node: NodeId, prop: &P) -> P::Value {
        let view = RenderContext {
            host: node,
            dom: &self.dom,
            config: &self.config,
            boxes: &self.boxes,
        };
        view.prop(prop)
    }

    /// Write a typed property through its attribute.
    pub fn set_prop<P: Property>(
        &mut self,
        node: NodeId,
        prop: &P,
        value: P::Value,
    ) -> Result<(), DocumentError> {
        self.write_attribute(node, prop.name(), prop.write(&value))
            .map(drop)
    }

    /// Trimmed text content of `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        self.dom.text_content(node)
    }

    // ── Geometry ────────────────────────────────────────────────────

    /// Record the measured box of `node`. The node's component re-renders and
    /// a parent observing its children is notified.
    pub fn resize(&mut self, node: NodeId, size: Size) -> Result<(), DocumentError> {
        self.ensure_exists(node)?;
        if self.boxes.get(node) == Some(&size) {
            return Ok(());
        }
        self.boxes.insert(node, size);
        if self.run_hook(node, |c, cx| c.resized(cx)).is_some() {
            self.render(node);
        }
        if let Some(parent) = self.dom.parent(node) {
            self.notify_children_changed(parent);
        }
        Ok(())
    }

    /// Measured box of `node`, if recorded.
    pub fn box_size(&self, node: NodeId) -> Option<Size> {
        self.boxes.get(node).copied()
    }

    // ── Events ──────────────────────────────────────────────────────

    fn dispatch_event(&mut self, event: &mut Event) {
        let mut path = bubble_path(&self.dom, event.target);
        if !event.bubbles {
            path.truncate(1);
        }
        tracing::trace!(name = %event.name, target = ?event.target, "dispatch");

        for &node in &path {
            if !self.dom.contains(node) {
                continue;
            }
            event.current_target = Some(node);
            self.run_hook(node, |c, cx| c.handle_event(cx, event));
            self.external.fire(node, event);
            if event.is_propagation_stopped() {
                break;
            }
        }
        event.current_target = None;

        if event.is_propagation_stopped() {
            return;
        }
        if path.last() == Some(&self.body) && self.log.is_recording() {
            self.log.push(event.clone());
        }

        let Some(kind) = ListenerKind::for_event(&event.name) else {
            return;
        };
        for (id, owner) in self.listeners.snapshot(kind) {
            if !self.listeners.is_active(id) {
                continue;
            }
            let inside = self.dom.contains(event.target)
                && self.dom.is_inclusive_ancestor(owner, event.target);
            let event: &Event = event;
            self.run_hook(owner, |c, cx| c.handle_document_event(cx, event, inside));
        }
    }

    /// Dispatch `event` at its target. Returns `false` if it was canceled.
    pub fn dispatch(&mut self, mut event: Event) -> Result<bool, DocumentError> {
        self.ensure_connected(event.target)?;
        self.dispatch_event(&mut event);
        Ok(!event.is_default_prevented())
    }

    /// Emit a custom event from `node` synchronously. Returns `false` if a
    /// listener canceled it.
    pub fn emit(&mut self, node: NodeId, name: &str, detail: Value) -> Result<bool, DocumentError> {
        self.dispatch(Event::custom(name, node, into_detail(detail)))
    }

    /// Click `node`.
    pub fn click(&mut self, node: NodeId) -> Result<bool, DocumentError> {
        self.dispatch(Event::click(node))
    }

    /// Click the shadow part `part` of component `host`.
    ///
    /// Nothing is dispatched when the part is not rendered or is disabled;
    /// the result is then `Ok(false)`.
    pub fn click_part(&mut self, host: NodeId, part: &str) -> Result<bool, DocumentError> {
        self.ensure_connected(host)?;
        if !self.shadow(host).is_some_and(|s| s.part_enabled(part)) {
            return Ok(false);
        }
        self.dispatch(Event::click_part(host, part))
    }

    /// Press `key` with focus on `node`.
    pub fn key_down(&mut self, node: NodeId, key: Key) -> Result<bool, DocumentError> {
        self.dispatch(Event::keydown(node, key))
    }

    /// Replace the text of an input inside `host` (optionally a named part).
    pub fn input(
        &mut self,
        host: NodeId,
        part: Option<&str>,
        text: &str,
    ) -> Result<bool, DocumentError> {
        self.dispatch(Event::input(host, part, text))
    }

    /// Move the pointer onto `node`.
    pub fn pointer_enter(&mut self, node: NodeId) -> Result<bool, DocumentError> {
        self.dispatch(Event::pointer_enter(node))
    }

    /// Move the pointer off `node`.
    pub fn pointer_leave(&mut self, node: NodeId) -> Result<bool, DocumentError> {
        self.dispatch(Event::pointer_leave(node))
    }

    /// Move focus out of `node`.
    pub fn focus_out(&mut self, node: NodeId) -> Result<bool, DocumentError> {
        self.dispatch(Event::focus_out(node))
    }

    /// Attach a listener for `name` events reaching `node`.
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        name: &str,
        callback: impl FnMut(&mut Event) + 'static,
    ) -> Result<(), DocumentError> {
        self.ensure_exists(node)?;
        let callback: Callback = Box::new(callback);
        self.external.add(node, name, callback);
        Ok(())
    }

    /// Events that reached the body, oldest first. Only the most recent
    /// [`RuntimeConfig::event_log_limit`] are kept.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.log.iter()
    }

    /// Events named `name` that reached the body.
    pub fn events_named<'a>(&'a self, name: &'a str) -> Vec<&'a Event> {
        self.log.named(name).collect()
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.log.drain()
    }

    /// Number of document-level listeners `node` holds.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.count_for(node)
    }

    /// Total number of document-level listeners.
    pub fn total_listeners(&self) -> usize {
        self.listeners.len()
    }

    // ── Timers ──────────────────────────────────────────────────────

    /// Advance the virtual clock by `by`, firing due timers in deadline order.
    /// Returns how many timers fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.timers.now().saturating_add(by);
        let mut fired = 0;
        while let Some((owner, key)) = self.timers.pop_due(until) {
            fired += 1;
            self.run_hook(owner, |c, cx| c.timer_fired(cx, key));
        }
        self.timers.settle(until);
        fired
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Deadline of the next timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Whether `node` has an active `key` timer.
    pub fn timer_active(&self, node: NodeId, key: &str) -> bool {
        self.timers.is_active(node, key)
    }

    /// Number of active timers `node` owns.
    pub fn timer_count(&self, node: NodeId) -> usize {
        self.timers.count_for(node)
    }

    // ── Components and shadow roots ─────────────────────────────────

    /// Whether a component is mounted at `node`.
    pub fn is_mounted(&self, node: NodeId) -> bool {
        self.mounted.contains_key(node)
    }

    /// The shadow root of the component at `node`.
    pub fn shadow(&self, node: NodeId) -> Option<&ShadowRoot> {
        self.mounted.get(node).map(|m| &m.shadow)
    }

    /// Serialized shadow subtree of the component at `node`.
    pub fn shadow_html(&self, node: NodeId) -> Option<String> {
        self.shadow(node).map(ShadowRoot::to_html)
    }

    /// How many times the component at `node` has rendered.
    pub fn render_count(&self, node: NodeId) -> u64 {
        self.shadow(node).map_or(0, ShadowRoot::render_count)
    }

    /// Borrow the component at `node` as `T`.
    pub fn component<T: Component>(&self, node: NodeId) -> Option<&T> {
        self.mounted
            .get(node)?
            .component
            .as_deref()?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Run `f` against the component at `node` as `T` with a hook context,
    /// applying its effects afterwards. This is how component methods such as
    /// `Carousel::next` are invoked from outside.
    pub fn with_component<T: Component, R>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut T, &mut Context<'_>) -> R,
    ) -> Option<R> {
        self.run_hook(node, |c, cx| {
            c.as_any_mut().downcast_mut::<T>().map(|t| f(t, cx))
        })
        .flatten()
    }

    /// Re-render the component at `node` without any state change.
    pub fn rerender(&mut self, node: NodeId) {
        self.render(node);
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.dom.len())
            .field("mounted", &self.mounted.len())
            .field("listeners", &self.listeners.len())
            .field("timers", &self.timers.len())
            .field("now", &self.timers.now())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
