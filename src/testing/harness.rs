//! Harness: programmatic interaction with a headless document.
//!
//! The `Harness` wraps a [`Document`] with every built-in component defined
//! and provides methods to mount markup, simulate user input (clicks, keys,
//! text input, pointer, resize), advance the virtual clock, and inspect
//! attributes, rendered parts, and emitted events.
//!
//! Harness methods panic on structural errors (unknown or detached nodes,
//! malformed markup): a failed harness call is a failed test.

use std::time::Duration;

use crate::config::RuntimeConfig;
use crate::document::Document;
use crate::dom::NodeId;
use crate::element::ComponentRegistry;
use crate::event::{Detail, Key};
use crate::geometry::Size;
use crate::render::VElement;

use super::snapshot::shadow_outline;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A headless document driver for testing.
///
/// # Examples
///
/// ```
/// use aui::testing::Harness;
///
/// let mut ui = Harness::new();
/// let tabs = ui.mount(
///     r#"<aui-tabs><aui-tab value="a">A</aui-tab><aui-tab value="b">B</aui-tab></aui-tabs>"#,
/// );
/// let second = ui.find_all("aui-tab")[1];
/// ui.click(second);
/// assert_eq!(ui.attr(tabs, "value").as_deref(), Some("b"));
/// ```
pub struct Harness {
    doc: Document,
}

impl Harness {
    /// A document with the default config and every built-in component.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// A document with `config` and every built-in component.
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            doc: Document::with_defaults(config),
        }
    }

    /// A document with a custom registry.
    pub fn with_registry(registry: ComponentRegistry, config: RuntimeConfig) -> Self {
        Self {
            doc: Document::new(registry, config),
        }
    }

    // ── Structure ────────────────────────────────────────────────────

    /// Append `markup` to the body and return its first root node.
    #[track_caller]
    pub fn mount(&mut self, markup: &str) -> NodeId {
        let body = self.doc.body();
        self.mount_into(body, markup)
    }

    /// Append `markup` under `parent` and return its first root node.
    #[track_caller]
    pub fn mount_into(&mut self, parent: NodeId, markup: &str) -> NodeId {
        match self.doc.append_markup(parent, markup) {
            Ok(roots) => match roots.first() {
                Some(&root) => root,
                None => panic!("markup produced no nodes: {markup:?}"),
            },
            Err(err) => panic!("mount failed: {err}"),
        }
    }

    /// Remove `node` from the document.
    #[track_caller]
    pub fn remove(&mut self, node: NodeId) {
        if let Err(err) = self.doc.remove(node) {
            panic!("remove failed: {err}");
        }
    }

    /// First connected element with tag `tag`.
    #[track_caller]
    pub fn find(&self, tag: &str) -> NodeId {
        match self.doc.query_one(tag) {
            Some(node) => node,
            None => panic!("no <{tag}> in the document"),
        }
    }

    /// Every connected element with tag `tag`, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<NodeId> {
        self.doc.query(tag)
    }

    // ── Attributes ───────────────────────────────────────────────────

    /// Set an attribute at the platform boundary.
    #[track_caller]
    pub fn set(&mut self, node: NodeId, name: &str, value: &str) {
        if let Err(err) = self.doc.set_attribute(node, name, value) {
            panic!("set_attribute failed: {err}");
        }
    }

    /// Remove an attribute.
    #[track_caller]
    pub fn unset(&mut self, node: NodeId, name: &str) {
        if let Err(err) = self.doc.remove_attribute(node, name) {
            panic!("remove_attribute failed: {err}");
        }
    }

    /// Current value of an attribute.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.doc.get_attribute(node, name).map(str::to_owned)
    }

    /// Whether an attribute is present.
    pub fn has(&self, node: NodeId, name: &str) -> bool {
        self.doc.get_attribute(node, name).is_some()
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Click `node`. Returns `false` if the click was canceled.
    #[track_caller]
    pub fn click(&mut self, node: NodeId) -> bool {
        self.doc
            .click(node)
            .unwrap_or_else(|err| panic!("click failed: {err}"))
    }

    /// Click the shadow part `part` of `host`. Returns `false` when the part
    /// is missing or disabled, or the click was canceled.
    #[track_caller]
    pub fn click_part(&mut self, host: NodeId, part: &str) -> bool {
        self.doc
            .click_part(host, part)
            .unwrap_or_else(|err| panic!("click_part failed: {err}"))
    }

    /// Press `key` with focus on `node`.
    #[track_caller]
    pub fn press(&mut self, node: NodeId, key: Key) -> bool {
        self.doc
            .key_down(node, key)
            .unwrap_or_else(|err| panic!("key_down failed: {err}"))
    }

    /// Replace the text of the input part `part` of `host`.
    #[track_caller]
    pub fn type_text(&mut self, host: NodeId, part: &str, text: &str) -> bool {
        self.doc
            .input(host, Some(part), text)
            .unwrap_or_else(|err| panic!("input failed: {err}"))
    }

    /// Move the pointer onto `node`.
    #[track_caller]
    pub fn hover(&mut self, node: NodeId) {
        if let Err(err) = self.doc.pointer_enter(node) {
            panic!("pointer_enter failed: {err}");
        }
    }

    /// Move the pointer off `node`.
    #[track_caller]
    pub fn unhover(&mut self, node: NodeId) {
        if let Err(err) = self.doc.pointer_leave(node) {
            panic!("pointer_leave failed: {err}");
        }
    }

    /// Move focus out of `node`.
    #[track_caller]
    pub fn blur(&mut self, node: NodeId) {
        if let Err(err) = self.doc.focus_out(node) {
            panic!("focus_out failed: {err}");
        }
    }

    /// Record a measured box for `node`.
    #[track_caller]
    pub fn resize(&mut self, node: NodeId, width: f32, height: f32) {
        if let Err(err) = self.doc.resize(node, Size::new(width, height)) {
            panic!("resize failed: {err}");
        }
    }

    /// Advance the virtual clock by `ms` milliseconds. Returns how many
    /// timers fired.
    pub fn advance_ms(&mut self, ms: u64) -> usize {
        self.doc.advance(Duration::from_millis(ms))
    }

    // ── Rendered output ──────────────────────────────────────────────

    /// The rendered shadow part `name` of `host`.
    pub fn part(&self, host: NodeId, name: &str) -> Option<VElement> {
        self.doc.shadow(host)?.tree().part(name).cloned()
    }

    /// Whether `host` renders a part named `name`.
    pub fn has_part(&self, host: NodeId, name: &str) -> bool {
        self.part(host, name).is_some()
    }

    /// Every rendered part name of `host` starting with `prefix`.
    pub fn parts_with_prefix(&self, host: NodeId, prefix: &str) -> Vec<String> {
        let Some(shadow) = self.doc.shadow(host) else {
            return Vec::new();
        };
        shadow
            .tree()
            .find_all(&|el| el.get_attr("part").is_some_and(|p| p.starts_with(prefix)))
            .into_iter()
            .filter_map(|el| el.get_attr("part").map(str::to_owned))
            .collect()
    }

    /// Text of the shadow subtree of `host`, `<style>` excluded.
    pub fn text(&self, host: NodeId) -> String {
        self.doc
            .shadow(host)
            .map(|s| s.tree().text_content())
            .unwrap_or_default()
    }

    /// Serialized shadow HTML of `host`.
    pub fn html(&self, host: NodeId) -> String {
        self.doc.shadow_html(host).unwrap_or_default()
    }

    /// Indented outline of the shadow subtree of `host`.
    pub fn outline(&self, host: NodeId) -> String {
        shadow_outline(&self.doc, host)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Details of every logged event named `name`, oldest first.
    pub fn events(&self, name: &str) -> Vec<Detail> {
        self.doc
            .events_named(name)
            .into_iter()
            .map(|e| e.detail.clone())
            .collect()
    }

    /// Detail of the most recent event named `name`.
    pub fn last_event(&self, name: &str) -> Option<Detail> {
        self.events(name).pop()
    }

    /// Forget every logged event.
    pub fn clear_events(&mut self) {
        self.doc.take_events();
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the underlying document.
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    /// Borrow the underlying document mutably.
    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mount_returns_first_root() {
        let mut ui = Harness::new();
        let node = ui.mount(r#"<aui-badge value="3"></aui-badge><aui-badge></aui-badge>"#);
        assert_eq!(ui.find("aui-badge"), node);
        assert_eq!(ui.find_all("aui-badge").len(), 2);
        assert!(ui.doc().is_mounted(node));
    }

    #[test]
    fn attributes_round_trip() {
        let mut ui = Harness::new();
        let node = ui.mount("<aui-badge></aui-badge>");
        ui.set(node, "value", "7");
        assert_eq!(ui.attr(node, "value").as_deref(), Some("7"));
        ui.unset(node, "value");
        assert!(!ui.has(node, "value"));
    }

    #[test]
    fn events_collect_details() {
        let mut ui = Harness::new();
        let node = ui.mount("<aui-badge></aui-badge>");
        ui.doc_mut().emit(node, "ping", json!({"n": 1})).unwrap();
        ui.doc_mut().emit(node, "ping", json!({"n": 2})).unwrap();
        assert_eq!(ui.events("ping").len(), 2);
        assert_eq!(ui.last_event("ping").unwrap()["n"], json!(2));
        ui.clear_events();
        assert!(ui.events("ping").is_empty());
    }

    #[test]
    fn missing_part_is_none() {
        let mut ui = Harness::new();
        let node = ui.mount("<aui-badge></aui-badge>");
        assert!(!ui.has_part(node, "nope"));
        assert!(!ui.click_part(node, "nope"));
    }

    #[test]
    #[should_panic(expected = "no <aui-tabs>")]
    fn find_panics_when_missing() {
        Harness::new().find("aui-tabs");
    }
}
