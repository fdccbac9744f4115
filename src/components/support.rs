//! Helpers shared by the composite widgets.
//!
//! Disclosure widgets (menu, select, pickers, drawer, dialog) hold their
//! document-level listeners through a [`DocumentListeners`] value: acquire on
//! open, release on close, and release again on disconnect. [`Overlay`] wraps
//! that for the modal surfaces. Keyboard helpers
//! implement the wrap-around movement over enabled items that tabs, menus,
//! listboxes and trees share.

use crate::attr_enum;
use crate::dom::NodeId;
use crate::element::{Context, RenderContext};
use crate::event::{Event, ListenerId, ListenerKind};

attr_enum! {
    /// Size scale shared by buttons, switches, and dialogs.
    pub enum ControlSize {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
}

// ---------------------------------------------------------------------------
// DocumentListeners
// ---------------------------------------------------------------------------

/// The document-level listeners one component instance currently holds.
#[derive(Debug, Default)]
pub struct DocumentListeners {
    held: Vec<ListenerId>,
}

impl DocumentListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire one listener per kind. A no-op if listeners are already held.
    pub fn acquire(&mut self, cx: &mut Context<'_>, kinds: &[ListenerKind]) {
        if !self.held.is_empty() {
            return;
        }
        self.held = kinds.iter().map(|&kind| cx.listen(kind)).collect();
    }

    /// Release everything held.
    pub fn release(&mut self, cx: &mut Context<'_>) {
        for id in self.held.drain(..) {
            cx.unlisten(id);
        }
    }

    /// Whether any listener is held.
    pub fn is_held(&self) -> bool {
        !self.held.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// Open/close bookkeeping for modal surfaces driven by an `open` attribute.
///
/// A keydown listener is held only while open so Escape can close the
/// surface from anywhere in the document.
#[derive(Debug, Default)]
pub struct Overlay {
    listeners: DocumentListeners,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire or release the keydown listener to match `open`.
    pub fn sync(&mut self, cx: &mut Context<'_>, open: bool) {
        if open {
            self.listeners.acquire(cx, &[ListenerKind::KeyDown]);
        } else {
            self.listeners.release(cx);
        }
    }

    /// React to an `open` attribute change: sync listeners and emit
    /// `open`/`close` when presence flipped.
    pub fn open_changed(&mut self, cx: &mut Context<'_>, old: Option<&str>, new: Option<&str>) {
        if old.is_some() == new.is_some() {
            return;
        }
        let open = new.is_some();
        self.sync(cx, open);
        cx.emit(if open { "open" } else { "close" }, serde_json::json!({}));
    }

    /// Close unless `persistent` is set. Returns whether a close was queued.
    pub fn dismiss(&self, cx: &mut Context<'_>) -> bool {
        let attrs = cx.attrs();
        if !attrs.contains("open") || attrs.contains("persistent") {
            return false;
        }
        cx.remove_attribute("open");
        true
    }

    /// Whether the keydown listener is held.
    pub fn is_listening(&self) -> bool {
        self.listeners.is_held()
    }
}

// ---------------------------------------------------------------------------
// Keyboard movement
// ---------------------------------------------------------------------------

/// Move from `current` to the next (`forward`) or previous enabled entry,
/// wrapping around. With no current entry, forward picks the first enabled
/// entry and backward the last. `None` when nothing is enabled.
pub fn step_enabled(enabled: &[bool], current: Option<usize>, forward: bool) -> Option<usize> {
    let len = enabled.len();
    if len == 0 || !enabled.iter().any(|&e| e) {
        return None;
    }
    let mut index = match (current, forward) {
        (Some(i), _) if i < len => i,
        (_, true) => len - 1,
        (_, false) => 0,
    };
    for _ in 0..len {
        index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        if enabled[index] {
            return Some(index);
        }
    }
    None
}

/// First enabled entry.
pub fn first_enabled(enabled: &[bool]) -> Option<usize> {
    enabled.iter().position(|&e| e)
}

/// Last enabled entry.
pub fn last_enabled(enabled: &[bool]) -> Option<usize> {
    enabled.iter().rposition(|&e| e)
}

// ---------------------------------------------------------------------------
// Light-DOM helpers
// ---------------------------------------------------------------------------

/// Display label of an item: its non-empty `label` attribute, else its text.
pub fn label_of(cx: &RenderContext<'_>, node: NodeId) -> String {
    match cx.attrs_of(node).get("label").filter(|l| !l.is_empty()) {
        Some(label) => label.to_owned(),
        None => cx.text_content(node),
    }
}

/// Value of an item: its `value` attribute, else its label.
pub fn value_of(cx: &RenderContext<'_>, node: NodeId) -> String {
    match cx.attrs_of(node).get("value") {
        Some(value) => value.to_owned(),
        None => label_of(cx, node),
    }
}

/// Whether an item carries the `disabled` attribute.
pub fn is_disabled(cx: &RenderContext<'_>, node: NodeId) -> bool {
    cx.attrs_of(node).contains("disabled")
}

/// The nearest inclusive ancestor of `target` with tag `tag`, searching no
/// higher than the host.
pub fn closest_in_host(cx: &RenderContext<'_>, target: NodeId, tag: &str) -> Option<NodeId> {
    if !cx.dom.is_inclusive_ancestor(cx.host, target) {
        return None;
    }
    cx.dom.closest(target, tag, cx.host)
}

/// The direct child of the host that contains `target`.
pub fn host_child_containing(cx: &RenderContext<'_>, target: NodeId) -> Option<NodeId> {
    let mut current = target;
    loop {
        let parent = cx.dom.parent(current)?;
        if parent == cx.host {
            return Some(current);
        }
        current = parent;
    }
}

/// The shadow part an event hit, when it was dispatched on this host.
///
/// Part names are scoped to the host that rendered them; a part click on a
/// nested component bubbles through with that component as target.
pub fn own_part<'e>(cx: &RenderContext<'_>, event: &'e Event) -> Option<&'e str> {
    if event.target == cx.host {
        event.part.as_deref()
    } else {
        None
    }
}

/// Format a number for CSS or SVG attributes: rounded to two decimals,
/// without a fractional part when integral.
pub fn format_number(n: f64) -> String {
    let rounded = (n * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        rounded.to_string()
    }
}

/// Serialize a `bool` for `aria-*` attributes.
pub fn aria_bool(on: bool) -> &'static str {
    if on {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_wraps_forward_and_back() {
        let enabled = [true, true, true];
        assert_eq!(step_enabled(&enabled, Some(2), true), Some(0));
        assert_eq!(step_enabled(&enabled, Some(0), false), Some(2));
        assert_eq!(step_enabled(&enabled, Some(1), true), Some(2));
    }

    #[test]
    fn step_skips_disabled() {
        let enabled = [true, false, true, false];
        assert_eq!(step_enabled(&enabled, Some(0), true), Some(2));
        assert_eq!(step_enabled(&enabled, Some(2), true), Some(0));
        assert_eq!(step_enabled(&enabled, Some(0), false), Some(2));
    }

    #[test]
    fn step_without_current() {
        let enabled = [false, true, true];
        assert_eq!(step_enabled(&enabled, None, true), Some(1));
        assert_eq!(step_enabled(&enabled, None, false), Some(2));
    }

    #[test]
    fn step_nothing_enabled() {
        assert_eq!(step_enabled(&[false, false], Some(0), true), None);
        assert_eq!(step_enabled(&[], None, true), None);
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(format_number(72.0), "72");
        assert_eq!(format_number(125.663_706), "125.66");
        assert_eq!(format_number(-0.004), "-0");
        assert_eq!(format_number(42.5), "42.5");
    }

    #[test]
    fn first_and_last() {
        let enabled = [false, true, true, false];
        assert_eq!(first_enabled(&enabled), Some(1));
        assert_eq!(last_enabled(&enabled), Some(2));
    }
}
