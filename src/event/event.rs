//! Events: user input and component-emitted notifications.
//!
//! Every event carries a name, a plain key/value detail payload, a target node,
//! and the DOM flags `bubbles`, `composed`, `cancelable`. Interaction with a
//! component's shadow internals is retargeted to the host, with the shadow
//! element identified by its `part` name.

use serde_json::{Map, Value};

use super::key::Key;
use crate::dom::NodeId;

/// Event detail payload.
pub type Detail = Map<String, Value>;

/// Convert a JSON value into a detail map; non-objects become an empty map.
pub fn into_detail(value: Value) -> Detail {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// A dispatched event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event type, e.g. `"click"`, `"change"`.
    pub name: String,
    /// Payload for component-emitted events.
    pub detail: Detail,
    /// The node the event was dispatched on (host for shadow interactions).
    pub target: NodeId,
    /// The shadow part the interaction hit, if any.
    pub part: Option<String>,
    /// Key for `keydown` events.
    pub key: Option<Key>,
    /// Text for `input` events.
    pub data: Option<String>,
    /// The node whose listeners are currently running.
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
    pub composed: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    fn base(name: &str, target: NodeId) -> Self {
        Self {
            name: name.to_owned(),
            detail: Detail::new(),
            target,
            part: None,
            key: None,
            data: None,
            current_target: None,
            bubbles: true,
            composed: true,
            cancelable: true,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A component-emitted event: bubbling, composed, cancelable.
    pub fn custom(name: &str, target: NodeId, detail: Detail) -> Self {
        Self {
            detail,
            ..Self::base(name, target)
        }
    }

    /// A pointer click on `target`.
    pub fn click(target: NodeId) -> Self {
        Self::base("click", target)
    }

    /// A pointer click on shadow part `part` of host `target`.
    pub fn click_part(target: NodeId, part: &str) -> Self {
        Self {
            part: Some(part.to_owned()),
            ..Self::base("click", target)
        }
    }

    /// A key press on `target`.
    pub fn keydown(target: NodeId, key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::base("keydown", target)
        }
    }

    /// Text entry into `target` (optionally a shadow part such as an input).
    pub fn input(target: NodeId, part: Option<&str>, text: &str) -> Self {
        Self {
            part: part.map(str::to_owned),
            data: Some(text.to_owned()),
            cancelable: false,
            ..Self::base("input", target)
        }
    }

    /// Pointer entering `target`. Does not bubble.
    pub fn pointer_enter(target: NodeId) -> Self {
        Self {
            bubbles: false,
            cancelable: false,
            ..Self::base("pointerenter", target)
        }
    }

    /// Pointer leaving `target`. Does not bubble.
    pub fn pointer_leave(target: NodeId) -> Self {
        Self {
            bubbles: false,
            cancelable: false,
            ..Self::base("pointerleave", target)
        }
    }

    /// Focus leaving `target`.
    pub fn focus_out(target: NodeId) -> Self {
        Self {
            cancelable: false,
            ..Self::base("focusout", target)
        }
    }

    /// Whether the interaction hit part `name`.
    pub fn is_part(&self, name: &str) -> bool {
        self.part.as_deref() == Some(name)
    }

    /// Cancel the pending default action. No-op for non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Whether [`prevent_default`](Self::prevent_default) took effect.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop delivery to later nodes on the bubble path and to document
    /// listeners.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether propagation was stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// String field of the detail payload.
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.detail.get(key).and_then(Value::as_str)
    }

    /// Integer field of the detail payload.
    pub fn detail_i64(&self, key: &str) -> Option<i64> {
        self.detail.get(key).and_then(Value::as_i64)
    }

    /// Boolean field of the detail payload.
    pub fn detail_bool(&self, key: &str) -> Option<bool> {
        self.detail.get(key).and_then(Value::as_bool)
    }
}
