//! Event system: events, keys, bubble path, document-level listeners.

pub mod dispatch;
pub mod event;
pub mod key;
pub mod listener;

pub use dispatch::{bubble_path, EventLog};
pub use event::{into_detail, Detail, Event};
pub use key::Key;
pub use listener::{Callback, ExternalListeners, ListenerId, ListenerKind, ListenerRegistry};
