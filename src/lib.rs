//! # aui
//!
//! A headless web-component runtime and component library.
//!
//! aui models custom elements the way a browser does: a light-DOM tree whose
//! string attributes are the source of truth, typed properties layered over
//! them, an encapsulated shadow subtree per component that is a pure function
//! of attributes plus internal state, and bubbling, retargeted events. It
//! runs anywhere, with a virtual clock for timers and an inspectable event
//! log, so widgets can be driven and asserted on without a browser.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed light-DOM arena with attributes and queries
//! - **[`markup`]**: Logos tokenizer and parser for declarative HTML fragments
//! - **[`element`]**: Capability traits, typed properties, hook contexts, registry
//! - **[`render`]**: Shadow subtree values, HTML serialization, shadow roots
//! - **[`layout`]**: Taffy row layout for indicator geometry
//! - **[`event`]**: Events, keys, bubble path, document-level listeners
//! - **[`timer`]**: Virtual clock and per-component timers
//! - **[`document`]**: The runtime tying everything together
//! - **[`driver`]**: Tokio driver that advances the clock in real time
//! - **[`components`]**: Built-in leaf controls and composite widgets
//! - **[`testing`]**: Headless harness and snapshot helpers
//! - **[`geometry`]**: Point, Size, Rect primitives
//!
//! ## Example
//!
//! ```
//! use aui::testing::Harness;
//!
//! let mut ui = Harness::new();
//! let badge = ui.mount(r#"<aui-badge value="120"></aui-badge>"#);
//! assert_eq!(ui.text(badge), "99+");
//! ```

// Foundation
pub mod config;
pub mod geometry;

// Core systems
pub mod dom;
pub mod layout;
pub mod markup;

// Component model
pub mod element;
pub mod render;
pub mod styles;

// Events and time
pub mod event;
pub mod timer;

// Runtime
pub mod document;
pub mod driver;

// Library
pub mod components;
pub mod testing;

pub use config::RuntimeConfig;
pub use document::{Document, DocumentError};
pub use dom::NodeId;
pub use element::{Component, ComponentRegistry};
pub use event::{Event, Key};
