//! Component capability traits.
//!
//! A component is composed from two capabilities: [`AttributeBound`] (which
//! attributes and child mutations it reacts to) and [`Renderable`] (a total
//! function from attributes and internal state to a shadow subtree).
//! [`Component`] adds the lifecycle and interaction hooks the document calls.
//! Every hook has a no-op default, so a leaf component only implements what
//! it needs.

use std::any::Any;

use super::context::{Context, RenderContext};
use crate::event::Event;
use crate::render::VNode;

/// Declares the change notifications a component opts into.
pub trait AttributeBound {
    /// Attribute names whose changes re-render the component.
    fn observed_attributes(&self) -> &'static [&'static str];

    /// Whether structural mutations of the light-DOM children notify the
    /// component through [`Component::children_changed`].
    fn observes_children(&self) -> bool {
        false
    }

    /// Attributes of direct children whose changes count as child mutations.
    fn observed_child_attributes(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Produces the shadow subtree.
pub trait Renderable {
    /// Build the complete shadow subtree from current attributes and state.
    ///
    /// Must never panic for any attribute or state combination.
    fn render(&self, cx: &RenderContext<'_>) -> VNode;
}

/// Upcast helper for downcasting boxed components.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A custom element implementation.
///
/// Hooks receive a [`Context`] that exposes the host's light DOM read-only
/// and queues writes. Queued attribute writes and emitted events are applied
/// in order as soon as the hook returns.
#[allow(unused_variables)]
pub trait Component: Renderable + AttributeBound + AsAny {
    /// The host was inserted into the document. Runs before the first render.
    fn connected(&mut self, cx: &mut Context<'_>) {}

    /// The host is leaving the document. Document listeners and timers still
    /// held afterwards are released by the runtime.
    fn disconnected(&mut self, cx: &mut Context<'_>) {}

    /// An observed attribute changed from `old` to `new`. Followed by a render.
    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
    }

    /// Light-DOM children were added, removed, reordered, or had an observed
    /// attribute changed. Followed by a render.
    fn children_changed(&mut self, cx: &mut Context<'_>) {}

    /// The host's measured box changed. Followed by a render.
    fn resized(&mut self, cx: &mut Context<'_>) {}

    /// Bubble-phase delivery of an event whose path includes the host.
    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {}

    /// Delivery through a document-level listener the component acquired.
    /// `inside` is true when the event target lies within the host.
    fn handle_document_event(&mut self, cx: &mut Context<'_>, event: &Event, inside: bool) {}

    /// A timer the component installed under `key` fired.
    fn timer_fired(&mut self, cx: &mut Context<'_>, key: &'static str) {}
}

/// Constructor stored in the registry.
pub type Factory = fn() -> Box<dyn Component>;
