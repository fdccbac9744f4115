//! Rendering: shadow subtree values, HTML serialization, shadow roots.

pub mod vnode;
pub mod html;
pub mod shadow;

pub use html::to_html;
pub use shadow::ShadowRoot;
pub use vnode::{h, slot, VElement, VNode};
