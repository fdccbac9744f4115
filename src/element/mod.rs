//! Element base: capability traits, typed properties, contexts, registry.

pub mod context;
pub mod lifecycle;
pub mod props;
pub mod registry;
pub mod traits;

pub use context::{Context, Effect, RenderContext};
pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use props::{AttrValue, JsonProp, Prop, Property, StrProp};
pub use registry::{is_valid_name, ComponentRegistry, RegistryError};
pub use traits::{AsAny, AttributeBound, Component, Factory, Renderable};
