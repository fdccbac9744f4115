//! Light-DOM arena: slotmap-backed node tree with attribute storage and queries.

pub mod attributes;
pub mod node;
pub mod tree;
pub mod query;

pub use attributes::Attributes;
pub use node::{NodeData, NodeId, TEXT_TAG};
pub use tree::Dom;
