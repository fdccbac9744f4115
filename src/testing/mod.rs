//! Headless testing framework: Harness, snapshot helpers.
//!
//! Use the [`Harness`] to drive a [`Document`](crate::document::Document)
//! the way a user would. Use [`outline`] and [`shadow_outline`] to capture
//! shadow subtrees as text for snapshot-style assertions.

pub mod harness;
pub mod snapshot;

pub use harness::Harness;
pub use snapshot::{open_tag, outline, shadow_outline};
