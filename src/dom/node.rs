//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use super::attributes::Attributes;

new_key_type! {
    /// Unique identifier for a light-DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Tag name used for text nodes.
pub const TEXT_TAG: &str = "#text";

/// Data associated with a single light-DOM node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Lowercased tag name (e.g. `"aui-tab"`), or [`TEXT_TAG`] for text.
    pub tag: String,
    /// Element attributes. Always empty for text nodes.
    pub attributes: Attributes,
    /// Character data for text nodes.
    pub text: Option<String>,
}

impl NodeData {
    /// Create an element node with no attributes.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Attributes::new(),
            text: None,
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_owned(),
            attributes: Attributes::new(),
            text: Some(text.into()),
        }
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    /// Set a boolean (presence) attribute (builder).
    pub fn with_flag(mut self, name: &str) -> Self {
        self.attributes.set(name, "");
        self
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// Shorthand for `self.attributes.get(name)`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Whether the attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// The named slot this node projects into (`None` for the default slot).
    pub fn slot(&self) -> Option<&str> {
        self.attr("slot").filter(|s| !s.is_empty())
    }
}
