//! Component registry: maps custom element tag names to constructors.
//!
//! The registry is an explicit object handed to the document at start-up.
//! Definitions are register-if-absent: the first definition of a tag wins and
//! later ones are reported but ignored.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::traits::{Component, Factory};

/// Names HTML reserves even though they contain a hyphen.
const RESERVED: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Errors from defining components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid custom element name '{0}'")]
    InvalidName(String),
}

/// Whether `name` is a valid custom element name: starts with a lowercase
/// ASCII letter, contains a hyphen, has no uppercase letters, and is not
/// reserved.
pub fn is_valid_name(name: &str) -> bool {
    if !name.contains('-') {
        return false;
    }
    if !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
        return false;
    }
    if RESERVED.contains(&name) {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
}

/// Tag name → component constructor.
#[derive(Default, Clone)]
pub struct ComponentRegistry {
    factories: HashMap<String, Factory>,
    order: Vec<String>,
}

impl ComponentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in component defined under `prefix`
    /// (`"aui"` gives `aui-button`, `aui-tabs`, ...).
    pub fn with_defaults(prefix: &str) -> Self {
        let mut registry = Self::new();
        crate::components::define_all(&mut registry, prefix);
        registry
    }

    /// Define `tag` if it is not defined yet.
    ///
    /// Returns `Ok(true)` for a new definition and `Ok(false)` when the tag was
    /// already defined (the existing definition is kept).
    pub fn define(&mut self, tag: &str, factory: Factory) -> Result<bool, RegistryError> {
        if !is_valid_name(tag) {
            return Err(RegistryError::InvalidName(tag.to_owned()));
        }
        if self.factories.contains_key(tag) {
            tracing::debug!(tag, "component already defined; keeping first definition");
            return Ok(false);
        }
        self.factories.insert(tag.to_owned(), factory);
        self.order.push(tag.to_owned());
        Ok(true)
    }

    /// Whether `tag` is defined.
    pub fn is_defined(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Construct a fresh instance for `tag`.
    pub fn create(&self, tag: &str) -> Option<Box<dyn Component>> {
        self.factories.get(tag).map(|factory| factory())
    }

    /// Defined tags in definition order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of defined tags.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("tags", &self.order)
            .finish()
    }
}
