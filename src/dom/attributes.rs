//! Ordered attribute storage for light-DOM nodes.
//!
//! Attribute names are ASCII-lowercased on every access, matching HTML's
//! case-insensitive attribute names. Insertion order is preserved so that
//! serialized markup is stable.

/// An ordered `name -> value` attribute list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute list.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Value of `name`, or `None` if the attribute is absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `name` is present (regardless of value).
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`, returning the previous value.
    ///
    /// Existing attributes keep their position; new ones are appended.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Remove `name`, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        let pos = self.entries.iter().position(|(n, _)| *n == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.set(&name.into(), value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut attrs = Attributes::new();
        assert_eq!(attrs.set("value", "a"), None);
        assert_eq!(attrs.get("value"), Some("a"));
        assert_eq!(attrs.set("value", "b"), Some("a".to_owned()));
        assert_eq!(attrs.remove("value"), Some("b".to_owned()));
        assert!(attrs.is_empty());
    }

    #[test]
    fn names_are_case_insensitive() {
        let mut attrs = Attributes::new();
        attrs.set("Page-Size", "10");
        assert_eq!(attrs.get("page-size"), Some("10"));
        assert!(attrs.contains("PAGE-SIZE"));
    }

    #[test]
    fn boolean_presence_with_empty_value() {
        let mut attrs = Attributes::new();
        attrs.set("disabled", "");
        assert!(attrs.contains("disabled"));
        assert_eq!(attrs.get("disabled"), Some(""));
    }

    #[test]
    fn insertion_order_preserved() {
        let attrs: Attributes = [("b", "2"), ("a", "1"), ("b", "3")].into_iter().collect();
        let names: Vec<_> = attrs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(attrs.get("b"), Some("3"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn remove_missing_is_none() {
        let mut attrs = Attributes::new();
        assert_eq!(attrs.remove("nope"), None);
    }
}
