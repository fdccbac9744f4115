//! Shadow subtree value type and builder.
//!
//! A [`VNode`] tree is what a component's render method returns. It is a plain
//! value: the runtime stores it whole in the component's shadow root and
//! replaces it whole on the next render.

/// A node in a rendered shadow subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
    /// An element with attributes and children.
    Element(VElement),
    /// Character data.
    Text(String),
    /// A transparent list of siblings (renders its children only).
    Fragment(Vec<VNode>),
}

/// A rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<VNode>,
}

/// Start building an element.
pub fn h(tag: &str) -> VElement {
    VElement {
        tag: tag.to_owned(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

/// A `<slot>` element; `None` is the default slot.
pub fn slot(name: Option<&str>) -> VElement {
    match name {
        Some(name) => h("slot").attr("name", name),
        None => h("slot"),
    }
}

impl VElement {
    /// Set an attribute, replacing any earlier value.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
        self
    }

    /// Set an attribute only when `cond` holds.
    pub fn attr_if(self, cond: bool, name: &str, value: impl Into<String>) -> Self {
        if cond {
            self.attr(name, value)
        } else {
            self
        }
    }

    /// Set or omit a presence-only attribute.
    pub fn flag(self, name: &str, on: bool) -> Self {
        self.attr_if(on, name, "")
    }

    /// Set the `class` attribute from the non-empty entries of `classes`.
    pub fn class<'a>(self, classes: impl IntoIterator<Item = &'a str>) -> Self {
        let joined = classes
            .into_iter()
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.attr("class", joined)
    }

    /// Name this element as an interaction target (`part` attribute).
    pub fn part(self, name: impl Into<String>) -> Self {
        self.attr("part", name)
    }

    /// Append a child.
    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(VNode::Text(text.into()))
    }

    /// Value of attribute `name`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether attribute `name` is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }
}

impl From<VElement> for VNode {
    fn from(el: VElement) -> Self {
        VNode::Element(el)
    }
}

impl From<&str> for VNode {
    fn from(text: &str) -> Self {
        VNode::Text(text.to_owned())
    }
}

impl From<String> for VNode {
    fn from(text: String) -> Self {
        VNode::Text(text)
    }
}

impl VNode {
    /// A fragment with no children: renders nothing.
    pub fn empty() -> Self {
        VNode::Fragment(Vec::new())
    }

    /// Whether this node renders nothing at all.
    pub fn is_empty(&self) -> bool {
        match self {
            VNode::Fragment(children) => children.iter().all(VNode::is_empty),
            _ => false,
        }
    }

    /// Pre-order search for the first element matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&VElement) -> bool) -> Option<&VElement> {
        match self {
            VNode::Element(el) => {
                if predicate(el) {
                    return Some(el);
                }
                el.children.iter().find_map(|c| c.find(predicate))
            }
            VNode::Fragment(children) => children.iter().find_map(|c| c.find(predicate)),
            VNode::Text(_) => None,
        }
    }

    /// All elements matching `predicate`, in pre-order.
    pub fn find_all(&self, predicate: &dyn Fn(&VElement) -> bool) -> Vec<&VElement> {
        let mut out = Vec::new();
        self.collect(predicate, &mut out);
        out
    }

    fn collect<'a>(&'a self, predicate: &dyn Fn(&VElement) -> bool, out: &mut Vec<&'a VElement>) {
        match self {
            VNode::Element(el) => {
                if predicate(el) {
                    out.push(el);
                }
                for child in &el.children {
                    child.collect(predicate, out);
                }
            }
            VNode::Fragment(children) => {
                for child in children {
                    child.collect(predicate, out);
                }
            }
            VNode::Text(_) => {}
        }
    }

    /// The element whose `part` attribute is `name`.
    pub fn part(&self, name: &str) -> Option<&VElement> {
        self.find(&|el| el.get_attr("part") == Some(name))
    }

    /// Concatenated character data of the subtree, skipping `<style>`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            VNode::Text(t) => out.push_str(t),
            VNode::Element(el) if el.tag == "style" => {}
            VNode::Element(el) => el.children.iter().for_each(|c| c.push_text(out)),
            VNode::Fragment(children) => children.iter().for_each(|c| c.push_text(out)),
        }
    }
}

impl VElement {
    /// Concatenated character data of this element's subtree.
    pub fn text_content(&self) -> String {
        VNode::Element(self.clone()).text_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_attrs_and_children() {
        let el = h("button")
            .attr("type", "button")
            .flag("disabled", true)
            .flag("hidden", false)
            .class(["btn", "", "btn-primary"])
            .text("Save");
        assert_eq!(el.get_attr("type"), Some("button"));
        assert_eq!(el.get_attr("disabled"), Some(""));
        assert!(!el.has_attr("hidden"));
        assert_eq!(el.get_attr("class"), Some("btn btn-primary"));
        assert_eq!(el.children, vec![VNode::Text("Save".into())]);
    }

    #[test]
    fn attr_replaces_existing() {
        let el = h("div").attr("role", "a").attr("role", "b");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.get_attr("role"), Some("b"));
    }

    #[test]
    fn slot_helper() {
        assert_eq!(slot(Some("icon")).get_attr("name"), Some("icon"));
        assert!(!slot(None).has_attr("name"));
    }

    #[test]
    fn find_part_nested() {
        let tree: VNode = h("div")
            .child(h("span").part("label").text("Hi"))
            .child(VNode::Fragment(vec![h("button").part("close").into()]))
            .into();
        assert_eq!(tree.part("close").map(|e| e.tag.as_str()), Some("button"));
        assert_eq!(tree.part("label").map(|e| e.text_content()), Some("Hi".to_owned()));
        assert!(tree.part("missing").is_none());
    }

    #[test]
    fn find_all_preorder() {
        let tree: VNode = h("ul")
            .children((0..3).map(|i| h("li").attr("data-i", i.to_string())))
            .into();
        let items = tree.find_all(&|el| el.tag == "li");
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].get_attr("data-i"), Some("2"));
    }

    #[test]
    fn text_content_skips_style() {
        let tree: VNode = h("div").child(h("style").text(".a{}")).text("x").child(h("b").text("y")).into();
        assert_eq!(tree.text_content(), "xy");
    }

    #[test]
    fn empty_fragment() {
        assert!(VNode::empty().is_empty());
        assert!(VNode::Fragment(vec![VNode::empty()]).is_empty());
        assert!(!VNode::from("x").is_empty());
    }
}
