//! Tree model for hierarchical configuration documents.
//!
//! A [`Node`] is an already-parsed, namespace-normalized element: a tag
//! name, an ordered attribute map, optional text content, and an ordered
//! sequence of child nodes. The diff engine borrows these trees and never
//! mutates them; whoever parsed the document owns it.

use indexmap::IndexMap;

/// A single element in a configuration document.
///
/// This type can represent arbitrary tree-shaped markup without a
/// predefined schema. Attribute insertion order is preserved (the map in
/// `attrs` is ordered), which matters for display; comparison of
/// attributes is order-independent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    /// The element's tag name, with any namespace prefix already stripped.
    pub tag: String,

    /// All attributes as key-value pairs, in document order. Keys are unique.
    pub attrs: IndexMap<String, String>,

    /// Text content, if any. The original text is preserved here;
    /// comparisons use [`Node::trimmed_text`].
    pub text: Option<String>,

    /// Child elements, in document order.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a new node with just a tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Get an attribute value by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    /// Text content with surrounding whitespace removed.
    ///
    /// Returns `""` for absent or whitespace-only text, so callers can
    /// compare text without caring which of the two it was.
    pub fn trimmed_text(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or("")
    }

    /// Find the first child with the given tag name.
    pub fn find_child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Attribute pairs as a list sorted by name.
    ///
    /// This is the canonical form used for identity keys and for
    /// order-independent attribute comparison.
    pub fn sorted_attrs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// True if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
