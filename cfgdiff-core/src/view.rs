//! Annotated output trees and line balancing.
//!
//! The differ never mutates or re-tags input nodes. It builds a fresh
//! [`ViewNode`] tree per side, with one [`ChangeKind`] attached at the
//! root of each changed subtree; the renderer interprets whole-subtree
//! annotations recursively. Spacers keep the two sides line-synchronized.

use cfgdiff_tree::Node;

use crate::key::KeyedNode;

/// How a piece of output relates to the other version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeKind {
    /// Container kept only because something below it changed.
    #[default]
    Unchanged,
    /// Identifying child kept for readability (name, id, ...).
    Context,
    /// Present only in the after version.
    Added,
    /// Present only in the before version.
    Removed,
    /// Same element on both sides with different attributes or text.
    Modified,
}

/// A node in an annotated output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    /// An element copied (or rebuilt) from one side of the input.
    Element {
        /// Tag name.
        tag: String,
        /// Attributes in document order.
        attrs: Vec<(String, String)>,
        /// Trimmed text content, if non-empty.
        text: Option<String>,
        /// Annotation for this element (and, for `Added`/`Removed`, its
        /// whole subtree).
        change: ChangeKind,
        /// Child views in aligned order.
        children: Vec<ViewNode>,
        /// Blank lines appended after the element to keep the two sides
        /// equal in height.
        trailing_spacer: usize,
    },

    /// A run of blank placeholder lines standing in for content that only
    /// exists on the other side.
    Spacer {
        /// Number of blank lines.
        lines: usize,
    },
}

impl ViewNode {
    /// Create a spacer of the given height.
    pub const fn spacer(lines: usize) -> Self {
        Self::Spacer { lines }
    }

    /// Build an element view from an input node and pre-built child views.
    pub fn element(node: &Node, change: ChangeKind, children: Vec<ViewNode>) -> Self {
        let text = node.trimmed_text();
        Self::Element {
            tag: node.tag.clone(),
            attrs: node
                .attrs
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            text: (!text.is_empty()).then(|| text.to_string()),
            change,
            children,
            trailing_spacer: 0,
        }
    }

    /// Copy a whole keyed subtree, in canonical child order, with `change`
    /// attached at the root only.
    pub fn from_keyed(keyed: &KeyedNode<'_>, change: ChangeKind) -> Self {
        let children = keyed
            .children
            .iter()
            .map(|c| Self::from_keyed(c, ChangeKind::Unchanged))
            .collect();
        Self::element(keyed.node, change, children)
    }

    /// Rendered height of this view in lines.
    ///
    /// A leaf element collapses onto a single line; a container costs its
    /// open and close tags plus a text line if any, plus its children.
    /// Trailing spacers count, so heights compose bottom-up.
    pub fn height(&self) -> usize {
        match self {
            Self::Spacer { lines } => *lines,
            Self::Element {
                text,
                children,
                trailing_spacer,
                ..
            } => {
                if children.is_empty() {
                    1 + trailing_spacer
                } else {
                    2 + usize::from(text.is_some())
                        + children.iter().map(Self::height).sum::<usize>()
                        + trailing_spacer
                }
            }
        }
    }

    fn add_trailing(&mut self, extra: usize) {
        match self {
            Self::Spacer { lines } => *lines += extra,
            Self::Element {
                trailing_spacer, ..
            } => *trailing_spacer += extra,
        }
    }

    /// Equalize the rendered heights of a view pair by appending a spacer
    /// to the shorter side.
    pub fn balance(before: &mut ViewNode, after: &mut ViewNode) {
        let h_before = before.height();
        let h_after = after.height();
        if h_before < h_after {
            before.add_trailing(h_after - h_before);
        } else if h_after < h_before {
            after.add_trailing(h_before - h_after);
        }
    }
}
