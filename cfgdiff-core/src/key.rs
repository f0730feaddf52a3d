//! Identity keys and canonical ordering.
//!
//! An [`IdentityKey`] is an opaque, totally ordered value derived from a
//! node. It serves two purposes: sorting every node's children into a
//! canonical order (neutralizing pure reordering) and matching siblings
//! across the two document versions during alignment.

use cfgdiff_tree::Node;

use crate::IdentityPolicy;

/// An order-independent identity for a node.
///
/// The derived `Ord` is lexicographic over `(tag, attrs, marker,
/// children)`, with attributes as a sorted list of `(name, value)` pairs.
/// Under the deep-structural policy the marker is the trimmed text and
/// `children` holds the sorted child keys; under the field-based policy
/// the marker is the identifying field (or text) and `children` is empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityKey {
    tag: String,
    attrs: Vec<(String, String)>,
    marker: String,
    children: Vec<IdentityKey>,
}

/// A borrowed node annotated with its identity key.
///
/// `children` carry the canonical (key-sorted) order; the underlying
/// [`Node`] is never touched.
pub struct KeyedNode<'a> {
    /// The input node.
    pub node: &'a Node,
    /// The node's identity key under the chosen policy.
    pub key: IdentityKey,
    /// Keyed children, sorted by key.
    pub children: Vec<KeyedNode<'a>>,
}

/// Compute identity keys bottom-up and sort every node's children by key.
///
/// The sort is stable, so siblings whose keys collide keep their document
/// order. Such siblings are treated as interchangeable: a pure swap of two
/// identical-looking subtrees is reported as no change. That is a
/// documented limitation, not a defect.
pub fn canonicalize<'a>(node: &'a Node, policy: &IdentityPolicy) -> KeyedNode<'a> {
    let mut children: Vec<_> = node
        .children
        .iter()
        .map(|c| canonicalize(c, policy))
        .collect();
    children.sort_by(|x, y| x.key.cmp(&y.key));
    let key = identity_key(node, &children, policy);
    KeyedNode {
        node,
        key,
        children,
    }
}

/// Derive the key for `node`, whose children are already keyed and sorted.
fn identity_key(node: &Node, children: &[KeyedNode<'_>], policy: &IdentityPolicy) -> IdentityKey {
    let attrs = node
        .sorted_attrs()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    match policy {
        IdentityPolicy::DeepStructural => IdentityKey {
            tag: node.tag.clone(),
            attrs,
            marker: node.trimmed_text().to_string(),
            children: children.iter().map(|c| c.key.clone()).collect(),
        },
        IdentityPolicy::FieldBased { fields } => {
            let marker = fields
                .iter()
                .find_map(|field| {
                    node.find_child(field).and_then(|child| {
                        let value = child.trimmed_text();
                        (!value.is_empty()).then(|| format!("{}:{}", field, value))
                    })
                })
                .unwrap_or_else(|| {
                    let text = node.trimmed_text();
                    if text.is_empty() {
                        String::new()
                    } else {
                        format!("text:{}", text)
                    }
                });
            IdentityKey {
                tag: node.tag.clone(),
                attrs,
                marker,
                children: Vec::new(),
            }
        }
    }
}
