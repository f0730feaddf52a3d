//! Engine configuration: identity policy, alignment strategy, context tags.

use std::collections::BTreeSet;

/// Tags that stay visible for readability when their parent is otherwise
/// changed, per the conventions of NETCONF-style payloads.
pub const DEFAULT_CONTEXT_TAGS: &[&str] = &["name", "id", "description", "type", "vlan-id"];

/// Identifying child fields tried in order by the field-based policy.
pub const DEFAULT_ID_FIELDS: &[&str] =
    &["id", "name", "key", "neighbor-address", "prefix", "vlan-id"];

/// How identity keys are derived from nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityPolicy {
    /// Recursive key over tag, attributes, text, and sorted child keys.
    ///
    /// Ignores reordering everywhere, but two structurally identical
    /// siblings become indistinguishable.
    DeepStructural,

    /// Shallow key over tag, attributes, and a designated identifying
    /// child (`name`, `id`, ...), falling back to text content.
    ///
    /// Robust for list-like repeated elements keyed by an id field, even
    /// when their other fields differ.
    FieldBased {
        /// Field names tried in order when looking for the identifying child.
        fields: Vec<String>,
    },
}

impl IdentityPolicy {
    /// Field-based policy with the default identifying fields.
    pub fn field_based() -> Self {
        Self::FieldBased {
            fields: DEFAULT_ID_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// How two sibling sequences are aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentStrategy {
    /// Linear two-cursor scan over canonically sorted sequences.
    MergeJoin,

    /// Longest-matching-blocks opcodes over the key sequences, with a
    /// same-tag heuristic for replace blocks.
    #[default]
    SequenceMatching,
}

/// Policy options for a diff invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Identity-key policy used for canonical sorting and matching.
    pub identity: IdentityPolicy,

    /// Sibling alignment strategy.
    pub alignment: AlignmentStrategy,

    /// Tags always retained as context under a changed parent.
    pub context_tags: BTreeSet<String>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            identity: IdentityPolicy::DeepStructural,
            alignment: AlignmentStrategy::default(),
            context_tags: DEFAULT_CONTEXT_TAGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DiffOptions {
    /// Create options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity-key policy.
    pub fn with_identity(mut self, identity: IdentityPolicy) -> Self {
        self.identity = identity;
        self
    }

    /// Set the alignment strategy.
    pub fn with_alignment(mut self, alignment: AlignmentStrategy) -> Self {
        self.alignment = alignment;
        self
    }

    /// Replace the context-tag set.
    pub fn with_context_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// True if `tag` should be retained as context.
    pub fn is_context_tag(&self, tag: &str) -> bool {
        self.context_tags.contains(tag)
    }
}
