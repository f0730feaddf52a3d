//! Recursive comparison of canonicalized trees.
//!
//! The differ walks a pair of keyed trees depth-first, builds annotated
//! view pairs, prunes subtrees with no change, and accumulates statistics.
//! It is a pure function of its two inputs plus the options: all output
//! structures are created fresh per invocation and the accumulator is
//! owned by the invocation, never shared.

use cfgdiff_tree::Node;
use tracing::{debug, trace};

use crate::key::{KeyedNode, canonicalize};
use crate::render::{Line, RenderOptions, render_lines, side_by_side};
use crate::view::{ChangeKind, ViewNode};
use crate::{ColorBackend, DiffOptions, Slot, align};

/// Change counters for one diff invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Subtrees present only in the after version.
    pub added: usize,
    /// Subtrees present only in the before version.
    pub removed: usize,
    /// Elements whose attributes or text changed.
    pub modified: usize,
}

impl Stats {
    /// True if any difference was found.
    pub const fn changed(&self) -> bool {
        self.added + self.removed + self.modified > 0
    }
}

/// The rendered result of a diff: two line-synchronized sides plus stats.
pub struct DiffReport {
    /// Styled lines for the before version.
    pub before: Vec<Line>,
    /// Styled lines for the after version; always the same length as
    /// `before`.
    pub after: Vec<Line>,
    /// Change counters.
    pub stats: Stats,
}

impl DiffReport {
    /// True if any difference was found.
    pub const fn changed(&self) -> bool {
        self.stats.changed()
    }

    /// Render both sides as one side-by-side block, left column padded to
    /// a fixed display width.
    pub fn side_by_side<B: ColorBackend>(&self, backend: &B) -> String {
        side_by_side(&self.before, &self.after, backend)
    }
}

/// Diff two documents and render both sides.
///
/// This is the whole pipeline: canonicalize, align, compare, balance,
/// render. The two returned line sequences are always equal in length, so
/// a viewer can scroll them in lockstep.
pub fn diff(before: &Node, after: &Node, opts: &DiffOptions) -> DiffReport {
    let (views, stats) = compare_trees(before, after, opts);
    let render_opts = RenderOptions::default();
    let (before_lines, after_lines) = match &views {
        Some((va, vb)) => (
            render_lines(Some(va), &render_opts),
            render_lines(Some(vb), &render_opts),
        ),
        None => (
            render_lines(None, &render_opts),
            render_lines(None, &render_opts),
        ),
    };

    debug!(
        added = stats.added,
        removed = stats.removed,
        modified = stats.modified,
        lines = before_lines.len(),
        "diff complete"
    );

    DiffReport {
        before: before_lines,
        after: after_lines,
        stats,
    }
}

/// Diff two documents into annotated view trees.
///
/// Returns `None` views when the documents are semantically identical
/// under the chosen identity policy. When both views exist they have equal
/// rendered heights.
pub fn compare_trees(
    before: &Node,
    after: &Node,
    opts: &DiffOptions,
) -> (Option<(ViewNode, ViewNode)>, Stats) {
    let keyed_before = canonicalize(before, &opts.identity);
    let keyed_after = canonicalize(after, &opts.identity);

    let mut differ = Differ {
        opts,
        stats: Stats::default(),
    };
    let views = differ.compare(Some(&keyed_before), Some(&keyed_after));
    (views, differ.stats)
}

/// Single-writer accumulator threaded through one recursive comparison.
struct Differ<'o> {
    opts: &'o DiffOptions,
    stats: Stats,
}

impl Differ<'_> {
    /// Compare one aligned node pair; `None` means the subtree is pruned.
    fn compare(
        &mut self,
        a: Option<&KeyedNode<'_>>,
        b: Option<&KeyedNode<'_>>,
    ) -> Option<(ViewNode, ViewNode)> {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(self.removed(a)),
            (None, Some(b)) => Some(self.added(b)),
            (Some(a), Some(b)) if a.node.tag != b.node.tag => Some(self.replaced(a, b)),
            (Some(a), Some(b)) => self.matched(a, b),
        }
    }

    /// Whole subtree exists only in the before version.
    fn removed(&mut self, a: &KeyedNode<'_>) -> (ViewNode, ViewNode) {
        self.stats.removed += 1;
        let before = ViewNode::from_keyed(a, ChangeKind::Removed);
        let spacer = ViewNode::spacer(before.height());
        (before, spacer)
    }

    /// Whole subtree exists only in the after version.
    fn added(&mut self, b: &KeyedNode<'_>) -> (ViewNode, ViewNode) {
        self.stats.added += 1;
        let after = ViewNode::from_keyed(b, ChangeKind::Added);
        let spacer = ViewNode::spacer(after.height());
        (spacer, after)
    }

    /// Different tags at the same position: a simultaneous full removal
    /// and addition, never a modification.
    fn replaced(&mut self, a: &KeyedNode<'_>, b: &KeyedNode<'_>) -> (ViewNode, ViewNode) {
        self.stats.removed += 1;
        self.stats.added += 1;
        let mut before = ViewNode::from_keyed(a, ChangeKind::Removed);
        let mut after = ViewNode::from_keyed(b, ChangeKind::Added);
        ViewNode::balance(&mut before, &mut after);
        (before, after)
    }

    /// Same tag on both sides: compare attributes, text, and children.
    fn matched(&mut self, a: &KeyedNode<'_>, b: &KeyedNode<'_>) -> Option<(ViewNode, ViewNode)> {
        // Attribute comparison is set-equality over the full mapping.
        let is_modified =
            a.node.trimmed_text() != b.node.trimmed_text() || a.node.attrs != b.node.attrs;

        let mut children_a = Vec::new();
        let mut children_b = Vec::new();
        let mut has_child_change = false;

        for slot in align(&a.children, &b.children, self.opts.alignment) {
            match slot {
                // Key-equal pairs share a tag, so one membership check is
                // enough. Context copies survive only if the parent ends
                // up changed for another reason.
                Slot::Matched(ca, cb) if self.opts.is_context_tag(&ca.node.tag) => {
                    children_a.push(ViewNode::from_keyed(ca, ChangeKind::Context));
                    children_b.push(ViewNode::from_keyed(cb, ChangeKind::Context));
                }
                Slot::Matched(ca, cb) | Slot::Paired(ca, cb) => {
                    if let Some((va, vb)) = self.compare(Some(ca), Some(cb)) {
                        has_child_change = true;
                        children_a.push(va);
                        children_b.push(vb);
                    }
                }
                Slot::Removed(ca) => {
                    let (va, vb) = self.removed(ca);
                    has_child_change = true;
                    children_a.push(va);
                    children_b.push(vb);
                }
                Slot::Added(cb) => {
                    let (va, vb) = self.added(cb);
                    has_child_change = true;
                    children_a.push(va);
                    children_b.push(vb);
                }
            }
        }

        if !is_modified && !has_child_change {
            trace!(tag = %a.node.tag, "pruning unchanged subtree");
            return None;
        }

        let change = if is_modified {
            self.stats.modified += 1;
            ChangeKind::Modified
        } else {
            ChangeKind::Unchanged
        };

        let mut before = ViewNode::element(a.node, change, children_a);
        let mut after = ViewNode::element(b.node, change, children_b);
        ViewNode::balance(&mut before, &mut after);
        Some((before, after))
    }
}
