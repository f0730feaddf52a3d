//! Structure-aware comparison of hierarchical configuration documents.
//!
//! The pipeline has five stages:
//!
//! 1. **Canonicalize** ([`canonicalize`]): derive an [`IdentityKey`] for
//!    every node and sort siblings into a canonical order, so pure
//!    reordering never shows up as a change.
//! 2. **Align** ([`align`]): match the children of a node pair into
//!    [`Slot`]s, either by merge-joining the sorted key sequences or by a
//!    longest-matching-blocks opcode walk.
//! 3. **Compare** ([`compare_trees`]): walk aligned pairs recursively,
//!    annotate each side with a [`ChangeKind`], prune unchanged subtrees,
//!    and count changes into [`Stats`].
//! 4. **Balance** ([`ViewNode::balance`]): insert spacers so both view
//!    trees render to the same number of lines.
//! 5. **Render** ([`render_lines`]): turn each view into styled [`Line`]s
//!    through a [`ColorBackend`], ready for side-by-side display.
//!
//! [`diff`] runs the whole pipeline and returns a [`DiffReport`].
//!
//! ```
//! use cfgdiff_core::{DiffOptions, PlainBackend, diff};
//! use cfgdiff_xml::from_str;
//!
//! let before = from_str("<config><mtu>1500</mtu></config>")?;
//! let after = from_str("<config><mtu>9000</mtu></config>")?;
//!
//! let report = diff(&before, &after, &DiffOptions::default());
//! assert_eq!(report.stats.modified, 1);
//! print!("{}", report.side_by_side(&PlainBackend));
//! # Ok::<(), cfgdiff_xml::ParseError>(())
//! ```

mod align;
mod backend;
mod diff;
mod key;
mod options;
mod render;
mod theme;
mod view;

pub use align::{Slot, align};
pub use backend::{AnsiBackend, ColorBackend, PlainBackend, SemanticColor};
pub use diff::{DiffReport, Stats, compare_trees, diff};
pub use key::{IdentityKey, KeyedNode, canonicalize};
pub use options::{
    AlignmentStrategy, DEFAULT_CONTEXT_TAGS, DEFAULT_ID_FIELDS, DiffOptions, IdentityPolicy,
};
pub use render::{Line, RenderOptions, Span, render_lines, side_by_side};
pub use theme::DiffTheme;
pub use view::{ChangeKind, ViewNode};
