//! Rendering annotated views into styled text lines.
//!
//! Each side renders independently, but the line-balance invariant
//! guarantees the two line sequences come out equal in length, so the
//! caller can lay them out side by side and scroll them in lockstep.
//! Lines carry semantic colors only; a [`ColorBackend`] turns them into
//! strings.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::view::{ChangeKind, ViewNode};
use crate::{ColorBackend, SemanticColor};

/// A run of text with one semantic color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// The text of this run, indentation included.
    pub text: String,
    /// Semantic color role.
    pub color: SemanticColor,
}

/// One rendered output line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Styled runs; empty for blank spacer lines.
    pub spans: Vec<Span>,
}

impl Line {
    /// A blank placeholder line.
    pub const fn blank() -> Self {
        Self { spans: Vec::new() }
    }

    fn single(text: String, color: SemanticColor) -> Self {
        Self {
            spans: vec![Span { text, color }],
        }
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }

    /// Render this line through a color backend.
    pub fn styled<B: ColorBackend>(&self, backend: &B) -> String {
        let mut out = String::new();
        for span in &self.spans {
            // Writing into a String cannot fail.
            let _ = backend.write_styled(&mut out, &span.text, span.color);
        }
        out
    }
}

/// Options for rendering a view.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Indentation per depth level (default: 2 spaces).
    pub indent: &'static str,
    /// Marker emitted on both sides when the diff found nothing.
    pub no_change_marker: &'static str,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "  ",
            no_change_marker: "<!-- no changes -->",
        }
    }
}

/// Render one side of a diff into lines.
///
/// A pruned-to-nothing view (`None`) renders as the single no-changes
/// marker rather than empty output.
pub fn render_lines(root: Option<&ViewNode>, opts: &RenderOptions) -> Vec<Line> {
    match root {
        None => vec![Line::single(
            opts.no_change_marker.to_string(),
            SemanticColor::Structure,
        )],
        Some(node) => {
            let mut out = Vec::with_capacity(node.height());
            render_node(node, 0, None, opts, &mut out);
            out
        }
    }
}

/// Join two balanced line sequences into one side-by-side block.
///
/// The left column is padded to its widest line; padding is computed from
/// display widths, so it is correct regardless of the backend's escape
/// codes.
pub fn side_by_side<B: ColorBackend>(before: &[Line], after: &[Line], backend: &B) -> String {
    let left_width = before.iter().map(Line::width).max().unwrap_or(0);
    let mut out = String::new();
    for (left, right) in before.iter().zip(after) {
        let pad = left_width - left.width();
        let _ = write!(
            out,
            "{}{:pad$} | {}\n",
            left.styled(backend),
            "",
            right.styled(backend),
        );
    }
    out
}

fn render_node(
    node: &ViewNode,
    depth: usize,
    inherited: Option<SemanticColor>,
    opts: &RenderOptions,
    out: &mut Vec<Line>,
) {
    match node {
        ViewNode::Spacer { lines } => {
            out.extend(std::iter::repeat_with(Line::blank).take(*lines));
        }
        ViewNode::Element {
            tag,
            attrs,
            text,
            change,
            children,
            trailing_spacer,
        } => {
            let own = match change {
                ChangeKind::Added => Some(SemanticColor::Added),
                ChangeKind::Removed => Some(SemanticColor::Removed),
                ChangeKind::Modified => Some(SemanticColor::Modified),
                ChangeKind::Unchanged | ChangeKind::Context => None,
            };
            let effective = inherited.or(own);
            let tag_color = effective.unwrap_or(SemanticColor::Structure);
            let text_color = effective.unwrap_or(SemanticColor::Value);

            let indent = opts.indent.repeat(depth);
            let open = format!("{}<{}{}>", indent, tag, format_attrs(attrs));

            if children.is_empty() {
                // Leaf: open tag, text, and close tag collapse onto one line.
                let mut spans = vec![Span {
                    text: open,
                    color: tag_color,
                }];
                if let Some(text) = text {
                    spans.push(Span {
                        text: text.clone(),
                        color: text_color,
                    });
                }
                spans.push(Span {
                    text: format!("</{}>", tag),
                    color: tag_color,
                });
                out.push(Line { spans });
            } else {
                out.push(Line::single(open, tag_color));

                if let Some(text) = text {
                    out.push(Line::single(
                        format!("{}{}{}", indent, opts.indent, text),
                        text_color,
                    ));
                }

                // Added/Removed paint the whole subtree; Modified applies
                // to the annotated element only.
                let child_inherit = inherited.or(match change {
                    ChangeKind::Added => Some(SemanticColor::Added),
                    ChangeKind::Removed => Some(SemanticColor::Removed),
                    _ => None,
                });
                for child in children {
                    render_node(child, depth + 1, child_inherit, opts, out);
                }

                out.push(Line::single(format!("{}</{}>", indent, tag), tag_color));
            }

            out.extend(std::iter::repeat_with(Line::blank).take(*trailing_spacer));
        }
    }
}

fn format_attrs(attrs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (name, value) in attrs {
        let _ = write!(out, " {}=\"{}\"", name, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use cfgdiff_tree::Node;

    use super::*;
    use crate::PlainBackend;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.styled(&PlainBackend)).collect()
    }

    fn leaf_view(tag: &str, text: &str, change: ChangeKind) -> ViewNode {
        ViewNode::element(&Node::new(tag).with_text(text), change, Vec::new())
    }

    #[test]
    fn leaf_collapses_to_one_line() {
        let view = leaf_view("mtu", "1500", ChangeKind::Unchanged);
        let lines = render_lines(Some(&view), &RenderOptions::default());
        assert_eq!(plain(&lines), ["<mtu>1500</mtu>"]);
    }

    #[test]
    fn container_emits_open_text_children_close() {
        let view = ViewNode::element(
            &Node::new("iface").with_attr("op", "merge").with_text("up"),
            ChangeKind::Unchanged,
            vec![leaf_view("mtu", "1500", ChangeKind::Modified)],
        );
        let lines = render_lines(Some(&view), &RenderOptions::default());
        assert_eq!(
            plain(&lines),
            [
                "<iface op=\"merge\">",
                "  up",
                "  <mtu>1500</mtu>",
                "</iface>",
            ]
        );
    }

    #[test]
    fn line_count_equals_view_height() {
        let view = ViewNode::element(
            &Node::new("config"),
            ChangeKind::Unchanged,
            vec![
                ViewNode::spacer(3),
                leaf_view("a", "1", ChangeKind::Added),
                ViewNode::element(
                    &Node::new("b").with_text("t"),
                    ChangeKind::Removed,
                    vec![leaf_view("c", "2", ChangeKind::Unchanged)],
                ),
            ],
        );
        let lines = render_lines(Some(&view), &RenderOptions::default());
        assert_eq!(lines.len(), view.height());
    }

    #[test]
    fn removed_annotation_paints_descendants() {
        let view = ViewNode::element(
            &Node::new("iface"),
            ChangeKind::Removed,
            vec![leaf_view("mtu", "1500", ChangeKind::Unchanged)],
        );
        let lines = render_lines(Some(&view), &RenderOptions::default());
        for line in &lines {
            for span in &line.spans {
                assert_eq!(span.color, SemanticColor::Removed);
            }
        }
    }

    #[test]
    fn no_change_renders_the_marker() {
        let lines = render_lines(None, &RenderOptions::default());
        assert_eq!(plain(&lines), ["<!-- no changes -->"]);
    }

    #[test]
    fn side_by_side_pads_by_display_width() {
        let before = vec![
            Line::single("<a>1</a>".into(), SemanticColor::Structure),
            Line::blank(),
        ];
        let after = vec![
            Line::single("<a>2</a>".into(), SemanticColor::Structure),
            Line::single("<b>3</b>".into(), SemanticColor::Added),
        ];
        let joined = side_by_side(&before, &after, &PlainBackend);
        assert_eq!(joined, "<a>1</a> | <a>2</a>\n         | <b>3</b>\n");
    }
}
