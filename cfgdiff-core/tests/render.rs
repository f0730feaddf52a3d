//! Rendered output shape: padding, markers, and backend behavior.

use cfgdiff_core::{AnsiBackend, DiffOptions, PlainBackend, diff};
use cfgdiff_testhelpers::setup;
use cfgdiff_tree::Node;
use cfgdiff_xml::from_str;

fn parse(xml: &str) -> Node {
    from_str(xml).unwrap()
}

#[test]
fn side_by_side_aligns_the_columns() {
    setup();
    let before = parse("<config><mtu>1500</mtu></config>");
    let after = parse("<config><mtu>9000</mtu></config>");

    let report = diff(&before, &after, &DiffOptions::default());
    let joined = report.side_by_side(&PlainBackend);
    assert_eq!(
        joined,
        "<config>          | <config>\n\
         \x20 <mtu>1500</mtu> |   <mtu>9000</mtu>\n\
         </config>         | </config>\n"
    );
}

#[test]
fn no_change_marker_fills_both_columns() {
    setup();
    let doc = parse("<config><a>1</a></config>");
    let report = diff(&doc, &doc, &DiffOptions::default());
    assert_eq!(
        report.side_by_side(&PlainBackend),
        "<!-- no changes --> | <!-- no changes -->\n"
    );
}

#[test]
fn plain_backend_emits_no_escape_codes() {
    setup();
    let before = parse("<config><a>1</a></config>");
    let after = parse("<config><b>2</b></config>");

    let report = diff(&before, &after, &DiffOptions::default());
    assert!(!report.side_by_side(&PlainBackend).contains('\x1b'));
}

#[test]
fn ansi_backend_colors_changed_lines() {
    setup();
    let before = parse("<config><a>1</a></config>");
    let after = parse("<config><a>2</a></config>");

    let report = diff(&before, &after, &DiffOptions::default());
    let joined = report.side_by_side(&AnsiBackend::default());
    assert!(joined.contains("\x1b["));
    // Padding is computed from display widths, not styled lengths, so the
    // column separator count survives the escape codes.
    assert_eq!(joined.matches(" | ").count(), report.before.len());
}

#[test]
fn gap_lines_render_blank() {
    setup();
    let before = parse("<config><a>1</a></config>");
    let after = parse("<config><a>1</a><b><c>2</c></b></config>");

    let report = diff(&before, &after, &DiffOptions::default());
    let blanks: Vec<&str> = report
        .side_by_side(&PlainBackend)
        .lines()
        .filter(|l| l.trim_start().starts_with('|'))
        .map(|_| "")
        .collect();
    // One gap per line of the inserted 3-line subtree.
    assert_eq!(blanks.len(), 3);
}
