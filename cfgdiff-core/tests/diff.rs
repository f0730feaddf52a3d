//! End-to-end pipeline tests over parsed documents.

use cfgdiff_core::{
    AlignmentStrategy, DiffOptions, IdentityPolicy, PlainBackend, diff,
};
use cfgdiff_testhelpers::setup;
use cfgdiff_tree::Node;
use cfgdiff_xml::from_str;

fn parse(xml: &str) -> Node {
    from_str(xml).unwrap()
}

fn plain_lines(lines: &[cfgdiff_core::Line]) -> Vec<String> {
    lines.iter().map(|l| l.styled(&PlainBackend)).collect()
}

#[test]
fn identical_documents_report_no_changes() {
    setup();
    let doc = parse(
        "<config><interface><name>eth0</name><mtu>1500</mtu></interface></config>",
    );
    let report = diff(&doc, &doc, &DiffOptions::default());
    assert!(!report.changed());
    assert_eq!(plain_lines(&report.before), ["<!-- no changes -->"]);
    assert_eq!(plain_lines(&report.after), ["<!-- no changes -->"]);
}

#[test]
fn reordered_siblings_are_not_a_change() {
    setup();
    let before = parse("<config><a>1</a><b>2</b><c>3</c></config>");
    let after = parse("<config><c>3</c><a>1</a><b>2</b></config>");
    for strategy in [
        AlignmentStrategy::MergeJoin,
        AlignmentStrategy::SequenceMatching,
    ] {
        let opts = DiffOptions::new().with_alignment(strategy);
        assert!(!diff(&before, &after, &opts).changed());
    }
}

#[test]
fn unchanged_siblings_are_pruned() {
    setup();
    let before = parse("<config><a>1</a><b><x>9</x></b><c>2</c></config>");
    let after = parse("<config><a>1</a><b><x>9</x></b><c>3</c></config>");

    let report = diff(&before, &after, &DiffOptions::default());
    assert_eq!(report.stats.modified, 1);
    assert_eq!(report.stats.added + report.stats.removed, 0);

    let rendered = plain_lines(&report.before).join("\n");
    assert!(rendered.contains("<c>2</c>"));
    assert!(!rendered.contains("<a>"));
    assert!(!rendered.contains("<b>"));
}

#[test]
fn both_sides_always_render_to_equal_length() {
    setup();
    let cases = [
        ("<config><a>1</a></config>", "<config><a>1</a></config>"),
        ("<config><a>1</a></config>", "<config><a>2</a></config>"),
        (
            "<config></config>",
            "<config><iface><name>eth0</name><mtu>1500</mtu></iface></config>",
        ),
        (
            "<config><old><a>1</a><b>2</b></old></config>",
            "<config><new>x</new></config>",
        ),
    ];
    for (before, after) in cases {
        let report = diff(&parse(before), &parse(after), &DiffOptions::default());
        assert_eq!(report.before.len(), report.after.len());
    }
}

#[test]
fn insertion_leaves_a_matching_gap() {
    setup();
    let before = parse("<config><iface><name>eth0</name></iface></config>");
    let after = parse(
        "<config><iface><name>eth0</name></iface><iface><name>eth1</name></iface></config>",
    );

    let report = diff(&before, &after, &DiffOptions::default());
    assert_eq!(report.stats.added, 1);
    assert_eq!(report.stats.removed + report.stats.modified, 0);

    // The inserted subtree is 3 lines tall, so the before side must carry
    // exactly 3 blank lines.
    let blanks = report.before.iter().filter(|l| l.spans.is_empty()).count();
    assert_eq!(blanks, 3);
    assert_eq!(report.before.len(), report.after.len());
}

#[test]
fn added_and_removed_counts_mirror_under_swap() {
    setup();
    let a = parse("<config><x>1</x><y><z>2</z></y></config>");
    let b = parse("<config><x>1</x><w>3</w></config>");

    let forward = diff(&a, &b, &DiffOptions::default());
    let backward = diff(&b, &a, &DiffOptions::default());
    assert_eq!(forward.stats.added, backward.stats.removed);
    assert_eq!(forward.stats.removed, backward.stats.added);
    assert_eq!(forward.stats.modified, backward.stats.modified);
}

#[test]
fn tag_replacement_is_a_removal_plus_addition() {
    setup();
    let before = parse("<foo>1</foo>");
    let after = parse("<bar>1</bar>");

    let report = diff(&before, &after, &DiffOptions::default());
    assert_eq!(report.stats.removed, 1);
    assert_eq!(report.stats.added, 1);
    assert_eq!(report.stats.modified, 0);
    assert_eq!(report.before.len(), report.after.len());
}

#[test]
fn context_tags_survive_next_to_a_change() {
    setup();
    let before = parse(
        "<config><iface><name>eth0</name><mtu>1500</mtu></iface></config>",
    );
    let after = parse(
        "<config><iface><name>eth0</name><mtu>9000</mtu></iface></config>",
    );

    let report = diff(&before, &after, &DiffOptions::default());
    assert_eq!(report.stats.modified, 1);

    let rendered = plain_lines(&report.after).join("\n");
    assert!(rendered.contains("<name>eth0</name>"));
    assert!(rendered.contains("<mtu>9000</mtu>"));
}

#[test]
fn entity_spelling_is_irrelevant() {
    setup();
    let before = parse("<config><desc>up &amp; running</desc></config>");
    let after = parse("<config><desc>up &#38; running</desc></config>");
    assert!(!diff(&before, &after, &DiffOptions::default()).changed());
}

#[test]
fn attribute_order_is_irrelevant() {
    setup();
    let before = parse(r#"<config><vlan id="10" state="up"/></config>"#);
    let after = parse(r#"<config><vlan state="up" id="10"/></config>"#);
    assert!(!diff(&before, &after, &DiffOptions::default()).changed());
}

#[test]
fn field_based_identity_tracks_entries_by_id() {
    setup();
    let before = parse(
        "<config>\
         <vlan><vlan-id>10</vlan-id><mtu>1500</mtu></vlan>\
         <vlan><vlan-id>20</vlan-id><mtu>1500</mtu></vlan>\
         </config>",
    );
    let after = parse(
        "<config>\
         <vlan><vlan-id>10</vlan-id><mtu>9000</mtu></vlan>\
         <vlan><vlan-id>20</vlan-id><mtu>1500</mtu></vlan>\
         </config>",
    );

    let opts = DiffOptions::new().with_identity(IdentityPolicy::field_based());
    let report = diff(&before, &after, &opts);
    // The vlan-id 10 entry is the same list entry with a new mtu, not a
    // removal plus an addition.
    assert_eq!(report.stats.modified, 1);
    assert_eq!(report.stats.added + report.stats.removed, 0);
}
