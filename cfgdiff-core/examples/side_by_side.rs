//! Diff two small device configurations and print them side by side.
//!
//! Run with `cargo run --example side_by_side`. Set `CFGDIFF_LOG=debug`
//! to watch the pipeline stages.

use cfgdiff_core::{AnsiBackend, DiffOptions, diff};
use cfgdiff_xml::{ParseError, from_str};

const BEFORE: &str = r#"
<config>
  <interface>
    <name>eth0</name>
    <mtu>1500</mtu>
    <vlan>
      <vlan-id>10</vlan-id>
      <description>uplink</description>
    </vlan>
  </interface>
  <ntp>
    <server>10.0.0.1</server>
  </ntp>
</config>
"#;

const AFTER: &str = r#"
<config>
  <interface>
    <name>eth0</name>
    <mtu>9000</mtu>
    <vlan>
      <vlan-id>10</vlan-id>
      <description>uplink</description>
    </vlan>
  </interface>
  <dns>
    <server>10.0.0.53</server>
  </dns>
</config>
"#;

fn main() -> Result<(), ParseError> {
    cfgdiff_testhelpers::setup();

    let before = from_str(BEFORE)?;
    let after = from_str(AFTER)?;

    let report = diff(&before, &after, &DiffOptions::default());
    print!("{}", report.side_by_side(&AnsiBackend::default()));
    println!(
        "\n{} added, {} removed, {} modified",
        report.stats.added, report.stats.removed, report.stats.modified
    );
    Ok(())
}
