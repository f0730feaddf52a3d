//! Namespace-stripping XML parser producing [`cfgdiff_tree::Node`] trees.
//!
//! NETCONF/YANG payloads arrive wrapped in namespaces the diff engine does
//! not care about. This crate parses raw markup into plain trees with all
//! namespace prefixes removed from element and attribute names, and with
//! `xmlns` declarations dropped entirely. Malformed markup is rejected
//! here, with a descriptive error, before the engine ever runs.

mod parser;

pub use cfgdiff_tree::Node;
pub use parser::{ParseError, from_str};
