//! Event-driven XML parsing using quick-xml.

use std::fmt;
use std::io::Cursor;

use cfgdiff_tree::Node;
use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};

/// XML parsing error.
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Error from quick-xml.
    Syntax(String),
    /// Invalid UTF-8 in the input.
    InvalidUtf8(core::str::Utf8Error),
    /// The input contained no element at all.
    EmptyDocument,
    /// More than one top-level element.
    MultipleRoots,
    /// A close tag with no matching open tag.
    Unbalanced,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax(msg) => write!(f, "XML parse error: {}", msg),
            ParseError::InvalidUtf8(e) => write!(f, "invalid UTF-8 in XML: {}", e),
            ParseError::EmptyDocument => write!(f, "document contains no element"),
            ParseError::MultipleRoots => write!(f, "document has more than one root element"),
            ParseError::Unbalanced => write!(f, "unbalanced XML tags"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<quick_xml::Error> for ParseError {
    fn from(e: quick_xml::Error) -> Self {
        ParseError::Syntax(e.to_string())
    }
}

/// Parse a complete XML document into a [`Node`] tree.
///
/// Namespace prefixes are stripped from element and attribute names;
/// `xmlns` and `xmlns:*` declarations are dropped. Whitespace-only text is
/// discarded and entity references are resolved. Comments, processing
/// instructions, and the XML declaration are ignored.
pub fn from_str(input: &str) -> Result<Node, ParseError> {
    let mut reader = Reader::from_reader(Cursor::new(input.as_bytes()));

    let mut buf = Vec::new();
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        buf.clear();
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| ParseError::Syntax(e.to_string()))?
        {
            Event::Start(e) => {
                stack.push(node_from_start(&e)?);
            }
            Event::Empty(e) => {
                let node = node_from_start(&e)?;
                close_element(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                // quick-xml has already verified the tag names match.
                let node = stack.pop().ok_or(ParseError::Unbalanced)?;
                close_element(&mut stack, &mut root, node)?;
            }
            Event::Text(e) => {
                let text = e.decode().map_err(|e| ParseError::Syntax(e.to_string()))?;
                if let Some(parent) = stack.last_mut()
                    && !text.trim().is_empty()
                {
                    match &mut parent.text {
                        Some(existing) => existing.push_str(&text),
                        None => parent.text = Some(text.into_owned()),
                    }
                }
            }
            Event::CData(e) => {
                let text = core::str::from_utf8(e.as_ref()).map_err(ParseError::InvalidUtf8)?;
                if let Some(parent) = stack.last_mut()
                    && !text.is_empty()
                {
                    match &mut parent.text {
                        Some(existing) => existing.push_str(text),
                        None => parent.text = Some(text.to_string()),
                    }
                }
            }
            Event::GeneralRef(e) => {
                // Entity references come as their own events. Resolved text
                // is appended untrimmed; a reference may well be deliberate
                // whitespace.
                let raw = e.decode().map_err(|e| ParseError::Syntax(e.to_string()))?;
                let resolved = resolve_entity(&raw)?;
                if let Some(parent) = stack.last_mut() {
                    match &mut parent.text {
                        Some(existing) => existing.push_str(&resolved),
                        None => parent.text = Some(resolved),
                    }
                }
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::Unbalanced);
    }
    root.ok_or(ParseError::EmptyDocument)
}

/// Build a childless node from an open tag, stripping namespace prefixes.
fn node_from_start(e: &BytesStart<'_>) -> Result<Node, ParseError> {
    let local_name = e.local_name();
    let tag = core::str::from_utf8(local_name.as_ref()).map_err(ParseError::InvalidUtf8)?;
    let mut node = Node::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| ParseError::Syntax(e.to_string()))?;

        // Skip xmlns declarations
        let key = attr.key;
        if key.as_ref() == b"xmlns" {
            continue;
        }
        if let Some(prefix) = key.prefix()
            && prefix.as_ref() == b"xmlns"
        {
            continue;
        }

        let attr_local_name = key.local_name();
        let name =
            core::str::from_utf8(attr_local_name.as_ref()).map_err(ParseError::InvalidUtf8)?;
        let value = attr
            .unescape_value()
            .map_err(|e| ParseError::Syntax(e.to_string()))?;
        node.attrs.insert(name.to_string(), value.into_owned());
    }

    Ok(node)
}

/// Resolve a general entity reference to its character value.
///
/// Handles the predefined named entities (`amp`, `lt`, ...) and decimal or
/// hexadecimal character references (`#10`, `#x09`). Unknown named
/// entities are passed through literally.
fn resolve_entity(raw: &str) -> Result<String, ParseError> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16)
        } else {
            rest.parse::<u32>()
        }
        .map_err(|_| ParseError::Syntax(format!("invalid numeric entity: &#{};", rest)))?;
        let ch = char::from_u32(code)
            .ok_or_else(|| ParseError::Syntax(format!("invalid code point in entity: {}", code)))?;
        return Ok(ch.to_string());
    }

    Ok(format!("&{};", raw))
}

fn close_element(
    stack: &mut Vec<Node>,
    root: &mut Option<Node>,
    node: Node,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None => {
            if root.is_some() {
                return Err(ParseError::MultipleRoots);
            }
            *root = Some(node);
            Ok(())
        }
    }
}
