use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::{NodeContent, XmlAttribute, XmlNode};

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Namespace bindings in effect for one element scope.
#[derive(Debug, Clone, Default)]
struct Scope {
    default_ns: Option<String>,
    prefixes: HashMap<String, String>,
}

struct Frame {
    node: XmlNode,
    scope: Scope,
}

/// Parse XML bytes into an [`XmlNode`] tree rooted at the document element.
///
/// Text, CDATA, comment and processing-instruction content inside the root
/// element become child nodes; whitespace-only text and everything outside
/// the root element (declaration, doctype, prolog comments) are dropped.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let parent_scope = stack.last().map(|frame| &frame.scope);
                let frame = build_element(&e, &reader, parent_scope)?;
                stack.push(frame);
            }
            Event::Empty(e) => {
                let parent_scope = stack.last().map(|frame| &frame.scope);
                let frame = build_element(&e, &reader, parent_scope)?;
                attach(frame.node, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                if let Some(frame) = stack.last_mut() {
                    let text = e.unescape()?.into_owned();
                    if !text.trim().is_empty() {
                        frame.node.children.push(XmlNode::text(text));
                    }
                }
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    let data = std::str::from_utf8(e.as_ref())?.to_string();
                    frame.node.children.push(XmlNode::cdata(data));
                }
            }
            Event::Comment(e) => {
                if let Some(frame) = stack.last_mut() {
                    let data = std::str::from_utf8(e.as_ref())?.to_string();
                    frame.node.children.push(XmlNode::comment(data));
                }
            }
            Event::PI(e) => {
                if let Some(frame) = stack.last_mut() {
                    let target = std::str::from_utf8(e.target())?.to_string();
                    let content = std::str::from_utf8(e.content())?.trim().to_string();
                    let data = if content.is_empty() {
                        None
                    } else {
                        Some(content)
                    };
                    frame
                        .node
                        .children
                        .push(XmlNode::processing_instruction(target, data));
                }
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                attach(frame.node, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            Event::Decl(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    root.ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
}

/// Parse an XML file into an [`XmlNode`] tree.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn attach(
    node: XmlNode,
    stack: &mut Vec<Frame>,
    root: &mut Option<XmlNode>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.node.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    } else {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    Ok(())
}

fn build_element(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    parent_scope: Option<&Scope>,
) -> Result<Frame, ParseError> {
    let mut scope = parent_scope.cloned().unwrap_or_default();

    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let (prefix, local) = match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
        None => (None, name),
    };

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();

        // xmlns declarations bind the scope and stay visible as attributes.
        if key == "xmlns" {
            scope.default_ns = if value.is_empty() {
                None
            } else {
                Some(value.clone())
            };
        } else if let Some(bound) = key.strip_prefix("xmlns:") {
            scope.prefixes.insert(bound.to_string(), value.clone());
        }

        attributes.push(XmlAttribute::new(key, value));
    }

    let namespace_uri = match &prefix {
        Some(prefix) => scope.prefixes.get(prefix).cloned(),
        None => scope.default_ns.clone(),
    };

    let node = XmlNode {
        namespace_uri,
        prefix,
        children: Vec::new(),
        content: NodeContent::Element {
            tag: local,
            attributes,
        },
    };
    Ok(Frame { node, scope })
}
