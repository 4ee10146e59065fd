use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// A single XML attribute in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlAttribute {
    /// Attribute name as written, including any prefix.
    pub name: String,
    /// Decoded attribute value.
    pub value: String,
    /// Whether the value was explicitly written in the document
    /// (as opposed to defaulted from a DTD).
    pub specified: bool,
}

impl XmlAttribute {
    /// Create an explicitly specified attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            specified: true,
        }
    }
}

/// Kind-specific payload of an [`XmlNode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeContent {
    /// An element with its tag name and attributes in document order.
    Element {
        tag: String,
        attributes: Vec<XmlAttribute>,
    },
    /// A standalone attribute node.
    Attribute(XmlAttribute),
    /// A text node.
    Text(String),
    /// A CDATA section.
    CData(String),
    /// A comment.
    Comment(String),
    /// A document type declaration.
    DocumentType {
        name: String,
        public_id: Option<String>,
        system_id: Option<String>,
    },
    /// A processing instruction.
    ProcessingInstruction {
        target: String,
        data: Option<String>,
    },
    /// Any node kind outside the set above (entities, notations, ...).
    Other,
}

/// The structural category of a node, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Element,
    Attribute,
    Text,
    CDataSection,
    Comment,
    DocumentType,
    ProcessingInstruction,
    Other,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Element => "element",
            NodeKind::Attribute => "attribute",
            NodeKind::Text => "text",
            NodeKind::CDataSection => "CDATA section",
            NodeKind::Comment => "comment",
            NodeKind::DocumentType => "document type",
            NodeKind::ProcessingInstruction => "processing instruction",
            NodeKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A generic XML tree node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlNode {
    /// Resolved namespace URI, if any.
    pub namespace_uri: Option<String>,
    /// Namespace prefix as written, if any.
    pub prefix: Option<String>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
    /// Kind-specific data.
    pub content: NodeContent,
}

impl XmlNode {
    fn with_content(content: NodeContent) -> Self {
        Self {
            namespace_uri: None,
            prefix: None,
            children: Vec::new(),
            content,
        }
    }

    /// Create an element node with no attributes or children.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::with_content(NodeContent::Element {
            tag: tag.into(),
            attributes: Vec::new(),
        })
    }

    /// Create a text node.
    pub fn text(data: impl Into<String>) -> Self {
        Self::with_content(NodeContent::Text(data.into()))
    }

    /// Create a CDATA section node.
    pub fn cdata(data: impl Into<String>) -> Self {
        Self::with_content(NodeContent::CData(data.into()))
    }

    /// Create a comment node.
    pub fn comment(data: impl Into<String>) -> Self {
        Self::with_content(NodeContent::Comment(data.into()))
    }

    /// Create a document type node.
    pub fn document_type(
        name: impl Into<String>,
        public_id: Option<String>,
        system_id: Option<String>,
    ) -> Self {
        Self::with_content(NodeContent::DocumentType {
            name: name.into(),
            public_id,
            system_id,
        })
    }

    /// Create a processing instruction node.
    pub fn processing_instruction(target: impl Into<String>, data: Option<String>) -> Self {
        Self::with_content(NodeContent::ProcessingInstruction {
            target: target.into(),
            data,
        })
    }

    /// The node's structural kind.
    pub fn kind(&self) -> NodeKind {
        match &self.content {
            NodeContent::Element { .. } => NodeKind::Element,
            NodeContent::Attribute(_) => NodeKind::Attribute,
            NodeContent::Text(_) => NodeKind::Text,
            NodeContent::CData(_) => NodeKind::CDataSection,
            NodeContent::Comment(_) => NodeKind::Comment,
            NodeContent::DocumentType { .. } => NodeKind::DocumentType,
            NodeContent::ProcessingInstruction { .. } => NodeKind::ProcessingInstruction,
            NodeContent::Other => NodeKind::Other,
        }
    }

    /// Element tag name, or `None` for non-element nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Character data for text, CDATA and comment nodes.
    pub fn character_data(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Text(data) | NodeContent::CData(data) | NodeContent::Comment(data) => {
                Some(data)
            }
            _ => None,
        }
    }

    /// Attributes in document order; empty for non-element nodes.
    pub fn attributes(&self) -> &[XmlAttribute] {
        match &self.content {
            NodeContent::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Append an attribute; no-op for non-element nodes.
    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if let NodeContent::Element { attributes, .. } = &mut self.content {
            attributes.push(XmlAttribute::new(name, value));
        }
    }

    /// Return the first element child with the provided tag.
    pub fn get_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.tag() == Some(tag))
    }

    /// Return all element children with the provided tag.
    pub fn get_children(&self, tag: &str) -> Vec<&XmlNode> {
        self.children
            .iter()
            .filter(|child| child.tag() == Some(tag))
            .collect()
    }

    /// Character data of the first text child, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match &child.content {
            NodeContent::Text(data) => Some(data.as_str()),
            _ => None,
        })
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.content {
            NodeContent::Element { tag, attributes } => {
                let name = qualified(self.prefix.as_deref(), tag);
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if self.children.is_empty() {
                    return write!(f, "/>");
                }
                write!(f, ">")?;
                for child in &self.children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{name}>")
            }
            NodeContent::Attribute(attr) => write!(f, "{}=\"{}\"", attr.name, attr.value),
            NodeContent::Text(data) => f.write_str(data),
            NodeContent::CData(data) => write!(f, "<![CDATA[{data}]]>"),
            NodeContent::Comment(data) => write!(f, "<!--{data}-->"),
            NodeContent::DocumentType { name, .. } => write!(f, "<!DOCTYPE {name}>"),
            NodeContent::ProcessingInstruction { target, data } => match data {
                Some(data) => write!(f, "<?{target} {data}?>"),
                None => write!(f, "<?{target}?>"),
            },
            NodeContent::Other => f.write_str("#other"),
        }
    }
}

fn qualified(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}
