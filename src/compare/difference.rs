use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// The closed set of discrepancy kinds the engine can report.
///
/// Every identifier carries a statically fixed severity: recoverable
/// differences are reported and the walk continues, non-recoverable ones abort
/// the comparison immediately after the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difference {
    /// Node kinds differ (or one node is absent altogether).
    NodeType,
    /// Namespace URIs differ.
    NamespaceUri,
    /// Namespace prefixes differ.
    NamespacePrefix,
    /// One node has children, the other does not.
    HasChildNodes,
    /// Child counts differ.
    ChildNodeListLength,
    /// A control child matched a test child at a different position.
    ChildNodeListSequence,
    /// Element tag names differ.
    ElementTagName,
    /// Attribute counts differ.
    ElementAttributeCount,
    /// A matched attribute sits at a different position in the test element.
    AttributeSequence,
    /// The test element has no attribute of the control attribute's name.
    AttributeNameNotFound,
    /// Attribute values differ.
    AttributeValue,
    /// One attribute value was explicitly written, the other defaulted.
    AttributeValueExplicitlySpecified,
    /// CDATA section contents differ.
    CDataValue,
    /// Comment contents differ.
    CommentValue,
    /// Doctype names differ.
    DoctypeName,
    /// Doctype public identifiers differ.
    DoctypePublicId,
    /// Doctype system identifiers differ.
    DoctypeSystemId,
    /// Processing instruction targets differ.
    ProcessingInstructionTarget,
    /// Processing instruction data differ.
    ProcessingInstructionData,
    /// Text node contents differ.
    TextValue,
}

impl Difference {
    /// Whether the walk continues after this difference is reported.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            Difference::NamespacePrefix
                | Difference::ChildNodeListSequence
                | Difference::AttributeSequence
                | Difference::AttributeValueExplicitlySpecified
        )
    }

    /// Short human-readable description of what differed.
    pub fn description(self) -> &'static str {
        match self {
            Difference::NodeType => "node type",
            Difference::NamespaceUri => "namespace URI",
            Difference::NamespacePrefix => "namespace prefix",
            Difference::HasChildNodes => "presence of child nodes",
            Difference::ChildNodeListLength => "number of child nodes",
            Difference::ChildNodeListSequence => "sequence of child nodes",
            Difference::ElementTagName => "element tag name",
            Difference::ElementAttributeCount => "number of attributes",
            Difference::AttributeSequence => "sequence of attributes",
            Difference::AttributeNameNotFound => "attribute name",
            Difference::AttributeValue => "attribute value",
            Difference::AttributeValueExplicitlySpecified => {
                "attribute value explicitly specified"
            }
            Difference::CDataValue => "CDATA section value",
            Difference::CommentValue => "comment value",
            Difference::DoctypeName => "doctype name",
            Difference::DoctypePublicId => "doctype public identifier",
            Difference::DoctypeSystemId => "doctype system identifier",
            Difference::ProcessingInstructionTarget => "processing instruction target",
            Difference::ProcessingInstructionData => "processing instruction data",
            Difference::TextValue => "text value",
        }
    }
}

impl Display for Difference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
