use std::fmt::Display;

use crate::compare::difference::Difference;
use crate::compare::listener::ComparisonListener;
use crate::tree::{NodeContent, NodeKind, XmlNode};

const NULL_NODE: &str = "null";
const NOT_NULL_NODE: &str = "not null";

/// Configures comparison behavior.
#[derive(Debug, Clone, Default)]
pub struct ComparisonOptions {
    /// Trim leading and trailing whitespace from string values before
    /// comparing them. Internal whitespace is never collapsed.
    pub ignore_whitespace: bool,
}

/// Compare two trees with default options.
///
/// Results are delivered exclusively through the listener; the walk stops
/// early only when a non-recoverable difference is found.
pub fn compare(
    control: Option<&XmlNode>,
    test: Option<&XmlNode>,
    listener: &mut dyn ComparisonListener,
) {
    compare_with_options(control, test, listener, &ComparisonOptions::default())
}

/// Compare two trees with custom options.
pub fn compare_with_options(
    control: Option<&XmlNode>,
    test: Option<&XmlNode>,
    listener: &mut dyn ComparisonListener,
    opts: &ComparisonOptions,
) {
    let mut session = Session { opts, listener };
    let outcome = session.compare_presence(control, test).and_then(|_| {
        if let (Some(control), Some(test)) = (control, test) {
            session.compare_node(control, test)
        } else {
            Ok(())
        }
    });
    // An Err means a fatal difference was already delivered to the listener;
    // there is nothing further to report.
    let _ = outcome;
}

/// Signal raised after a non-recoverable difference; unwinds every pending
/// recursive call back to the entry point.
struct Halted;

type Walk = Result<(), Halted>;

struct Session<'a> {
    opts: &'a ComparisonOptions,
    listener: &'a mut dyn ComparisonListener,
}

impl Session<'_> {
    /// Entry check: "is a node present at all" on either side, reported as a
    /// NodeType difference with sentinel values because the node kind
    /// enumeration needs a node to read from.
    fn compare_presence(&mut self, control: Option<&XmlNode>, test: Option<&XmlNode>) -> Walk {
        let expected = null_or_not_null(control);
        let actual = null_or_not_null(test);
        if expected == actual {
            return Ok(());
        }
        self.report(expected, actual, control, test, Difference::NodeType)
    }

    /// Full comparison of a present node pair: basics, kind-specific content,
    /// then children.
    fn compare_node(&mut self, control: &XmlNode, test: &XmlNode) -> Walk {
        self.compare_node_basics(control, test)?;

        match &control.content {
            NodeContent::Element { .. } => self.compare_element(control, test)?,
            NodeContent::Text(_) => {
                self.compare_character_data(control, test, Difference::TextValue)?
            }
            NodeContent::CData(_) => {
                self.compare_character_data(control, test, Difference::CDataValue)?
            }
            NodeContent::Comment(_) => {
                self.compare_character_data(control, test, Difference::CommentValue)?
            }
            NodeContent::DocumentType { .. } => self.compare_document_type(control, test)?,
            NodeContent::ProcessingInstruction { .. } => {
                self.compare_processing_instruction(control, test)?
            }
            NodeContent::Attribute(_) | NodeContent::Other => {
                self.listener.comparison_skipped(control, test);
            }
        }

        self.compare_node_children(control, test)
    }

    /// Node kind and namespace characteristics; decides whether the nodes are
    /// comparable at all.
    fn compare_node_basics(&mut self, control: &XmlNode, test: &XmlNode) -> Walk {
        self.compare_typed(
            control.kind(),
            test.kind(),
            control,
            test,
            Difference::NodeType,
        )?;
        self.compare_values(
            control.namespace_uri.as_deref(),
            test.namespace_uri.as_deref(),
            control,
            test,
            Difference::NamespaceUri,
        )?;
        self.compare_values(
            control.prefix.as_deref(),
            test.prefix.as_deref(),
            control,
            test,
            Difference::NamespacePrefix,
        )
    }

    fn compare_element(&mut self, control: &XmlNode, test: &XmlNode) -> Walk {
        self.compare_values(
            control.tag(),
            test.tag(),
            control,
            test,
            Difference::ElementTagName,
        )?;

        let control_attrs = control.attributes();
        let test_attrs = test.attributes();
        self.compare_typed(
            control_attrs.len(),
            test_attrs.len(),
            control,
            test,
            Difference::ElementAttributeCount,
        )?;

        for (i, control_attr) in control_attrs.iter().enumerate() {
            let matched = test_attrs.iter().find(|attr| attr.name == control_attr.name);
            match matched {
                Some(test_attr) => {
                    self.compare_values(
                        Some(&control_attr.value),
                        Some(&test_attr.value),
                        control,
                        test,
                        Difference::AttributeValue,
                    )?;
                    self.compare_typed(
                        control_attr.specified,
                        test_attr.specified,
                        control,
                        test,
                        Difference::AttributeValueExplicitlySpecified,
                    )?;
                    // Reordering check uses the control's loop index against
                    // whatever name the test element has at that position.
                    if let Some(positional) = test_attrs.get(i) {
                        self.compare_values(
                            Some(&control_attr.name),
                            Some(&positional.name),
                            control,
                            test,
                            Difference::AttributeSequence,
                        )?;
                    }
                }
                None => {
                    self.compare_values(
                        Some(&control_attr.name),
                        None,
                        control,
                        test,
                        Difference::AttributeNameNotFound,
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Shared by text, CDATA and comment nodes.
    fn compare_character_data(
        &mut self,
        control: &XmlNode,
        test: &XmlNode,
        difference: Difference,
    ) -> Walk {
        self.compare_values(
            control.character_data(),
            test.character_data(),
            control,
            test,
            difference,
        )
    }

    fn compare_document_type(&mut self, control: &XmlNode, test: &XmlNode) -> Walk {
        let (
            NodeContent::DocumentType {
                name: control_name,
                public_id: control_public,
                system_id: control_system,
            },
            NodeContent::DocumentType {
                name: test_name,
                public_id: test_public,
                system_id: test_system,
            },
        ) = (&control.content, &test.content)
        else {
            return Ok(());
        };

        self.compare_values(
            Some(control_name),
            Some(test_name),
            control,
            test,
            Difference::DoctypeName,
        )?;
        self.compare_values(
            control_public.as_deref(),
            test_public.as_deref(),
            control,
            test,
            Difference::DoctypePublicId,
        )?;
        self.compare_values(
            control_system.as_deref(),
            test_system.as_deref(),
            control,
            test,
            Difference::DoctypeSystemId,
        )
    }

    fn compare_processing_instruction(&mut self, control: &XmlNode, test: &XmlNode) -> Walk {
        let (
            NodeContent::ProcessingInstruction {
                target: control_target,
                data: control_data,
            },
            NodeContent::ProcessingInstruction {
                target: test_target,
                data: test_data,
            },
        ) = (&control.content, &test.content)
        else {
            return Ok(());
        };

        self.compare_values(
            Some(control_target),
            Some(test_target),
            control,
            test,
            Difference::ProcessingInstructionTarget,
        )?;
        self.compare_values(
            control_data.as_deref(),
            test_data.as_deref(),
            control,
            test,
            Difference::ProcessingInstructionData,
        )
    }

    /// Compare child presence and counts, then the child lists themselves.
    fn compare_node_children(&mut self, control: &XmlNode, test: &XmlNode) -> Walk {
        let control_has_children = !control.children.is_empty();
        let test_has_children = !test.children.is_empty();
        self.compare_typed(
            control_has_children,
            test_has_children,
            control,
            test,
            Difference::HasChildNodes,
        )?;

        if control_has_children && test_has_children {
            self.compare_typed(
                control.children.len(),
                test.children.len(),
                control,
                test,
                Difference::ChildNodeListLength,
            )?;
            self.compare_node_list(&control.children, &test.children)?;
        }
        Ok(())
    }

    /// Match and compare child pairs assuming document order of children does
    /// NOT carry meaning (if order matters, a schema or DTD should say so).
    ///
    /// Elements match on tag name, all other kinds on node kind alone. The
    /// scan for each control child starts at its own position and wraps, so
    /// repeated elements with the same tag pair up positionally when their
    /// relative order agrees. Matched test positions are deliberately not
    /// consumed: when duplicate sibling tags appear in a different relative
    /// order, several control children can match the same test child. Callers
    /// rely on that exact behavior.
    fn compare_node_list(&mut self, control: &[XmlNode], test: &[XmlNode]) -> Walk {
        // A length mismatch was already reported; cap the walk so the scan
        // never indexes past the shorter list.
        let num_nodes = control.len().min(test.len());

        for (i, control_child) in control.iter().take(num_nodes).enumerate() {
            let key = MatchKey::of(control_child);
            let mut j = i;
            loop {
                if key.matches(&test[j]) {
                    break;
                }
                j = (j + 1) % num_nodes;
                if j == i {
                    // Scanned every candidate; fall back to the positional pair.
                    break;
                }
            }

            let test_child = &test[j];
            self.compare_typed(i, j, control_child, test_child, Difference::ChildNodeListSequence)?;
            self.compare_node(control_child, test_child)?;
        }
        Ok(())
    }

    /// Compare two non-string values, stringifying them only for reporting.
    fn compare_typed<T: Display + PartialEq>(
        &mut self,
        expected: T,
        actual: T,
        control: &XmlNode,
        test: &XmlNode,
        difference: Difference,
    ) -> Walk {
        if expected == actual {
            return Ok(());
        }
        self.report(
            &expected.to_string(),
            &actual.to_string(),
            Some(control),
            Some(test),
            difference,
        )
    }

    /// Compare two possibly absent string values. Two absent values are
    /// equal; absent vs present is not. The ignore-whitespace option trims
    /// both ends of present values before comparing.
    fn compare_values(
        &mut self,
        expected: Option<&str>,
        actual: Option<&str>,
        control: &XmlNode,
        test: &XmlNode,
        difference: Difference,
    ) -> Walk {
        let equal = match (expected, actual) {
            (None, None) => true,
            (Some(expected), Some(actual)) => {
                if self.opts.ignore_whitespace {
                    expected.trim() == actual.trim()
                } else {
                    expected == actual
                }
            }
            _ => false,
        };
        if equal {
            return Ok(());
        }
        self.report(
            expected.unwrap_or(NULL_NODE),
            actual.unwrap_or(NULL_NODE),
            Some(control),
            Some(test),
            difference,
        )
    }

    /// Deliver a difference; fatal kinds halt the walk after exactly one
    /// report.
    fn report(
        &mut self,
        expected: &str,
        actual: &str,
        control: Option<&XmlNode>,
        test: Option<&XmlNode>,
        difference: Difference,
    ) -> Walk {
        self.listener
            .difference_found(expected, actual, control, test, difference);
        if difference.is_recoverable() {
            Ok(())
        } else {
            Err(Halted)
        }
    }
}

fn null_or_not_null(node: Option<&XmlNode>) -> &'static str {
    if node.is_some() {
        NOT_NULL_NODE
    } else {
        NULL_NODE
    }
}

/// Criterion pairing a control child with a candidate test child.
enum MatchKey<'a> {
    Tag(&'a str),
    Kind(NodeKind),
}

impl<'a> MatchKey<'a> {
    fn of(node: &'a XmlNode) -> Self {
        match node.tag() {
            Some(tag) => MatchKey::Tag(tag),
            None => MatchKey::Kind(node.kind()),
        }
    }

    fn matches(&self, candidate: &XmlNode) -> bool {
        match self {
            MatchKey::Tag(tag) => candidate.tag() == Some(*tag),
            MatchKey::Kind(kind) => candidate.kind() == *kind,
        }
    }
}
