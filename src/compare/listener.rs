use serde::Serialize;

use crate::compare::difference::Difference;
use crate::tree::XmlNode;

/// Capability consumed by the engine: receives every difference found and a
/// notice for each node pair whose kind the engine does not compare.
///
/// `control` and `test` are the nodes the compared values came from; either may
/// be absent for the entry-point presence check.
pub trait ComparisonListener {
    /// A classified difference between the two trees.
    fn difference_found(
        &mut self,
        expected: &str,
        actual: &str,
        control: Option<&XmlNode>,
        test: Option<&XmlNode>,
        difference: Difference,
    );

    /// The node pair was of an unsupported kind and was not compared.
    fn comparison_skipped(&mut self, control: &XmlNode, test: &XmlNode);
}

/// A single recorded listener callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ComparisonEvent {
    /// A difference report, with node string forms for context.
    Difference {
        kind: Difference,
        recoverable: bool,
        expected: String,
        actual: String,
        control: Option<String>,
        test: Option<String>,
    },
    /// A skipped node pair.
    Skipped { control: String, test: String },
}

/// Listener that records every callback for later inspection or formatting.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Vec<ComparisonEvent>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded callbacks in delivery order.
    pub fn events(&self) -> &[ComparisonEvent] {
        &self.events
    }

    /// The kinds of recorded differences, in delivery order.
    pub fn differences(&self) -> Vec<Difference> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ComparisonEvent::Difference { kind, .. } => Some(*kind),
                ComparisonEvent::Skipped { .. } => None,
            })
            .collect()
    }

    /// True when at least one difference was recorded.
    pub fn has_differences(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, ComparisonEvent::Difference { .. }))
    }

    /// Consume the listener, returning the recorded callbacks.
    pub fn into_events(self) -> Vec<ComparisonEvent> {
        self.events
    }
}

impl ComparisonListener for RecordingListener {
    fn difference_found(
        &mut self,
        expected: &str,
        actual: &str,
        control: Option<&XmlNode>,
        test: Option<&XmlNode>,
        difference: Difference,
    ) {
        self.events.push(ComparisonEvent::Difference {
            kind: difference,
            recoverable: difference.is_recoverable(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            control: control.map(ToString::to_string),
            test: test.map(ToString::to_string),
        });
    }

    fn comparison_skipped(&mut self, control: &XmlNode, test: &XmlNode) {
        self.events.push(ComparisonEvent::Skipped {
            control: control.to_string(),
            test: test.to_string(),
        });
    }
}
