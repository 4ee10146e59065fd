//! Node-by-node XML tree comparison primitives used by higher-level tools.

pub mod compare;
pub mod format;
pub mod parser;
pub mod tree;

pub use compare::{
    compare, compare_with_options, ComparisonEvent, ComparisonListener, ComparisonOptions,
    Difference, RecordingListener,
};
pub use format::{format_json, format_summary, format_text};
pub use parser::{parse, parse_file, ParseError};
pub use tree::{NodeContent, NodeKind, XmlAttribute, XmlNode};
