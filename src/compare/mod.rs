//! Core node-by-node comparison.

pub mod difference;
pub mod engine;
pub mod listener;

pub use difference::Difference;
pub use engine::{compare, compare_with_options, ComparisonOptions};
pub use listener::{ComparisonEvent, ComparisonListener, RecordingListener};
