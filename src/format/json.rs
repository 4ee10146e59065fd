use crate::compare::listener::ComparisonEvent;

/// Format recorded comparison events as JSON.
pub fn format_json(events: &[ComparisonEvent]) -> String {
    serde_json::to_string_pretty(events).unwrap_or_else(|_| "[]".to_string())
}
