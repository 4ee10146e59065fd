use crate::compare::listener::ComparisonEvent;

/// Format recorded comparison events as plain text.
pub fn format_text(events: &[ComparisonEvent]) -> String {
    let mut lines = Vec::with_capacity(events.len());
    for event in events {
        match event {
            ComparisonEvent::Difference {
                kind,
                recoverable,
                expected,
                actual,
                ..
            } => {
                let marker = if *recoverable { '~' } else { '!' };
                lines.push(format!("{marker} {kind}"));
                lines.push(format!("  expected: {expected}"));
                lines.push(format!("  actual:   {actual}"));
            }
            ComparisonEvent::Skipped { control, .. } => {
                lines.push(format!("s skipped {control}"));
            }
        }
    }
    lines.join("\n")
}

/// Format a simple summary of event counts.
pub fn format_summary(events: &[ComparisonEvent]) -> String {
    let mut recoverable = 0;
    let mut fatal = 0;
    let mut skipped = 0;

    for event in events {
        match event {
            ComparisonEvent::Difference {
                recoverable: true, ..
            } => recoverable += 1,
            ComparisonEvent::Difference { .. } => fatal += 1,
            ComparisonEvent::Skipped { .. } => skipped += 1,
        }
    }

    format!(
        "differences={} recoverable={recoverable} fatal={fatal} skipped={skipped}",
        recoverable + fatal
    )
}
