/// Line accounting for one pass over the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines read, blank ones included.
    pub lines: u64,
    /// Lines that parsed into a record.
    pub parsed: u64,
    /// Lines skipped as unparseable.
    pub skipped: u64,
    /// Parsed records the aggregation kept.
    pub counted: u64,
}

/// One-line summary for terminal display.
pub fn format_summary(s: &RunSummary) -> String {
    format!(
        "Lines: {} | Parsed: {} | Skipped: {} | Counted: {}",
        s.lines, s.parsed, s.skipped, s.counted
    )
}
