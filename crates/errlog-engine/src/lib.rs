pub mod format;
pub mod normalize;
pub mod parser;
pub mod scan;
pub mod stats;
pub mod summary;
pub mod values;

use errlog_core::LogRecord;

pub use parser::LineParser;
pub use stats::{ErrorStats, StatEntry, StatsFilter};
pub use summary::RunSummary;
pub use values::ValueSet;

/// Aggregation stage: folds parsed records one at a time.
pub trait RecordSink {
    /// Fold one record in. Returns `false` if the record was filtered out.
    fn consume(&mut self, record: &LogRecord) -> bool;
}
