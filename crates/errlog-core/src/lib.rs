pub mod error;
pub mod level;
pub mod record;

pub use error::ErrlogError;
pub use level::{Severity, StatsOrder};
pub use record::{LogRecord, TIME_FORMAT};
