/// Errlog error types
#[derive(Debug, thiserror::Error)]
pub enum ErrlogError {
    #[error("no match for line: {0}")]
    MalformedLine(String),

    #[error("malformed timestamp '{value}': {source}")]
    MalformedTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ErrlogError {
    /// True for failures scoped to a single input line. These are reported
    /// and skipped; everything else aborts the run.
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedLine(_) | Self::MalformedTimestamp { .. } | Self::InvalidNumber { .. }
        )
    }
}
