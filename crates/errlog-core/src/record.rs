use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp layout used by the error log, e.g. `2021/05/10 12:00:01`.
pub const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// One parsed error-log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub time: NaiveDateTime,
    /// Lowercase severity token as written in the log (`error`, `warn`, ...).
    pub level: String,
    pub pid: u64,
    pub tid: u64,
    /// Connection id from the `*<digits>` marker, if the line has one.
    pub cid: Option<u64>,
    /// Message text after the `pid#tid:` prefix, parameters included.
    pub raw_message: String,
    pub params: HashMap<String, String>,
    /// Path-like substrings of the message body, left to right.
    pub filenames: Vec<String>,
    /// Message body with every filename replaced by the placeholder.
    pub normalized_message: String,
}

impl LogRecord {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Value of the `host` parameter.
    pub fn host(&self) -> Option<&str> {
        self.param("host")
    }

    /// Value of the `server` parameter.
    pub fn server(&self) -> Option<&str> {
        self.param("server")
    }
}
