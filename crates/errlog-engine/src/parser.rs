use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use errlog_core::{ErrlogError, LogRecord, TIME_FORMAT};
use regex::Regex;

use crate::normalize::{self, DEFAULT_PLACEHOLDER};

/// `<time> [<level>] <pid>#<tid>: [*<cid> ]<message>`
static RE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9/ :]+) \[([a-z]+)\] ([0-9]+)#([0-9]+): (?:\*([0-9]+) ?)?(.*)$").unwrap()
});

/// Separator in front of each trailing `key: value` parameter.
static RE_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r", ([a-z]+): ").unwrap());

/// Turns raw error-log lines into [`LogRecord`]s.
#[derive(Debug, Clone)]
pub struct LineParser {
    placeholder: String,
}

impl LineParser {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// Parse a single line. Surrounding whitespace is ignored.
    pub fn parse(&self, line: &str) -> Result<LogRecord, ErrlogError> {
        let line = line.trim();
        let caps = RE_LINE
            .captures(line)
            .ok_or_else(|| ErrlogError::MalformedLine(line.to_string()))?;

        // Groups 1-4 and 6 always participate in a match.
        let time_str = &caps[1];
        let level = caps[2].to_string();
        let pid = parse_id("pid", &caps[3])?;
        let tid = parse_id("tid", &caps[4])?;
        let cid = caps
            .get(5)
            .map(|m| parse_id("cid", m.as_str()))
            .transpose()?;
        let raw_message = caps[6].to_string();

        let (body, params) = split_params(&raw_message);

        let time = NaiveDateTime::parse_from_str(time_str, TIME_FORMAT).map_err(|source| {
            ErrlogError::MalformedTimestamp {
                value: time_str.to_string(),
                source,
            }
        })?;

        let (normalized_message, filenames) =
            normalize::normalize_with_filenames(body, &self.placeholder);

        Ok(LogRecord {
            time,
            level,
            pid,
            tid,
            cid,
            params,
            filenames,
            normalized_message,
            raw_message,
        })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER)
    }
}

fn parse_id(field: &'static str, value: &str) -> Result<u64, ErrlogError> {
    value.parse().map_err(|_| ErrlogError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Split `message` into its body and the trailing `, key: value` parameters.
///
/// Every separator match starts a new parameter whose value runs up to the
/// next separator. A key that appears twice keeps its last value.
pub fn split_params(message: &str) -> (&str, HashMap<String, String>) {
    let seps: Vec<(usize, usize, &str)> = RE_PARAM
        .captures_iter(message)
        .filter_map(|c| {
            let whole = c.get(0)?;
            let key = c.get(1)?;
            Some((whole.start(), whole.end(), key.as_str()))
        })
        .collect();

    let Some(&(body_end, _, _)) = seps.first() else {
        return (message, HashMap::new());
    };

    let mut params = HashMap::with_capacity(seps.len());
    for (i, &(_, value_start, key)) in seps.iter().enumerate() {
        let value_end = seps.get(i + 1).map_or(message.len(), |next| next.0);
        params.insert(key.to_string(), message[value_start..value_end].to_string());
    }

    (&message[..body_end], params)
}
