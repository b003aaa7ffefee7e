use std::collections::HashMap;

use chrono::NaiveDateTime;
use errlog_core::{LogRecord, Severity, StatsOrder};
use serde::Serialize;

use crate::RecordSink;

/// Occurrence statistics for one normalized message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub message: String,
    pub count: u64,
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
}

impl StatEntry {
    fn new(message: String, time: NaiveDateTime) -> Self {
        Self {
            message,
            count: 1,
            first: time,
            last: time,
        }
    }

    fn absorb(&mut self, count: u64, first: NaiveDateTime, last: NaiveDateTime) {
        self.count += count;
        self.first = self.first.min(first);
        self.last = self.last.max(last);
    }
}

/// Which records the error-stat table counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsFilter {
    /// Exact match against the `host` parameter; records without one are skipped.
    pub host: Option<String>,
    /// Severity floor. Level tokens outside the nginx set always pass.
    pub min_level: Option<Severity>,
}

impl StatsFilter {
    pub fn accepts(&self, record: &LogRecord) -> bool {
        if let Some(ref host) = self.host {
            if record.host() != Some(host.as_str()) {
                return false;
            }
        }
        if let Some(floor) = self.min_level {
            if let Some(level) = Severity::from_token(&record.level) {
                if level < floor {
                    return false;
                }
            }
        }
        true
    }
}

/// Error-stat aggregation: count, first and last time per normalized message.
///
/// Entries keep the order in which their message was first seen. `first` and
/// `last` are the earliest and latest times folded in, so out-of-order input
/// still gives `first <= last`.
#[derive(Debug, Clone, Default)]
pub struct ErrorStats {
    filter: StatsFilter,
    index: HashMap<String, usize>,
    entries: Vec<StatEntry>,
}

impl ErrorStats {
    pub fn new(filter: StatsFilter) -> Self {
        Self {
            filter,
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, message: &str) -> Option<&StatEntry> {
        self.index.get(message).map(|&i| &self.entries[i])
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Entries in the requested order.
    pub fn ordered(&self, order: StatsOrder) -> Vec<&StatEntry> {
        let mut rows: Vec<&StatEntry> = self.entries.iter().collect();
        if order == StatsOrder::Count {
            // Stable sort keeps first-seen order among equal counts.
            rows.sort_by(|a, b| b.count.cmp(&a.count));
        }
        rows
    }

    /// Fold another partial aggregation into this one.
    ///
    /// Counts add up, `first` takes the earlier and `last` the later time.
    /// Messages new to `self` are appended in `other`'s order.
    pub fn merge(&mut self, other: ErrorStats) {
        for entry in other.entries {
            match self.index.get(&entry.message) {
                Some(&i) => self.entries[i].absorb(entry.count, entry.first, entry.last),
                None => {
                    self.index.insert(entry.message.clone(), self.entries.len());
                    self.entries.push(entry);
                }
            }
        }
    }

    fn record(&mut self, message: &str, time: NaiveDateTime) {
        match self.index.get(message) {
            Some(&i) => self.entries[i].absorb(1, time, time),
            None => {
                self.index.insert(message.to_string(), self.entries.len());
                self.entries.push(StatEntry::new(message.to_string(), time));
            }
        }
    }
}

impl RecordSink for ErrorStats {
    fn consume(&mut self, record: &LogRecord) -> bool {
        if !self.filter.accepts(record) {
            return false;
        }
        self.record(&record.normalized_message, record.time);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::record;
    use crate::LineParser;

    fn host_filter(host: &str) -> StatsFilter {
        StatsFilter {
            host: Some(host.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_paths_collapse_into_one_entry() {
        let mut stats = ErrorStats::default();
        stats.consume(&record(
            "2021/05/10 12:00:01",
            r#"open() "/var/www/a.html" failed (2: No such file)"#,
            ", host: example.com",
        ));
        stats.consume(&record(
            "2021/05/10 12:05:00",
            r#"open() "/var/www/b/c.html" failed (2: No such file)"#,
            ", host: example.com",
        ));
        assert_eq!(stats.len(), 1);
        let e = stats.get(r#"open() "{}" failed (2: No such file)"#).unwrap();
        assert_eq!(e.count, 2);
        assert_eq!(e.first.to_string(), "2021-05-10 12:00:01");
        assert_eq!(e.last.to_string(), "2021-05-10 12:05:00");
    }

    #[test]
    fn test_total_equals_parsed_lines() {
        let mut stats = ErrorStats::default();
        let bodies = ["a", "b", "a", "c", "a", "b"];
        for (i, body) in bodies.iter().enumerate() {
            stats.consume(&record(&format!("2021/05/10 12:00:0{i}"), body, ""));
        }
        assert_eq!(stats.total(), bodies.len() as u64);
        assert_eq!(stats.len(), 3);
        let order: Vec<_> = stats.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_first_never_after_last() {
        let mut stats = ErrorStats::default();
        // Out-of-order input still keeps first <= last.
        stats.consume(&record("2021/05/10 12:00:09", "boom", ""));
        stats.consume(&record("2021/05/10 12:00:01", "boom", ""));
        stats.consume(&record("2021/05/10 12:00:05", "boom", ""));
        let e = stats.get("boom").unwrap();
        assert!(e.first <= e.last);
        assert_eq!(e.first.to_string(), "2021-05-10 12:00:01");
        assert_eq!(e.last.to_string(), "2021-05-10 12:00:09");
    }

    #[test]
    fn test_host_filter() {
        let mut stats = ErrorStats::new(host_filter("a.com"));
        let t = "2021/05/10 12:00:01";
        assert!(stats.consume(&record(t, "x", ", host: a.com")));
        assert!(!stats.consume(&record(t, "x", ", host: b.com")));
        assert!(!stats.consume(&record(t, "x", "")));
        assert!(!stats.consume(&record(t, "x", r#", host: "a.com""#)));
        assert!(stats.consume(&record(t, "y", ", client: 1.1.1.1, host: a.com")));
        assert_eq!(stats.total(), 2);
    }

    #[test]
    fn test_min_level_filter() {
        let parser = LineParser::default();
        let mut stats = ErrorStats::new(StatsFilter {
            min_level: Some(Severity::Error),
            ..Default::default()
        });
        let warn = parser.parse("2021/05/10 12:00:01 [warn] 1#0: slow").unwrap();
        let crit = parser.parse("2021/05/10 12:00:01 [crit] 1#0: broken").unwrap();
        let odd = parser.parse("2021/05/10 12:00:01 [weird] 1#0: odd").unwrap();
        assert!(!stats.consume(&warn));
        assert!(stats.consume(&crit));
        assert!(stats.consume(&odd));
        assert_eq!(stats.total(), 2);
    }

    #[test]
    fn test_order_by_count() {
        let mut stats = ErrorStats::default();
        let t = "2021/05/10 12:00:01";
        for body in ["rare", "common", "tie", "common", "common", "tie"] {
            stats.consume(&record(t, body, ""));
        }
        let rows: Vec<_> = stats
            .ordered(StatsOrder::Count)
            .into_iter()
            .map(|e| (e.message.as_str(), e.count))
            .collect();
        assert_eq!(rows, vec![("common", 3), ("tie", 2), ("rare", 1)]);
        let first_seen: Vec<_> = stats
            .ordered(StatsOrder::FirstSeen)
            .into_iter()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(first_seen, vec!["rare", "common", "tie"]);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let lines = [
            ("2021/05/10 12:00:01", "a"),
            ("2021/05/10 12:00:02", "b"),
            ("2021/05/10 12:00:03", "a"),
            ("2021/05/10 12:00:04", "c"),
            ("2021/05/10 12:00:05", "a"),
        ];
        let mut whole = ErrorStats::default();
        let mut left = ErrorStats::default();
        let mut right = ErrorStats::default();
        for (i, (t, body)) in lines.iter().enumerate() {
            let r = record(t, body, "");
            whole.consume(&r);
            if i < 2 {
                left.consume(&r);
            } else {
                right.consume(&r);
            }
        }

        let mut reversed = right.clone();
        reversed.merge(left.clone());
        left.merge(right);

        assert_eq!(left.entries(), whole.entries());
        for entry in whole.entries() {
            assert_eq!(reversed.get(&entry.message), Some(entry));
        }
    }
}
