use crate::{StatEntry, ValueSet};

/// Column headers of the error-stat table.
pub const STAT_COLUMNS: [&str; 4] = ["First", "Last", "Count", "Message"];

/// One value per line, with a trailing newline.
pub fn format_values(values: &ValueSet) -> String {
    let mut out = values.iter().collect::<Vec<_>>().join("\n");
    out.push('\n');
    out
}

/// Tab-separated error-stat table with a header row.
/// Output: `2021-05-10 12:00:01 \t2021-05-10 12:05:00 \t2         \topen() "{}" failed`
pub fn format_stats_table<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a StatEntry>,
{
    let [first, last, count, message] = STAT_COLUMNS;
    let mut out = stat_line(first, last, count, message);
    for e in rows {
        out.push_str(&stat_line(
            &e.first.to_string(),
            &e.last.to_string(),
            &e.count.to_string(),
            &e.message,
        ));
    }
    out
}

fn stat_line(first: &str, last: &str, count: &str, message: &str) -> String {
    format!("{first:<20}\t{last:<20}\t{count:<10}\t{message}\n")
}

/// Distinct values as a JSON array.
/// Output: `["a.com","b.com"]`
pub fn format_values_json(values: &ValueSet) -> String {
    serde_json::json!(values.iter().collect::<Vec<_>>()).to_string()
}

/// Error-stat rows as a JSON array of `{message, count, first, last}` objects.
pub fn format_stats_json<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a StatEntry>,
{
    let rows: Vec<&StatEntry> = rows.into_iter().collect();
    serde_json::json!(rows).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::record;
    use crate::{ErrorStats, RecordSink};

    #[test]
    fn test_format_values() {
        let mut set = ValueSet::hosts();
        set.consume(&record("2021/05/10 12:00:01", "x", ", host: b.com"));
        set.consume(&record("2021/05/10 12:00:01", "x", ", host: a.com"));
        assert_eq!(format_values(&set), "a.com\nb.com\n");
    }

    #[test]
    fn test_format_values_empty() {
        assert_eq!(format_values(&ValueSet::hosts()), "\n");
    }

    #[test]
    fn test_format_stats_table() {
        let mut stats = ErrorStats::default();
        stats.consume(&record("2021/05/10 12:00:01", r#"open() "/a" failed"#, ""));
        stats.consume(&record("2021/05/10 12:05:00", r#"open() "/b" failed"#, ""));
        let table = format_stats_table(stats.entries());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "First               \tLast                \tCount     \tMessage"
        );
        assert_eq!(
            lines[1],
            "2021-05-10 12:00:01 \t2021-05-10 12:05:00 \t2         \topen() \"{}\" failed"
        );
        assert!(table.ends_with('\n'));
    }

    #[test]
    fn test_format_stats_json() {
        let mut stats = ErrorStats::default();
        stats.consume(&record("2021/05/10 12:00:01", "boom", ""));
        stats.consume(&record("2021/05/10 12:00:07", "boom", ""));
        let json = format_stats_json(stats.entries());
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = v.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["message"], "boom");
        assert_eq!(rows[0]["count"], 2);
        assert_eq!(rows[0]["first"], "2021-05-10T12:00:01");
        assert_eq!(rows[0]["last"], "2021-05-10T12:00:07");
        assert_eq!(rows[0].as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_format_values_json() {
        let mut set = ValueSet::servers();
        set.consume(&record("2021/05/10 12:00:01", "x", ", server: s2"));
        set.consume(&record("2021/05/10 12:00:01", "x", ", server: s1"));
        let v: serde_json::Value = serde_json::from_str(&format_values_json(&set)).unwrap();
        assert_eq!(v, serde_json::json!(["s1", "s2"]));
    }

    #[test]
    fn test_format_values_json_empty() {
        assert_eq!(format_values_json(&ValueSet::hosts()), "[]");
    }
}
