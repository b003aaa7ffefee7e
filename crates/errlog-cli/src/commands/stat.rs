use std::io::{BufRead, Write};

use errlog_core::ErrlogError;
use errlog_engine::format::{format_stats_json, format_stats_table};
use errlog_engine::{scan, ErrorStats, LineParser, RunSummary};

use super::StatOptions;

/// Print the error-stat table for `input`.
pub fn run<R: BufRead, W: Write>(
    opts: &StatOptions,
    json: bool,
    input: R,
    out: &mut W,
) -> Result<RunSummary, ErrlogError> {
    let parser = LineParser::new(opts.placeholder.as_str());
    let mut stats = ErrorStats::new(opts.filter.clone());
    let summary = scan::scan(&parser, input, &mut stats)?;

    let rows = stats.ordered(opts.order);
    if json {
        writeln!(out, "{}", format_stats_json(rows))?;
    } else {
        out.write_all(format_stats_table(rows).as_bytes())?;
    }
    out.flush()?;

    Ok(summary)
}
