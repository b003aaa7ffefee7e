use std::io::{BufRead, Write};

use errlog_core::ErrlogError;
use errlog_engine::format::{format_values, format_values_json};
use errlog_engine::{scan, LineParser, RunSummary, ValueSet};

/// Print every distinct value of parameter `key` found in `input`.
pub fn run<R: BufRead, W: Write>(
    key: &str,
    json: bool,
    input: R,
    out: &mut W,
) -> Result<RunSummary, ErrlogError> {
    let mut values = ValueSet::new(key);
    let summary = scan::scan(&LineParser::default(), input, &mut values)?;

    if json {
        writeln!(out, "{}", format_values_json(&values))?;
    } else {
        out.write_all(format_values(&values).as_bytes())?;
    }
    out.flush()?;

    Ok(summary)
}
