use std::io::BufRead;

use errlog_core::ErrlogError;
use tracing::{debug, warn};

use crate::{LineParser, RecordSink, RunSummary};

/// Parse every line of `input` and fold the records into `sink`.
///
/// Unparseable lines, blank ones included, are logged and skipped. Only
/// read failures abort the scan.
pub fn scan<R, S>(
    parser: &LineParser,
    mut input: R,
    sink: &mut S,
) -> Result<RunSummary, ErrlogError>
where
    R: BufRead,
    S: RecordSink + ?Sized,
{
    let mut summary = RunSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        // Error logs can carry raw request bytes; keep going on bad UTF-8.
        let line = String::from_utf8_lossy(&buf);
        summary.lines += 1;

        match parser.parse(&line) {
            Ok(record) => {
                summary.parsed += 1;
                if sink.consume(&record) {
                    summary.counted += 1;
                }
            }
            Err(e) if e.is_line_error() => {
                warn!(
                    line_no = summary.lines,
                    line = %line.trim_end(),
                    error = %e,
                    "skipping unparseable line"
                );
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(?summary, "scan finished");
    Ok(summary)
}
