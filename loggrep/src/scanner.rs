use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{error, trace, warn};

use crate::config::OutputMode;
use crate::matcher::PhraseMatcher;
use crate::output::Emitter;

const BUFFER_CAPACITY: usize = 65536;

/// Per-file scan settings, resolved once by the driver.
///
/// `output_mode` precedence is already settled by the time this struct
/// exists: files-only beats count-only (see
/// [`SearchConfig::output_mode`](crate::config::SearchConfig::output_mode)).
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub output_mode: OutputMode,
    pub show_line_numbers: bool,
}

/// Streams one file line-by-line and returns the number of matching lines.
///
/// At most one line of the file is resident in memory at a time; files of
/// any size scan in constant space. Lines are decoded lossily, so invalid
/// byte sequences become U+FFFD and never abort the scan. Only trailing
/// `\n`/`\r` characters are stripped before matching; all other content is
/// preserved verbatim in output.
///
/// Dispatch per matching line, by output mode:
/// - `FilesOnly`: emit the path once and stop reading (the returned count
///   is 1).
/// - `CountOnly`: count silently, keep scanning.
/// - `Normal`: emit `path:line: content` (or `path: content` when line
///   numbers are suppressed), keep scanning.
///
/// Errors never propagate out of a single file: a missing file logs an
/// error and yields 0, and a mid-scan read failure logs a warning and
/// yields the count accumulated so far. The file handle closes on every
/// exit path.
pub fn scan_file<W: Write>(
    path: &Path,
    matcher: &PhraseMatcher,
    options: &ScanOptions,
    emitter: &mut Emitter<W>,
) -> usize {
    trace!("Searching file: {}", path.display());

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error!("File not found: {}", path.display());
            return 0;
        }
        Err(e) => {
            warn!("Failed to open {}: {}", path.display(), e);
            return 0;
        }
    };

    let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
    let mut buf = Vec::with_capacity(256);
    let mut matches = 0;
    let mut line_num = 0usize;
    let mut replaced_bytes = false;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(
                    "Error reading {} at line {}: {} ({} matches kept)",
                    path.display(),
                    line_num + 1,
                    e,
                    matches
                );
                break;
            }
        }
        line_num += 1;

        let decoded = String::from_utf8_lossy(&buf);
        if !replaced_bytes && matches!(decoded, Cow::Owned(_)) {
            warn!("Invalid UTF-8 replaced in file: {}", path.display());
            replaced_bytes = true;
        }

        // Strip only the line terminator; leading/trailing spaces and
        // embedded control characters stay part of the line.
        let content = decoded.trim_end_matches('\n').trim_end_matches('\r');

        if !matcher.is_match(content) {
            continue;
        }
        matches += 1;

        match options.output_mode {
            OutputMode::FilesOnly => {
                emitter.emit(&path.display().to_string());
                trace!("First match found, stopping scan of {}", path.display());
                return matches;
            }
            OutputMode::CountOnly => {}
            OutputMode::Normal => {
                let out = if options.show_line_numbers {
                    format!("{}:{}: {}", path.display(), line_num, content)
                } else {
                    format!("{}: {}", path.display(), content)
                };
                emitter.emit(&out);
            }
        }
    }

    trace!(
        "Search of {} completed, found {} matches",
        path.display(),
        matches
    );
    matches
}
