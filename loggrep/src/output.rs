use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, warn};

use crate::errors::{SearchError, SearchResult};

/// Routes formatted result lines to the primary writer and, when
/// configured, to a secondary output file.
///
/// The primary writer is whatever the caller hands in (stdout locked in
/// the CLI, a byte buffer in tests). The secondary sink mirrors every line
/// the primary receives. Failures on the sink are deliberately non-fatal:
/// the first failure is logged and the sink is disabled for the rest of
/// the run, so a full disk cannot abort a scan or disturb stdout output.
/// Only failing to *create* the sink is an error, surfaced from
/// [`Emitter::with_sink`] before any scanning starts.
pub struct Emitter<W: Write> {
    out: W,
    sink: Option<SinkFile>,
}

struct SinkFile {
    path: PathBuf,
    writer: BufWriter<File>,
    failed: bool,
}

impl<W: Write> Emitter<W> {
    /// Creates an emitter writing to `out` only
    pub fn new(out: W) -> Self {
        Self { out, sink: None }
    }

    /// Creates an emitter that also mirrors lines into the file at `path`,
    /// created or truncated now
    pub fn with_sink(out: W, path: &Path) -> SearchResult<Self> {
        let file = File::create(path).map_err(|e| SearchError::sink_error(path, e))?;
        Ok(Self {
            out,
            sink: Some(SinkFile {
                path: path.to_path_buf(),
                writer: BufWriter::new(file),
                failed: false,
            }),
        })
    }

    /// Emits one result line to the primary writer and the sink.
    ///
    /// A primary write failure (e.g. closed pipe) is logged and ignored;
    /// result counting does not depend on emission succeeding.
    pub fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            error!("Failed to write to output: {}", e);
        }

        if let Some(sink) = &mut self.sink {
            if !sink.failed {
                if let Err(e) = writeln!(sink.writer, "{}", line) {
                    warn!(
                        "Failed to write to output file {}: {}",
                        sink.path.display(),
                        e
                    );
                    sink.failed = true;
                }
            }
        }
    }

    /// Flushes both destinations; called by the driver after the last file
    pub fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            error!("Failed to flush output: {}", e);
        }
        if let Some(sink) = &mut self.sink {
            if !sink.failed {
                if let Err(e) = sink.writer.flush() {
                    warn!(
                        "Failed to flush output file {}: {}",
                        sink.path.display(),
                        e
                    );
                    sink.failed = true;
                }
            }
        }
    }

    /// Consumes the emitter, returning the primary writer
    pub fn into_inner(mut self) -> W {
        self.flush();
        self.out
    }
}
