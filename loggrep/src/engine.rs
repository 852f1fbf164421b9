use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{OutputMode, SearchConfig};
use crate::errors::SearchResult;
use crate::matcher::PhraseMatcher;
use crate::output::Emitter;
use crate::scanner::{scan_file, ScanOptions};
use crate::walker::discover_files;

/// Match count for a single scanned file
#[derive(Debug, Clone)]
pub struct FileCount {
    pub path: PathBuf,
    pub matches: usize,
}

/// Aggregate outcome of a search run.
///
/// Match lines are emitted as they are found; this summary carries only the
/// bookkeeping the boundary layer needs to render the trailing
/// `Found N lines:` / `No matching lines found.` message.
#[derive(Debug, Clone, Default)]
pub struct SearchSummary {
    /// Per-file match counts, in scan order
    pub file_counts: Vec<FileCount>,
    /// Total number of matching lines across all files
    pub total_matches: usize,
    /// Number of files scanned
    pub files_searched: usize,
    /// Number of files with at least one match
    pub files_with_matches: usize,
}

impl SearchSummary {
    /// Creates a new empty summary
    pub fn new() -> Self {
        Default::default()
    }

    /// Records the outcome of one file's scan
    pub fn record(&mut self, path: &Path, matches: usize) {
        self.files_searched += 1;
        if matches > 0 {
            self.total_matches += matches;
            self.files_with_matches += 1;
        }
        self.file_counts.push(FileCount {
            path: path.to_path_buf(),
            matches,
        });
    }
}

/// Scans the given files strictly sequentially, in the given order.
///
/// One file is fully scanned (or short-circuited, in files-only mode)
/// before the next begins. Per-file errors are absorbed by the scanner, so
/// every file in the list is attempted and the summary always reflects the
/// whole run. In count mode a `path: count` line is emitted after each
/// file's scan completes.
pub fn run_files<W: Write>(
    config: &SearchConfig,
    files: &[PathBuf],
    emitter: &mut Emitter<W>,
) -> SearchSummary {
    info!("Starting search with phrases: {:?}", config.phrases);

    let mut summary = SearchSummary::new();
    if config.phrases.is_empty() {
        debug!("No search phrases provided, returning empty summary");
        return summary;
    }

    // Phrases are prepared once here, not per file or per line
    let matcher = PhraseMatcher::new(
        config.phrases.clone(),
        config.ignore_case,
        config.match_mode(),
    );
    let options = ScanOptions {
        output_mode: config.output_mode(),
        show_line_numbers: config.show_line_numbers,
    };

    for path in files {
        let matches = scan_file(path, &matcher, &options, emitter);
        if options.output_mode == OutputMode::CountOnly {
            emitter.emit(&format!("{}: {}", path.display(), matches));
        }
        summary.record(path, matches);
    }
    emitter.flush();

    info!(
        "Search complete. Found {} matches in {} of {} files",
        summary.total_matches, summary.files_with_matches, summary.files_searched
    );
    summary
}

/// Discovers files under the configured root path, then scans them.
///
/// Fails only when the root path names neither a file nor a directory;
/// callers report that and treat it as a zero-match run.
pub fn search<W: Write>(
    config: &SearchConfig,
    emitter: &mut Emitter<W>,
) -> SearchResult<SearchSummary> {
    let files = discover_files(&config.root_path, config.recursive)?;
    Ok(run_files(config, &files, emitter))
}
