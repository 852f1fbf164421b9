pub mod config;
pub mod engine;
pub mod errors;
pub mod matcher;
pub mod output;
pub mod scanner;
pub mod walker;

pub use config::{OutputMode, SearchConfig};
pub use engine::{run_files, search, FileCount, SearchSummary};
pub use errors::{SearchError, SearchResult};
pub use matcher::{MatchMode, PhraseMatcher};
pub use output::Emitter;
pub use scanner::{scan_file, ScanOptions};
pub use walker::discover_files;
