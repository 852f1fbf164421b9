use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::matcher::MatchMode;

/// How matching lines are reported.
///
/// Derived from the two output flags; when both are set, files-only wins
/// over count-only, so `-l -c` behaves exactly like `-l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Emit every matching line as `path:line: content`
    Normal,
    /// Emit one `path: count` line per file, no matching lines
    CountOnly,
    /// Emit each matching file's path once, stopping at its first match
    FilesOnly,
}

/// Configuration for one search invocation.
///
/// # Configuration Locations
///
/// Defaults can be loaded from YAML files, in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.loggrep.yaml` in the current directory
/// 3. Global `$HOME/.config/loggrep/config.yaml`
///
/// CLI arguments always take precedence over file values; the merging
/// behavior is defined in [`SearchConfig::merge_with_cli`].
///
/// # Configuration Format
///
/// ```yaml
/// # Ignore case when matching (full Unicode casefolding)
/// ignore_case: true
///
/// # Match lines containing ANY phrase instead of ALL phrases
/// match_any: false
///
/// # Descend into subdirectories when the path is a directory
/// recursive: true
///
/// # Omit line numbers from normal-mode output
/// show_line_numbers: false
///
/// # Mirror results into this file (created/truncated per run)
/// output_path: "results.txt"
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Literal phrases to search for; the boundary layer guarantees at
    /// least one
    #[serde(default)]
    pub phrases: Vec<String>,

    /// File or directory to search
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Compare case-insensitively using Unicode casefolding
    #[serde(default)]
    pub ignore_case: bool,

    /// Require any one phrase per line instead of all phrases
    #[serde(default)]
    pub match_any: bool,

    /// Descend into subdirectories when `root_path` is a directory
    #[serde(default)]
    pub recursive: bool,

    /// Report per-file match counts instead of matching lines
    #[serde(default)]
    pub count_only: bool,

    /// Report matching file paths instead of matching lines
    #[serde(default)]
    pub files_only: bool,

    /// Include line numbers in normal-mode output
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Optional file that mirrors every emitted line
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_show_line_numbers() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            phrases: Vec::new(),
            root_path: default_root_path(),
            ignore_case: false,
            match_any: false,
            recursive: false,
            count_only: false,
            files_only: false,
            show_line_numbers: default_show_line_numbers(),
            output_path: None,
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally including a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Default config locations, later sources override earlier ones
        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("loggrep/config.yaml")),
            // Local config
            Some(PathBuf::from(".loggrep.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        // Add existing config files
        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // Build and deserialize
        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        // CLI values take precedence over config file values
        if !cli_config.phrases.is_empty() {
            self.phrases = cli_config.phrases;
        }
        if cli_config.root_path != default_root_path() {
            self.root_path = cli_config.root_path;
        }
        if cli_config.ignore_case {
            self.ignore_case = true;
        }
        if cli_config.match_any {
            self.match_any = true;
        }
        if cli_config.recursive {
            self.recursive = true;
        }
        if cli_config.count_only {
            self.count_only = true;
        }
        if cli_config.files_only {
            self.files_only = true;
        }
        if !cli_config.show_line_numbers {
            self.show_line_numbers = false;
        }
        if cli_config.output_path.is_some() {
            self.output_path = cli_config.output_path;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }

    /// Resolves the ALL/ANY flag to a match mode
    pub fn match_mode(&self) -> MatchMode {
        if self.match_any {
            MatchMode::Any
        } else {
            MatchMode::All
        }
    }

    /// Resolves the output flags, files-only taking precedence
    pub fn output_mode(&self) -> OutputMode {
        if self.files_only {
            OutputMode::FilesOnly
        } else if self.count_only {
            OutputMode::CountOnly
        } else {
            OutputMode::Normal
        }
    }
}
