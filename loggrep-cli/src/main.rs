use anyhow::{Context, Result};
use clap::Parser;
use loggrep::{discover_files, run_files, Emitter, SearchConfig};
use std::io;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "loggrep",
    author,
    version,
    about = "Searches log files for lines containing specified phrases",
    long_about = None
)]
struct Cli {
    /// Path to log file or directory
    path: PathBuf,

    /// Phrases to search for (literal substrings, not patterns)
    #[arg(required = true)]
    phrases: Vec<String>,

    /// Ignore case (full Unicode casefolding)
    #[arg(short = 'i', long = "ignore-case")]
    ignore_case: bool,

    /// Show lines containing ANY phrase (default: ALL phrases)
    #[arg(short = 'a', long = "any")]
    any: bool,

    /// Search recursively in all subdirectories (only when path is a directory)
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Display detailed operation logs
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Save results to file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Do not include line numbers in output
    #[arg(long = "no-line-numbers")]
    no_line_numbers: bool,

    /// Only print number of matches per file (do not print matching lines)
    #[arg(short = 'c', long = "count")]
    count: bool,

    /// Only print names of files that contain matches (like grep -l)
    #[arg(short = 'l', long = "files-only")]
    files_only: bool,

    /// Path to a custom config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = SearchConfig::load_from(cli.config.as_deref())
        .with_context(|| "Failed to load configuration")?;

    let cli_config = SearchConfig {
        phrases: cli.phrases,
        root_path: cli.path,
        ignore_case: cli.ignore_case,
        match_any: cli.any,
        recursive: cli.recursive,
        count_only: cli.count,
        files_only: cli.files_only,
        show_line_numbers: !cli.no_line_numbers,
        output_path: cli.output,
        log_level: if cli.verbose {
            "info".to_string()
        } else {
            "warn".to_string()
        },
    };

    let config = file_config.merge_with_cli(cli_config);
    init_tracing(&config.log_level);

    // Discovery failure means "no files to search", not a crash
    let files = match discover_files(&config.root_path, config.recursive) {
        Ok(files) => files,
        Err(e) => {
            error!("{}", e);
            println!("No files found to search.");
            return Ok(());
        }
    };
    if files.is_empty() {
        println!("No files found to search.");
        return Ok(());
    }

    println!("Searching {} files...", files.len());
    if config.recursive {
        println!("(with recursive option)");
    }
    println!("{}", "-".repeat(50));

    // Sink creation failure is the one run-level error worth a non-zero exit
    let stdout = io::stdout();
    let mut emitter = match &config.output_path {
        Some(path) => Emitter::with_sink(stdout.lock(), path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?,
        None => Emitter::new(stdout.lock()),
    };

    let summary = run_files(&config, &files, &mut emitter);
    drop(emitter.into_inner());

    if summary.total_matches > 0 {
        println!("Found {} lines:", summary.total_matches);
        println!("{}", "-".repeat(50));
    } else {
        println!("No matching lines found.");
    }

    if let Some(path) = &config.output_path {
        println!("\nResults saved to: {}", path.display());
    }

    Ok(())
}

/// Initializes the tracing subscriber once, writing to stderr so match
/// output on stdout stays machine-readable
fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
