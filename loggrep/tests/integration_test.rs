use anyhow::Result;
use loggrep::{search, Emitter, SearchConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// Helper function to create test files
fn create_test_files(dir: impl AsRef<Path>, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        fs::write(dir.as_ref().join(name), content)?;
    }
    Ok(())
}

fn base_config(root: &Path, phrases: &[&str]) -> SearchConfig {
    SearchConfig {
        phrases: phrases.iter().map(|s| s.to_string()).collect(),
        root_path: root.to_path_buf(),
        ..Default::default()
    }
}

fn run(config: &SearchConfig) -> (usize, String) {
    let mut emitter = Emitter::new(Vec::new());
    let summary = search(config, &mut emitter).unwrap();
    (
        summary.total_matches,
        String::from_utf8(emitter.into_inner()).unwrap(),
    )
}

const SAMPLE: &str = "INFO: ok\nERROR: db failed\nERROR: payment failed\n";

#[test]
fn test_all_mode_concrete_scenario() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("app.log", SAMPLE)])?;
    let path = dir.path().join("app.log");

    let config = base_config(&path, &["ERROR", "failed"]);
    let (total, out) = run(&config);

    assert_eq!(total, 2);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("{}:2: ERROR: db failed", path.display()));
    assert_eq!(
        lines[1],
        format!("{}:3: ERROR: payment failed", path.display())
    );
    Ok(())
}

#[test]
fn test_ignore_case_concrete_scenario() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("app.log", SAMPLE)])?;

    let mut config = base_config(&dir.path().join("app.log"), &["error"]);
    config.ignore_case = true;
    let (total, out) = run(&config);

    assert_eq!(total, 2);
    assert!(out.contains(":2: ERROR: db failed"));
    assert!(out.contains(":3: ERROR: payment failed"));
    Ok(())
}

#[test]
fn test_normal_and_count_modes_agree() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("a.log", "ERROR one\nINFO two\nERROR three\n"),
            ("b.log", "WARN\nERROR four\n"),
        ],
    )?;

    for (phrases, match_any, ignore_case) in [
        (vec!["ERROR"], false, false),
        (vec!["ERROR", "three"], false, false),
        (vec!["error", "warn"], true, true),
    ] {
        let mut normal = base_config(dir.path(), &phrases);
        normal.match_any = match_any;
        normal.ignore_case = ignore_case;
        let mut counting = normal.clone();
        counting.count_only = true;

        let (normal_total, normal_out) = run(&normal);
        let (count_total, _) = run(&counting);

        assert_eq!(normal_total, count_total, "phrases {:?}", phrases);
        assert_eq!(normal_out.lines().count(), normal_total);
    }
    Ok(())
}

#[test]
fn test_files_only_iff_count_at_least_one() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("match1.log", "ERROR once\n"),
            ("match5.log", "ERROR\nERROR\nERROR\nERROR\nERROR\n"),
            ("clean.log", "nothing to see\n"),
        ],
    )?;

    let mut files_only = base_config(dir.path(), &["ERROR"]);
    files_only.files_only = true;
    let (_, files_out) = run(&files_only);

    let mut counting = base_config(dir.path(), &["ERROR"]);
    counting.count_only = true;
    let (_, count_out) = run(&counting);

    // Exactly one output line per file with count >= 1, none for count 0
    let reported: Vec<_> = files_out.lines().collect();
    assert_eq!(reported.len(), 2);
    assert!(reported.iter().any(|l| l.ends_with("match1.log")));
    assert!(reported.iter().any(|l| l.ends_with("match5.log")));
    assert!(!files_out.contains("clean.log"));

    for line in count_out.lines() {
        let (path, count) = line.rsplit_once(": ").unwrap();
        let count: usize = count.parse().unwrap();
        assert_eq!(
            count >= 1,
            reported.iter().any(|l| *l == path),
            "count line {line:?}"
        );
    }
    Ok(())
}

#[test]
fn test_ignore_case_is_idempotent_under_recasing() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("app.log", SAMPLE)])?;

    let mut outputs = Vec::new();
    for phrase in ["ERROR", "error", "Error"] {
        let mut config = base_config(&dir.path().join("app.log"), &[phrase]);
        config.ignore_case = true;
        outputs.push(run(&config));
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
    Ok(())
}

#[test]
fn test_single_phrase_all_equals_any() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("app.log", SAMPLE)])?;

    let all = base_config(&dir.path().join("app.log"), &["failed"]);
    let mut any = all.clone();
    any.match_any = true;

    assert_eq!(run(&all), run(&any));
    Ok(())
}

#[test]
fn test_all_mode_is_subset_of_any_mode() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[(
            "app.log",
            "ERROR: db failed\nERROR: db recovered\nINFO: failover done\nINFO: ok\n",
        )],
    )?;

    let all = base_config(&dir.path().join("app.log"), &["ERROR", "failed"]);
    let mut any = all.clone();
    any.match_any = true;

    let (all_total, all_out) = run(&all);
    let (any_total, any_out) = run(&any);

    assert!(all_total <= any_total);
    for line in all_out.lines() {
        assert!(any_out.lines().any(|l| l == line), "missing {line:?}");
    }
    Ok(())
}

#[test]
fn test_runs_are_byte_for_byte_idempotent() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("a.log", SAMPLE),
            ("b.log", "ERROR again\n"),
            ("c.log", "quiet\n"),
        ],
    )?;

    let config = base_config(dir.path(), &["ERROR"]);
    let first = run(&config);
    let second = run(&config);
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_non_recursive_directory_scenario() -> Result<()> {
    // 3 files directly in the directory, one of them matchless, plus a
    // matching file in a subdirectory that must NOT be scanned
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("a.log", "ERROR one\n"),
            ("b.log", "all quiet\n"),
            ("c.log", "ERROR two\nERROR three\n"),
        ],
    )?;
    let sub = dir.path().join("sub");
    fs::create_dir(&sub)?;
    fs::write(sub.join("hidden.log"), "ERROR should not count\n")?;

    let config = base_config(dir.path(), &["ERROR"]);
    let (total, out) = run(&config);

    assert_eq!(total, 3);
    assert!(!out.contains("hidden.log"));

    // Output follows lexicographic file order
    let lines: Vec<_> = out.lines().collect();
    assert!(lines[0].contains("a.log"));
    assert!(lines[1].contains("c.log"));
    assert!(lines[2].contains("c.log"));
    Ok(())
}

#[test]
fn test_recursive_directory_includes_subtree() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("top.log", "ERROR top\n")])?;
    let sub = dir.path().join("sub");
    fs::create_dir(&sub)?;
    fs::write(sub.join("nested.log"), "ERROR nested\n")?;

    let mut config = base_config(dir.path(), &["ERROR"]);
    config.recursive = true;
    let (total, out) = run(&config);

    assert_eq!(total, 2);
    assert!(out.contains("nested.log"));
    assert!(out.contains("top.log"));
    Ok(())
}

#[test]
fn test_sink_mirrors_stdout_lines() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("app.log", SAMPLE)])?;
    let sink_path = dir.path().join("results.txt");

    let mut config = base_config(&dir.path().join("app.log"), &["ERROR"]);
    config.output_path = Some(sink_path.clone());

    let mut emitter = Emitter::with_sink(Vec::new(), &sink_path).unwrap();
    let summary = search(&config, &mut emitter).unwrap();
    let primary = String::from_utf8(emitter.into_inner()).unwrap();

    assert_eq!(summary.total_matches, 2);
    assert_eq!(fs::read_to_string(&sink_path)?, primary);
    Ok(())
}

#[test]
fn test_bad_encoding_does_not_abort_directory_run() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.log"), b"ERROR before \xf0\x28 after\n")?;
    create_test_files(&dir, &[("b.log", "ERROR clean\n")])?;

    let config = base_config(dir.path(), &["ERROR"]);
    let (total, out) = run(&config);

    assert_eq!(total, 2);
    assert!(out.contains('\u{FFFD}'));
    assert!(out.contains("ERROR clean"));
    Ok(())
}

#[test]
fn test_unreadable_file_does_not_stop_other_files() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("a.log", "ERROR one\n"), ("b.log", "ERROR two\n")])?;

    let config = base_config(dir.path(), &["ERROR"]);
    let files = vec![
        dir.path().join("a.log"),
        dir.path().join("does-not-exist.log"),
        dir.path().join("b.log"),
    ];

    let mut emitter = Emitter::new(Vec::new());
    let summary = loggrep::run_files(&config, &files, &mut emitter);

    assert_eq!(summary.files_searched, 3);
    assert_eq!(summary.total_matches, 2);
    assert_eq!(summary.file_counts[1].matches, 0);
    Ok(())
}
