#![allow(dead_code)]

use log::debug;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use treeplate::cli::{run, Args};
use walkdir::WalkDir;

/// Relative paths of every file below `dir`.
pub fn list_files(dir: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect()
}

/// Writes `content` to `root/relative`, creating parents.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
///
/// # Arguments
/// * `dir1` - The first directory to compare (actual output).
/// * `dir2` - The second directory to compare (expected output).
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let files1 = list_files(dir1);
    let files2 = list_files(dir2);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", dir1);
    println!("Expected output: {:?}", dir2);

    for file in files1.difference(&files2) {
        println!("  + {:?} (only in actual)", file);
    }
    for file in files2.difference(&files1) {
        println!("  - {:?} (only in expected)", file);
    }
    for file in files1.intersection(&files2) {
        let actual = fs::read_to_string(dir1.join(file)).unwrap_or_default();
        let expected = fs::read_to_string(dir2.join(file)).unwrap_or_default();
        if actual != expected {
            println!("\n  File: {:?}", file);
            println!("  --- Actual content:\n{actual}");
            println!("  --- Expected content:\n{expected}");
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Runs the CLI on a demo project with its output redirected to a temporary
/// directory, then asserts the output matches `expected_dir`.
///
/// # Arguments
/// * `config_dir` - Directory holding the demo's configuration file.
/// * `expected_dir` - Path to the directory with expected output.
pub fn run_and_assert(config_dir: &str, expected_dir: &str) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let args = Args {
        config_dir: PathBuf::from(config_dir),
        output: Some(tmp_dir.path().to_path_buf()),
        verbose: 2,
        ..Default::default()
    };
    let report = run(args).unwrap();
    assert!(report.is_success());

    let different = dir_diff::is_different(tmp_dir.path(), expected_dir).unwrap();
    if different {
        debug!("Output differs from {expected_dir}");
        print_dir_diff(tmp_dir.path(), expected_dir.as_ref());
        panic!("Directories differ. See above for details.");
    }
}
