//! End-to-end tests for the bedq binary.
//!
//! Tests verify:
//! 1. `sort` orders chromosomes lexicographically and starts numerically
//! 2. `query` resolves regions in query-file order and rejects unsorted BED
//! 3. `merge` pairs names at shared positions and passes the rest through
//! 4. Global flags (`--strict-width`) and `--stats` reach the commands

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn bedq() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bedq"))
}

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const UNSORTED: &str = "chr1\t20100\t20101\tfoo\n\
                        chr1\t600\t601\tbaz\n\
                        chr3\t0\t1\tbar\n\
                        chr2\t200\t201\tqux\n\
                        chr2\t199\t200\tqax\n";

const SORTED: &str = "chr1\t600\t601\tbaz\n\
                      chr1\t20100\t20101\tfoo\n\
                      chr2\t199\t200\tqax\n\
                      chr2\t200\t201\tqux\n\
                      chr3\t0\t1\tbar\n";

#[test]
fn test_sort_file_to_stdout() {
    let input = temp_file(UNSORTED);
    let output = bedq()
        .args(["sort", input.path().to_str().unwrap()])
        .output()
        .expect("Failed to run bedq sort");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), SORTED);
}

#[test]
fn test_sort_to_outfile() {
    let input = temp_file(UNSORTED);
    let out = NamedTempFile::new().unwrap();
    let output = bedq()
        .args([
            "sort",
            input.path().to_str().unwrap(),
            out.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run bedq sort");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(std::fs::read_to_string(out.path()).unwrap(), SORTED);
}

#[test]
fn test_sort_stdin() {
    let mut child = bedq()
        .arg("sort")
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()
        .expect("Failed to spawn bedq sort");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(UNSORTED.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), SORTED);
}

#[test]
fn test_sort_stats() {
    let input = temp_file(UNSORTED);
    let output = bedq()
        .args(["sort", input.path().to_str().unwrap(), "--stats"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stderr_of(&output).contains("Records: 5, Chromosomes: 3"));
}

#[test]
fn test_sort_rejects_malformed_line() {
    let input = temp_file("chr1\t10\t11\tok\nchr1\tten\t11\tbad\n");
    let output = bedq()
        .args(["sort", input.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
    assert!(stderr.contains("line 2"), "stderr: {}", stderr);
}

#[test]
fn test_query_regions() {
    let bed = temp_file(SORTED);
    let queries = temp_file("chr2\t199\t201\nchr1 0 700\nchr1 700 600\nchrX 0 100\n");
    let output = bedq()
        .args([
            "query",
            bed.path().to_str().unwrap(),
            queries.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run bedq query");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        stdout_of(&output),
        "chr2\t199\t200\tqax\nchr2\t200\t201\tqux\nchr1\t600\t601\tbaz\n"
    );
}

#[test]
fn test_query_rejects_unsorted_bed() {
    let bed = temp_file(UNSORTED);
    let queries = temp_file("chr1 0 30000\n");
    let output = bedq()
        .args([
            "query",
            bed.path().to_str().unwrap(),
            queries.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("not sorted"), "stderr: {}", stderr);
    assert!(stderr.contains("bedq sort"), "stderr: {}", stderr);
}

#[test]
fn test_query_allow_unsorted() {
    let bed = temp_file(UNSORTED);
    let queries = temp_file("chr1 0 30000\n");
    let out = NamedTempFile::new().unwrap();
    let output = bedq()
        .args([
            "query",
            bed.path().to_str().unwrap(),
            queries.path().to_str().unwrap(),
            "--allow-unsorted",
            "-o",
            out.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        std::fs::read_to_string(out.path()).unwrap(),
        "chr1\t600\t601\tbaz\nchr1\t20100\t20101\tfoo\n"
    );
}

#[test]
fn test_query_bad_region_line() {
    let bed = temp_file(SORTED);
    let queries = temp_file("chr1 0\n");
    let output = bedq()
        .args([
            "query",
            bed.path().to_str().unwrap(),
            queries.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("3 fields"));
}

#[test]
fn test_merge_files() {
    let a = temp_file("chr1\t600\t601\tqux\nchr1\t900\t901\tonly_a\nchr3\t0\t1\tbar\n");
    let b = temp_file("chr1\t600\t601\tqax\nchr2\t5\t6\tonly_b\n");
    let output = bedq()
        .args([
            "merge",
            a.path().to_str().unwrap(),
            b.path().to_str().unwrap(),
            "--stats",
        ])
        .output()
        .expect("Failed to run bedq merge");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        stdout_of(&output),
        "chr1\t600\t601\tqux,qax\n\
         chr1\t900\t901\tonly_a\n\
         chr2\t5\t6\tonly_b\n\
         chr3\t0\t1\tbar\n"
    );
    assert!(stderr_of(&output).contains("Left: 3, Right: 2, Matched: 1, Written: 4"));
}

#[test]
fn test_merge_rejects_unsorted_input() {
    let a = temp_file("chr2\t1\t2\tx\nchr1\t1\t2\ty\n");
    let b = temp_file("chr1\t1\t2\tz\n");
    let output = bedq()
        .args([
            "merge",
            a.path().to_str().unwrap(),
            b.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Order error"));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_strict_width_flag() {
    let input = temp_file("chr1\t10\t20\twide\n");

    let lenient = bedq()
        .args(["sort", input.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(lenient.status.success());
    assert_eq!(stdout_of(&lenient), "chr1\t10\t20\twide\n");

    let strict = bedq()
        .args(["--strict-width", "sort", input.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!strict.status.success());
    assert!(stderr_of(&strict).contains("single base"));
}

#[test]
fn test_missing_input_file() {
    let output = bedq()
        .args(["sort", "/nonexistent/input.bed"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("I/O error"));
}

#[test]
fn test_rust_log_sets_level() {
    let input = temp_file(UNSORTED);

    let quiet = bedq()
        .env_remove("RUST_LOG")
        .args(["sort", input.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(quiet.status.success());
    assert!(!stderr_of(&quiet).contains("loaded 5 records"));

    let from_env = bedq()
        .env("RUST_LOG", "debug")
        .args(["sort", input.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(from_env.status.success());
    assert!(
        stderr_of(&from_env).contains("loaded 5 records on 3 chromosomes"),
        "stderr: {}",
        stderr_of(&from_env)
    );
    assert_eq!(stdout_of(&from_env), SORTED);
}

#[test]
fn test_verbose_flag_without_rust_log() {
    let input = temp_file(UNSORTED);
    let output = bedq()
        .env_remove("RUST_LOG")
        .args(["-vv", "sort", input.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stderr_of(&output).contains("loaded 5 records on 3 chromosomes"));
}
