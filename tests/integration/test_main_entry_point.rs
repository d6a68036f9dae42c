// main.rsとエントリーポイントのテスト
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

fn get_binary_path() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_benchgame") {
        return PathBuf::from(path);
    }
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    if path.ends_with("deps") {
        path.pop(); // remove deps directory
    }
    path.join("benchgame")
}

macro_rules! binary_or_skip {
    () => {{
        let binary_path = get_binary_path();
        if !binary_path.exists() {
            println!("Skipping CLI test - binary not found at {binary_path:?}");
            return;
        }
        binary_path
    }};
}

#[test]
fn test_cli_help_lists_subcommands() {
    let binary_path = binary_or_skip!();

    let output = Command::new(&binary_path)
        .arg("--help")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for name in ["binary-trees", "fasta", "mandelbrot", "revcomp", "spectral-norm"] {
        assert!(stdout.contains(name), "missing {name}");
    }
}

#[test]
fn test_cli_spectral_norm_stdout() {
    let binary_path = binary_or_skip!();

    let output = Command::new(&binary_path)
        .args(["spectral-norm", "100", "--threads", "2"])
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    assert_eq!(output.stdout, b"1.274219991\n".to_vec());
}

#[test]
fn test_cli_verbose_logs_only_to_stderr() {
    let binary_path = binary_or_skip!();

    let output = Command::new(&binary_path)
        .args(["binary-trees", "6", "-v"])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.ends_with("long lived tree of depth 6\t check: 127\n"));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_cli_mandelbrot_is_binary_pbm() {
    let binary_path = binary_or_skip!();

    let output = Command::new(&binary_path)
        .args(["mandelbrot", "1"])
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    assert_eq!(&output.stdout[..7], b"P4\n1 1\n");
    assert_eq!(output.stdout.len(), 8);
}

#[test]
fn test_cli_revcomp_reads_stdin_file() {
    let binary_path = binary_or_skip!();

    let mut input = NamedTempFile::new().unwrap();
    input.write_all(b">seq\nAACCGGTTA\n").unwrap();

    let output = Command::new(&binary_path)
        .arg("revcomp")
        .stdin(Stdio::from(input.reopen().unwrap()))
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    assert_eq!(output.stdout, b">seq\nTAACCGGTT\n".to_vec());
}

#[test]
fn test_cli_malformed_argument_fails() {
    let binary_path = binary_or_skip!();

    let output = Command::new(&binary_path)
        .args(["fasta", "not-a-number"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_zero_threads_exits_with_error() {
    let binary_path = binary_or_skip!();

    let output = Command::new(&binary_path)
        .args(["fasta", "10", "--threads", "0"])
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    // 設定エラーは重要度ラベル付きで報告される
    assert!(stderr.contains("Error [HIGH, recoverable]"));
    assert!(stderr.contains("fasta"));
}
