//! CLI exit-code contract tests.
//!
//! These drive the compiled binary through its pre-launch failure paths, so
//! they run anywhere — no Chrome install required. Success paths that need a
//! real browser are exercised manually and by the library unit tests.

use std::process::Command;

use tempfile::TempDir;

fn mermaid2pdf() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mermaid2pdf"))
}

#[test]
fn no_arguments_exits_one_with_usage() {
    let output = mermaid2pdf().output().expect("run mermaid2pdf");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage"),
        "expected usage message, got: {stderr}"
    );
}

#[test]
fn single_argument_exits_one() {
    let status = mermaid2pdf()
        .arg("input.html")
        .status()
        .expect("run mermaid2pdf");

    assert_eq!(status.code(), Some(1));
}

#[test]
fn extra_arguments_exit_one() {
    let status = mermaid2pdf()
        .args(["input.html", "output.pdf", "surplus"])
        .status()
        .expect("run mermaid2pdf");

    assert_eq!(status.code(), Some(1));
}

#[test]
fn missing_input_file_exits_one_and_creates_no_output() {
    let dir = TempDir::new().expect("tempdir");
    let output_path = dir.path().join("out.pdf");

    let output = mermaid2pdf()
        .args([
            "/nonexistent/input/report.html",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("run mermaid2pdf");

    assert_eq!(output.status.code(), Some(1));
    assert!(!output_path.exists(), "failed run must not create output");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Input file not found"),
        "expected descriptive preflight error, got: {stderr}"
    );
}

#[test]
fn help_flag_exits_zero() {
    let status = mermaid2pdf().arg("--help").status().expect("run mermaid2pdf");
    assert_eq!(status.code(), Some(0));
}

#[test]
fn version_flag_exits_zero() {
    let status = mermaid2pdf()
        .arg("--version")
        .status()
        .expect("run mermaid2pdf");
    assert_eq!(status.code(), Some(0));
}
