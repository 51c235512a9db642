//! Integration test: Verify binary prints correct version

use std::process::Command;

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_tvgrid"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected output to contain the package version, but got: {}",
        stdout
    );
}

#[test]
fn unknown_demo_is_rejected_before_the_terminal_opens() {
    let output = Command::new(env!("CARGO_BIN_EXE_tvgrid"))
        .args(["--demo", "spiral"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("spiral"), "unexpected stderr: {}", stderr);
}
