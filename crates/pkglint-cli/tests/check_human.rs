//! Integration tests for human-readable `pkglint check` output.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "pkglint-cli", "--bin", "pkglint", "--"]);
    cmd
}

#[test]
fn test_check_human_lists_diagnostics_and_entries() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        "{\n  \"name\": \"human\",\n  \"exports\": {\n    \"./a.js\": \"./a.js\"\n  }\n}\n",
    )
    .unwrap();
    fs::write(dir.path().join("a.js"), "").unwrap();

    let output = cargo_bin()
        .arg("--cwd")
        .arg(dir.path())
        .args(["check", "--entries"])
        .output()
        .expect("Failed to run check command");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("human"), "missing package name: {stdout}");
    assert!(
        stdout.contains("package.json:4:15:"),
        "missing 1-based position: {stdout}"
    );
    assert!(stdout.contains("[exports-specifier-extension]"));
    assert!(stdout.contains("[exports-main-missing]"));
    assert!(stdout.contains("## Entries"));
    assert!(stdout.contains("./a.js -> a.js"));
    assert!(stdout.contains("1 entries, 2 shipped files, 2 warnings, 0 errors"));
}

#[test]
fn test_version_command() {
    let output = cargo_bin()
        .arg("version")
        .output()
        .expect("Failed to run version command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("pkglint "), "{stdout}");
}
