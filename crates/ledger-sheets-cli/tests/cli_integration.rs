//! End-to-end tests for the `ledger` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn ledger(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ledger"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run ledger")
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path_str(&path)
}

fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

#[test]
fn test_demo_script() {
    let dir = TempDir::new().unwrap();
    let script = write(
        &dir,
        "session.txt",
        "# quarterly report\n\
         cell B4\n\
         set C2 =B2*0.1\n\
         style A2:A3 italic color=blue\n\
         history\n",
    );

    let output = ledger(&["--demo", &script]);
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("B4\n  value: 7700\n  formula: =B2-B3\n"), "{}", stdout);
    assert!(stdout.contains("#1 cell_edit [sheet-1] C2: \"\" -> \"B2*0.1\""), "{}", stdout);
    assert!(stdout.contains("#2 style_applied [sheet-1] A2:A3 (2 cells)"), "{}", stdout);
}

#[test]
fn test_failed_command_sets_exit_status() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "bad.txt", "select A1\nbogus\nset A1 ok\ncell A1\n");

    let output = ledger(&[&script]);
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stdout.contains("  value: ok"), "{}", stdout);
    assert!(stderr.contains("error: line 2: Unknown command: bogus"), "{}", stderr);
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "ledger.toml",
        "workbook_name = \"Small\"\ndefault_rows = 5\ndefault_cols = 3\n",
    );
    let script = write(&dir, "s.txt", "select C5\nselect D1\n");

    let output = ledger(&["--config", &config, &script]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error: line 2: Invalid cell range"), "{}", stderr);
    assert!(!stderr.contains("error: line 1"), "{}", stderr);
}

#[test]
fn test_bad_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "ledger.toml", "zoom = 12.0\n");
    let script = write(&dir, "s.txt", "help\n");

    let output = ledger(&["--config", &config, &script]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to load config"), "{}", stderr);
}

#[cfg(unix)]
#[test]
fn test_assistant_command() {
    let dir = TempDir::new().unwrap();
    let script = write(&dir, "ask.txt", "ask summarise the quarter\n");

    // `cat` echoes the prompt back as the answer
    let output = ledger(&["--demo", "--assistant-cmd", "cat", &script]);
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("You are a spreadsheet expert assistant."), "{}", stdout);
    assert!(stdout.contains("User request: summarise the quarter"), "{}", stdout);
}

#[test]
fn test_stdin_script() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_ledger"))
        .arg("--demo")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"show A1:A1\nquit\nshow\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "\tA\n1\tQuarterly Report\n"
    );
}
