//! End-to-end tests driving the `fmsh` binary over stdin.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn shell(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fmsh").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_banners_with_username() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .arg("--username=alice")
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the File Manager, alice!"))
        .stdout(predicate::str::contains(format!(
            "You are currently in {}",
            home.path().display()
        )))
        .stdout(predicate::str::contains(
            "Thank you for using File Manager, alice, goodbye!",
        ));
}

#[test]
fn test_default_username() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the File Manager, Anonymous!"));
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("ls\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("goodbye!"));
}

#[test]
fn test_errors_do_not_end_session() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("frobnicate\ncat missing.txt\nadd after.txt\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input"))
        .stdout(predicate::str::contains("Operation failed"));
    assert!(home.path().join("after.txt").exists());
}

#[test]
fn test_cat_prints_content_then_cwd() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("notes.txt"), "first\n\nlast").unwrap();
    shell(&home)
        .write_stdin("cat notes.txt\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "first\n\nlast\nYou are currently in {}",
            home.path().display()
        )));
}

#[test]
fn test_undecodable_line_does_not_end_session() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin(b"add \xff\xfe.txt\nadd after.txt\nexit\n".to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input"))
        .stdout(predicate::str::contains("goodbye!"));
    assert!(home.path().join("after.txt").exists());
}

#[test]
fn test_file_workflow() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("report.txt"), "numbers\n".repeat(500)).unwrap();
    std::fs::create_dir(home.path().join("out")).unwrap();
    std::fs::create_dir(home.path().join("out2")).unwrap();

    shell(&home)
        .write_stdin(
            "compress report.txt ./out\n\
             decompress ./out/report.br ./out2\n\
             cp report.txt out2\n\
             mv out2/report.txt out\n\
             ls\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("│ out2 ").and(predicate::str::contains("directory")))
        .stdout(predicate::str::contains("Operation failed").not());

    let original = std::fs::read(home.path().join("report.txt")).unwrap();
    assert_eq!(std::fs::read(home.path().join("out2/report")).unwrap(), original);
    assert_eq!(std::fs::read(home.path().join("out/report.txt")).unwrap(), original);
    assert!(!home.path().join("out2/report.txt").exists());
}

#[test]
fn test_hash_prints_hex_digest() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("a.txt"), "hello").unwrap();
    shell(&home)
        .write_stdin("hash a.txt\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^[0-9a-f]{64}$").unwrap());
}

#[test]
fn test_os_eol() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("os --EOL\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"\\n\""));
}
