use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn specify(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("specify").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

// ---------------------------------------------------------------------------
// argument validation (no network involved)
// ---------------------------------------------------------------------------

#[test]
fn init_rejects_project_name_with_here() {
    let dir = TempDir::new().unwrap();
    specify(&dir)
        .args(["init", "myproj", "--here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "cannot specify both a project name and --here",
        ));
}

#[test]
fn init_requires_project_name_or_here() {
    let dir = TempDir::new().unwrap();
    specify(&dir)
        .args(["init", "--ai", "copilot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "must specify a project name or use --here",
        ));
}

#[test]
fn init_rejects_unknown_assistant() {
    let dir = TempDir::new().unwrap();
    specify(&dir)
        .args(["init", "myproj", "--ai", "cursor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown AI assistant 'cursor'"));
}

#[test]
fn init_rejects_existing_destination_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("myproj")).unwrap();
    specify(&dir)
        .args(["init", "myproj", "--ai", "copilot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ---------------------------------------------------------------------------
// top-level interface
// ---------------------------------------------------------------------------

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    specify(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_flag_prints_version() {
    let dir = TempDir::new().unwrap();
    specify(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
