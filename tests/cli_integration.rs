//! Integration tests for the BitVault CLI.
//!
//! These tests drive the binary end-to-end using `assert_cmd`. The master
//! key comes from `BITVAULT_MASTER_KEY` and credential passwords are piped
//! on stdin, so nothing waits on an interactive prompt.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "correct-horse-battery";

/// Helper: get a Command pointing at the bitvault binary.
fn bitvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("bitvault").expect("binary should exist")
}

/// Helper: a command running inside `dir` with the master key set.
fn in_vault(dir: &TempDir) -> Command {
    let mut cmd = bitvault();
    cmd.current_dir(dir.path())
        .env("BITVAULT_MASTER_KEY", MASTER)
        .env_remove("BITVAULT_NEW_MASTER_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn init_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    in_vault(&dir).arg("init").assert().success();
    dir
}

/// Add an entry and return its id (last word of the success line).
fn add_entry(dir: &TempDir, title: &str, username: &str, password: &str) -> String {
    let output = in_vault(dir)
        .args(["add", title, "--username", username])
        .write_stdin(format!("{password}\n"))
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find(|l| l.contains("with id"))
        .and_then(|l| l.split_whitespace().last())
        .expect("id in output")
        .to_string()
}

// ---------------------------------------------------------------------------
// Help and argument handling
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    bitvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("change-key"));
}

#[test]
fn version_flag_shows_version() {
    bitvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bitvault"));
}

#[test]
fn no_args_shows_help() {
    bitvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_bash_outputs_script() {
    bitvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bitvault"));
}

#[test]
fn completions_unknown_shell_fails() {
    bitvault()
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'csh'"));
}

// ---------------------------------------------------------------------------
// Vault-free utilities
// ---------------------------------------------------------------------------

#[test]
fn generate_respects_length() {
    let output = bitvault()
        .args(["generate", "--length", "24"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let password = stdout.lines().next().unwrap();
    assert_eq!(password.chars().count(), 24);
}

#[test]
fn generate_digits_only() {
    let output = bitvault()
        .args([
            "generate",
            "--length",
            "16",
            "--no-uppercase",
            "--no-lowercase",
            "--no-special",
        ])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let password = stdout.lines().next().unwrap();
    assert!(password.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn strength_rates_argument() {
    bitvault()
        .args(["strength", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Very weak"))
        .stdout(predicate::str::contains("Password is too short."));
}

// ---------------------------------------------------------------------------
// Init and authentication
// ---------------------------------------------------------------------------

#[test]
fn init_creates_data_dir_and_key_record() {
    let dir = init_vault();
    dir.child(".bitvault")
        .child("bitvault_master_key_hash")
        .assert(predicate::path::exists());
}

#[test]
fn init_twice_fails() {
    let dir = init_vault();
    in_vault(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_master_key() {
    let dir = TempDir::new().unwrap();
    bitvault()
        .current_dir(dir.path())
        .env("BITVAULT_MASTER_KEY", "short")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn list_before_init_fails() {
    let dir = TempDir::new().unwrap();
    in_vault(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bitvault init"));
}

#[test]
fn wrong_master_key_is_rejected() {
    let dir = init_vault();
    bitvault()
        .current_dir(dir.path())
        .env("BITVAULT_MASTER_KEY", "not-the-master-key")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect master key"));
}

#[test]
fn data_dir_flag_overrides_default() {
    let dir = TempDir::new().unwrap();
    in_vault(&dir)
        .args(["init", "--data-dir", "secrets"])
        .assert()
        .success();
    dir.child("secrets").assert(predicate::path::is_dir());
    dir.child(".bitvault").assert(predicate::path::missing());
}

#[test]
fn config_file_sets_data_dir() {
    let dir = TempDir::new().unwrap();
    dir.child(".bitvault.toml")
        .write_str("data_dir = \"from-config\"\n")
        .unwrap();
    in_vault(&dir).arg("init").assert().success();
    dir.child("from-config").assert(predicate::path::is_dir());
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[test]
fn add_list_show_roundtrip() {
    let dir = init_vault();
    let id = add_entry(&dir, "GitHub", "octocat", "s3cret-pass");

    in_vault(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("octocat"))
        .stdout(predicate::str::contains("s3cret-pass").not());

    in_vault(&dir)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("octocat"))
        .stdout(predicate::str::contains("s3cret-pass").not());

    in_vault(&dir)
        .args(["show", &id, "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cret-pass"));
}

#[test]
fn add_with_generated_password() {
    let dir = init_vault();
    in_vault(&dir)
        .args(["add", "Bank", "-u", "alice", "--generate", "--length", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Bank'"));
}

#[test]
fn list_filters_by_search_and_category() {
    let dir = init_vault();
    in_vault(&dir)
        .args(["add", "GitHub", "-u", "octo", "--category", "Work", "--generate"])
        .assert()
        .success();
    in_vault(&dir)
        .args(["add", "Bank", "-u", "alice", "--generate"])
        .assert()
        .success();

    in_vault(&dir)
        .args(["list", "--search", "git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("Bank").not());

    in_vault(&dir)
        .args(["list", "--category", "Uncategorized"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank"))
        .stdout(predicate::str::contains("GitHub").not());

    in_vault(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work"))
        .stdout(predicate::str::contains("Uncategorized"));
}

#[test]
fn edit_changes_fields() {
    let dir = init_vault();
    let id = add_entry(&dir, "Mail", "bob", "old-pass");

    in_vault(&dir)
        .args(["edit", &id, "--username", "robert", "--password-prompt"])
        .write_stdin("new-pass\n")
        .assert()
        .success();

    in_vault(&dir)
        .args(["show", &id, "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("robert"))
        .stdout(predicate::str::contains("new-pass"));
}

#[test]
fn edit_unknown_id_fails() {
    let dir = init_vault();
    in_vault(&dir)
        .args(["edit", "nope", "--title", "X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn delete_removes_entry() {
    let dir = init_vault();
    let first = add_entry(&dir, "First", "a", "pass-one");
    add_entry(&dir, "Second", "b", "pass-two");

    in_vault(&dir)
        .args(["delete", &first, "--force"])
        .assert()
        .success();

    in_vault(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Second"))
        .stdout(predicate::str::contains("First").not());
}

#[test]
fn delete_unknown_id_fails() {
    let dir = init_vault();
    in_vault(&dir)
        .args(["delete", "nope", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

#[test]
fn export_to_stdout_is_json() {
    let dir = init_vault();
    add_entry(&dir, "Bank", "alice", "p1-secret");

    let output = in_vault(&dir).arg("export").output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["title"], "Bank");
    assert_eq!(parsed[0]["password"], "p1-secret");
}

#[test]
fn export_to_file_then_import_elsewhere() {
    let source = init_vault();
    add_entry(&source, "Bank", "alice", "p1-secret");
    in_vault(&source)
        .args(["export", "--output", "backup.json"])
        .assert()
        .success();
    source.child("backup.json").assert(predicate::path::exists());

    let target = init_vault();
    let backup = source.path().join("backup.json");
    in_vault(&target)
        .args(["import", backup.to_str().unwrap(), "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 entries"));

    in_vault(&target)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank"));
}

#[test]
fn export_default_file_name() {
    let dir = init_vault();
    in_vault(&dir).args(["export", "--output"]).assert().success();

    let name = bitvault::vault::backup_file_name(chrono::Local::now().date_naive());
    dir.child(name).assert(predicate::path::exists());
}

#[test]
fn import_malformed_file_fails_and_keeps_vault() {
    let dir = init_vault();
    add_entry(&dir, "Keep", "me", "keep-pass");
    dir.child("bad.json").write_str("{ not json").unwrap();

    in_vault(&dir)
        .args(["import", "bad.json", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid BitVault backup"));

    in_vault(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep"));
}

#[test]
fn import_missing_file_fails() {
    let dir = init_vault();
    in_vault(&dir)
        .args(["import", "nope.json", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ---------------------------------------------------------------------------
// Master-key change
// ---------------------------------------------------------------------------

#[test]
fn change_key_reencrypts_vault() {
    let dir = init_vault();
    add_entry(&dir, "Bank", "alice", "p1-secret");

    in_vault(&dir)
        .arg("change-key")
        .env("BITVAULT_NEW_MASTER_KEY", "a-brand-new-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries re-encrypted"));

    // Old key no longer works.
    in_vault(&dir).arg("list").assert().failure();

    bitvault()
        .current_dir(dir.path())
        .env("BITVAULT_MASTER_KEY", "a-brand-new-key")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank"));
}

// ---------------------------------------------------------------------------
// Audit log
// ---------------------------------------------------------------------------

#[cfg(feature = "audit-log")]
#[test]
fn audit_records_operations() {
    let dir = init_vault();
    add_entry(&dir, "Bank", "alice", "p1-secret");

    // A failed login is recorded too.
    bitvault()
        .current_dir(dir.path())
        .env("BITVAULT_MASTER_KEY", "wrong-key-here")
        .arg("list")
        .assert()
        .failure();

    in_vault(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("auth-failed"))
        .stdout(predicate::str::contains("alice").not());
}
