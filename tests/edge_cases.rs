//! Edge case and error handling tests for walkfind


use harness::{TestTree, run_walkfind, sorted_lines};
use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};

use assert_cmd::Command;
use predicates::prelude::*;

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
fn test_symlink_to_directory_not_descended() {
    let tree = TestTree::new();
    tree.add_file("realdir/file.rs", "fn file() {}");
    symlink("realdir", tree.path().join("linkdir")).expect("Failed to create dir symlink");

    let (stdout, _stderr, success) = run_walkfind(tree.path(), &[]);
    assert!(success, "walkfind should succeed with directory symlink");
    assert_eq!(
        sorted_lines(&stdout),
        vec!["./linkdir", "./realdir", "./realdir/file.rs"]
    );
}

#[test]
fn test_symlink_to_parent_no_infinite_loop() {
    let tree = TestTree::new();
    tree.add_file("subdir/file.rs", "fn file() {}");
    symlink("..", tree.path().join("subdir").join("parent"))
        .expect("Failed to create parent symlink");

    let (stdout, _stderr, success) = run_walkfind(tree.path(), &[".", ".*", "-l"]);
    assert!(success, "walkfind should not hang on parent symlink");
    assert_eq!(
        sorted_lines(&stdout),
        vec!["./subdir", "./subdir/file.rs", "./subdir/parent -> .."]
    );
}

#[test]
fn test_dangling_symlink_with_links_flag() {
    let tree = TestTree::new();
    symlink("/nonexistent", tree.path().join("broken")).expect("Failed to create broken symlink");

    let (stdout, stderr, success) = run_walkfind(tree.path(), &[".", ".*", "-l", "-n"]);
    assert!(success, "dangling links are not errors: {}", stderr);
    assert_eq!(stdout, "broken -> /nonexistent\n");
}

#[test]
fn test_self_referential_symlink() {
    let tree = TestTree::new();
    tree.add_file("file.rs", "fn file() {}");
    symlink("selfref", tree.path().join("selfref"))
        .expect("Failed to create self-referential symlink");

    let (stdout, _stderr, success) = run_walkfind(tree.path(), &[".", ".*", "-l", "-n", "-s"]);
    assert!(success, "walkfind should handle self-referential symlinks");
    assert_eq!(stdout, "file.rs\nselfref -> selfref\n");
}

#[test]
fn test_symlink_metadata_is_the_links_own() {
    let tree = TestTree::new();
    tree.add_sized_file("big.bin", 5 * 1024 * 1024);
    symlink("big.bin", tree.path().join("small-link")).expect("Failed to create symlink");

    let (stdout, _stderr, success) = run_walkfind(tree.path(), &[".", "link", "-e", "-n"]);
    assert!(success);
    assert!(
        !stdout.contains("MiB"),
        "link should report its own size, not the target's: {}",
        stdout
    );
    assert!(stdout.trim_end().ends_with(" B   small-link"), "{}", stdout);
}

// ============================================================================
// Permission Error Handling
// ============================================================================

#[test]
fn test_unreadable_directory_is_listed_and_skipped() {
    let tree = TestTree::new();
    tree.add_file("readable/file.rs", "fn readable() {}");
    tree.add_file("unreadable/hidden.rs", "fn hidden() {}");

    let unreadable = tree.path().join("unreadable");
    let mut perms = fs::metadata(&unreadable).unwrap().permissions();
    perms.set_mode(0o000);
    fs::set_permissions(&unreadable, perms).expect("Failed to set permissions");
    let privileged = fs::read_dir(&unreadable).is_ok();

    let (stdout, _stderr, success) = run_walkfind(tree.path(), &[]);

    // Restore permissions for cleanup
    let mut perms = fs::metadata(&unreadable).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&unreadable, perms).expect("Failed to restore permissions");

    assert!(success, "unreadable subdirectories are not fatal");
    assert!(stdout.contains("./readable/file.rs"), "{}", stdout);
    assert!(stdout.contains("./unreadable\n"), "{}", stdout);
    if !privileged {
        assert!(!stdout.contains("hidden.rs"), "{}", stdout);
    }
}

#[test]
fn test_unreadable_root_fails() {
    let tree = TestTree::new();
    tree.add_file("locked/file.rs", "");

    let locked = tree.path().join("locked");
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o000);
    fs::set_permissions(&locked, perms).expect("Failed to set permissions");
    let privileged = fs::read_dir(&locked).is_ok();

    let (stdout, stderr, success) = run_walkfind(tree.path(), &["locked"]);

    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&locked, perms).expect("Failed to restore permissions");

    if privileged {
        return;
    }
    assert!(!success, "unreadable root must fail");
    assert!(stdout.is_empty());
    assert!(stderr.contains("walkfind: cannot access 'locked'"), "{}", stderr);
}

// ============================================================================
// Invalid Input
// ============================================================================

#[test]
fn test_nonexistent_root_fails_without_output() {
    let tree = TestTree::new();

    Command::cargo_bin("walkfind")
        .unwrap()
        .current_dir(tree.path())
        .arg("no-such-dir")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no-such-dir"))
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn test_invalid_pattern_fails() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "");

    Command::cargo_bin("walkfind")
        .unwrap()
        .current_dir(tree.path())
        .args([".", "(unclosed"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to compile pattern"));
}

#[test]
fn test_empty_root_argument_fails() {
    Command::cargo_bin("walkfind")
        .unwrap()
        .arg("")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_zero_handle_budget_rejected() {
    Command::cargo_bin("walkfind")
        .unwrap()
        .args(["--max-open", "0"])
        .assert()
        .failure();
}

// ============================================================================
// Special Filenames and Roots
// ============================================================================

#[test]
fn test_filename_with_spaces() {
    let tree = TestTree::new();
    tree.add_file("file with spaces.rs", "");
    tree.add_file("dir with spaces/nested.rs", "");

    let (stdout, _stderr, success) = run_walkfind(tree.path(), &[".", "spaces", "-n"]);
    assert!(success, "walkfind should handle spaces in filenames");
    assert_eq!(
        sorted_lines(&stdout),
        vec!["dir with spaces", "file with spaces.rs"]
    );
}

#[test]
fn test_filename_with_unicode() {
    let tree = TestTree::new();
    tree.add_file("日本語.rs", "");
    tree.add_file("émoji_🎉.rs", "");
    tree.add_file("中文目录/文件.rs", "");

    let (stdout, _stderr, success) = run_walkfind(tree.path(), &[".", "🎉|文", "-n"]);
    assert!(success, "walkfind should handle unicode filenames");
    assert_eq!(
        sorted_lines(&stdout),
        vec!["émoji_🎉.rs", "中文目录", "文件.rs"]
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_filename_printed_as_raw_bytes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tree = TestTree::new();
    fs::write(tree.path().join(OsStr::from_bytes(b"caf\xe9.txt")), "x").unwrap();

    let output = Command::cargo_bin("walkfind")
        .unwrap()
        .current_dir(tree.path())
        .arg("-n")
        .output()
        .expect("Failed to run walkfind");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"caf\xe9.txt\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_dot_in_pattern_matches_non_utf8_byte() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tree = TestTree::new();
    fs::write(tree.path().join(OsStr::from_bytes(b"caf\xe9.txt")), "x").unwrap();
    tree.add_file("other.txt", "");

    let output = Command::cargo_bin("walkfind")
        .unwrap()
        .current_dir(tree.path())
        .args([".", r"^caf.\.txt$", "-n"])
        .output()
        .expect("Failed to run walkfind");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"caf\xe9.txt\n");
}

#[test]
fn test_file_as_root_is_reported() {
    let tree = TestTree::new();
    tree.add_file("single.txt", "x");

    let (stdout, _stderr, success) = run_walkfind(tree.path(), &["single.txt"]);
    assert!(success);
    assert_eq!(stdout, "single.txt\n");
}

#[test]
fn test_trailing_slash_root() {
    let tree = TestTree::new();
    tree.add_file("dir/a.txt", "");

    let (stdout, _stderr, success) = run_walkfind(tree.path(), &["dir/"]);
    assert!(success);
    assert_eq!(stdout, "dir/a.txt\n");
}
