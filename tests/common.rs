#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn tc() -> Command {
    cargo_bin_cmd!("timecard")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timecard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    tc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    tc().args([
        "--db",
        db_path,
        "add",
        "-d",
        "2026-08-03",
        "09:00",
        "10:30",
        "1",
        "100",
        "morning",
        "block",
    ])
    .assert()
    .success();

    tc().args([
        "--db",
        db_path,
        "add",
        "-d",
        "2026-08-03",
        "13:00",
        "17:00",
        "2",
        "200",
        "afternoon",
    ])
    .assert()
    .success();
}
