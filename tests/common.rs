#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary with its config directory pointed at a throwaway folder,
/// so tests never read or write the real `~/.protip365`.
pub fn pt() -> Command {
    let mut cmd = cargo_bin_cmd!("protip365");
    cmd.env("PROTIP365_HOME", test_home("shared"));
    cmd.env_remove("PROTIP365_ACCESS_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Config directory for a test; created, empty of config files.
pub fn test_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("protip365_home_{}", name));
    fs::create_dir_all(&path).ok();
    fs::remove_file(path.join("protip365.conf")).ok();
    path.to_string_lossy().to_string()
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_protip365.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// The UUID printed after `id=` in a command's output.
pub fn extract_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let start = text.find("id=").expect("output carries an id") + 3;
    text[start..start + 36].to_string()
}

/// Initialize DB and record two worked shifts in March 2025:
/// 7th 16:00-00:00, sales 200, tips 50 and 14th 17:00-23:00, sales 300, tips 45.
pub fn init_db_with_data(db_path: &str) {
    pt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    pt().args([
        "--db", db_path, "entry", "quick", "2025-03-07", "--start", "16:00", "--end", "00:00",
        "--sales", "200", "--tips", "50",
    ])
    .assert()
    .success();

    pt().args([
        "--db", db_path, "entry", "quick", "2025-03-14", "--start", "17:00", "--end", "23:00",
        "--sales", "300", "--tips", "45", "--notes", "patio",
    ])
    .assert()
    .success();
}
