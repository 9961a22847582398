//! tests/cli_smoke.rs
//!
//! Startup paths of the binary that never reach the network.

use assert_cmd::Command;

fn cmd(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dual_chain_scanner").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("ETH_RPC_URL")
        .env_remove("TRON_RPC_URL")
        .env_remove("TRON_PRO_API_KEY")
        .env_remove("CONFIG_PATH")
        .arg("--config")
        .arg(dir.path().join("absent.toml"));
    cmd
}

#[test]
fn help_lists_flags() {
    let dir = tempfile::tempdir().unwrap();
    let output = cmd(&dir).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--eth-rpc"));
    assert!(stdout.contains("--tron-rpc"));
    assert!(stdout.contains("--delay-ms"));
}

#[test]
fn bad_prefix_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir).args(["--prefix", "abc"]).assert().failure();
}

#[test]
fn bad_config_file_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[retry]\ntron_max_attempts = 0\n").unwrap();
    Command::cargo_bin("dual_chain_scanner")
        .unwrap()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn invalid_rpc_url_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir).args(["--eth-rpc", "not a url"]).assert().failure();
}
