//! End-to-end tests for the harness binaries
//!
//! Each binary is pointed at a stub preprocessor through `ECPG_BINARY` and its
//! stdout, stderr and exit code are compared byte for byte.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Mutex;
use tempfile::TempDir;

static BIN_TEST_LOCK: Mutex<()> = Mutex::new(());

fn stub(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("ecpg");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn run_bin(bin: &str, ecpg: &Path) -> Output {
    Command::new(bin)
        .env("ECPG_BINARY", ecpg)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn assert_output(output: &Output, code: i32, stdout: &str, stderr: &str) {
    assert_eq!(String::from_utf8_lossy(&output.stdout), stdout);
    assert_eq!(String::from_utf8_lossy(&output.stderr), stderr);
    assert_eq!(output.status.code(), Some(code));
}

#[test]
fn cmd_out_relays_normal_exit() {
    let _lock = BIN_TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let ecpg = stub(&dir, "printf '%s|' \"$@\"\nprintf 'ok\\n'\nexit 0");

    let output = run_bin(env!("CARGO_BIN_EXE_cmd_out"), &ecpg);

    assert_output(
        &output,
        0,
        "Child process exited with code 0\npreproc/notice.pgc|ok\n",
        "",
    );
}

#[test]
fn cmd_out_informix_relays_stderr_and_child_code() {
    let _lock = BIN_TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let ecpg = stub(&dir, "printf '%s|' \"$@\"\nprintf 'warn\\n' >&2\nexit 3");

    let output = run_bin(env!("CARGO_BIN_EXE_cmd_out_informix"), &ecpg);

    assert_output(
        &output,
        0,
        "Child process exited with code 3\n-C|INFORMIX|preproc/notice_informix.pgc|",
        "warn\n",
    );
}

#[test]
fn check_cmd_notice_informix_uses_build_input() {
    let _lock = BIN_TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let ecpg = stub(&dir, "printf '%s|' \"$@\"");
    let input = option_env!("PGC_FILE_NAME").unwrap_or("preproc/notice_informix.pgc");

    let output = run_bin(env!("CARGO_BIN_EXE_check_cmd_notice_informix"), &ecpg);

    assert_output(
        &output,
        0,
        &format!("Child process exited with code 0\n-C|INFORMIX|{}|", input),
        "",
    );
}

#[test]
fn cmd_out_reports_signal_only() {
    let _lock = BIN_TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let ecpg = stub(&dir, "printf 'partial\\n'\nprintf 'partial\\n' >&2\nkill -9 $$");

    let output = run_bin(env!("CARGO_BIN_EXE_cmd_out"), &ecpg);

    assert_output(&output, 2, "", "Child process was terminated by signal 9\n");
}

#[test]
fn cmd_out_informix_reports_signal_only() {
    let _lock = BIN_TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let ecpg = stub(&dir, "kill -TERM $$");

    let output = run_bin(env!("CARGO_BIN_EXE_cmd_out_informix"), &ecpg);

    assert_output(&output, 2, "", "Child process was terminated by signal 15\n");
}

#[test]
fn missing_preprocessor_is_fatal() {
    let output = run_bin(
        env!("CARGO_BIN_EXE_cmd_out"),
        Path::new("/nonexistent/preproc/ecpg"),
    );

    assert_output(
        &output,
        2,
        "",
        "Failed to execute binary: /nonexistent/preproc/ecpg\n",
    );
}
