//! End-to-end runs of the mem-tools binary against a scratch "device" file.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::{tempdir, NamedTempFile};

const DEVICE_SIZE: usize = 0x20000;

fn scratch_device() -> NamedTempFile {
    let mut tmpfile = NamedTempFile::new().unwrap();
    tmpfile.write_all(&vec![0u8; DEVICE_SIZE]).unwrap();
    tmpfile.flush().unwrap();
    tmpfile
}

fn mem_tools(device: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mem-tools"))
        .arg("--device")
        .arg(device)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_write_then_read_scenario() {
    let dev = scratch_device();

    let out = mem_tools(dev.path(), &["write", "1000", "deadbeef"]);
    assert_eq!(out.status.code(), Some(1));

    let out = mem_tools(dev.path(), &["read", "1000", "4"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(out.stdout, vec![0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn test_mem2file_then_compare_scenario() {
    let dev = scratch_device();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.bin");
    let out_str = out_path.to_str().unwrap();

    mem_tools(dev.path(), &["write", "2000", "00112233445566778899aabbccddeeff"]);

    let out = mem_tools(dev.path(), &["mem2file", "2000", "10", out_str]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(std::fs::read(&out_path).unwrap().len(), 0x10);

    let out = mem_tools(dev.path(), &["compare", "2000", out_str]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("are the same"));

    let mut bytes = std::fs::read(&out_path).unwrap();
    bytes[3] ^= 0x01;
    std::fs::write(&out_path, bytes).unwrap();

    let out = mem_tools(dev.path(), &["compare", "2000", out_str]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("are different"));
}

#[test]
fn test_file2mem_round_trip() {
    let dev = scratch_device();
    let dir = tempdir().unwrap();
    let src = dir.path().join("in.bin");
    std::fs::write(&src, [0x7F, 0x00, 0x45, 0x4C, 0x46]).unwrap();

    let out = mem_tools(dev.path(), &["file2mem", "0x3ffe", src.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));

    let out = mem_tools(dev.path(), &["read", "0x3ffe", "5"]);
    assert_eq!(out.stdout, vec![0x7F, 0x00, 0x45, 0x4C, 0x46]);
}

#[test]
fn test_write_from_stdin() {
    let dev = scratch_device();
    let mut child = Command::new(env!("CARGO_BIN_EXE_mem-tools"))
        .arg("--device")
        .arg(dev.path())
        .args(["write", "4010", "-"])
        .stdin(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"stdin").unwrap();
    assert_eq!(child.wait().unwrap().code(), Some(1));

    let out = mem_tools(dev.path(), &["read", "4010", "5"]);
    assert_eq!(out.stdout, b"stdin");
}

#[test]
fn test_zero_size_read_fails() {
    let dev = scratch_device();
    let out = mem_tools(dev.path(), &["read", "1000", "0"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_missing_device_fails() {
    let out = mem_tools(Path::new("/nonexistent/mem"), &["read", "1000", "4"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("/nonexistent/mem"));
}

#[test]
fn test_help_version_and_bad_commands() {
    let dev = scratch_device();

    let out = mem_tools(dev.path(), &["help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("mem2file <address> <size> <file>"));

    let out = mem_tools(dev.path(), &["version"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("mem-tools version "));

    let out = mem_tools(dev.path(), &["frobnicate"]);
    assert_eq!(out.status.code(), Some(1));

    let out = mem_tools(dev.path(), &["read", "1000"]);
    assert_eq!(out.status.code(), Some(0));

    let out = mem_tools(dev.path(), &["write", "1000", "abc"]);
    assert_eq!(out.status.code(), Some(0));
}
