use std::error::Error;
use std::fs;
use std::path::PathBuf;

use predicates::prelude::*;
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    input: PathBuf,
    packed: PathBuf,
    unpacked: PathBuf,
}

fn workspace_with_input(data: &[u8]) -> Result<Workspace, Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("input.bin");
    let packed = dir.path().join("input.parz");
    let unpacked = dir.path().join("restored.bin");
    fs::write(&input, data)?;
    Ok(Workspace {
        _dir: dir,
        input,
        packed,
        unpacked,
    })
}

fn pack_unpack_round_trip(codec: &str, level: &str, data: &[u8]) -> Result<(), Box<dyn Error>> {
    let ws = workspace_with_input(data)?;

    assert_cmd::Command::cargo_bin("parz")?
        .args([
            "pack",
            ws.input.to_str().unwrap(),
            "-o",
            ws.packed.to_str().unwrap(),
            "--codec",
            codec,
            "--level",
            level,
            "--threads",
            "2",
        ])
        .assert()
        .success();

    assert_cmd::Command::cargo_bin("parz")?
        .args([
            "unpack",
            ws.packed.to_str().unwrap(),
            "-o",
            ws.unpacked.to_str().unwrap(),
            "--codec",
            codec,
            "--threads",
            "2",
        ])
        .assert()
        .success();

    assert_eq!(fs::read(&ws.unpacked)?, data);
    Ok(())
}

#[test]
fn pack_unpack_zstd() -> Result<(), Box<dyn Error>> {
    let data = b"the parz container round trips through the binary ".repeat(10_000);
    pack_unpack_round_trip("zstd", "fast", &data)
}

#[test]
fn pack_unpack_gzip_numeric_level() -> Result<(), Box<dyn Error>> {
    let data = b"numeric levels reach the codec ".repeat(5_000);
    pack_unpack_round_trip("gzip", "9", &data)
}

#[test]
fn pack_unpack_empty_file() -> Result<(), Box<dyn Error>> {
    pack_unpack_round_trip("deflate", "default", b"")
}

#[test]
fn unknown_codec_fails_with_message() -> Result<(), Box<dyn Error>> {
    let ws = workspace_with_input(b"data")?;
    assert_cmd::Command::cargo_bin("parz")?
        .args([
            "pack",
            ws.input.to_str().unwrap(),
            "-o",
            ws.packed.to_str().unwrap(),
            "--codec",
            "brotli",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown codec"));
    Ok(())
}

#[test]
fn unpack_with_wrong_codec_fails() -> Result<(), Box<dyn Error>> {
    let ws = workspace_with_input(&b"packed one way, unpacked another ".repeat(2_000))?;

    assert_cmd::Command::cargo_bin("parz")?
        .args([
            "pack",
            ws.input.to_str().unwrap(),
            "-o",
            ws.packed.to_str().unwrap(),
            "--codec",
            "zstd",
        ])
        .assert()
        .success();

    assert_cmd::Command::cargo_bin("parz")?
        .args([
            "unpack",
            ws.packed.to_str().unwrap(),
            "-o",
            ws.unpacked.to_str().unwrap(),
            "--codec",
            "zlib",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt payload"));
    Ok(())
}

#[test]
fn missing_input_file_fails_cleanly() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    assert_cmd::Command::cargo_bin("parz")?
        .args([
            "pack",
            dir.path().join("does-not-exist").to_str().unwrap(),
            "-o",
            dir.path().join("out.parz").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
    Ok(())
}
