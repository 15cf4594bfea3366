//! CLI Smoke Tests
//!
//! Integration tests for the sfpf CLI commands:
//! - `info`: Display the tiers of a package
//! - `measure`: Text extent at a height
//! - `render`: PNG and JSON output
//! - `pack`: Build a package from loose files
//!
//! Tests cover both success cases and failure cases (bad input, missing fonts).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use sfpf::{GlyphTable, PackageWriter};

/// Path to the sfpf binary built for this test run
fn sfpf_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sfpf"))
}

fn sfpf(args: &[&str]) -> Output {
    Command::new(sfpf_binary())
        .args(args)
        .output()
        .expect("Failed to execute sfpf")
}

const CHARS: &str = "A 0 6\nB 8 6\n? 16 4";

fn write_tier_files(dir: &Path, size: u32) -> (PathBuf, PathBuf) {
    let pixels = vec![255u8; 24 * size as usize * 4];
    let png = sfpf::encode_png(24, size, &pixels).unwrap();
    let atlas = dir.join(format!("atlas_{size}.png"));
    let chars = dir.join(format!("chars_{size}.txt"));
    fs::write(&atlas, png).unwrap();
    fs::write(&chars, CHARS).unwrap();
    (atlas, chars)
}

/// Package with tiers 8 and 16
fn write_font(dir: &Path) -> PathBuf {
    let mut writer = PackageWriter::new();
    for size in [8u32, 16] {
        let pixels = vec![255u8; 24 * size as usize * 4];
        let table = GlyphTable::parse(size, CHARS).unwrap();
        writer
            .add_rgba_tier(size, 24, size, &pixels, &table)
            .unwrap();
    }
    let path = dir.join("smoke.sfpf");
    writer.write_to(&path).unwrap();
    path
}

// ============================================================================
// Info Command Tests
// ============================================================================

#[test]
fn test_info_help() {
    let output = sfpf(&["info", "--help"]);
    assert!(output.status.success(), "info --help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Display the size tiers"));
}

#[test]
fn test_info_lists_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let font = write_font(dir.path());
    let output = sfpf(&["info", font.to_str().unwrap()]);

    assert!(output.status.success(), "info should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("8 px"), "stdout: {stdout}");
    assert!(stdout.contains("16 px"), "stdout: {stdout}");
    assert!(stdout.contains("3 glyphs"), "stdout: {stdout}");
}

#[test]
fn test_info_missing_font_fails() {
    let output = sfpf(&["info", "/nonexistent/font.sfpf"]);
    assert!(!output.status.success(), "missing font should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load font"), "stderr: {stderr}");
}

// ============================================================================
// Measure Command Tests
// ============================================================================

#[test]
fn test_measure_json_height_matches_request() {
    let dir = tempfile::tempdir().unwrap();
    let font = write_font(dir.path());
    let output = sfpf(&["measure", font.to_str().unwrap(), "AB", "--height", "16", "--json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["height"].as_f64(), Some(16.0));
    assert_eq!(value["atlas_size"].as_u64(), Some(16));
    assert!(value["width"].as_f64().unwrap() > 12.0);
}

#[test]
fn test_measure_empty_text_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    let font = write_font(dir.path());
    let output = sfpf(&["measure", font.to_str().unwrap(), "", "--json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["width"].as_f64(), Some(0.0));
    assert_eq!(value["height"].as_f64(), Some(0.0));
}

// ============================================================================
// Render Command Tests
// ============================================================================

#[test]
fn test_render_png() {
    let dir = tempfile::tempdir().unwrap();
    let font = write_font(dir.path());
    let out = dir.path().join("out.png");
    let output = sfpf(&[
        "render",
        font.to_str().unwrap(),
        "AB?",
        "--height",
        "16",
        "--outline-color",
        "000000",
        "-o",
        out.to_str().unwrap(),
        "--quiet",
    ]);

    assert!(
        output.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let bytes = fs::read(&out).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_render_json_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let font = write_font(dir.path());
    let output = sfpf(&[
        "render",
        font.to_str().unwrap(),
        "AZ",
        "--format",
        "json",
        "--height",
        "8",
        "--rotation",
        "-90",
        "--quiet",
    ]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let draws = value["draws"].as_array().unwrap();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[1]["ch"].as_str(), Some("?"));
    assert_eq!(draws[0]["atlas_size"].as_u64(), Some(8));
}

#[test]
fn test_render_png_without_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let font = write_font(dir.path());
    let output = sfpf(&["render", font.to_str().unwrap(), "A", "--quiet"]);
    assert!(!output.status.success());
}

#[test]
fn test_render_bad_color_fails() {
    let dir = tempfile::tempdir().unwrap();
    let font = write_font(dir.path());
    let out = dir.path().join("bad.png");
    let output = sfpf(&[
        "render",
        font.to_str().unwrap(),
        "A",
        "--color",
        "purple",
        "-o",
        out.to_str().unwrap(),
        "--quiet",
    ]);
    assert!(!output.status.success());
    assert!(!out.exists());
}

// ============================================================================
// Pack Command Tests
// ============================================================================

#[test]
fn test_pack_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let (atlas_12, chars_12) = write_tier_files(dir.path(), 12);
    let (atlas_20, chars_20) = write_tier_files(dir.path(), 20);
    let out = dir.path().join("packed.sfpf");

    let tier = |size: u32, atlas: &Path, chars: &Path| {
        format!("{}:{}:{}", size, atlas.display(), chars.display())
    };
    let output = sfpf(&[
        "pack",
        "-o",
        out.to_str().unwrap(),
        "--size",
        &tier(20, &atlas_20, &chars_20),
        "--size",
        &tier(12, &atlas_12, &chars_12),
    ]);
    assert!(
        output.status.success(),
        "pack failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let font = sfpf::ProofFont::load(&out).unwrap();
    assert_eq!(font.sizes(), vec![12, 20]);
    assert!(font.contains_char('B', 20.0));
}

#[test]
fn test_pack_malformed_glyph_table_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (atlas, chars) = write_tier_files(dir.path(), 12);
    fs::write(&chars, "A zero 6").unwrap();
    let out = dir.path().join("broken.sfpf");

    let spec = format!("12:{}:{}", atlas.display(), chars.display());
    let output = sfpf(&["pack", "-o", out.to_str().unwrap(), "--size", &spec]);
    assert!(!output.status.success());
    assert!(!out.exists());
}
