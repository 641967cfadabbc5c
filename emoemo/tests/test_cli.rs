// Allow deprecated APIs (assert_cmd::cargo_bin is deprecated but still works)
#![allow(deprecated)]

use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use rstest::rstest;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn emoemo() -> Command {
    Command::cargo_bin("emoemo").unwrap()
}

fn png_size(path: &Path) -> (u32, u32) {
    let decoder = png::Decoder::new(fs::File::open(path).unwrap());
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    (info.width, info.height)
}

#[test]
fn test_presets_lists_fonts_and_colors() {
    emoemo()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("gothic"))
        .stdout(predicate::str::contains("'Noto Serif JP'"))
        .stdout(predicate::str::contains("#2563EB"));
}

#[test]
fn test_presets_json() {
    let output = emoemo().args(["presets", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["fonts"].as_array().unwrap().len(), 6);
    assert_eq!(value["colors"].as_array().unwrap().len(), 10);
    assert_eq!(value["colors"][0]["color"], "#000000");
}

#[test]
fn test_render_blank_to_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("blank.png");
    emoemo()
        .args(["render", "--text", "  ", "--no-system-fonts", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("blank.png"));
    assert_eq!(png_size(&output), (128, 128));
}

#[test]
fn test_render_names_file_after_text() {
    let dir = tempdir().unwrap();
    emoemo()
        .args(["render", "--text", "にこ\\nにこ", "--font", "gothic", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success();
    assert!(dir.path().join("にこ_にこ.png").exists());
}

#[test]
fn test_render_custom_size() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("wide.png");
    emoemo()
        .args(["render", "--text", "OK", "--width", "64", "--height", "32"])
        .args(["--mode", "fit-both", "--color", "red", "--background", "#000"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();
    assert_eq!(png_size(&output), (64, 32));
}

#[test]
fn test_preview_scales_backing_raster() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("preview.png");
    emoemo()
        .args(["preview", "--text", "", "--pixel-ratio", "2", "--output"])
        .arg(&output)
        .assert()
        .success();
    assert_eq!(png_size(&output), (256, 256));
}

#[test]
fn test_variants_writes_one_file_per_font_preset() {
    let dir = tempdir().unwrap();
    emoemo()
        .args(["variants", "--text", "あ", "--out-dir"])
        .arg(dir.path())
        .assert()
        .success();
    for id in ["gothic", "rounded", "mincho", "modern", "pop", "handwritten"] {
        let path = dir.path().join(format!("{id}.png"));
        assert!(path.exists(), "missing {}", path.display());
        assert_eq!(png_size(&path), (128, 128));
    }
}

#[test]
fn test_render_from_settings_and_config_files() {
    let dir = tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    let config = dir.path().join("config.json");
    fs::write(
        &settings,
        r##"{"text": "", "background_color": "#EAB308"}"##,
    )
    .unwrap();
    fs::write(&config, r#"{"canvas_width": 48, "canvas_height": 48}"#).unwrap();

    emoemo()
        .args(["render", "--out-dir"])
        .arg(dir.path())
        .arg("--settings")
        .arg(&settings)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let output = dir.path().join("emoji.png");
    assert_eq!(png_size(&output), (48, 48));
}

#[rstest]
#[case(&["--color", "chartreuse"], "color")]
#[case(&["--background", "#12"], "color")]
#[case(&["--mode", "shrink"], "shrink")]
#[case(&["--width", "0"], "canvas size")]
fn test_render_rejects_bad_input(#[case] extra: &[&str], #[case] message: &str) {
    let dir = tempdir().unwrap();
    emoemo()
        .args(["render", "--text", "A", "--no-system-fonts"])
        .args(extra)
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));
}

#[test]
fn test_missing_settings_file() {
    emoemo()
        .args(["render", "--settings", "does-not-exist.json", "--output", "x.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read settings file"));
}

#[test]
fn test_output_and_out_dir_conflict() {
    emoemo()
        .args(["render", "--output", "a.png", "--out-dir", "."])
        .assert()
        .failure();
}
