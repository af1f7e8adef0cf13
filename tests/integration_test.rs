use image::GenericImageView;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SIZE: u32 = 1024;

/// Runs `glass-icon -o <tmp>/build/icon_1024.png` and checks the PNG it leaves behind:
/// right size, clipped alpha, and the one-line success message.
#[test]
fn test_icon_generation_writes_clipped_png() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("build").join("icon_1024.png");

    let output = run_glass_icon(&output_path);
    assert_success(&output, "glass-icon");

    // Output directory was created on demand
    assert!(
        output_path.exists(),
        "Icon should exist at: {}",
        output_path.display()
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("Saved {}", output_path.display()),
        "stdout should be a single Saved line"
    );

    let icon = image::open(&output_path).expect("Failed to load generated icon");
    assert_eq!(icon.dimensions(), (SIZE, SIZE));

    let rgba = icon.to_rgba8();
    let opaque = rgba.pixels().filter(|p| p[3] == 255).count();
    let clear = rgba.pixels().filter(|p| p[3] == 0).count();
    assert!(opaque > 0, "Icon should have opaque pixels");
    assert!(clear > 0, "Icon should have transparent pixels");

    assert_eq!(rgba.get_pixel(SIZE / 2, SIZE / 2)[3], 255);
    for (x, y) in [(0, 0), (SIZE - 1, 0), (0, SIZE - 1), (SIZE - 1, SIZE - 1)] {
        assert_eq!(rgba.get_pixel(x, y)[3], 0, "corner ({x}, {y})");
    }

    println!("✓ Integration test passed: icon rendered and clipped");
}

/// Two runs with the same constants must produce the same bytes
#[test]
fn test_icon_generation_is_deterministic() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = temp_dir.path().join("first.png");
    let second = temp_dir.path().join("second.png");

    assert_success(&run_glass_icon(&first), "first run");
    assert_success(&run_glass_icon(&second), "second run");

    let first_bytes = std::fs::read(&first).expect("Failed to read first icon");
    let second_bytes = std::fs::read(&second).expect("Failed to read second icon");
    assert!(!first_bytes.is_empty());
    assert!(first_bytes == second_bytes, "Icon bytes differ between runs");
}

/// The verifier binary accepts what the generator writes
#[test]
fn test_verify_icon_accepts_generated_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("icon_1024.png");

    assert_success(&run_glass_icon(&output_path), "glass-icon");

    let output = Command::new(env!("CARGO_BIN_EXE_verify_icon"))
        .arg(&output_path)
        .output()
        .expect("Failed to run verify_icon");
    assert_success(&output, "verify_icon");
}

/// The verifier rejects an unclipped image
#[test]
fn test_verify_icon_rejects_opaque_image() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("opaque.png");
    image::RgbaImage::from_pixel(SIZE, SIZE, image::Rgba([5, 5, 12, 255]))
        .save(&path)
        .expect("Failed to save opaque image");

    let output = Command::new(env!("CARGO_BIN_EXE_verify_icon"))
        .arg(&path)
        .output()
        .expect("Failed to run verify_icon");
    assert!(!output.status.success(), "verify_icon should fail on an opaque image");
}

/// An unwritable destination fails loudly with a non-zero exit
#[test]
fn test_unwritable_output_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"file").expect("Failed to create blocker file");

    let output = run_glass_icon(&blocker.join("icon_1024.png"));

    assert!(!output.status.success(), "glass-icon should fail");
    assert!(!String::from_utf8_lossy(&output.stderr).is_empty());
}

fn run_glass_icon(output_path: &Path) -> Output {
    Command::new(glass_icon_binary_path())
        .arg("-o")
        .arg(output_path)
        .output()
        .expect("Failed to run glass-icon command")
}

fn assert_success(output: &Output, what: &str) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("{what} failed");
    }
}

fn glass_icon_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_glass-icon"))
}
