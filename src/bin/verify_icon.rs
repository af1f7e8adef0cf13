use anyhow::{bail, Context, Result};
use image::io::Reader as ImageReader;
use std::path::PathBuf;

const SIZE: u32 = 1024;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("build")
                .join("icon_1024.png")
        });

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .decode()
        .context("Failed to decode image")?;

    let rgba_img = img.to_rgba8();
    let width = img.width();
    let height = img.height();

    println!("Checking icon: {}", path.display());
    println!("Image dimensions: {}x{}", width, height);

    if (width, height) != (SIZE, SIZE) {
        bail!("Expected a {SIZE}x{SIZE} icon, got {width}x{height}");
    }

    let centre = rgba_img.get_pixel(width / 2, height / 2);
    println!(
        "\nCentre pixel (x={}, y={}):\n  RGBA: [{}, {}, {}, {}]",
        width / 2,
        height / 2,
        centre[0],
        centre[1],
        centre[2],
        centre[3]
    );
    if centre[3] != 255 {
        bail!("Centre pixel should be opaque");
    }

    for (x, y) in [(0, 0), (width - 1, 0), (0, height - 1), (width - 1, height - 1)] {
        if rgba_img.get_pixel(x, y)[3] != 0 {
            bail!("Corner pixel ({x}, {y}) should be transparent");
        }
    }

    let opaque = rgba_img.pixels().filter(|p| p[3] == 255).count();
    let clear = rgba_img.pixels().filter(|p| p[3] == 0).count();
    let total = (width * height) as usize;

    println!("\nAlpha coverage:");
    println!("  {} opaque, {} transparent, {} partial", opaque, clear, total - opaque - clear);

    if opaque == total || clear == total {
        bail!("Alpha channel is uniform; the rounded-rect clip is missing");
    }

    println!("✓ Icon looks right");
    Ok(())
}
