use crate::mask::icon_mask;
use crate::wave::{render_glass_wave, waves, Wave};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops, ColorType, GrayImage, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Width and height of the icon
pub const SIZE: u32 = 1024;

/// Where the icon lands when no output path is given
pub fn default_output_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("build")
        .join("icon_1024.png")
}

pub fn generate_icon(out_path: &Path) -> Result<()> {
    let icon = render_icon()?;

    // Ensure the output directory exists
    if let Some(out_dir) = out_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        create_dir_all(out_dir).context("Can't create output directory")?;
    }

    let mut out_file = BufWriter::new(
        File::create(out_path)
            .with_context(|| format!("Failed to create {}", out_path.display()))?,
    );
    write_png(icon.as_raw(), &mut out_file, SIZE)?;
    out_file.flush()?;

    println!("Saved {}", out_path.display());
    Ok(())
}

/// Render the full icon: background, waves back to front, rounded-rect clip
pub fn render_icon() -> Result<RgbaImage> {
    let content = render_content(SIZE, &waves()?);
    let mask = icon_mask(SIZE);

    Ok(clip(content, &mask))
}

/// Background with every wave composited onto it in list order
fn render_content(size: u32, waves: &[Wave]) -> RgbaImage {
    let mut content = paint_background(size);
    for wave in waves {
        render_glass_wave(&mut content, wave);
    }
    content
}

/// Vertical gradient from blue-black at the top to a brighter blue at the bottom
pub fn paint_background(size: u32) -> RgbaImage {
    let mut img = RgbaImage::new(size, size);

    for (_, y, pixel) in img.enumerate_pixels_mut() {
        let t = y as f32 / size as f32;
        let r = (5.0 + t * 8.0) as u8;
        let g = (5.0 + t * 8.0) as u8;
        let b = (12.0 + t * 18.0) as u8;
        *pixel = Rgba([r, g, b, 255]);
    }

    img
}

/// Replace the alpha channel of `content` with `mask`
pub fn apply_mask(content: &mut RgbaImage, mask: &GrayImage) {
    for (x, y, pixel) in content.enumerate_pixels_mut() {
        pixel[3] = mask.get_pixel(x, y)[0];
    }
}

/// Clip `content` to `mask` and composite it onto a transparent canvas
fn clip(mut content: RgbaImage, mask: &GrayImage) -> RgbaImage {
    apply_mask(&mut content, mask);

    let mut icon = RgbaImage::new(content.width(), content.height());
    imageops::overlay(&mut icon, &content, 0, 0);
    icon
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(image_data, size, size, ColorType::Rgba8)
        .context("Failed to encode PNG")?;
    Ok(())
}
