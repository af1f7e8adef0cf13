//! Glass wave layers
//!
//! Each wave is a translucent band: a body that fades out below a sine-shaped
//! crest, a one pixel bright edge along the crest, and a blurred copy of that
//! edge composited underneath it as a bloom halo.

use anyhow::{Context, Result};
use image::{imageops, Rgba, RgbaImage};
use serde::Deserialize;

/// Wave table, back to front. Later entries are drawn over earlier ones.
const WAVES_JSON: &str = r#"
[
  { "base_y": 300, "amplitude": 25, "freq": 0.006,  "phase": 0.8,
    "edge": [100, 190, 235, 140], "body": [25, 60, 100],  "depth": 200, "blur": 10 },
  { "base_y": 400, "amplitude": 45, "freq": 0.0085, "phase": 3.6,
    "edge": [110, 200, 240, 170], "body": [28, 70, 115],  "depth": 190, "blur": 9 },
  { "base_y": 510, "amplitude": 50, "freq": 0.007,  "phase": 1.2,
    "edge": [130, 215, 250, 200], "body": [30, 80, 130],  "depth": 180, "blur": 8 },
  { "base_y": 620, "amplitude": 42, "freq": 0.0095, "phase": 5.0,
    "edge": [150, 225, 255, 225], "body": [35, 90, 140],  "depth": 165, "blur": 7 },
  { "base_y": 740, "amplitude": 35, "freq": 0.008,  "phase": 2.5,
    "edge": [175, 240, 255, 250], "body": [40, 100, 150], "depth": 150, "blur": 6 }
]
"#;

/// Body alpha below this is invisible; the column stops there.
const VISIBILITY_FLOOR: u8 = 1;

/// One glass wave band
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wave {
    /// Vertical centre line of the sine in pixels
    pub base_y: f64,
    pub amplitude: f64,
    /// Angular frequency in radians per pixel
    pub freq: f64,
    pub phase: f64,
    /// RGBA of the bright crest line
    pub edge: [u8; 4],
    /// RGB tint of the fading body
    pub body: [u8; 3],
    /// How many pixels the body extends below the crest
    pub depth: u32,
    /// Gaussian blur radius of the bloom halo
    pub blur: f32,
}

/// Load the wave table in drawing order
pub fn waves() -> Result<Vec<Wave>> {
    serde_json::from_str(WAVES_JSON).context("Failed to parse the built-in wave table")
}

impl Wave {
    /// Height of the crest at column `x`
    pub fn y_at(&self, x: u32) -> f64 {
        self.base_y + self.amplitude * (self.freq * f64::from(x) + self.phase).sin()
    }

    /// Crest row at column `x`, truncated toward zero
    fn row_at(&self, x: u32) -> i64 {
        self.y_at(x) as i64
    }

    fn edge_color(&self) -> Rgba<u8> {
        Rgba(self.edge)
    }
}

/// Alpha of the body `d` pixels below the crest (exponential falloff)
pub fn body_alpha(edge_alpha: u8, d: u32, depth: u32) -> u8 {
    let t = f64::from(d) / f64::from(depth);
    (f64::from(edge_alpha) * 0.6 * (-3.5 * t).exp()) as u8
}

/// Render the fading body of `wave` on a transparent `width`×`height` layer
pub fn body_layer(wave: &Wave, width: u32, height: u32) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    let [br, bg, bb] = wave.body;

    for x in 0..width {
        let crest = wave.row_at(x);
        for d in 0..wave.depth {
            let y = crest + i64::from(d);
            if y < 0 || y >= i64::from(height) {
                continue;
            }

            let alpha = body_alpha(wave.edge[3], d, wave.depth);
            if alpha < VISIBILITY_FLOOR {
                break;
            }
            layer.put_pixel(x, y as u32, Rgba([br, bg, bb, alpha]));
        }
    }

    layer
}

/// Render the one pixel crest polyline of `wave` on a transparent layer
pub fn edge_layer(wave: &Wave, width: u32, height: u32) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    let color = wave.edge_color();

    let points: Vec<(i64, i64)> = (0..width).map(|x| (i64::from(x), wave.row_at(x))).collect();
    if points.len() == 1 {
        plot(&mut layer, points[0], color);
    }
    for segment in points.windows(2) {
        draw_line(&mut layer, segment[0], segment[1], color);
    }

    layer
}

/// Bresenham line between two points, inclusive of both ends
fn draw_line(
    layer: &mut RgbaImage,
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    color: Rgba<u8>,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        plot(layer, (x, y), color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn plot(layer: &mut RgbaImage, (x, y): (i64, i64), color: Rgba<u8>) {
    if x >= 0 && y >= 0 && x < i64::from(layer.width()) && y < i64::from(layer.height()) {
        layer.put_pixel(x as u32, y as u32, color);
    }
}

/// Blur a copy of the edge layer into a bloom halo.
///
/// Only the rows that hold the line plus the blur reach are filtered; the
/// rest of the layer is transparent and stays that way.
pub fn bloom(edge: &RgbaImage, radius: f32) -> RgbaImage {
    let (width, height) = edge.dimensions();
    let mut halo = RgbaImage::new(width, height);

    let mut rows = (0..height).filter(|&y| (0..width).any(|x| edge.get_pixel(x, y)[3] > 0));
    let Some(first) = rows.next() else {
        return halo;
    };
    let last = rows.last().unwrap_or(first);

    // Rows feeding the line's neighbourhood must see the whole kernel window.
    let reach = (radius * 4.0).ceil() as u32 + 4;
    let top = first.saturating_sub(reach);
    let bottom = (last + reach + 1).min(height);

    let band = imageops::crop_imm(edge, 0, top, width, bottom - top).to_image();
    let blurred = imageops::blur(&band, radius);
    imageops::replace(&mut halo, &blurred, 0, top.into());

    halo
}

/// Composite one glass wave onto `canvas`: body, then bloom, then the sharp edge
pub fn render_glass_wave(canvas: &mut RgbaImage, wave: &Wave) {
    let (width, height) = canvas.dimensions();

    let body = body_layer(wave, width, height);
    imageops::overlay(canvas, &body, 0, 0);

    let edge = edge_layer(wave, width, height);
    let halo = bloom(&edge, wave.blur);
    imageops::overlay(canvas, &halo, 0, 0);
    imageops::overlay(canvas, &edge, 0, 0);
}
