//! Rounded-rectangle clipping mask
//!
//! The icon is clipped to a rectangle with quarter-circle corners. The mask is
//! built once as a single-channel image and consumed by the final composite.

use image::{GrayImage, Luma};

/// Inset of the rounded rectangle from every canvas edge
pub const MARGIN: u32 = 100;

/// Corner radius of the rounded rectangle
pub const CORNER: u32 = 185;

/// Build the `size`×`size` clipping mask for the icon
pub fn icon_mask(size: u32) -> GrayImage {
    let mut mask = GrayImage::new(size, size);
    rounded_rect(
        &mut mask,
        (MARGIN, MARGIN, size - MARGIN, size - MARGIN),
        CORNER,
        Luma([255]),
    );
    mask
}

/// Fill a rounded rectangle into `mask`.
///
/// `bounds` is an inclusive `(x0, y0, x1, y1)` box. The central cross is
/// filled first, then one quarter disk per corner, each centred on the inner
/// corner of the cross so the arcs meet the straight edges tangentially.
pub fn rounded_rect(
    mask: &mut GrayImage,
    bounds: (u32, u32, u32, u32),
    radius: u32,
    fill: Luma<u8>,
) {
    let (x0, y0, x1, y1) = bounds;

    fill_rect(mask, (x0 + radius, y0, x1 - radius, y1), fill);
    fill_rect(mask, (x0, y0 + radius, x1, y1 - radius), fill);

    // (centre, quadrant box) for top-left, top-right, bottom-left, bottom-right
    let corners = [
        ((x0 + radius, y0 + radius), (x0, y0, x0 + radius, y0 + radius)),
        ((x1 - radius, y0 + radius), (x1 - radius, y0, x1, y0 + radius)),
        ((x0 + radius, y1 - radius), (x0, y1 - radius, x0 + radius, y1)),
        ((x1 - radius, y1 - radius), (x1 - radius, y1 - radius, x1, y1)),
    ];

    for (centre, quadrant) in corners {
        fill_quarter_disk(mask, centre, quadrant, radius, fill);
    }
}

fn fill_rect(mask: &mut GrayImage, (x0, y0, x1, y1): (u32, u32, u32, u32), fill: Luma<u8>) {
    for y in y0..=y1.min(mask.height().saturating_sub(1)) {
        for x in x0..=x1.min(mask.width().saturating_sub(1)) {
            mask.put_pixel(x, y, fill);
        }
    }
}

fn fill_quarter_disk(
    mask: &mut GrayImage,
    (cx, cy): (u32, u32),
    (x0, y0, x1, y1): (u32, u32, u32, u32),
    radius: u32,
    fill: Luma<u8>,
) {
    let r2 = i64::from(radius) * i64::from(radius);

    for y in y0..=y1 {
        for x in x0..=x1 {
            if x >= mask.width() || y >= mask.height() {
                continue;
            }

            let dx = i64::from(x) - i64::from(cx);
            let dy = i64::from(y) - i64::from(cy);
            if dx * dx + dy * dy <= r2 {
                mask.put_pixel(x, y, fill);
            }
        }
    }
}
