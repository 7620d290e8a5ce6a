//! Affine warps: rotation and shear by inverse-mapped bilinear resampling
//!
//! All three warps share one convention: the output canvas has the input's
//! dimensions, transforms pivot on the canvas center, and destination
//! pixels whose source falls outside the input become fully transparent.
//! That keeps the pipeline dimension-stable; corners clipped by a rotation
//! are the accepted cost.

use scrawl_core::{Canvas, Color};

/// Rotate counter-clockwise by `degrees` about the canvas center
pub fn rotate(src: &Canvas, degrees: f32) -> Canvas {
    let theta = degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let cx = src.width() as f32 / 2.0;
    let cy = src.height() as f32 / 2.0;

    resample(src, |x, y| {
        let dx = x - cx;
        let dy = y - cy;
        (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
    })
}

/// Shear vertically: columns slide up or down by `tan(degrees)` per pixel
/// of horizontal distance from the center
pub fn shear_v(src: &Canvas, degrees: f32) -> Canvas {
    let k = degrees.to_radians().tan();
    let cx = src.width() as f32 / 2.0;

    resample(src, move |x, y| (x, y - k * (x - cx)))
}

/// Shear horizontally: rows slide left or right by `tan(degrees)` per
/// pixel of vertical distance from the center
pub fn shear_h(src: &Canvas, degrees: f32) -> Canvas {
    let k = degrees.to_radians().tan();
    let cy = src.height() as f32 / 2.0;

    resample(src, move |x, y| (x - k * (y - cy), y))
}

/// Build the output by asking `inverse` where each destination pixel
/// comes from, then sampling there bilinearly
fn resample(src: &Canvas, inverse: impl Fn(f32, f32) -> (f32, f32)) -> Canvas {
    let mut dst = Canvas::new(src.width(), src.height());

    for y in 0..dst.height() {
        for x in 0..dst.width() {
            // Sample at pixel centers so a zero warp reproduces the input
            let (sx, sy) = inverse(x as f32 + 0.5, y as f32 + 0.5);
            dst.put(x, y, bilinear(src, sx - 0.5, sy - 0.5));
        }
    }

    dst
}

/// Bilinear sample with transparent outside the canvas
fn bilinear(src: &Canvas, fx: f32, fy: f32) -> Color {
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let mut acc = [0.0f32; 4];
    for (dx, dy, w) in [
        (0, 0, (1.0 - tx) * (1.0 - ty)),
        (1, 0, tx * (1.0 - ty)),
        (0, 1, (1.0 - tx) * ty),
        (1, 1, tx * ty),
    ] {
        if w == 0.0 {
            continue;
        }
        let px = x0 as i64 + dx;
        let py = y0 as i64 + dy;
        if px < 0 || py < 0 || px >= src.width() as i64 || py >= src.height() as i64 {
            continue; // transparent neighbour contributes nothing
        }
        let c = src.get(px as u32, py as u32);
        acc[0] += c.r as f32 * w;
        acc[1] += c.g as f32 * w;
        acc[2] += c.b as f32 * w;
        acc[3] += c.a as f32 * w;
    }

    Color::rgba(
        acc[0].round().clamp(0.0, 255.0) as u8,
        acc[1].round().clamp(0.0, 255.0) as u8,
        acc[2].round().clamp(0.0, 255.0) as u8,
        acc[3].round().clamp(0.0, 255.0) as u8,
    )
}
