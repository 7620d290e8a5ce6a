//! Photometric compositing of the noise field onto the canvas
//!
//! Seven standard blend modes, each a per-channel function of backdrop
//! and source normalized to [0, 1]. The formulas follow the conventional
//! definitions (W3C compositing for soft-light, color-burn, overlay and
//! exclusion); the backdrop's alpha channel is left untouched.

use scrawl_core::{BlendMode, Canvas};

/// One channel, backdrop `b` against source `s`, both in [0, 1]
fn blend_channel(mode: BlendMode, b: f32, s: f32) -> f32 {
    match mode {
        BlendMode::Opacity => b * 0.5 + s * 0.5,
        BlendMode::Lighten => b.max(s),
        BlendMode::Subtract => (b - s).max(0.0),
        BlendMode::SoftLight => {
            if s <= 0.5 {
                b - (1.0 - 2.0 * s) * b * (1.0 - b)
            } else {
                let d = if b <= 0.25 {
                    ((16.0 * b - 12.0) * b + 4.0) * b
                } else {
                    b.sqrt()
                };
                b + (2.0 * s - 1.0) * (d - b)
            }
        },
        BlendMode::ColorBurn => {
            if s <= 0.0 {
                0.0
            } else {
                1.0 - ((1.0 - b) / s).min(1.0)
            }
        },
        BlendMode::Overlay => {
            if b <= 0.5 {
                2.0 * b * s
            } else {
                1.0 - 2.0 * (1.0 - b) * (1.0 - s)
            }
        },
        BlendMode::Exclusion => b + s - 2.0 * b * s,
    }
}

/// Composite `source` onto `base` in place
///
/// Both canvases must share dimensions; the noise stage guarantees that.
pub fn blend(base: &mut Canvas, source: &Canvas, mode: BlendMode) {
    debug_assert_eq!(base.width(), source.width());
    debug_assert_eq!(base.height(), source.height());

    let src = source.data();
    let dst = base.data_mut();

    for (dpx, spx) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        for c in 0..3 {
            let b = dpx[c] as f32 / 255.0;
            let s = spx[c] as f32 / 255.0;
            dpx[c] = (blend_channel(mode, b, s).clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        // alpha stays the backdrop's
    }
}
