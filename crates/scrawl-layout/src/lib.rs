//! The layout engine: from a text block to a fully drawn canvas
//!
//! Given a loaded typeface and multi-line text, this crate measures every
//! line, sizes a canvas with a 10% horizontal margin, and draws the glyph
//! runs in solid ink on a white background. All of it is deterministic;
//! randomness only enters downstream in the distortion pipeline.
//!
//! ## Geometry
//!
//! - `line_height = ceil(pixels_per_em * 1.18)`, the extra 18% reserving
//!   ascender and descender slack beyond the nominal em box
//! - canvas width `= widest_line * 11 / 10` (truncating integer math)
//! - canvas height `= line_count * line_height`
//! - first baseline at `ceil(pixels_per_em * 0.94)` from the top, which
//!   puts cap height near the top margin; later baselines step by exactly
//!   one `line_height`
//! - every line starts at `(canvas_width - widest) / 2`: the block as a
//!   whole is centered on the widest line, narrower lines stay left-aligned
//!   inside it

use scrawl_core::{
    error::{LayoutError, Result},
    traits::FaceMetrics,
    Canvas, Color, RenderConfig,
};

pub mod raster;

use raster::GlyphPainter;

/// Pen positions advance on the rasterizer's own 1/64 pixel grid
const SUBPIXEL: f32 = 64.0;

/// Measured pixel width of a single line, rounded to the nearest pixel
fn measure_line(line: &str, face: &dyn FaceMetrics, scale: f32) -> i32 {
    let mut advance = 0.0f32;
    for ch in line.chars() {
        // Missing characters fall back to .notdef, same as drawing does
        let glyph_id = face.glyph_id(ch).unwrap_or(0);
        advance += face.advance_width(glyph_id) * scale;
    }
    advance.round() as i32
}

/// Lay out and draw `text` onto a fresh canvas
///
/// Empty input is a reportable error, raised before any allocation. Lines
/// are split on `'\n'`; an empty line renders as a blank row of exactly one
/// `line_height`.
pub fn render_text(text: &str, face: &dyn FaceMetrics, config: &RenderConfig) -> Result<Canvas> {
    if text.is_empty() {
        return Err(LayoutError::EmptyInput.into());
    }

    let px_per_em = config.pixels_per_em();
    let scale = px_per_em / face.units_per_em() as f32;

    let lines: Vec<&str> = text.split('\n').collect();

    let mut widest = 0i32;
    for line in &lines {
        widest = widest.max(measure_line(line, face, scale));
    }

    let line_height = (px_per_em * 1.18).ceil() as i32;
    // 10% extra for margins; at least one column so degenerate all-blank
    // input still yields a canvas the distortion stage can accept
    let img_w = (widest * 11 / 10).max(1) as u32;
    let img_h = (lines.len() as i32 * line_height) as u32;

    let mut canvas = Canvas::filled(img_w, img_h, Color::white());

    // Whole-block centering keyed to the widest line
    let start_x = (img_w as i32 - widest) as f32 / 2.0;
    let mut baseline = (px_per_em * 0.94).ceil() as i32;

    let painter = GlyphPainter::new(face.data(), px_per_em, config.hinting);
    let painter = match painter {
        Some(p) => p,
        None => {
            // The face loader validates data before we ever get here, so
            // this only happens with synthetic faces in tests.
            log::warn!("face data not drawable, producing blank canvas");
            return Ok(canvas);
        }
    };

    for line in &lines {
        // Fixed-point pen: fractional positions survive the advance
        // accumulation and reach the rasterizer as subpixel offsets.
        let mut pen = (start_x * SUBPIXEL).round() as i32;

        for ch in line.chars() {
            let glyph_id = face.glyph_id(ch).unwrap_or(0);

            let pen_floor = pen.div_euclid(SUBPIXEL as i32);
            let pen_frac = pen.rem_euclid(SUBPIXEL as i32) as f32 / SUBPIXEL;

            match painter.rasterize(glyph_id, pen_frac) {
                Ok(Some(glyph)) => {
                    raster::composite_mask(
                        &mut canvas,
                        &glyph,
                        pen_floor + glyph.left,
                        baseline - glyph.top,
                        Color::black(),
                    );
                },
                Ok(None) => {}, // blank glyph (space, empty outline)
                Err(err) => {
                    log::warn!("skipping glyph {}: {}", glyph_id, err);
                },
            }

            let advance = face.advance_width(glyph_id) * scale;
            pen += (advance * SUBPIXEL).round() as i32;
        }

        baseline += line_height;
    }

    Ok(canvas)
}

/// The line height used for a given configuration, exposed for callers
/// that need to reason about row geometry (tests, crop logic)
pub fn line_height(config: &RenderConfig) -> u32 {
    (config.pixels_per_em() * 1.18).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-advance fake face. Its data is not a real font, so drawing
    /// is skipped and only geometry is exercised.
    struct FixedFace {
        advance: f32,
    }

    impl FaceMetrics for FixedFace {
        fn data(&self) -> &[u8] {
            &[]
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn glyph_id(&self, ch: char) -> Option<u32> {
            if ch.is_ascii() {
                Some(ch as u32)
            } else {
                None
            }
        }

        fn advance_width(&self, _glyph_id: u32) -> f32 {
            self.advance
        }
    }

    fn config() -> RenderConfig {
        RenderConfig {
            size: 72.0,
            dpi: 72.0,
            hinting: scrawl_core::Hinting::None,
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        let face = FixedFace { advance: 500.0 };
        let err = render_text("", &face, &config()).unwrap_err();
        assert!(matches!(
            err,
            scrawl_core::ScrawlError::Layout(LayoutError::EmptyInput)
        ));
    }

    #[test]
    fn single_line_dimensions() {
        let face = FixedFace { advance: 500.0 };
        // 5 chars * 500/1000 em * 72 px = 180 px wide
        let canvas = render_text("hello", &face, &config()).unwrap();
        assert_eq!(canvas.width(), 180 * 11 / 10);
        assert_eq!(canvas.height(), line_height(&config()));
        assert!(canvas.width() as f32 >= 180.0 * 1.1 - 1.0);
    }

    #[test]
    fn multi_line_height_is_exact() {
        let face = FixedFace { advance: 500.0 };
        let canvas = render_text("a\nbb\nccc", &face, &config()).unwrap();
        assert_eq!(canvas.height(), 3 * line_height(&config()));
        // widest is "ccc": 3 * 36 px = 108
        assert_eq!(canvas.width(), 108 * 11 / 10);
    }

    #[test]
    fn line_height_is_invariant_across_calls() {
        let face = FixedFace { advance: 400.0 };
        let a = render_text("x", &face, &config()).unwrap();
        let b = render_text("y\nz", &face, &config()).unwrap();
        assert_eq!(a.height() * 2, b.height());
    }

    #[test]
    fn empty_lines_render_as_blank_rows() {
        let face = FixedFace { advance: 500.0 };
        let canvas = render_text("a\n\nb", &face, &config()).unwrap();
        assert_eq!(canvas.height(), 3 * line_height(&config()));
    }

    #[test]
    fn degenerate_blank_text_still_produces_a_canvas() {
        let face = FixedFace { advance: 0.0 };
        let canvas = render_text("\n", &face, &config()).unwrap();
        assert_eq!(canvas.width(), 1);
        assert_eq!(canvas.height(), 2 * line_height(&config()));
    }

    #[test]
    fn background_is_opaque_white() {
        let face = FixedFace { advance: 500.0 };
        let canvas = render_text("hi", &face, &config()).unwrap();
        assert_eq!(canvas.get(0, 0), Color::white());
        assert_eq!(
            canvas.get(canvas.width() - 1, canvas.height() - 1),
            Color::white()
        );
    }
}
