//! Glyph rasterization: outlines in, coverage masks out
//!
//! Font files store mathematical curves; the canvas needs pixels. Outline
//! extraction goes through skrifa, rasterization through zeno, and a dual
//! path builder feeds both at once: an SVG path string for zeno's
//! rasterizer and a kurbo path for exact bounding boxes, so bounds never
//! come from re-parsing our own output.
//!
//! Subpixel positioning: the pen's fractional x offset is baked into the
//! path before rasterization, so a glyph at pen 10.25 and the same glyph
//! at pen 10.75 produce genuinely different coverage. The mask grid itself
//! stays on whole pixels.

use kurbo::Shape;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{
    DrawSettings, Engine, HintingInstance, HintingOptions, OutlinePen, SmoothMode, Target,
};
use skrifa::MetadataProvider;
use thiserror::Error;
use zeno::Mask;

use scrawl_core::{Canvas, Color, Hinting};

/// Per-glyph rasterization failures; logged and skipped by the caller
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("glyph {0} not found in font")]
    GlyphNotFound(u32),

    #[error("outline extraction failed: {0}")]
    Draw(String),
}

/// A rasterized glyph: coverage plus placement
///
/// `left` and `top` position the mask relative to the pen origin: `left`
/// from the (floored) pen x, `top` up from the baseline.
#[derive(Debug, Clone)]
pub struct GlyphRaster {
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
    /// Alpha coverage, 0 = air, 255 = solid ink, row-major top-down
    pub mask: Vec<u8>,
}

// Grayscale smoothing with metrics kept linear, so hinting never changes
// the advances that layout already measured.
const HINTING_OPTIONS: HintingOptions = HintingOptions {
    engine: Engine::AutoFallback,
    target: Target::Smooth {
        mode: SmoothMode::Normal,
        symmetric_rendering: false,
        preserve_linear_metrics: true,
    },
};

/// Draws every glyph of one face at one pixel size
pub struct GlyphPainter<'a> {
    font: skrifa::FontRef<'a>,
    size: f32,
    hinter: Option<HintingInstance>,
}

impl<'a> GlyphPainter<'a> {
    /// Prepare a painter for this face and size
    ///
    /// Returns `None` when the data is not a parsable font. With
    /// `Hinting::Full` a hinting instance is built up front; fonts that
    /// refuse one fall back to unhinted outlines.
    pub fn new(font_data: &'a [u8], size: f32, hinting: Hinting) -> Option<Self> {
        let font = skrifa::FontRef::new(font_data).ok()?;

        let hinter = match hinting {
            Hinting::None => None,
            Hinting::Full => {
                let outlines = font.outline_glyphs();
                let instance = HintingInstance::new(
                    &outlines,
                    Size::new(size),
                    LocationRef::default(),
                    HINTING_OPTIONS,
                );
                match instance {
                    Ok(instance) => Some(instance),
                    Err(err) => {
                        log::debug!("hinting unavailable, drawing unhinted: {:?}", err);
                        None
                    },
                }
            },
        };

        Some(Self { font, size, hinter })
    }

    /// Rasterize one glyph with a fractional x offset in [0, 1)
    ///
    /// `Ok(None)` means a legitimately blank glyph (space, empty outline).
    pub fn rasterize(
        &self,
        glyph_id: u32,
        frac_x: f32,
    ) -> std::result::Result<Option<GlyphRaster>, RasterError> {
        let outlines = self.font.outline_glyphs();
        let glyph = outlines
            .get(skrifa::GlyphId::new(glyph_id))
            .ok_or(RasterError::GlyphNotFound(glyph_id))?;

        let settings = match &self.hinter {
            Some(instance) => DrawSettings::hinted(instance, false),
            None => DrawSettings::unhinted(Size::new(self.size), LocationRef::default()),
        };

        let mut builder = MaskPathBuilder::new(frac_x);
        glyph
            .draw(settings, &mut builder)
            .map_err(|err| RasterError::Draw(format!("{:?}", err)))?;
        let (path, kurbo_path) = builder.finish();

        // kurbo gives exact bounds without re-parsing the SVG string
        let bbox = kurbo_path.bounding_box();
        if !bbox.x0.is_finite() || !bbox.y0.is_finite() {
            return Ok(None);
        }

        let (min_x, min_y) = (bbox.x0 as f32, bbox.y0 as f32);
        let (max_x, max_y) = (bbox.x1 as f32, bbox.y1 as f32);
        if max_x - min_x <= 0.0 || max_y - min_y <= 0.0 {
            return Ok(None);
        }

        // Snap the mask grid to whole pixels; the path keeps its fraction
        let left = min_x.floor();
        let bottom = min_y.floor();
        let width = ((max_x.ceil() - left) as u32).max(1);
        let height = ((max_y.ceil() - bottom) as u32).max(1);

        let mut mask = vec![0u8; (width * height) as usize];
        Mask::new(path.as_str())
            .size(width, height)
            .offset((-left, -bottom))
            .render_into(&mut mask, None);

        // Fonts are y-up, bitmaps are y-down
        for y in 0..(height / 2) {
            let top_row = y as usize * width as usize;
            let bottom_row = (height - 1 - y) as usize * width as usize;
            for x in 0..width as usize {
                mask.swap(top_row + x, bottom_row + x);
            }
        }

        Ok(Some(GlyphRaster {
            width,
            height,
            left: left as i32,
            top: bottom as i32 + height as i32,
            mask,
        }))
    }
}

/// Alpha-composite a coverage mask onto the canvas in one ink color
///
/// `x0`, `y0` is the top-left corner of the mask on the canvas; pixels that
/// fall outside are clipped.
pub fn composite_mask(canvas: &mut Canvas, glyph: &GlyphRaster, x0: i32, y0: i32, ink: Color) {
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);

    for gy in 0..glyph.height {
        for gx in 0..glyph.width {
            let px = x0 + gx as i32;
            let py = y0 + gy as i32;
            if px < 0 || py < 0 || px >= cw || py >= ch {
                continue;
            }

            let coverage = glyph.mask[(gy * glyph.width + gx) as usize] as u32;
            if coverage == 0 {
                continue;
            }

            let alpha = coverage * ink.a as u32 / 255;
            let inv = 255 - alpha;
            let i = ((py as u32 * canvas.width() + px as u32) * 4) as usize;

            let data = canvas.data_mut();
            data[i] = ((ink.r as u32 * alpha + data[i] as u32 * inv) / 255) as u8;
            data[i + 1] = ((ink.g as u32 * alpha + data[i + 1] as u32 * inv) / 255) as u8;
            data[i + 2] = ((ink.b as u32 * alpha + data[i + 2] as u32 * inv) / 255) as u8;
            data[i + 3] = (alpha + data[i + 3] as u32 * inv / 255).min(255) as u8;
        }
    }
}

/// Dual-output path builder feeding zeno and kurbo at once
///
/// The x translation carries the pen's subpixel fraction into the path.
struct MaskPathBuilder {
    commands: Vec<String>,
    kurbo_path: kurbo::BezPath,
    dx: f32,
}

impl MaskPathBuilder {
    fn new(dx: f32) -> Self {
        Self {
            commands: Vec::new(),
            kurbo_path: kurbo::BezPath::new(),
            dx,
        }
    }

    fn finish(self) -> (String, kurbo::BezPath) {
        (self.commands.join(" "), self.kurbo_path)
    }
}

impl OutlinePen for MaskPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let x = x + self.dx;
        self.commands.push(format!("M {:.2},{:.2}", x, y));
        self.kurbo_path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let x = x + self.dx;
        self.commands.push(format!("L {:.2},{:.2}", x, y));
        self.kurbo_path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let cx = cx + self.dx;
        let x = x + self.dx;
        self.commands
            .push(format!("Q {:.2},{:.2} {:.2},{:.2}", cx, cy, x, y));
        self.kurbo_path
            .quad_to((cx as f64, cy as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let cx0 = cx0 + self.dx;
        let cx1 = cx1 + self.dx;
        let x = x + self.dx;
        self.commands.push(format!(
            "C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            cx0, cy0, cx1, cy1, x, y
        ));
        self.kurbo_path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.commands.push("Z".to_string());
        self.kurbo_path.close_path();
    }
}
