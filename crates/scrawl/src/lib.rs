//! Scrawl: human-verification images from text
//!
//! Two components composed sequentially. The layout engine typesets
//! multi-line text onto a correctly sized white canvas, and the distortion
//! pipeline runs a fixed five-stage sequence of randomly parameterized
//! warps, noise, blending, and effects over it. The result is legible to
//! people and awkward for machines.
//!
//! # Example
//!
//! ```ignore
//! use scrawl::{ChallengeRenderer, RenderConfig};
//! use scrawl::fontdb::FontCatalog;
//!
//! let catalog = FontCatalog::scan("fonts/")?;
//! let renderer = ChallengeRenderer::new(catalog, RenderConfig::default());
//!
//! let challenge = renderer.generate("Hello\nWorld", true)?;
//! std::fs::write("challenge.png", &challenge.png)?;
//! # Ok::<(), scrawl::ScrawlError>(())
//! ```
//!
//! Each call is a self-contained unit of work: the typeface is loaded for
//! the call and dropped after, the canvas and parameters are owned by the
//! call, and the only shared state is the read-only [`fontdb::FontCatalog`]
//! and the thread-local random generator. Independent calls can run in
//! parallel without locking.

pub use scrawl_core::{
    error, BlendMode, Canvas, Color, EffectKind, EffectParameters, FaceMetrics, Hinting,
    NoiseColor, NoiseKind, OrientationKind, RenderConfig, ScrawlError,
};

pub use scrawl_distort as distort;
pub use scrawl_export as export;
pub use scrawl_fontdb as fontdb;
pub use scrawl_layout as layout;

use scrawl_core::error::Result;

/// Common imports for typical usage
pub mod prelude {
    pub use scrawl_core::{
        error::{Result, ScrawlError},
        Canvas, Color, EffectParameters, FaceMetrics, Hinting, RenderConfig,
    };

    pub use crate::{Challenge, ChallengeRenderer};
    pub use scrawl_fontdb::{FontCatalog, FontFace};
}

/// One generated challenge image
#[derive(Debug, Clone)]
pub struct Challenge {
    /// Encoded PNG bytes
    pub png: Vec<u8>,
    /// Final image width in pixels
    pub width: u32,
    /// Final image height in pixels
    pub height: u32,
    /// The distortion choices, present when effects were applied
    ///
    /// Structured and serializable, so hosts can store or replay a run
    /// instead of parsing a debug string.
    pub effects: Option<EffectParameters>,
}

/// Renders challenge images from a fixed catalog and configuration
///
/// Construct once at startup; the catalog is scanned before this point and
/// never again. The renderer itself holds no per-call state.
pub struct ChallengeRenderer {
    catalog: fontdb::FontCatalog,
    config: RenderConfig,
}

impl ChallengeRenderer {
    pub fn new(catalog: fontdb::FontCatalog, config: RenderConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &fontdb::FontCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Generate an image of `text`, with a typeface picked uniformly from
    /// the catalog
    ///
    /// With `apply_effects` the distortion pipeline runs and its parameter
    /// record is attached to the result; without it the clean typeset
    /// canvas is encoded as-is.
    pub fn generate(&self, text: &str, apply_effects: bool) -> Result<Challenge> {
        let mut rng = rand::rng();
        let face = self.catalog.pick(&mut rng)?;
        self.generate_with_face(text, &face, apply_effects)
    }

    /// Generate with a caller-chosen typeface
    pub fn generate_with_face(
        &self,
        text: &str,
        face: &dyn FaceMetrics,
        apply_effects: bool,
    ) -> Result<Challenge> {
        let canvas = layout::render_text(text, face, &self.config)?;

        let mut rng = rand::rng();
        let (canvas, effects) = if apply_effects {
            let (canvas, params) = distort::distort(canvas, &mut rng);
            (canvas, Some(params))
        } else {
            (canvas, None)
        };

        let png = export::encode_png(&canvas)?;
        log::debug!(
            "generated {}x{} challenge, effects: {}",
            canvas.width(),
            canvas.height(),
            effects.is_some()
        );

        Ok(Challenge {
            png,
            width: canvas.width(),
            height: canvas.height(),
            effects,
        })
    }
}
