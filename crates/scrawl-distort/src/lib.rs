//! The distortion pipeline: five fixed stages, randomly parameterized
//!
//! A drawn canvas goes in, a warped and degraded one comes out. The stage
//! order never changes; only the parameters are drawn per call:
//!
//! 1. affine warp (rotation, vertical shear, horizontal shear)
//! 2. noise synthesis at the canvas's exact dimensions
//! 3. noise blending with one of seven compositing modes
//! 4. exactly one degradation effect (blur, emboss, or edge detection)
//! 5. a lossless orientation transform (flip and/or 180 turn)
//!
//! Every warp preserves the canvas dimensions; newly exposed area is
//! transparent. The sampled [`EffectParameters`] record is returned with
//! the image so a caller can log, query, or replay the run.
//!
//! Zero-sized canvases are a caller contract violation, not a runtime
//! case; both dimensions must be positive.

use rand::Rng;

use scrawl_core::{Canvas, EffectKind, EffectParameters};

pub mod blend;
pub mod effect;
pub mod noise;
pub mod orient;
pub mod warp;

/// Draw fresh parameters and run all five stages
pub fn distort(canvas: Canvas, rng: &mut impl Rng) -> (Canvas, EffectParameters) {
    let params = EffectParameters::sample(rng);
    log::debug!("distorting with {:?}", params);
    let out = apply(canvas, &params, rng);
    (out, params)
}

/// Run all five stages with the given parameters
///
/// The noise field still draws per-pixel values from `rng`; replaying a
/// run therefore takes the same parameters and the same seeded generator.
pub fn apply(canvas: Canvas, params: &EffectParameters, rng: &mut impl Rng) -> Canvas {
    debug_assert!(canvas.width() > 0 && canvas.height() > 0);

    // Stage 1: affine warp, rotation first, then the two shears
    let canvas = warp::rotate(&canvas, params.rotation_degrees);
    let canvas = warp::shear_v(&canvas, params.shear_v);
    let mut canvas = warp::shear_h(&canvas, params.shear_h);

    // Stages 2 and 3: synthesize a noise field and composite it in
    let field = noise::generate(
        canvas.width(),
        canvas.height(),
        params.noise,
        params.noise_color,
        rng,
    );
    blend::blend(&mut canvas, &field, params.blend);

    // Stage 4: a single degradation effect, never combined
    let canvas = match params.effect {
        EffectKind::GaussianBlur => effect::gaussian_blur(&canvas, 2.0),
        EffectKind::Emboss => effect::emboss(&canvas),
        EffectKind::BoxBlur => effect::box_blur(&canvas, 1.8),
        EffectKind::Sobel => effect::sobel(&canvas),
    };

    // Stage 5: pixel-exact orientation
    orient::apply(canvas, params.orientation)
}
