//! The randomized distortion parameter record
//!
//! Every distortion run is fully determined by one [`EffectParameters`]
//! value. The variants are explicit enums with uniform samplers rather than
//! modulo arithmetic over branch indices, so each one can be unit-tested on
//! its own and adding a variant cannot silently skew a neighbour's odds.
//! The sampled record is returned to the caller alongside the image, which
//! makes a run replayable and queryable.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Statistical distribution of the synthetic noise field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    /// Normal distribution centered on mid-gray
    Gaussian,
    /// Uniform over the full 8-bit range
    Uniform,
    /// Salt-and-pepper: every value is 0 or 255
    Binary,
}

impl NoiseKind {
    const ALL: [Self; 3] = [Self::Gaussian, Self::Uniform, Self::Binary];

    /// Draw one kind, each equally likely
    pub fn sample(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Whether noise values repeat across channels or vary per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseColor {
    /// One value per pixel, shared by R, G and B
    Monochrome,
    /// Independent value per channel
    PerChannel,
}

impl NoiseColor {
    /// 50/50 coin flip
    pub fn sample(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            Self::Monochrome
        } else {
            Self::PerChannel
        }
    }
}

/// Per-pixel compositing function used to merge the noise field in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Linear mix at fixed 0.5 alpha
    Opacity,
    /// Channel-wise maximum
    Lighten,
    /// Backdrop minus source, clamped at zero
    Subtract,
    /// Soft light (W3C formula)
    SoftLight,
    /// Darkening burn: 1 - (1-b)/s
    ColorBurn,
    /// Multiply below mid-gray, screen above
    Overlay,
    /// b + s - 2bs
    Exclusion,
}

impl BlendMode {
    const ALL: [Self; 7] = [
        Self::Opacity,
        Self::Lighten,
        Self::Subtract,
        Self::SoftLight,
        Self::ColorBurn,
        Self::Overlay,
        Self::Exclusion,
    ];

    /// Draw one mode, each equally likely
    pub fn sample(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// The single photographic degradation applied after blending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Gaussian blur, sigma 2.0
    GaussianBlur,
    /// Edge-relief convolution
    Emboss,
    /// Uniform box blur, radius 1.8
    BoxBlur,
    /// Sobel gradient magnitude
    Sobel,
}

impl EffectKind {
    const ALL: [Self; 4] = [Self::GaussianBlur, Self::Emboss, Self::BoxBlur, Self::Sobel];

    /// Draw one effect, each equally likely
    pub fn sample(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// The final lossless orientation transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationKind {
    /// Leave the image as-is
    None,
    /// Mirror left-to-right
    FlipH,
    /// Turn upside down
    Rotate180,
    /// Mirror and turn, composing to a vertical flip
    FlipHRotate180,
}

impl OrientationKind {
    const ALL: [Self; 4] = [Self::None, Self::FlipH, Self::Rotate180, Self::FlipHRotate180];

    /// Draw one orientation, 25% each
    pub fn sample(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Everything one distortion run decided at random
///
/// Generated fresh per call, never reused. Given a source canvas this
/// record fully determines the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectParameters {
    /// Rotation angle in degrees, roughly -5 to +5
    pub rotation_degrees: f32,
    /// Vertical shear angle in degrees, roughly -2.5 to +2.5
    pub shear_v: f32,
    /// Horizontal shear angle in degrees, independently drawn
    pub shear_h: f32,
    pub noise: NoiseKind,
    pub noise_color: NoiseColor,
    pub blend: BlendMode,
    pub effect: EffectKind,
    pub orientation: OrientationKind,
}

impl EffectParameters {
    /// Draw a complete parameter set, every stage independent
    pub fn sample(rng: &mut impl Rng) -> Self {
        Self {
            rotation_degrees: 10.0 * (0.5 - rng.random::<f32>()),
            shear_v: 5.0 * (0.5 - rng.random::<f32>()),
            shear_h: 5.0 * (0.5 - rng.random::<f32>()),
            noise: NoiseKind::sample(rng),
            noise_color: NoiseColor::sample(rng),
            blend: BlendMode::sample(rng),
            effect: EffectKind::sample(rng),
            orientation: OrientationKind::sample(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn sampled_angles_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let params = EffectParameters::sample(&mut rng);
            assert!(params.rotation_degrees > -5.0 && params.rotation_degrees <= 5.0);
            assert!(params.shear_v > -2.5 && params.shear_v <= 2.5);
            assert!(params.shear_h > -2.5 && params.shear_h <= 2.5);
        }
    }

    #[test]
    fn orientation_outcomes_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 4];
        let trials = 4000;
        for _ in 0..trials {
            match OrientationKind::sample(&mut rng) {
                OrientationKind::None => counts[0] += 1,
                OrientationKind::FlipH => counts[1] += 1,
                OrientationKind::Rotate180 => counts[2] += 1,
                OrientationKind::FlipHRotate180 => counts[3] += 1,
            }
        }
        // Each outcome should land near trials/4; allow a generous band.
        for &count in &counts {
            assert!(count > trials / 4 - trials / 10, "skewed: {:?}", counts);
            assert!(count < trials / 4 + trials / 10, "skewed: {:?}", counts);
        }
    }

    #[test]
    fn every_blend_mode_is_reachable() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(BlendMode::sample(&mut rng));
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn parameters_serialize_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = EffectParameters::sample(&mut rng);
        let json = serde_json::to_string(&params).unwrap();
        let back: EffectParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
