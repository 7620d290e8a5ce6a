//! Synthetic noise fields
//!
//! A noise field is an image of per-pixel random values in one of three
//! distributions, either monochrome (one value shared by R, G, B) or
//! independently colored per channel. Alpha is always opaque; opacity is
//! the blend stage's business.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use scrawl_core::{Canvas, Color, NoiseColor, NoiseKind};

/// Gaussian noise centers on mid-gray with a wide spread
const GAUSSIAN_MEAN: f32 = 128.0;
const GAUSSIAN_STDDEV: f32 = 64.0;

/// Generate a noise field of exactly `width` x `height`
pub fn generate(
    width: u32,
    height: u32,
    kind: NoiseKind,
    color: NoiseColor,
    rng: &mut impl Rng,
) -> Canvas {
    // Normal::new only fails on a non-finite or negative sigma
    let gaussian = Normal::new(GAUSSIAN_MEAN, GAUSSIAN_STDDEV)
        .unwrap_or_else(|_| unreachable!("constant sigma is valid"));

    let value = |rng: &mut dyn rand::RngCore| -> u8 {
        match kind {
            NoiseKind::Gaussian => gaussian.sample(rng).clamp(0.0, 255.0) as u8,
            NoiseKind::Uniform => rng.random::<u8>(),
            NoiseKind::Binary => {
                if rng.random_bool(0.5) {
                    255
                } else {
                    0
                }
            },
        }
    };

    let mut field = Canvas::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let px = match color {
                NoiseColor::Monochrome => {
                    let v = value(rng);
                    Color::rgba(v, v, v, 255)
                },
                NoiseColor::PerChannel => {
                    Color::rgba(value(rng), value(rng), value(rng), 255)
                },
            };
            field.put(x, y, px);
        }
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn field_has_requested_dimensions() {
        let mut rng = StdRng::seed_from_u64(0);
        let field = generate(17, 9, NoiseKind::Uniform, NoiseColor::PerChannel, &mut rng);
        assert_eq!(field.width(), 17);
        assert_eq!(field.height(), 9);
    }

    #[test]
    fn binary_noise_is_salt_and_pepper() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = generate(32, 32, NoiseKind::Binary, NoiseColor::Monochrome, &mut rng);
        for px in field.data().chunks_exact(4) {
            assert!(px[0] == 0 || px[0] == 255);
        }
    }

    #[test]
    fn monochrome_noise_repeats_across_channels() {
        let mut rng = StdRng::seed_from_u64(2);
        let field = generate(16, 16, NoiseKind::Gaussian, NoiseColor::Monochrome, &mut rng);
        for px in field.data().chunks_exact(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn per_channel_noise_varies_somewhere() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = generate(16, 16, NoiseKind::Uniform, NoiseColor::PerChannel, &mut rng);
        let varied = field
            .data()
            .chunks_exact(4)
            .any(|px| px[0] != px[1] || px[1] != px[2]);
        assert!(varied);
    }

    #[test]
    fn gaussian_noise_clusters_around_mid_gray() {
        let mut rng = StdRng::seed_from_u64(4);
        let field = generate(64, 64, NoiseKind::Gaussian, NoiseColor::Monochrome, &mut rng);
        let mean: f64 = field
            .data()
            .chunks_exact(4)
            .map(|px| px[0] as f64)
            .sum::<f64>()
            / (64.0 * 64.0);
        assert!((mean - 128.0).abs() < 10.0, "mean drifted to {}", mean);
    }
}
