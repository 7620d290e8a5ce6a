//! Scrawl Core: shared vocabulary for the challenge-image pipeline
//!
//! Text enters as characters, exits as a distorted raster image. This crate
//! holds everything the stages agree on:
//!
//! - [`Canvas`] and [`Color`], the pixel buffer the stages pass along
//! - [`RenderConfig`], the immutable per-call typesetting configuration
//! - [`params`], the randomized distortion parameter record and its variants
//! - [`error`], the failure taxonomy shared by every crate
//! - [`traits::FaceMetrics`], the seam between font loading and layout
//!
//! The layout engine produces a fully drawn [`Canvas`], the distortion
//! pipeline consumes and returns one, and the exporter encodes it. None of
//! the stages share any other state.

pub mod canvas;
pub mod error;
pub mod params;
pub mod traits;

pub use canvas::Canvas;
pub use error::{ExportError, FontLoadError, LayoutError, Result, ScrawlError};
pub use params::{BlendMode, EffectKind, EffectParameters, NoiseColor, NoiseKind, OrientationKind};
pub use traits::FaceMetrics;

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }
}

/// Hinting mode applied when extracting glyph outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hinting {
    /// Outlines are scaled only, no grid fitting
    None,
    /// The font's embedded or automatic hinting at the requested size
    #[default]
    Full,
}

/// How text gets typeset: point size, resolution, and hinting
///
/// One immutable value per render call. There is no process-wide font
/// configuration; callers construct this once and pass it in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Font size in points
    pub size: f32,
    /// Dots per inch of the target raster
    pub dpi: f32,
    /// Outline hinting mode
    pub hinting: Hinting,
}

impl RenderConfig {
    /// Pixels spanned by one em at this size and resolution
    pub fn pixels_per_em(&self) -> f32 {
        self.size * self.dpi / 72.0
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 72.0,
            dpi: 72.0,
            hinting: Hinting::Full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_one_px_per_point() {
        let config = RenderConfig::default();
        assert_eq!(config.pixels_per_em(), 72.0);
        assert_eq!(config.hinting, Hinting::Full);
    }

    #[test]
    fn pixels_per_em_scales_with_dpi() {
        let config = RenderConfig {
            size: 12.0,
            dpi: 144.0,
            hinting: Hinting::None,
        };
        assert_eq!(config.pixels_per_em(), 24.0);
    }

    #[test]
    fn color_constants() {
        assert_eq!(Color::white(), Color::rgba(255, 255, 255, 255));
        assert_eq!(Color::black(), Color::rgba(0, 0, 0, 255));
        assert_eq!(Color::transparent().a, 0);
    }
}
