//! The seam between font loading and layout
//!
//! Layout never parses font files itself. Whatever loads the typeface
//! exposes its data and metrics through [`FaceMetrics`], so the layout
//! engine can be exercised with mock faces in tests and real faces in
//! production without changing a line.

/// A loaded typeface's window into its own metrics
///
/// Implementations own the raw font bytes and answer the two questions
/// layout asks: which glyph draws this character, and how wide is it.
pub trait FaceMetrics: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// The font's internal coordinate system scale
    ///
    /// Used to convert between font units and rendered pixels.
    /// TrueType commonly uses 2048, CFF commonly 1000.
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<u32>;

    /// How wide this glyph stands, in font units
    fn advance_width(&self, glyph_id: u32) -> f32;
}
