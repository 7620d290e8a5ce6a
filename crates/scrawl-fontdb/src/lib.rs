//! Where typefaces come from: discovery and loading for scrawl
//!
//! The layout engine only ever sees a [`FaceMetrics`] implementation. This
//! crate provides the real one: [`FontFace`] keeps the raw font bytes in
//! memory and answers metric queries by parsing on demand, and
//! [`FontCatalog`] turns a directory of font files into an immutable,
//! concurrently-readable list discovered exactly once at startup.

use std::path::Path;

use read_fonts::{FontRef as ReadFontRef, TableProvider};

use scrawl_core::{
    error::{FontLoadError, Result},
    traits::FaceMetrics,
};

pub mod catalog;

pub use catalog::{is_font_file, FontCatalog};

/// A typeface that's been brought into memory, ready to measure and draw
///
/// Stores the raw font data and creates a `FontRef` on demand for parsing.
/// For TTC collections, `face_index` selects which face to use. Owned by a
/// single render call; nothing is cached across calls.
#[derive(Debug)]
pub struct FontFace {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
}

impl FontFace {
    /// Opens a font file from disk and makes it usable
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|_| FontLoadError::FileNotFound(path.to_path_buf()))?;

        Self::from_data_index(data, face_index).map_err(|_| {
            FontLoadError::ParseFailed {
                path: path.to_path_buf(),
            }
            .into()
        })
    }

    /// Turns raw font bytes into something we can work with
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        // Validate the data by attempting a parse before accepting it
        let font_ref = ReadFontRef::from_index(&data, face_index)
            .map_err(|_| FontLoadError::InvalidData)?;

        // head tells us how big the font's design grid is
        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        Ok(FontFace {
            data,
            face_index,
            units_per_em,
        })
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Creates a FontRef on demand for parsing operations
    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Finds which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Measures how wide this glyph is, in font units
    pub fn advance_width(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let hmtx = font.hmtx().ok()?;

                use read_fonts::types::GlyphId;
                let advance = hmtx.advance(GlyphId::new(glyph_id))?;
                Some(advance as f32)
            })
            // Half an em when metrics are missing
            .unwrap_or(self.units_per_em as f32 / 2.0)
    }
}

impl FaceMetrics for FontFace {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        self.glyph_id(ch)
    }

    fn advance_width(&self, glyph_id: u32) -> f32 {
        self.advance_width(glyph_id)
    }
}
