//! One-time font discovery
//!
//! Discovery happens exactly once: [`FontCatalog::scan`] reads the
//! directory, filters to recognized font-file extensions, and the resulting
//! list is immutable from then on. Nothing rescans storage per render.
//! Hosts that run calls in parallel share the catalog as a read-only
//! value; faces themselves are loaded per call.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::FontFace;
use scrawl_core::error::{FontLoadError, Result};

/// Recognized font-file extensions, matched case-insensitively
const FONT_EXTENSIONS: [&str; 3] = ["ttf", "ttc", "otf"];

/// Does this file name look like a loadable font?
pub fn is_font_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// An immutable list of font files discovered in one directory
#[derive(Debug)]
pub struct FontCatalog {
    dir: PathBuf,
    names: Vec<String>,
}

impl FontCatalog {
    /// Scan a directory once and keep every recognized font file
    ///
    /// Fails with `DirectoryUnreadable` when the directory cannot be read
    /// and `NoFontsFound` when the filter leaves nothing usable.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|_| FontLoadError::DirectoryUnreadable {
            path: dir.to_path_buf(),
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_font_file(name))
            .collect();

        // Directory iteration order is platform-dependent; sort so that
        // index-based access is stable.
        names.sort();

        if names.is_empty() {
            return Err(FontLoadError::NoFontsFound {
                dir: dir.to_path_buf(),
            }
            .into());
        }

        log::debug!("Discovered {} font file(s) in {}", names.len(), dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            names,
        })
    }

    /// The directory this catalog was scanned from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File names of every discovered font
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Load a typeface by file name
    pub fn load(&self, name: &str) -> Result<FontFace> {
        if !self.names.iter().any(|n| n == name) {
            return Err(FontLoadError::FileNotFound(self.dir.join(name)).into());
        }
        FontFace::from_file(self.dir.join(name))
    }

    /// Load the i-th typeface in name order
    pub fn load_index(&self, index: usize) -> Result<FontFace> {
        let name = self
            .names
            .get(index)
            .ok_or_else(|| FontLoadError::NoFontsFound {
                dir: self.dir.clone(),
            })?;
        FontFace::from_file(self.dir.join(name))
    }

    /// Load one typeface chosen uniformly at random
    pub fn pick(&self, rng: &mut impl Rng) -> Result<FontFace> {
        self.load_index(rng.random_range(0..self.names.len()))
    }
}
