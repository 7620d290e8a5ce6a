//! Error types for scrawl

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrawlError>;

/// Main error type for scrawl
#[derive(Debug, Error)]
pub enum ScrawlError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Layout errors
///
/// The layout stage can only fail on its input contract; all internal
/// arithmetic is self-consistent by construction.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Cannot render empty text")]
    EmptyInput,
}

/// Font discovery and loading errors
///
/// These are resource precondition failures: without a usable typeface the
/// render cannot proceed, so they abort the operation with the offending
/// path attached.
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font directory unreadable: {}", .path.display())]
    DirectoryUnreadable { path: PathBuf },

    #[error("Font file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Font file unparsable: {}", .path.display())]
    ParseFailed { path: PathBuf },

    #[error("Invalid font data")]
    InvalidData,

    #[error("No font files in directory: {}", .dir.display())]
    NoFontsFound { dir: PathBuf },
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_carry_context() {
        let err = ScrawlError::from(FontLoadError::ParseFailed {
            path: PathBuf::from("fonts/Broken.ttf"),
        });
        assert!(err.to_string().contains("Broken.ttf"));

        let err = ScrawlError::from(LayoutError::EmptyInput);
        assert!(err.to_string().contains("empty text"));
    }
}
