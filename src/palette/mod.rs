//! Palette export
//!
//! Reads the compiled stylesheet, picks out the Bootstrap custom properties
//! the block editor needs, and writes them to the active theme's
//! `theme.json`. The export never triggers a style build; it works on
//! whatever `css/main.css` currently holds.

pub mod document;
pub mod extract;
pub mod tokens;

pub use document::*;
pub use extract::*;
pub use tokens::*;

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::theme::ThemeLayout;

/// Error during palette export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PaletteError {
    /// The compiled stylesheet does not exist yet
    #[error("compiled stylesheet not found: {}", .0.display())]
    ArtifactMissing(PathBuf),
    /// The stylesheet could not be parsed
    #[error("CSS parse error: {0}")]
    Parse(String),
    /// A required custom property is absent
    #[error("missing required design token `{0}`")]
    MissingToken(&'static str),
    /// IO error
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct PaletteExport {
    /// Where `theme.json` was written
    pub path: PathBuf,
    pub document: ThemeJson,
}

/// Build the palette document from compiled CSS text.
pub fn palette_from_css(css: &str) -> Result<ThemeJson, PaletteError> {
    let properties = extract_custom_properties(css, &TOKEN_NAMES)?;
    debug!(found = properties.len(), expected = TOKEN_NAMES.len(), "extracted design tokens");
    let tokens = DesignTokens::from_properties(&properties)?;
    Ok(ThemeJson::from_tokens(&tokens))
}

/// Export `theme.json` for the active theme.
///
/// Nothing is written unless every token was found.
pub fn export_palette(layout: &ThemeLayout) -> Result<PaletteExport, PaletteError> {
    let css_path = layout.main_css();
    if !css_path.is_file() {
        return Err(PaletteError::ArtifactMissing(css_path));
    }

    let css = fs::read_to_string(&css_path)
        .map_err(|source| PaletteError::Io { path: css_path.clone(), source })?;
    let document = palette_from_css(&css)?;
    let json = document.to_json()?;

    let path = layout.theme_json();
    fs::write(&path, json).map_err(|source| PaletteError::Io { path: path.clone(), source })?;
    info!(path = %path.display(), "theme.json written");

    Ok(PaletteExport { path, document })
}
