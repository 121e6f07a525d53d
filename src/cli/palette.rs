//! Palette command implementation

use std::process::ExitCode;

use super::{Session, EXIT_ERROR, EXIT_SUCCESS};
use crate::palette::{export_palette, PaletteError};

/// Run the palette command
pub fn run_palette(session: &Session) -> ExitCode {
    let context = session.context();

    match export_palette(context.layout()) {
        Ok(export) => {
            println!(
                "Wrote {} ({} colors, {} font families)",
                export.path.display(),
                export.document.settings.color.palette.len(),
                export.document.settings.typography.font_families.len()
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(PaletteError::ArtifactMissing(path)) => {
            eprintln!("Error: Compiled stylesheet not found: {}", path.display());
            eprintln!("Run 'bsbuild build' first");
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            eprintln!("Palette export error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
