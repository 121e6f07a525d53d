//! Bootscore build - SCSS compile cache and palette export for Bootscore themes
//!
//! This library provides functionality to:
//! - Resolve the active theme's sources, preferring a child theme's own SCSS
//! - Skip recompilation while the sources' modification-time signature is
//!   not newer than the stored marker
//! - Compile `scss/main.scss` to a compressed `css/main.css` (with a source
//!   map in development mode)
//! - Export the compiled Bootstrap palette and fonts to `theme.json`

pub mod build;
pub mod cli;
pub mod config;
pub mod environment;
pub mod logging;
pub mod palette;
pub mod settings;
pub mod theme;
pub mod watch;
