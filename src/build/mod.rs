//! Style build pipeline
//!
//! Compiles a theme's SCSS into a single minified stylesheet, skipping the
//! work when nothing changed since the last build.
//!
//! # Overview
//!
//! - **Freshness**: sum the modification times of the tracked sources
//! - **Decision**: compare the sum with the marker stored for the theme
//! - **Compilation**: run the compiler and write `css/main.css` (plus
//!   `css/main.map` in development mode), then store the new marker
//!
//! # Example
//!
//! ```ignore
//! use bootscore_build::build::{BuildContext, StyleBuild};
//! use bootscore_build::settings::JsonSettingsStore;
//!
//! let context = BuildContext::new(layout);
//! let mut store = JsonSettingsStore::open(".bootscore/settings.json", "bootscore")?;
//! let outcome = StyleBuild::new(context).run(&mut store)?;
//! println!("{}", outcome.summary());
//! ```

pub mod compiler;
pub mod context;
pub mod freshness;
pub mod pipeline;
pub mod result;
pub mod sourcemap;

pub use compiler::*;
pub use context::*;
pub use freshness::*;
pub use pipeline::*;
pub use result::*;
pub use sourcemap::*;
