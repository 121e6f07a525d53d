//! Theme directory layout and child/parent precedence.
//!
//! A site has one template (parent) theme and optionally an active
//! stylesheet (child) theme. The child only takes over the style build when
//! it carries its own `scss/main.scss`; otherwise the parent's sources are
//! compiled.

use std::path::{Path, PathBuf};

use crate::config::loader::resolve_path;
use crate::config::BootscoreConfig;

/// Root SCSS file, relative to a theme root.
pub const MAIN_SCSS: &str = "scss/main.scss";
/// Compiled stylesheet, relative to a theme root.
pub const MAIN_CSS: &str = "css/main.css";
/// Source map written next to the compiled stylesheet in development mode.
pub const MAIN_MAP: &str = "css/main.map";
/// Palette document, relative to the active theme root.
pub const THEME_JSON: &str = "theme.json";
/// Upstream framework entry whose timestamp is part of every signature.
pub const FRAMEWORK_ENTRY: &str = "scss/bootstrap/bootstrap.scss";

const SCSS_DIR: &str = "scss";

/// Template and stylesheet directories of the active theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeLayout {
    template: PathBuf,
    stylesheet: Option<PathBuf>,
}

impl ThemeLayout {
    /// Create a layout from a template directory and an optional child
    /// theme directory.
    pub fn new(template: impl Into<PathBuf>, stylesheet: Option<PathBuf>) -> Self {
        Self { template: template.into(), stylesheet }
    }

    /// Build a layout from config, resolving relative paths against the
    /// project root.
    pub fn from_config(config: &BootscoreConfig, project_root: &Path) -> Self {
        Self {
            template: resolve_path(project_root, &config.theme.template),
            stylesheet: config.theme.stylesheet.as_deref().map(|s| resolve_path(project_root, s)),
        }
    }

    /// Template (parent) theme directory.
    pub fn template_dir(&self) -> &Path {
        &self.template
    }

    /// Whether a child theme distinct from the template is active.
    pub fn is_child_theme(&self) -> bool {
        matches!(&self.stylesheet, Some(s) if *s != self.template)
    }

    /// Whether the child theme carries its own root SCSS file.
    pub fn child_has_scss(&self) -> bool {
        self.stylesheet_dir().join(MAIN_SCSS).is_file()
    }

    /// Active theme directory: the child theme if one is active, else the
    /// template.
    pub fn stylesheet_dir(&self) -> &Path {
        match &self.stylesheet {
            Some(s) if self.is_child_theme() => s.as_path(),
            _ => self.template.as_path(),
        }
    }

    /// Whether the child theme's sources drive the style build.
    pub fn uses_child_sources(&self) -> bool {
        self.is_child_theme() && self.child_has_scss()
    }

    /// Directory holding the sources for the style build.
    pub fn source_root(&self) -> &Path {
        if self.uses_child_sources() {
            self.stylesheet_dir()
        } else {
            self.template.as_path()
        }
    }

    /// Directory scanned for the freshness signature.
    pub fn scss_dir(&self) -> PathBuf {
        self.source_root().join(SCSS_DIR)
    }

    pub fn main_scss(&self) -> PathBuf {
        self.source_root().join(MAIN_SCSS)
    }

    pub fn main_css(&self) -> PathBuf {
        self.source_root().join(MAIN_CSS)
    }

    pub fn main_map(&self) -> PathBuf {
        self.source_root().join(MAIN_MAP)
    }

    /// Where the palette document is written.
    pub fn theme_json(&self) -> PathBuf {
        self.stylesheet_dir().join(THEME_JSON)
    }

    /// Framework entry file in the template theme.
    pub fn framework_entry(&self) -> PathBuf {
        self.template.join(FRAMEWORK_ENTRY)
    }

    /// Import search paths handed to the compiler.
    ///
    /// A child theme building its own sources falls back to the template's
    /// SCSS tree for anything it does not override.
    pub fn import_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.scss_dir()];
        if self.uses_child_sources() {
            paths.push(self.template.join(SCSS_DIR));
        }
        paths
    }

    /// Name used to scope persisted settings to the active theme.
    pub fn settings_scope(&self) -> String {
        self.stylesheet_dir()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "default".to_string())
    }
}
