//! Build context containing the theme layout and site information for a build.

use std::path::{Path, PathBuf};

use crate::build::SourceMapOptions;
use crate::config::loader::resolve_path;
use crate::config::BootscoreConfig;
use crate::environment::EnvironmentType;
use crate::theme::ThemeLayout;

/// Build context containing theme paths and environment for a build operation.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Template and stylesheet directories
    layout: ThemeLayout,
    /// Environment the site runs in
    environment: EnvironmentType,
    /// Relative site URL, used for source map URLs
    site_url: String,
    /// Site install path, used for source map URLs
    abspath: PathBuf,
    /// Rebuild regardless of the freshness marker
    force: bool,
}

impl BuildContext {
    /// Create a new build context for a production site served at the root.
    pub fn new(layout: ThemeLayout) -> Self {
        Self {
            layout,
            environment: EnvironmentType::default(),
            site_url: String::new(),
            abspath: PathBuf::from("/"),
            force: false,
        }
    }

    /// Create a build context from configuration.
    ///
    /// Relative paths in the config resolve against `project_root`.
    pub fn from_config(
        config: &BootscoreConfig,
        project_root: &Path,
        environment: EnvironmentType,
    ) -> Self {
        Self {
            layout: ThemeLayout::from_config(config, project_root),
            environment,
            site_url: config.site.url.clone(),
            abspath: resolve_path(project_root, &config.site.abspath),
            force: false,
        }
    }

    pub fn layout(&self) -> &ThemeLayout {
        &self.layout
    }

    pub fn environment(&self) -> EnvironmentType {
        self.environment
    }

    /// Whether development mode (no caching, source maps) is active.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    /// Whether force mode is enabled.
    pub fn is_forced(&self) -> bool {
        self.force
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn abspath(&self) -> &Path {
        &self.abspath
    }

    /// Set the environment type.
    pub fn with_environment(mut self, environment: EnvironmentType) -> Self {
        self.environment = environment;
        self
    }

    /// Set force mode.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Set the relative site URL and install path.
    pub fn with_site(mut self, site_url: impl Into<String>, abspath: impl Into<PathBuf>) -> Self {
        self.site_url = site_url.into();
        self.abspath = abspath.into();
        self
    }

    /// Source map options for this build, only in development mode.
    pub fn source_map_options(&self) -> Option<SourceMapOptions> {
        self.is_development().then(|| {
            SourceMapOptions::derive(&self.site_url, &self.abspath, &self.layout.main_css())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ThemeLayout {
        ThemeLayout::new("/var/www/html/wp-content/themes/bootscore", None)
    }

    #[test]
    fn test_build_context_new() {
        let ctx = BuildContext::new(layout());
        assert_eq!(ctx.environment(), EnvironmentType::Production);
        assert!(!ctx.is_development());
        assert!(!ctx.is_forced());
        assert_eq!(ctx.site_url(), "");
    }

    #[test]
    fn test_build_context_with_force() {
        let ctx = BuildContext::new(layout()).with_force(true);
        assert!(ctx.is_forced());
    }

    #[test]
    fn test_no_source_map_outside_development() {
        let ctx = BuildContext::new(layout()).with_environment(EnvironmentType::Staging);
        assert!(ctx.source_map_options().is_none());
    }

    #[test]
    fn test_source_map_options_in_development() {
        let ctx = BuildContext::new(layout())
            .with_environment(EnvironmentType::Development)
            .with_site("/blog", "/var/www/html/");

        let opts = ctx.source_map_options().unwrap();
        assert_eq!(opts.source_map_url, "/blog/wp-content/themes/bootscore/css/main.map");
        assert_eq!(opts.base_path, "/var/www/html");
        assert_eq!(opts.source_root, "/blog/");
    }

    #[test]
    fn test_from_config_resolves_paths() {
        let mut config = BootscoreConfig::default();
        config.theme.template = PathBuf::from("themes/bootscore");
        config.site.url = "/site".to_string();
        config.site.abspath = PathBuf::from("public/");

        let ctx = BuildContext::from_config(&config, Path::new("/srv"), EnvironmentType::Local);
        assert_eq!(ctx.layout().template_dir(), Path::new("/srv/themes/bootscore"));
        assert_eq!(ctx.abspath(), Path::new("/srv/public/"));
        assert_eq!(ctx.site_url(), "/site");
        assert_eq!(ctx.environment(), EnvironmentType::Local);
    }
}
