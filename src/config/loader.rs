//! Configuration loading and discovery for `bootscore.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::BootscoreConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name searched for in the working directory and its parents.
pub const CONFIG_FILENAME: &str = "bootscore.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse bootscore.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override template theme directory
    pub template: Option<PathBuf>,
    /// Override stylesheet (child) theme directory
    pub stylesheet: Option<PathBuf>,
    /// Override environment type
    pub environment: Option<String>,
}

/// Find bootscore.toml by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if a bootscore.toml file is found
/// - `None` if no config file is found
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find bootscore.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start directory,
/// useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a bootscore.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns a default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("site/bootscore.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<BootscoreConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<BootscoreConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: BootscoreConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Create a default configuration when no bootscore.toml is found.
///
/// The template theme is the working directory and no child theme is active.
pub fn default_config() -> BootscoreConfig {
    BootscoreConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut BootscoreConfig, overrides: &CliOverrides) {
    if let Some(ref template) = overrides.template {
        config.theme.template = template.clone();
    }

    if let Some(ref stylesheet) = overrides.stylesheet {
        config.theme.stylesheet = Some(stylesheet.clone());
    }

    if let Some(ref environment) = overrides.environment {
        config.site.environment = Some(environment.clone());
    }
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the bootscore.toml file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILENAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[theme]\ntemplate = \"bootscore\"");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[theme]\ntemplate = \"bootscore\"");

        let subdir = temp.path().join("bootscore").join("scss");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            r#"
[theme]
template = "wp-content/themes/bootscore"
stylesheet = "wp-content/themes/bootscore-child"

[site]
abspath = "/srv/www/"
environment = "staging"
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.theme.template, PathBuf::from("wp-content/themes/bootscore"));
        assert_eq!(
            config.theme.stylesheet,
            Some(PathBuf::from("wp-content/themes/bootscore-child"))
        );
        assert_eq!(config.site.abspath, PathBuf::from("/srv/www/"));
        assert_eq!(config.site.environment.as_deref(), Some("staging"));
    }

    #[test]
    #[serial]
    fn test_load_config_discovers_from_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        write_config(temp.path(), "[site]\nurl = \"/blog\"\n");
        let nested = temp.path().join("wp-content");
        fs::create_dir_all(&nested).expect("should create subdirectory");

        let original_dir = env::current_dir().expect("should read current dir");
        env::set_current_dir(&nested).expect("should change dir");

        let result = load_config(None);

        env::set_current_dir(original_dir).expect("should restore dir");

        assert_eq!(result.expect("should load discovered config").site.url, "/blog");
    }

    #[test]
    fn test_load_config_missing_file_is_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join("nonexistent.toml");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[watch]\ndebounce_ms = 0\n");

        let result = load_config(Some(&config_path));
        match result {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("watch.debounce_ms"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides_theme_dirs() {
        let mut config = default_config();
        let overrides = CliOverrides {
            template: Some(PathBuf::from("parent")),
            stylesheet: Some(PathBuf::from("child")),
            ..Default::default()
        };
        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.theme.template, PathBuf::from("parent"));
        assert_eq!(config.theme.stylesheet, Some(PathBuf::from("child")));
        assert!(config.site.environment.is_none());
    }

    #[test]
    fn test_merge_cli_overrides_environment() {
        let mut config = default_config();
        config.site.environment = Some("production".to_string());
        let overrides =
            CliOverrides { environment: Some("development".to_string()), ..Default::default() };
        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.site.environment.as_deref(), Some("development"));
    }

    #[test]
    fn test_merge_empty_overrides_keeps_config() {
        let mut config = default_config();
        config.theme.stylesheet = Some(PathBuf::from("child"));
        merge_cli_overrides(&mut config, &CliOverrides::default());

        assert_eq!(config.theme.stylesheet, Some(PathBuf::from("child")));
    }

    #[test]
    fn test_resolve_path_absolute() {
        let root = Path::new("/project");
        assert_eq!(resolve_path(root, Path::new("/other/path")), PathBuf::from("/other/path"));
    }

    #[test]
    fn test_resolve_path_relative() {
        let root = Path::new("/project");
        assert_eq!(
            resolve_path(root, Path::new("themes/bootscore")),
            PathBuf::from("/project/themes/bootscore")
        );
    }

    #[test]
    fn test_project_root() {
        let config_path = Path::new("/project/bootscore.toml");
        assert_eq!(project_root(config_path), Some(Path::new("/project")));
    }
}
