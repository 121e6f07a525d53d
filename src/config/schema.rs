//! Configuration schema types for `bootscore.toml`
//!
//! Defines the structure and validation rules for a theme build project.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human readable output
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Theme location section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Template (parent) theme directory
    #[serde(default = "default_template")]
    pub template: PathBuf,
    /// Stylesheet (child) theme directory, when a child theme is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<PathBuf>,
}

fn default_template() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { template: default_template(), stylesheet: None }
    }
}

/// Site section, mirrors what the host platform knows about the install
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Relative site URL (`""` for a site served at the domain root)
    #[serde(default)]
    pub url: String,
    /// Absolute install path of the site, trailing separator included
    #[serde(default = "default_abspath")]
    pub abspath: PathBuf,
    /// Environment type (local, development, staging, production)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

fn default_abspath() -> PathBuf {
    PathBuf::from("/")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { url: String::new(), abspath: default_abspath(), environment: None }
    }
}

/// Persisted settings section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// JSON file holding per-theme settings
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,
}

fn default_settings_path() -> PathBuf {
    PathBuf::from(".bootscore/settings.json")
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self { path: default_settings_path() }
    }
}

/// Watch mode settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Clear terminal between rebuilds
    #[serde(default = "default_true")]
    pub clear_screen: bool,
    /// Re-export theme.json after every successful rebuild
    #[serde(default)]
    pub palette: bool,
}

fn default_debounce_ms() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 100, clear_screen: true, palette: false }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: LogFormat::default() }
    }
}

/// Complete bootscore.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootscoreConfig {
    /// Theme directories
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Site URL and install path
    #[serde(default)]
    pub site: SiteConfig,
    /// Settings store location
    #[serde(default)]
    pub settings: SettingsConfig,
    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "watch.debounce_ms")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bootscore.toml: '{}' {}", self.field, self.message)
    }
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl BootscoreConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.theme.template.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "theme.template".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if let Some(stylesheet) = &self.theme.stylesheet {
            if stylesheet.as_os_str().is_empty() {
                errors.push(ConfigValidationError {
                    field: "theme.stylesheet".to_string(),
                    message: "must be a non-empty path when set".to_string(),
                });
            }
        }

        if self.site.url.ends_with('/') {
            errors.push(ConfigValidationError {
                field: "site.url".to_string(),
                message: "must not end with '/'".to_string(),
            });
        }

        if self.watch.debounce_ms == 0 {
            errors.push(ConfigValidationError {
                field: "watch.debounce_ms".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            errors.push(ConfigValidationError {
                field: "logging.level".to_string(),
                message: format!("must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: BootscoreConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme.template, PathBuf::from("."));
        assert!(config.theme.stylesheet.is_none());
        assert_eq!(config.site.url, "");
        assert_eq!(config.settings.path, PathBuf::from(".bootscore/settings.json"));
        assert_eq!(config.watch.debounce_ms, 100);
        assert!(config.watch.clear_screen);
        assert!(!config.watch.palette);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
[theme]
template = "themes/bootscore"
stylesheet = "themes/bootscore-child"

[site]
url = "/blog"
abspath = "/var/www/html/"
environment = "development"

[settings]
path = "state/settings.json"

[watch]
debounce_ms = 250
clear_screen = false
palette = true

[logging]
level = "debug"
format = "json"
"#;
        let config: BootscoreConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme.template, PathBuf::from("themes/bootscore"));
        assert_eq!(config.theme.stylesheet, Some(PathBuf::from("themes/bootscore-child")));
        assert_eq!(config.site.url, "/blog");
        assert_eq!(config.site.abspath, PathBuf::from("/var/www/html/"));
        assert_eq!(config.site.environment.as_deref(), Some("development"));
        assert_eq!(config.settings.path, PathBuf::from("state/settings.json"));
        assert_eq!(config.watch.debounce_ms, 250);
        assert!(!config.watch.clear_screen);
        assert!(config.watch.palette);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.is_valid());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = BootscoreConfig::default();
        config.theme.template = PathBuf::new();
        config.site.url = "/blog/".to_string();
        config.watch.debounce_ms = 0;
        config.logging.level = "loud".to_string();

        let errors = config.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["theme.template", "site.url", "watch.debounce_ms", "logging.level"]);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigValidationError {
            field: "watch.debounce_ms".to_string(),
            message: "must be a positive integer".to_string(),
        };
        assert_eq!(err.to_string(), "bootscore.toml: 'watch.debounce_ms' must be a positive integer");
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let result: Result<BootscoreConfig, _> = toml::from_str("[logging]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }
}
