//! Environment type of the site being built.
//!
//! Mirrors the host platform's `local`, `development`, `staging` and
//! `production` environment types. Only `development` disables the
//! freshness cache and turns on source maps.

use std::fmt;

/// Environment variable the host platform reads the environment type from.
pub const ENVIRONMENT_VAR: &str = "WP_ENVIRONMENT_TYPE";

/// Site environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvironmentType {
    Local,
    Development,
    Staging,
    /// Fallback for unset or unrecognised values
    #[default]
    Production,
}

impl EnvironmentType {
    /// Parse an environment type, falling back to `Production` for
    /// anything unrecognised.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "development" => Self::Development,
            "staging" => Self::Staging,
            _ => Self::Production,
        }
    }

    /// Resolve the environment type from the first value that is set.
    ///
    /// Candidates are given highest precedence first (CLI flag, environment
    /// variable, config file).
    pub fn resolve<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        candidates
            .into_iter()
            .flatten()
            .find(|v| !v.trim().is_empty())
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// Whether caching is disabled and source maps are written.
    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for EnvironmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(EnvironmentType::parse("local"), EnvironmentType::Local);
        assert_eq!(EnvironmentType::parse("development"), EnvironmentType::Development);
        assert_eq!(EnvironmentType::parse("staging"), EnvironmentType::Staging);
        assert_eq!(EnvironmentType::parse("production"), EnvironmentType::Production);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(EnvironmentType::parse(" Development "), EnvironmentType::Development);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_production() {
        assert_eq!(EnvironmentType::parse("dev"), EnvironmentType::Production);
        assert_eq!(EnvironmentType::parse(""), EnvironmentType::Production);
    }

    #[test]
    fn test_resolve_takes_first_set_value() {
        let env = EnvironmentType::resolve([None, Some("development"), Some("staging")]);
        assert_eq!(env, EnvironmentType::Development);
    }

    #[test]
    fn test_resolve_skips_blank_values() {
        let env = EnvironmentType::resolve([Some("  "), Some("local")]);
        assert_eq!(env, EnvironmentType::Local);
    }

    #[test]
    fn test_resolve_defaults_to_production() {
        assert_eq!(EnvironmentType::resolve([None, None]), EnvironmentType::Production);
    }

    #[test]
    fn test_only_development_is_development() {
        assert!(EnvironmentType::Development.is_development());
        assert!(!EnvironmentType::Local.is_development());
        assert!(!EnvironmentType::Staging.is_development());
        assert!(!EnvironmentType::Production.is_development());
    }
}
