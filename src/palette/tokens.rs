//! Design tokens read from the compiled stylesheet.

use std::collections::HashMap;

use crate::palette::PaletteError;

/// Custom properties the palette export needs, in lookup order.
pub const TOKEN_NAMES: [&str; 20] = [
    "--bs-primary",
    "--bs-secondary",
    "--bs-blue",
    "--bs-indigo",
    "--bs-purple",
    "--bs-pink",
    "--bs-red",
    "--bs-orange",
    "--bs-yellow",
    "--bs-green",
    "--bs-teal",
    "--bs-cyan",
    "--bs-white",
    "--bs-gray",
    "--bs-gray-dark",
    "--bs-body-font-family",
    "--bs-font-sans-serif",
    "--bs-font-monospace",
    "--bs-body-color",
    "--bs-body-bg",
];

/// Values of every allow-listed custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignTokens {
    pub primary: String,
    pub secondary: String,
    pub blue: String,
    pub indigo: String,
    pub purple: String,
    pub pink: String,
    pub red: String,
    pub orange: String,
    pub yellow: String,
    pub green: String,
    pub teal: String,
    pub cyan: String,
    pub white: String,
    pub gray: String,
    pub gray_dark: String,
    pub body_font_family: String,
    pub font_sans_serif: String,
    pub font_monospace: String,
    pub body_color: String,
    pub body_bg: String,
}

impl DesignTokens {
    /// Populate every field from extracted properties.
    ///
    /// Fails on the first name of [`TOKEN_NAMES`] that is absent or declared
    /// with an empty value.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self, PaletteError> {
        let is_blank = |name: &str| properties.get(name).map_or(true, |v| v.trim().is_empty());
        if let Some(missing) = TOKEN_NAMES.iter().find(|name| is_blank(name)) {
            return Err(PaletteError::MissingToken(*missing));
        }

        let get = |name: &str| properties[name].clone();
        Ok(Self {
            primary: get("--bs-primary"),
            secondary: get("--bs-secondary"),
            blue: get("--bs-blue"),
            indigo: get("--bs-indigo"),
            purple: get("--bs-purple"),
            pink: get("--bs-pink"),
            red: get("--bs-red"),
            orange: get("--bs-orange"),
            yellow: get("--bs-yellow"),
            green: get("--bs-green"),
            teal: get("--bs-teal"),
            cyan: get("--bs-cyan"),
            white: get("--bs-white"),
            gray: get("--bs-gray"),
            gray_dark: get("--bs-gray-dark"),
            body_font_family: get("--bs-body-font-family"),
            font_sans_serif: get("--bs-font-sans-serif"),
            font_monospace: get("--bs-font-monospace"),
            body_color: get("--bs-body-color"),
            body_bg: get("--bs-body-bg"),
        })
    }

    /// Palette colors as `(name, slug, color)`, in display order.
    pub fn palette(&self) -> [(&'static str, &'static str, &str); 15] {
        [
            ("Primary", "primary", self.primary.as_str()),
            ("Secondary", "secondary", self.secondary.as_str()),
            ("Blue", "blue", self.blue.as_str()),
            ("Indigo", "indigo", self.indigo.as_str()),
            ("Purple", "purple", self.purple.as_str()),
            ("Pink", "pink", self.pink.as_str()),
            ("Red", "red", self.red.as_str()),
            ("Orange", "orange", self.orange.as_str()),
            ("Yellow", "yellow", self.yellow.as_str()),
            ("Green", "green", self.green.as_str()),
            ("Teal", "teal", self.teal.as_str()),
            ("Cyan", "cyan", self.cyan.as_str()),
            ("White", "white", self.white.as_str()),
            ("Gray", "gray", self.gray.as_str()),
            ("Gray Dark", "gray-dark", self.gray_dark.as_str()),
        ]
    }

    /// Font families as `(name, slug, family)`, in display order.
    pub fn font_families(&self) -> [(&'static str, &'static str, &str); 3] {
        [
            ("Default Bootstrap Font", "default-font-family", self.body_font_family.as_str()),
            ("Sans Serif", "font-sans-serif", self.font_sans_serif.as_str()),
            ("Monospace", "font-monospace", self.font_monospace.as_str()),
        ]
    }
}

#[cfg(test)]
pub(crate) fn sample_properties() -> HashMap<String, String> {
    TOKEN_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), format!("value-{i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_names_are_unique() {
        let mut names = TOKEN_NAMES.to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TOKEN_NAMES.len());
    }

    #[test]
    fn test_from_properties_populates_fields() {
        let tokens = DesignTokens::from_properties(&sample_properties()).unwrap();
        assert_eq!(tokens.primary, "value-0");
        assert_eq!(tokens.gray_dark, "value-14");
        assert_eq!(tokens.body_font_family, "value-15");
        assert_eq!(tokens.body_bg, "value-19");
    }

    #[test]
    fn test_missing_token_is_reported_by_name() {
        let mut props = sample_properties();
        props.remove("--bs-primary");

        let err = DesignTokens::from_properties(&props).unwrap_err();
        assert!(matches!(err, PaletteError::MissingToken("--bs-primary")));
        assert_eq!(err.to_string(), "missing required design token `--bs-primary`");
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut props = sample_properties();
        props.insert("--bs-secondary".to_string(), "  ".to_string());
        props.insert("--bs-primary".to_string(), String::new());

        let err = DesignTokens::from_properties(&props).unwrap_err();
        assert!(matches!(err, PaletteError::MissingToken("--bs-primary")));
    }

    #[test]
    fn test_first_missing_token_in_declared_order() {
        let mut props = sample_properties();
        props.remove("--bs-body-bg");
        props.remove("--bs-teal");

        let err = DesignTokens::from_properties(&props).unwrap_err();
        assert!(matches!(err, PaletteError::MissingToken("--bs-teal")));
    }

    #[test]
    fn test_palette_order() {
        let tokens = DesignTokens::from_properties(&sample_properties()).unwrap();
        let slugs: Vec<_> = tokens.palette().iter().map(|(_, slug, _)| *slug).collect();
        assert_eq!(
            slugs,
            vec![
                "primary", "secondary", "blue", "indigo", "purple", "pink", "red", "orange",
                "yellow", "green", "teal", "cyan", "white", "gray", "gray-dark"
            ]
        );
    }
}
