//! `theme.json` document model.
//!
//! Only the fields the export fills are modelled. Field names follow the
//! block editor's camelCase schema.

use serde::{Deserialize, Serialize};

use crate::palette::DesignTokens;

/// Schema version written to `theme.json`.
pub const THEME_JSON_VERSION: u32 = 2;

/// Font family reference applied to the whole site.
pub const DEFAULT_FONT_FAMILY_REF: &str = "var(--wp--preset--font-family--default-font-family)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeJson {
    pub version: u32,
    pub styles: Styles,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Styles {
    pub color: StyleColor,
    pub typography: StyleTypography,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleColor {
    pub text: String,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTypography {
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub typography: SettingsTypography,
    pub color: SettingsColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsTypography {
    pub font_families: Vec<FontFamily>,
}

/// One entry of `settings.typography.fontFamilies`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFamily {
    pub font_family: String,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsColor {
    pub palette: Vec<PaletteColor>,
}

/// One entry of `settings.color.palette`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: String,
    pub slug: String,
    pub color: String,
}

impl ThemeJson {
    /// Assemble the document from extracted tokens.
    pub fn from_tokens(tokens: &DesignTokens) -> Self {
        Self {
            version: THEME_JSON_VERSION,
            styles: Styles {
                color: StyleColor {
                    text: tokens.body_color.clone(),
                    background: tokens.body_bg.clone(),
                },
                typography: StyleTypography { font_family: DEFAULT_FONT_FAMILY_REF.to_string() },
            },
            settings: Settings {
                typography: SettingsTypography {
                    font_families: tokens
                        .font_families()
                        .iter()
                        .map(|(name, slug, family)| FontFamily {
                            font_family: family.to_string(),
                            slug: slug.to_string(),
                            name: name.to_string(),
                        })
                        .collect(),
                },
                color: SettingsColor {
                    palette: tokens
                        .palette()
                        .iter()
                        .map(|(name, slug, color)| PaletteColor {
                            name: name.to_string(),
                            slug: slug.to_string(),
                            color: color.to_string(),
                        })
                        .collect(),
                },
            },
        }
    }

    /// Serialize as compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::tokens::sample_properties;

    fn document() -> ThemeJson {
        ThemeJson::from_tokens(&DesignTokens::from_properties(&sample_properties()).unwrap())
    }

    #[test]
    fn test_styles_use_body_tokens() {
        let doc = document();
        assert_eq!(doc.version, 2);
        assert_eq!(doc.styles.color.text, "value-18");
        assert_eq!(doc.styles.color.background, "value-19");
        assert_eq!(doc.styles.typography.font_family, DEFAULT_FONT_FAMILY_REF);
    }

    #[test]
    fn test_font_families() {
        let doc = document();
        let families = &doc.settings.typography.font_families;
        assert_eq!(families.len(), 3);
        assert_eq!(families[0].name, "Default Bootstrap Font");
        assert_eq!(families[0].slug, "default-font-family");
        assert_eq!(families[0].font_family, "value-15");
        assert_eq!(families[2].slug, "font-monospace");
    }

    #[test]
    fn test_palette_has_fifteen_entries() {
        let doc = document();
        let palette = &doc.settings.color.palette;
        assert_eq!(palette.len(), 15);
        assert_eq!(palette[0], PaletteColor {
            name: "Primary".to_string(),
            slug: "primary".to_string(),
            color: "value-0".to_string(),
        });
        assert_eq!(palette[14].name, "Gray Dark");
        assert_eq!(palette[14].color, "value-14");
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&document().to_json().unwrap()).unwrap();
        assert_eq!(json["version"], 2);
        assert_eq!(
            json["styles"]["typography"]["fontFamily"],
            "var(--wp--preset--font-family--default-font-family)"
        );
        assert_eq!(json["settings"]["typography"]["fontFamilies"][1]["fontFamily"], "value-16");
        assert_eq!(json["settings"]["color"]["palette"][3]["slug"], "indigo");
    }
}
