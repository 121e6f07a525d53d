//! Custom property extraction from compiled CSS.
//!
//! Uses lightningcss to parse the stylesheet, then walks every style rule,
//! including those nested in at-rules, collecting custom property
//! declarations.

use std::collections::HashMap;

use lightningcss::declaration::DeclarationBlock;
use lightningcss::printer::PrinterOptions;
use lightningcss::properties::Property;
use lightningcss::rules::{CssRule, CssRuleList};
use lightningcss::stylesheet::{ParserOptions, StyleSheet};

use crate::palette::PaletteError;

/// Collect the values of the allow-listed custom properties in `css`.
///
/// Declarations are visited in source order; a later declaration of the
/// same property replaces an earlier one.
pub fn extract_custom_properties(
    css: &str,
    allow_list: &[&str],
) -> Result<HashMap<String, String>, PaletteError> {
    let options = ParserOptions { error_recovery: true, ..ParserOptions::default() };
    let sheet =
        StyleSheet::parse(css, options).map_err(|e| PaletteError::Parse(e.to_string()))?;

    let mut found = HashMap::new();
    collect_rules(&sheet.rules, allow_list, &mut found)?;
    Ok(found)
}

fn collect_rules(
    rules: &CssRuleList<'_>,
    allow_list: &[&str],
    found: &mut HashMap<String, String>,
) -> Result<(), PaletteError> {
    for rule in &rules.0 {
        match rule {
            CssRule::Style(style) => {
                collect_declarations(&style.declarations, allow_list, found)?;
                collect_rules(&style.rules, allow_list, found)?;
            }
            CssRule::Nesting(nesting) => {
                collect_declarations(&nesting.style.declarations, allow_list, found)?;
                collect_rules(&nesting.style.rules, allow_list, found)?;
            }
            CssRule::Media(media) => collect_rules(&media.rules, allow_list, found)?,
            CssRule::Supports(supports) => collect_rules(&supports.rules, allow_list, found)?,
            CssRule::LayerBlock(layer) => collect_rules(&layer.rules, allow_list, found)?,
            CssRule::Container(container) => collect_rules(&container.rules, allow_list, found)?,
            _ => {}
        }
    }
    Ok(())
}

fn collect_declarations(
    block: &DeclarationBlock<'_>,
    allow_list: &[&str],
    found: &mut HashMap<String, String>,
) -> Result<(), PaletteError> {
    for property in block.declarations.iter().chain(block.important_declarations.iter()) {
        if !matches!(property, Property::Custom(_)) {
            continue;
        }

        let id = property.property_id();
        let name = id.name();
        if !allow_list.contains(&name) {
            continue;
        }

        let value = property
            .value_to_css_string(PrinterOptions::default())
            .map_err(|e| PaletteError::Parse(e.to_string()))?;
        found.insert(name.to_string(), value.trim().to_string());
    }
    Ok(())
}
