use std::collections::BTreeMap;

use serde::Deserialize;

use crate::builtin_templates;
use crate::error::{Error, Result};

/// Theme used when neither the command line nor the settings name one.
pub const DEFAULT_THEME: &str = "Dark Tech";

/// A named visual variant of the presentation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    /// Human-readable name (e.g., "Dark Tech")
    pub name: String,

    /// CSS class applied to the document body (e.g., "theme-dark-tech")
    #[serde(rename = "className")]
    pub class_name: String,
}

/// Read-only lookup table from normalized theme key to theme.
///
/// Built once at startup and handed to the renderer by reference.
#[derive(Debug, Clone)]
pub struct ThemeTable {
    themes: BTreeMap<String, ThemeConfig>,
}

impl ThemeTable {
    /// Load the table shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(builtin_templates::themes()?)
    }

    /// Parse a table of the form `{ "dark-tech": { "name": .., "className": .. } }`.
    pub fn from_json(input: &str) -> Result<Self> {
        let themes: BTreeMap<String, ThemeConfig> =
            serde_json::from_str(input).map_err(Error::ThemeTable)?;

        tracing::debug!(
            keys = ?themes.keys().collect::<Vec<_>>(),
            "loaded theme table"
        );

        Ok(Self { themes })
    }

    /// Resolve a free-text theme name such as "Dark Tech".
    pub fn resolve(&self, name: &str) -> Result<&ThemeConfig> {
        self.themes
            .get(&normalize_key(name))
            .ok_or_else(|| Error::UnknownTheme {
                name: name.to_string(),
            })
    }

    /// Iterate over `(key, theme)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThemeConfig)> {
        self.themes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Map a display name to its table key.
///
/// Lowercases and replaces only the first space, so "Dark Tech" becomes
/// "dark-tech" while "Very Dark Tech" becomes "very-dark tech".
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase().replacen(' ', "-", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Dark Tech", "theme-dark-tech" ; "display name")]
    #[test_case("dark-tech", "theme-dark-tech" ; "key")]
    #[test_case("corporate", "theme-corporate" ; "lowercase")]
    #[test_case("Minimal", "theme-minimal" ; "capitalized")]
    #[test_case("PLAYFUL", "theme-playful" ; "uppercase")]
    fn resolves_builtin_theme(name: &str, class: &str) {
        let table = ThemeTable::builtin().unwrap();
        assert_eq!(table.resolve(name).unwrap().class_name, class);
    }

    #[test]
    fn unknown_theme_names_original_input() {
        let table = ThemeTable::builtin().unwrap();
        let err = table.resolve("Neon").unwrap_err();

        assert!(matches!(&err, Error::UnknownTheme { name } if name == "Neon"));
        assert_eq!(err.to_string(), "unknown theme: Neon");
    }

    #[test]
    fn only_first_space_is_replaced() {
        assert_eq!(normalize_key("Very Dark Tech"), "very-dark tech");

        let table = ThemeTable::builtin().unwrap();
        assert!(table.resolve("Dark  Tech").is_err());
    }

    #[test]
    fn builtin_table_has_four_themes() {
        let table = ThemeTable::builtin().unwrap();
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, ["corporate", "dark-tech", "minimal", "playful"]);
    }

    #[test]
    fn custom_table() {
        let table = ThemeTable::from_json(
            r#"{ "solar-flare": { "name": "Solar Flare", "className": "theme-solar" } }"#,
        )
        .unwrap();

        assert_eq!(table.resolve("Solar Flare").unwrap().class_name, "theme-solar");
        assert!(table.resolve("Dark Tech").is_err());
    }

    #[test]
    fn invalid_table_fails() {
        let result = ThemeTable::from_json(r#"{ "x": { "name": "X" } }"#);
        assert!(matches!(result, Err(Error::ThemeTable(_))));
    }
}
