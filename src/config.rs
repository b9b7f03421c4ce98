use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Presentation settings loaded from an optional TOML file.
///
/// ```toml
/// theme = "Corporate"
/// template = "branding/base.html"
/// minify = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Theme used when none is given on the command line
    pub theme: Option<String>,

    /// Base template replacing the built-in one (relative to the settings file)
    pub template: Option<PathBuf>,

    /// Whether to minify the generated HTML (defaults to false)
    #[serde(default)]
    pub minify: bool,
}

impl Settings {
    /// Load settings from a file, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut settings: Settings = toml::from_str(&content)?;

        if let Some(template) = &settings.template
            && template.is_relative()
            && let Some(dir) = path.parent()
        {
            settings.template = Some(dir.join(template));
        }

        tracing::debug!(
            path = %path.display(),
            theme = ?settings.theme,
            template = ?settings.template,
            minify = settings.minify,
            "loaded settings"
        );

        Ok(settings)
    }

    /// Load settings if a path was given, otherwise use the defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
