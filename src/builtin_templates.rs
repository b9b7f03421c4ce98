//! Templates shipped with the binary.
//!
//! The whole `templates/` directory is embedded: the document shell, the
//! theme table and one Tera template per slide layout.

use include_dir::{Dir, File, include_dir};

use crate::error::{Error, Result};

static TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Default document shell with the three placeholders.
pub const BASE: &str = "base.html";

/// Theme table keyed by normalized theme name.
pub const THEMES: &str = "themes.json";

/// Directory holding the per-layout slide templates.
pub const SLIDES: &str = "slides";

/// The built-in base template.
pub fn base() -> Result<&'static str> {
    text(BASE)
}

/// The built-in theme table as JSON.
pub fn themes() -> Result<&'static str> {
    text(THEMES)
}

/// Slide templates as `(file name, contents)` pairs.
///
/// Hidden files and anything that is not `.html` are skipped.
pub fn slides() -> Result<Vec<(&'static str, &'static str)>> {
    let dir = TEMPLATES.get_dir(SLIDES).ok_or_else(|| Error::MissingTemplate {
        name: SLIDES.to_string(),
    })?;

    let templates = dir
        .files()
        .filter_map(|file| {
            let name = file.path().file_name()?.to_str()?;
            if name.starts_with('.') || !name.ends_with(".html") {
                return None;
            }
            Some((name, file.contents_utf8()?))
        })
        .collect();

    Ok(templates)
}

fn text(name: &str) -> Result<&'static str> {
    TEMPLATES
        .get_file(name)
        .and_then(File::contents_utf8)
        .ok_or_else(|| Error::MissingTemplate {
            name: name.to_string(),
        })
}
