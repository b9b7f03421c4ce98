use std::fs;
use std::path::{Path, PathBuf};

use crate::builtin_templates;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::minify;
use crate::render::SlideRenderer;
use crate::slides::SlideDocument;
use crate::theme::{DEFAULT_THEME, ThemeTable};

/// Build inputs given on the command line; each one overrides the settings file.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Settings file
    pub config: Option<PathBuf>,

    /// Base template path
    pub template: Option<PathBuf>,

    /// Theme name
    pub theme: Option<String>,

    /// Force minification on
    pub minify: bool,
}

/// A rendered presentation.
#[derive(Debug)]
pub struct Rendered {
    pub html: String,
    pub slides: usize,
}

/// What a build produced, for reporting.
#[derive(Debug, PartialEq, Eq)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub theme: String,
    pub slides: usize,
}

/// The pipeline combines settings, base template and renderer to turn slide
/// files into presentations.
#[derive(Debug)]
pub struct Pipeline<'t> {
    renderer: SlideRenderer<'t>,

    /// Document shell with the three placeholders
    base_template: String,

    /// Theme name as given by the user
    theme: String,

    minify: bool,
}

impl<'t> Pipeline<'t> {
    /// Load settings and the base template, and check the theme exists.
    pub fn load(themes: &'t ThemeTable, options: &BuildOptions) -> Result<Self> {
        let settings = Settings::load_optional(options.config.as_deref())?;

        let theme = options
            .theme
            .clone()
            .or(settings.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Fail before any input is read
        let resolved = themes.resolve(&theme)?;

        let base_template = match options.template.as_ref().or(settings.template.as_ref()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading base template");
                read(path)?
            }
            None => builtin_templates::base()?.to_string(),
        };

        let minify = options.minify || settings.minify;

        tracing::info!(
            theme = %theme,
            class = %resolved.class_name,
            custom_template = options.template.is_some() || settings.template.is_some(),
            minify,
            "pipeline loaded"
        );

        Ok(Self {
            renderer: SlideRenderer::new(themes)?,
            base_template,
            theme,
            minify,
        })
    }

    /// The theme name presentations are rendered with.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Read a slide document and render it.
    pub fn render_file(&self, input: &Path) -> Result<Rendered> {
        let content = read(input)?;
        let document = SlideDocument::from_json(&content)?;

        let mut html = self
            .renderer
            .render(&document, &self.theme, &self.base_template)?;
        if self.minify {
            html = minify::html(&html)?;
        }

        Ok(Rendered {
            html,
            slides: document.slides.len(),
        })
    }

    /// Render `input` and write the presentation to `output`.
    ///
    /// Nothing is written when rendering fails.
    pub fn build(&self, input: &Path, output: &Path) -> Result<BuildSummary> {
        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            "building presentation"
        );

        let rendered = self.render_file(input)?;

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, &rendered.html)?;

        Ok(BuildSummary {
            output: output.to_path_buf(),
            theme: self.theme.clone(),
            slides: rendered.slides,
        })
    }
}

/// Perform a single build, reloading settings and template from disk.
pub fn do_build(
    themes: &ThemeTable,
    options: &BuildOptions,
    input: &Path,
    output: &Path,
) -> Result<BuildSummary> {
    Pipeline::load(themes, options)?.build(input, output)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDES: &str = r#"{
        "title": "Roadmap",
        "slides": [
            { "type": "title", "heading": "Roadmap 2026", "subheading": "What's next" },
            { "type": "bullets", "heading": "Themes", "items": ["Speed", "Safety"] },
            { "type": "conclusion", "heading": "Thanks", "message": "Questions?" }
        ]
    }"#;

    fn write_slides(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("slides.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn build_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_slides(dir.path(), SLIDES);
        let output = dir.path().join("out/presentation.html");
        let themes = ThemeTable::builtin().unwrap();

        let summary = do_build(&themes, &BuildOptions::default(), &input, &output).unwrap();

        assert_eq!(summary.slides, 3);
        assert_eq!(summary.theme, DEFAULT_THEME);

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("<title>Roadmap</title>"));
        assert!(html.contains(r#"class="theme-dark-tech""#));
        assert!(html.contains("What&#039;s next"));
    }

    #[test]
    fn command_line_theme_wins_over_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("deck.toml");
        fs::write(&config, r#"theme = "Minimal""#).unwrap();
        let themes = ThemeTable::builtin().unwrap();

        let from_settings = Pipeline::load(
            &themes,
            &BuildOptions {
                config: Some(config.clone()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(from_settings.theme(), "Minimal");

        let overridden = Pipeline::load(
            &themes,
            &BuildOptions {
                config: Some(config),
                theme: Some("Playful".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(overridden.theme(), "Playful");
    }

    #[test]
    fn custom_template() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_slides(dir.path(), SLIDES);
        let template = dir.path().join("shell.html");
        fs::write(&template, "<h1>{{TITLE}}</h1>|{{THEME_CLASS}}|{{SLIDES_HTML}}").unwrap();
        let themes = ThemeTable::builtin().unwrap();

        let pipeline = Pipeline::load(
            &themes,
            &BuildOptions {
                template: Some(template),
                theme: Some("corporate".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let rendered = pipeline.render_file(&input).unwrap();

        assert!(rendered.html.starts_with("<h1>Roadmap</h1>|theme-corporate|<div class=\"slide active\">"));
    }

    #[test]
    fn unknown_theme_fails_before_reading_input() {
        let themes = ThemeTable::builtin().unwrap();
        let result = Pipeline::load(
            &themes,
            &BuildOptions {
                theme: Some("Neon".to_string()),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(Error::UnknownTheme { name }) if name == "Neon"));
    }

    #[test]
    fn missing_template_fails() {
        let themes = ThemeTable::builtin().unwrap();
        let result = Pipeline::load(
            &themes,
            &BuildOptions {
                template: Some(PathBuf::from("/nonexistent/base.html")),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(Error::Read { .. })));
    }

    #[test]
    fn malformed_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_slides(
            dir.path(),
            r#"{ "slides": [{ "type": "bullets", "heading": "No items" }] }"#,
        );
        let output = dir.path().join("presentation.html");
        let themes = ThemeTable::builtin().unwrap();

        let result = do_build(&themes, &BuildOptions::default(), &input, &output);

        assert!(matches!(result, Err(Error::MalformedSlide { index: 0, .. })));
        assert!(!output.exists());
    }

    #[test]
    fn minify_shrinks_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_slides(dir.path(), SLIDES);
        let themes = ThemeTable::builtin().unwrap();

        let plain = Pipeline::load(&themes, &BuildOptions::default())
            .unwrap()
            .render_file(&input)
            .unwrap();
        let minified = Pipeline::load(
            &themes,
            &BuildOptions {
                minify: true,
                ..Default::default()
            },
        )
        .unwrap()
        .render_file(&input)
        .unwrap();

        assert!(minified.html.len() < plain.html.len());
        assert!(minified.html.contains("Roadmap 2026"));
    }
}
