use std::collections::HashMap;

use tera::{Context, Tera, Value};

use crate::builtin_templates;
use crate::error::{Error, Result};
use crate::slides::{Slide, SlideDocument};
use crate::theme::ThemeTable;
use crate::util::escape_html;

/// Well-known slide template names.
pub mod templates {
    pub const TITLE: &str = "title.html";
    pub const BULLETS: &str = "bullets.html";
    /// Both grid layouts; the grid class is passed in the context
    pub const CARDS: &str = "cards.html";
    pub const TWO_COLUMN: &str = "two-column.html";
    pub const QUOTE: &str = "quote.html";
    pub const NUMBERED: &str = "numbered.html";
    pub const CONCLUSION: &str = "conclusion.html";
    pub const UNSUPPORTED: &str = "unsupported.html";

    pub const ALL: [&str; 8] = [
        TITLE,
        BULLETS,
        CARDS,
        TWO_COLUMN,
        QUOTE,
        NUMBERED,
        CONCLUSION,
        UNSUPPORTED,
    ];
}

/// Placeholders substituted into the base template.
pub mod placeholders {
    pub const TITLE: &str = "{{TITLE}}";
    pub const THEME_CLASS: &str = "{{THEME_CLASS}}";
    pub const SLIDES_HTML: &str = "{{SLIDES_HTML}}";
}

/// Class added to the first slide's container.
const ACTIVE_CLASS: &str = " active";

/// Separator between rendered slides.
const SLIDE_SEPARATOR: &str = "\n\n";

/// Renders slide documents into complete HTML presentations.
///
/// Holds no mutable state; one renderer can serve any number of documents.
#[derive(Debug)]
pub struct SlideRenderer<'t> {
    templates: Tera,
    themes: &'t ThemeTable,
}

impl<'t> SlideRenderer<'t> {
    /// Create a renderer using the built-in slide templates.
    pub fn new(themes: &'t ThemeTable) -> Result<Self> {
        let mut templates = Tera::default();

        for (name, content) in builtin_templates::slides()? {
            templates.add_raw_template(name, content)?;
        }

        // Slide text is escaped explicitly through the escape_html filter
        templates.autoescape_on(vec![]);
        templates.register_filter("escape_html", escape_html_filter);

        if let Some(missing) = templates::ALL
            .iter()
            .find(|name| !templates.get_template_names().any(|n| n == **name))
        {
            return Err(Error::MissingTemplate {
                name: missing.to_string(),
            });
        }

        Ok(Self { templates, themes })
    }

    /// Render a whole document into the base template.
    pub fn render(
        &self,
        document: &SlideDocument,
        theme_name: &str,
        base_template: &str,
    ) -> Result<String> {
        let theme = self.themes.resolve(theme_name)?;

        let fragments = document
            .slides
            .iter()
            .enumerate()
            .map(|(index, slide)| self.render_slide(slide, index == 0))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            slides = fragments.len(),
            theme = %theme.name,
            "rendered slides"
        );

        Ok(assemble(
            base_template,
            &escape_html(document.title()),
            &theme.class_name,
            &fragments.join(SLIDE_SEPARATOR),
        ))
    }

    /// Render one slide; `is_first` marks it as the active slide.
    pub fn render_slide(&self, slide: &Slide, is_first: bool) -> Result<String> {
        let mut context = Context::new();
        context.insert("active", if is_first { ACTIVE_CLASS } else { "" });

        let template = match slide {
            Slide::Title(s) => {
                context.insert("slide", s);
                context.insert("emoji", s.emoji());
                templates::TITLE
            }
            Slide::Bullets(s) => {
                context.insert("slide", s);
                templates::BULLETS
            }
            Slide::Grid2x2(s) => {
                context.insert("slide", s);
                context.insert("grid", "grid-2x2");
                templates::CARDS
            }
            Slide::Grid3Col(s) => {
                context.insert("slide", s);
                context.insert("grid", "grid-3col");
                templates::CARDS
            }
            Slide::TwoColumn(s) => {
                context.insert("slide", s);
                templates::TWO_COLUMN
            }
            Slide::Quote(s) => {
                context.insert("slide", s);
                templates::QUOTE
            }
            Slide::Numbered(s) => {
                context.insert("slide", s);
                templates::NUMBERED
            }
            Slide::Conclusion(s) => {
                context.insert("slide", s);
                templates::CONCLUSION
            }
            Slide::Unsupported(s) => {
                tracing::debug!(kind = %s.kind, "unsupported slide type");
                // kind is interpolated as written, without escaping
                context.insert("kind", &s.kind);
                context.insert("heading", s.heading());
                templates::UNSUPPORTED
            }
        };

        let mut html = self.templates.render(template, &context)?;
        html.truncate(html.trim_end().len());

        tracing::trace!(template, first = is_first, "rendered slide");

        Ok(html)
    }
}

/// Substitute the first occurrence of each placeholder in `base`.
///
/// The base template is scanned once, so placeholder tokens inside the
/// substituted values are left alone. Missing placeholders are skipped.
pub fn assemble(base: &str, title: &str, theme_class: &str, slides_html: &str) -> String {
    let mut found: Vec<(usize, &str, &str)> = [
        (placeholders::TITLE, title),
        (placeholders::THEME_CLASS, theme_class),
        (placeholders::SLIDES_HTML, slides_html),
    ]
    .into_iter()
    .filter_map(|(token, value)| base.find(token).map(|pos| (pos, token, value)))
    .collect();
    found.sort_by_key(|(pos, _, _)| *pos);

    let mut output = String::with_capacity(base.len() + title.len() + slides_html.len());
    let mut cursor = 0;
    for (pos, token, value) in found {
        output.push_str(&base[cursor..pos]);
        output.push_str(value);
        cursor = pos + token.len();
    }
    output.push_str(&base[cursor..]);

    output
}

/// Tera filter escaping slide text; null and `false` render as nothing.
fn escape_html_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let escaped = match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => escape_html(s),
        other => escape_html(&other.to_string()),
    };
    Ok(Value::String(escaped))
}
