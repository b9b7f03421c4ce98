//! Slide document model.
//!
//! Documents arrive as JSON from the content generator. Each slide is a
//! record tagged by `type`; known tags decode into a typed variant with its
//! required fields, anything else becomes [`Slide::Unsupported`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::util::non_empty;

/// Document title used when the document has none.
pub const DEFAULT_TITLE: &str = "Presentation";

/// Glyph shown on a title slide without an emoji.
pub const DEFAULT_EMOJI: &str = "🎯";

/// Heading shown on an unsupported slide without one.
pub const DEFAULT_HEADING: &str = "Slide";

/// Shown in place of the type of a record that has none.
const MISSING_TYPE: &str = "undefined";

/// A complete presentation: an optional title and its slides in order.
#[derive(Debug, Clone)]
pub struct SlideDocument {
    pub title: Option<String>,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    title: Option<String>,
    slides: Vec<Value>,
}

impl SlideDocument {
    /// Decode a document from JSON.
    ///
    /// A slide with a known type but a missing or mistyped required field
    /// fails the whole document, naming the slide's position.
    pub fn from_json(input: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(input).map_err(Error::Document)?;

        let slides = raw
            .slides
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                Slide::from_value(value).map_err(|source| Error::MalformedSlide { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            title: raw.title,
            slides,
        })
    }

    /// The title to display, falling back to [`DEFAULT_TITLE`] when absent or empty.
    pub fn title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(DEFAULT_TITLE)
    }
}

/// One slide, dispatched on its `type` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Slide {
    Title(TitleSlide),
    Bullets(BulletsSlide),
    #[serde(rename = "grid-2x2")]
    Grid2x2(CardsSlide),
    #[serde(rename = "grid-3col")]
    Grid3Col(CardsSlide),
    TwoColumn(TwoColumnSlide),
    Quote(QuoteSlide),
    Numbered(NumberedSlide),
    Conclusion(ConclusionSlide),
    #[serde(skip_deserializing)]
    Unsupported(UnsupportedSlide),
}

impl Slide {
    /// Tags with a dedicated layout.
    pub const KNOWN_TYPES: [&'static str; 8] = [
        "title",
        "bullets",
        "grid-2x2",
        "grid-3col",
        "two-column",
        "quote",
        "numbered",
        "conclusion",
    ];

    /// Decode a single slide record.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        match value.get("type").and_then(Value::as_str) {
            Some(tag) if Self::KNOWN_TYPES.contains(&tag) => serde_json::from_value(value),
            _ => Ok(Slide::Unsupported(UnsupportedSlide::from_value(&value))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleSlide {
    pub heading: String,
    pub emoji: Option<String>,
    pub subheading: Option<String>,
}

impl TitleSlide {
    pub fn emoji(&self) -> &str {
        non_empty(self.emoji.as_deref()).unwrap_or(DEFAULT_EMOJI)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletsSlide {
    pub heading: String,
    pub items: Vec<String>,
}

/// Shared by the 2x2 and three-column grid layouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsSlide {
    pub heading: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoColumnSlide {
    pub heading: String,
    pub left: Column,
    pub right: Column,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSlide {
    pub quote: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberedSlide {
    pub heading: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Badge text; generators emit either `"1"` or `1`
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConclusionSlide {
    pub heading: String,
    pub message: String,
    pub submessage: Option<String>,
}

/// A record whose `type` has no layout.
#[derive(Debug, Clone, Serialize)]
pub struct UnsupportedSlide {
    /// The raw `type` value as written, or `undefined` when absent
    pub kind: String,
    pub heading: Option<String>,
}

impl UnsupportedSlide {
    fn from_value(value: &Value) -> Self {
        let kind = match value.get("type") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => MISSING_TYPE.to_string(),
        };
        let heading = value
            .get("heading")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self { kind, heading }
    }

    pub fn heading(&self) -> &str {
        non_empty(self.heading.as_deref()).unwrap_or(DEFAULT_HEADING)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::String(s) => s,
        Text::Number(n) => n.to_string(),
    })
}
