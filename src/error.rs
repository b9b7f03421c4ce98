use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("unknown theme: {name}")]
    UnknownTheme { name: String },

    #[error("invalid slide document: {0}")]
    Document(#[source] serde_json::Error),

    #[error("slide {index} is malformed: {source}")]
    MalformedSlide {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid theme table: {0}")]
    ThemeTable(#[source] serde_json::Error),

    #[error("built-in template missing: {name}")]
    MissingTemplate { name: String },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
