// File: crates/propmap-core/src/error.rs
// Summary: Library error type shared by loading, configuration and rendering.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("i/o error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid profile: {0}")]
    Config(String),

    #[error("render failed: {0}")]
    Render(&'static str),
}

impl From<toml::de::Error> for MapError {
    fn from(e: toml::de::Error) -> Self {
        MapError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
