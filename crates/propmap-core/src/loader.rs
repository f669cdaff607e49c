// File: crates/propmap-core/src/loader.rs
// Summary: Data loader; reads one GeoJSON document from disk or a URL into point features.
// Notes:
// - A single blocking read/request, no retry and no caching.
// - Only Point geometries become features. Everything else is skipped quietly.

use std::io::Read;
use std::path::{Path, PathBuf};

use geojson::{Feature, GeoJson, Geometry, JsonObject};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{MapError, Result};

/// A read-only geographic point with its property bag.
#[derive(Clone, Debug)]
pub struct PointFeature {
    pub lon: f64,
    pub lat: f64,
    pub properties: JsonObject,
}

impl PointFeature {
    pub fn new(lon: f64, lat: f64, properties: JsonObject) -> Self {
        Self { lon, lat, properties }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Parsed dataset: the ordered list of point features of one document.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub features: Vec<PointFeature>,
}

impl Dataset {
    pub fn empty() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.features.len() }

    pub fn is_empty(&self) -> bool { self.features.is_empty() }

    /// Feature used as the schema sample for attribute extraction.
    pub fn first(&self) -> Option<&PointFeature> { self.features.first() }

    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let doc = text.parse::<GeoJson>()?;
        Ok(Self::from_geojson(doc))
    }

    pub fn from_reader<R: Read>(mut rdr: R, origin: &str) -> Result<Self> {
        let mut text = String::new();
        rdr.read_to_string(&mut text)
            .map_err(|source| MapError::Io { path: origin.to_string(), source })?;
        Self::from_geojson_str(&text)
    }

    pub fn from_geojson(doc: GeoJson) -> Self {
        let mut features = Vec::new();
        let mut skipped = 0usize;
        match doc {
            GeoJson::FeatureCollection(fc) => {
                for f in fc.features {
                    match point_from_feature(f) {
                        Some(p) => features.push(p),
                        None => skipped += 1,
                    }
                }
            }
            GeoJson::Feature(f) => match point_from_feature(f) {
                Some(p) => features.push(p),
                None => skipped += 1,
            },
            GeoJson::Geometry(g) => match point_coords(&g) {
                Some((lon, lat)) => features.push(PointFeature::new(lon, lat, JsonObject::new())),
                None => skipped += 1,
            },
        }
        if skipped > 0 {
            debug!(skipped, "ignored features without point geometry");
        }
        Self { features }
    }
}

fn point_from_feature(f: Feature) -> Option<PointFeature> {
    let (lon, lat) = point_coords(f.geometry.as_ref()?)?;
    Some(PointFeature::new(lon, lat, f.properties.unwrap_or_default()))
}

fn point_coords(g: &Geometry) -> Option<(f64, f64)> {
    match &g.value {
        geojson::Value::Point(pos) if pos.len() >= 2 => Some((pos[0], pos[1])),
        _ => None,
    }
}

/// Where a dataset comes from: a local file or an `http(s)` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::Path(PathBuf::from(raw))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Path(p) => p.display().to_string(),
            DataSource::Url(u) => u.clone(),
        }
    }
}

/// Load and parse a dataset. The one error path of the loader: I/O, HTTP or parse failure.
pub fn load_dataset(source: &DataSource) -> Result<Dataset> {
    let dataset = match source {
        DataSource::Path(path) => load_path(path)?,
        DataSource::Url(url) => load_url(url)?,
    };
    info!(source = %source.describe(), features = dataset.len(), "loaded dataset");
    Ok(dataset)
}

fn load_path(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .map_err(|source| MapError::Io { path: path.display().to_string(), source })?;
    Dataset::from_reader(std::io::BufReader::new(file), &path.display().to_string())
}

fn load_url(url: &str) -> Result<Dataset> {
    let http = |source: reqwest::Error| MapError::Http { url: url.to_string(), source };
    let text = reqwest::blocking::get(url)
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(http)?;
    Dataset::from_geojson_str(&text)
}
