//! Geographic utilities: bounding boxes, longitude conventions, and
//! coastline geometry.
//!
//! Source grids use the 0-360°E longitude convention; display surfaces
//! (axis labels, bounding boxes, coastline files) use signed longitude.
//! The conversions live here so every consumer agrees on them.

use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SstVizError};

/// A geographic bounding box in signed-longitude convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Parse a bounding box string "min_lon,min_lat,max_lon,max_lat".
    pub fn parse(bbox: &str) -> Result<Self> {
        let parts: Vec<&str> = bbox.split(',').collect();
        if parts.len() != 4 {
            return Err(SstVizError::InvalidParameter {
                param: "bbox".to_string(),
                message: "Bounding box must be in format 'min_lon,min_lat,max_lon,max_lat'"
                    .to_string(),
            });
        }

        let mut values = [0.0_f64; 4];
        for (i, part) in parts.iter().enumerate() {
            values[i] = part
                .trim()
                .parse::<f64>()
                .map_err(|_| SstVizError::InvalidParameter {
                    param: "bbox".to_string(),
                    message: format!("Invalid component: {}", part),
                })?;
        }
        let (min_lon, min_lat, max_lon, max_lat) =
            (values[0], values[1], values[2], values[3]);

        if min_lat > max_lat {
            return Err(SstVizError::InvalidParameter {
                param: "bbox".to_string(),
                message: format!("min_lat ({}) must be <= max_lat ({})", min_lat, max_lat),
            });
        }
        if !(-90.0..=90.0).contains(&min_lat) || !(-90.0..=90.0).contains(&max_lat) {
            return Err(SstVizError::InvalidParameter {
                param: "bbox".to_string(),
                message: "Latitude must be in the range -90 to 90".to_string(),
            });
        }

        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// Whether a (signed lon, lat) point falls inside the box.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

impl FromStr for BoundingBox {
    type Err = SstVizError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        BoundingBox::parse(s)
    }
}

/// Convert a source longitude (0-360°E) to signed display longitude.
pub fn to_display_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else {
        lon
    }
}

/// Convert a signed longitude to the source 0-360°E convention.
pub fn to_source_longitude(lon: f64) -> f64 {
    if lon < 0.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Fractional index of a value within a monotonic coordinate array.
///
/// Returns `None` when the value lies outside the array's range. Works
/// for ascending and descending axes (latitude is often descending).
pub fn fractional_index(coords: &[f64], value: f64) -> Option<f64> {
    if coords.len() < 2 {
        return None;
    }

    let ascending = coords[0] <= coords[coords.len() - 1];
    for i in 0..coords.len() - 1 {
        let (a, b) = (coords[i], coords[i + 1]);
        let inside = if ascending {
            value >= a && value <= b
        } else {
            value <= a && value >= b
        };
        if inside {
            if (b - a).abs() < f64::EPSILON {
                return Some(i as f64);
            }
            return Some(i as f64 + (value - a) / (b - a));
        }
    }
    None
}

/// Coastline geometry: a set of lon/lat polylines in signed-longitude
/// convention.
#[derive(Debug, Clone, Default)]
pub struct Coastline {
    pub segments: Vec<Vec<(f64, f64)>>,
}

impl Coastline {
    /// Load a GMT-style ASCII boundary file.
    ///
    /// Each line holds "lon lat"; a line starting with `>` (or `#`, or a
    /// blank line) starts a new segment.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SstVizError::SourceUnavailable {
                message: format!("Failed to read coastline {}: {}", path.display(), e),
            }
        })?;
        Self::parse(&content)
    }

    /// Parse coastline segments from boundary-file text.
    pub fn parse(content: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('>') || line.starts_with('#') {
                if current.len() >= 2 {
                    segments.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                continue;
            }

            let mut parts = line.split_whitespace();
            let lon = parts.next().and_then(|p| p.parse::<f64>().ok());
            let lat = parts.next().and_then(|p| p.parse::<f64>().ok());
            match (lon, lat) {
                (Some(lon), Some(lat)) => current.push((lon, lat)),
                _ => {
                    return Err(SstVizError::InvalidParameter {
                        param: "coastline".to_string(),
                        message: format!("unparseable coastline line: '{}'", line),
                    })
                }
            }
        }
        if current.len() >= 2 {
            segments.push(current);
        }

        Ok(Self { segments })
    }

    /// Restrict the geometry to a bounding box, splitting segments where
    /// they leave it.
    pub fn clip_to(&self, bbox: &BoundingBox) -> Coastline {
        let mut segments = Vec::new();
        for segment in &self.segments {
            let mut current: Vec<(f64, f64)> = Vec::new();
            for &(lon, lat) in segment {
                if bbox.contains(lon, lat) {
                    current.push((lon, lat));
                } else if current.len() >= 2 {
                    segments.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
            if current.len() >= 2 {
                segments.push(current);
            }
        }
        Coastline { segments }
    }

    /// Total number of vertices across all segments.
    pub fn vertex_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}
