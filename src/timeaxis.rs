//! Calendar mapping for the CF time axis.
//!
//! The time coordinate arrives as numeric day-offsets from an origin
//! date declared in the variable's `units` attribute, conventionally
//! `"days since 1800-01-01"`. This module turns those offsets into
//! calendar dates and the year/month strings the aggregator keys on.

use chrono::{Duration, NaiveDate};

use crate::error::{Result, SstVizError};

/// A time axis of day-offsets from a fixed origin date.
#[derive(Debug, Clone)]
pub struct TimeAxis {
    offsets: Vec<f64>,
    origin: NaiveDate,
}

impl TimeAxis {
    /// Create an axis from offsets and an explicit origin date.
    pub fn new(offsets: Vec<f64>, origin: NaiveDate) -> Self {
        Self { offsets, origin }
    }

    /// Create an axis by parsing a CF units string.
    ///
    /// Accepts `"days since YYYY-MM-DD"`, optionally followed by a time
    /// of day, which is ignored. Any other unit is rejected.
    pub fn from_cf_units(offsets: Vec<f64>, units: &str) -> Result<Self> {
        let parts: Vec<&str> = units.splitn(3, ' ').collect();
        if parts.len() < 3 || parts[0] != "days" || parts[1] != "since" {
            return Err(SstVizError::InvalidParameter {
                param: "units".to_string(),
                message: format!("unexpected time units format: '{}'", units),
            });
        }

        let date_str = if parts[2].len() >= 10 {
            &parts[2][..10]
        } else {
            parts[2]
        };
        let origin = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            SstVizError::InvalidParameter {
                param: "units".to_string(),
                message: format!("unparseable origin date '{}': {}", date_str, e),
            }
        })?;

        Ok(Self::new(offsets, origin))
    }

    /// The origin date.
    pub fn origin(&self) -> NaiveDate {
        self.origin
    }

    /// The raw day-offsets.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the axis has no time steps.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Calendar date of one time step. Fractional day parts truncate.
    pub fn date(&self, index: usize) -> NaiveDate {
        self.origin + Duration::days(self.offsets[index] as i64)
    }

    /// Calendar dates for every time step.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.len()).map(|i| self.date(i)).collect()
    }

    /// 4-digit year strings, one per time step.
    pub fn years(&self) -> Vec<String> {
        self.dates().iter().map(|d| d.format("%Y").to_string()).collect()
    }

    /// Zero-padded 2-digit month strings, one per time step.
    pub fn months(&self) -> Vec<String> {
        self.dates().iter().map(|d| d.format("%m").to_string()).collect()
    }

    /// Combined "YYYY-MM" strings, one per time step.
    pub fn year_months(&self) -> Vec<String> {
        self.dates()
            .iter()
            .map(|d| d.format("%Y-%m").to_string())
            .collect()
    }
}
