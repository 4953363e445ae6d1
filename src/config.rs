//! Configuration management for sstviz.
//!
//! Layered configuration with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, SstVizError};

/// Command-line arguments for sstviz
#[derive(Parser, Debug, Default)]
#[command(name = "sstviz")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a local NetCDF file
    pub input: Option<PathBuf>,

    /// Year of the remote dataset to fetch (used with --month)
    #[arg(long, env = "SSTVIZ_YEAR")]
    pub year: Option<i32>,

    /// Month of the remote dataset to fetch (1-12, used with --year)
    #[arg(long, env = "SSTVIZ_MONTH")]
    pub month: Option<u32>,

    /// Calendar month to aggregate, zero-padded (e.g. "05")
    #[arg(long)]
    pub target_month: Option<String>,

    /// Path for the rendered PNG raster
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Path for the animated HTML artifact
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Colormap name (e.g. viridis, plasma, coolwarm)
    #[arg(long)]
    pub colormap: Option<String>,

    /// Bounding box restricting the coastline overlay,
    /// as "min_lon,min_lat,max_lon,max_lat"
    #[arg(long)]
    pub bbox: Option<String>,

    /// Path to a GMT-style ASCII coastline boundary file
    #[arg(long)]
    pub coastline: Option<PathBuf>,

    /// Fixed color scale as "min,max" (autocomputed when omitted)
    #[arg(long)]
    pub scale: Option<String>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "SSTVIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SSTVIZ_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Name of the SST variable
    #[serde(default = "default_sst_var")]
    pub sst_var: String,

    /// Name of the latitude coordinate variable
    #[serde(default = "default_lat_var")]
    pub lat_var: String,

    /// Name of the longitude coordinate variable
    #[serde(default = "default_lon_var")]
    pub lon_var: String,

    /// Name of the time coordinate variable
    #[serde(default = "default_time_var")]
    pub time_var: String,

    /// URL template for the remote monthly archive; `{year}` and
    /// `{month}` are substituted
    #[serde(default = "default_url_template")]
    pub url_template: String,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Colormap name
    #[serde(default = "default_colormap")]
    pub colormap: String,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data source configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Rendering configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the pipeline reads its dataset from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A local NetCDF file
    File(PathBuf),
    /// A remote monthly archive entry
    Remote { year: i32, month: u32 },
}

impl Args {
    /// Determine the data source from the arguments.
    pub fn source(&self) -> Result<Source> {
        if let Some(path) = &self.input {
            return Ok(Source::File(path.clone()));
        }
        match (self.year, self.month) {
            (Some(year), Some(month)) => Ok(Source::Remote { year, month }),
            (None, None) => Err(SstVizError::Config {
                message: "No data source: give a file path, or --year and --month".to_string(),
            }),
            _ => Err(SstVizError::Config {
                message: "--year and --month must be given together".to_string(),
            }),
        }
    }
}

impl Config {
    /// Resolve the configuration from all sources with proper precedence.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = Config::default();

        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        if let Some(width) = args.width {
            config.render.width = width;
        }
        if let Some(height) = args.height {
            config.render.height = height;
        }
        if let Some(colormap) = &args.colormap {
            config.render.colormap = colormap.clone();
        }
        if let Some(log_level) = &args.log_level {
            config.log_level = log_level.clone();
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.data = other.data;
        self.render = other.render;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.render.width < 64 || self.render.height < 64 {
            return Err(SstVizError::Config {
                message: format!(
                    "Image size {}x{} is too small; both sides must be at least 64",
                    self.render.width, self.render.height
                ),
            });
        }

        // Resolving the colormap surfaces unknown names early
        crate::colormaps::get_colormap(&self.render.colormap).map_err(|_| {
            SstVizError::Config {
                message: format!("Unknown colormap: {}", self.render.colormap),
            }
        })?;

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SstVizError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if !self.data.url_template.contains("{year}") {
            return Err(SstVizError::Config {
                message: "URL template must contain a {year} placeholder".to_string(),
            });
        }

        Ok(())
    }
}

/// Parse a fixed color scale string "min,max".
pub fn parse_scale(scale: &str) -> Result<(f32, f32)> {
    let parts: Vec<&str> = scale.split(',').collect();
    if parts.len() != 2 {
        return Err(SstVizError::InvalidParameter {
            param: "scale".to_string(),
            message: "Scale must be in format 'min,max'".to_string(),
        });
    }
    let min = parts[0]
        .trim()
        .parse::<f32>()
        .map_err(|_| SstVizError::InvalidParameter {
            param: "scale".to_string(),
            message: format!("Invalid min: {}", parts[0]),
        })?;
    let max = parts[1]
        .trim()
        .parse::<f32>()
        .map_err(|_| SstVizError::InvalidParameter {
            param: "scale".to_string(),
            message: format!("Invalid max: {}", parts[1]),
        })?;
    if min >= max {
        return Err(SstVizError::InvalidParameter {
            param: "scale".to_string(),
            message: format!("min ({}) must be < max ({})", min, max),
        });
    }
    Ok((min, max))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            render: RenderConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sst_var: default_sst_var(),
            lat_var: default_lat_var(),
            lon_var: default_lon_var(),
            time_var: default_time_var(),
            url_template: default_url_template(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            colormap: default_colormap(),
        }
    }
}

// Default value functions for serde
fn default_sst_var() -> String {
    "sst".to_string()
}

fn default_lat_var() -> String {
    "lat".to_string()
}

fn default_lon_var() -> String {
    "lon".to_string()
}

fn default_time_var() -> String {
    "time".to_string()
}

fn default_url_template() -> String {
    "https://www.ncei.noaa.gov/pub/data/cmb/ersst/v5/netcdf/ersst.v5.{year}{month}.nc".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_colormap() -> String {
    "viridis".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
