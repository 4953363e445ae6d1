//! # sstviz
//!
//! A NetCDF sea-surface temperature pipeline: load a gridded SST dataset
//! from a local file or a remote monthly archive, derive calendar fields
//! from the CF time axis, compute per-cell monthly means, and render
//! colormapped rasters and a self-contained animated HTML artifact.
//!
//! ## Pipeline stages
//!
//! - **Loader**: reads a NetCDF source into an in-memory [`Dataset`],
//!   converting the file's missing-value sentinel into explicit absent
//!   cells
//! - **Extractor**: typed accessors for coordinates, fields, and
//!   attribute metadata
//! - **Time mapper**: CF day-offsets to calendar dates and year-month
//!   strings
//! - **Aggregator**: per-grid-cell means over all time steps sharing a
//!   calendar month
//! - **Renderer**: colormapped rasters with axis labels and coastline
//!   overlays, plus animated sequences sharing one color scale

pub mod aggregate;
pub mod animate;
pub mod colormaps;
pub mod config;
pub mod dataset;
pub mod error;
pub mod field;
pub mod geo;
pub mod loader;
pub mod logging;
pub mod quality;
pub mod render;
pub mod timeaxis;

pub use config::Config;
pub use dataset::{AttributeValue, Dataset, Dimension, Metadata, VariableMeta};
pub use error::{Result, SstVizError};
pub use field::Field;
pub use logging::{init_tracing, log_data_load_stats, log_timed_operation};
pub use timeaxis::TimeAxis;
