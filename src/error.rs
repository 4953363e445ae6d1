//! Error types for the sstviz pipeline.
//!
//! One enum covers every failure the pipeline can hit, from opening the
//! source to writing the rendered artifact.

use thiserror::Error;

/// The main error type for sstviz operations.
#[derive(Error, Debug)]
pub enum SstVizError {
    /// The data source (local file or remote dataset) could not be reached
    #[error("Source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// A requested variable is not present in the dataset
    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    /// A requested attribute is not present on a variable
    #[error("Missing attribute: {attribute} on variable {variable}")]
    MissingAttribute { variable: String, attribute: String },

    /// No time slices matched an aggregation window
    #[error("Empty selection: {message}")]
    EmptySelection { message: String },

    /// NetCDF container errors
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Data shape or content errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Image generation errors
    #[error("Image generation error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ndarray shape errors
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Convenience type alias for Results with SstVizError
pub type Result<T> = std::result::Result<T, SstVizError>;
