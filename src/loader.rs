//! NetCDF data loading.
//!
//! Opens a source, either a local file or a remote monthly archive
//! fetched by (year, month), and extracts everything the pipeline needs into a
//! [`Dataset`]: dimension and variable metadata, 1-D coordinate arrays,
//! and gridded fields. The file's missing-value sentinel is converted to
//! absent cells here, so nothing downstream sees the raw magic number.
//!
//! The NetCDF handle lives only for the duration of extraction; it is
//! dropped before this module returns, success or failure.

use ndarray::ArrayD;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::dataset::{AttributeValue, Dataset, Dimension, Metadata, VariableMeta};
use crate::error::{Result, SstVizError};
use crate::field::Field;

/// Load a NetCDF file into memory.
pub fn open_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(SstVizError::SourceUnavailable {
            message: format!("File not found: {}", path.display()),
        });
    }

    let file = netcdf::open(path).map_err(|e| SstVizError::SourceUnavailable {
        message: format!("Failed to open {}: {}", path.display(), e),
    })?;

    info!("Opened NetCDF file: {}", path.display());
    let dataset = load_file(&file)?;
    dataset.validate()?;
    Ok(dataset)
}

/// Fetch a monthly dataset from a remote archive and load it.
///
/// The URL is built from `url_template` by substituting `{year}` and
/// `{month}` (zero-padded). The response body is staged through a
/// temporary file so the NetCDF reader can open it like any local file.
pub fn fetch_dataset(year: i32, month: u32, url_template: &str) -> Result<Dataset> {
    if !(1..=12).contains(&month) {
        return Err(SstVizError::InvalidParameter {
            param: "month".to_string(),
            message: format!("month must be in 1..=12, got {}", month),
        });
    }

    let url = url_template
        .replace("{year}", &year.to_string())
        .replace("{month}", &format!("{:02}", month));

    info!("Fetching remote dataset: {}", url);
    let response = reqwest::blocking::get(&url).map_err(|e| SstVizError::SourceUnavailable {
        message: format!("Fetch failed for {}: {}", url, e),
    })?;

    if !response.status().is_success() {
        return Err(SstVizError::SourceUnavailable {
            message: format!("Fetch failed for {}: HTTP {}", url, response.status()),
        });
    }

    let body = response.bytes().map_err(|e| SstVizError::SourceUnavailable {
        message: format!("Fetch failed for {}: {}", url, e),
    })?;
    debug!("Downloaded {} bytes", body.len());

    let mut staging = tempfile::Builder::new().suffix(".nc").tempfile()?;
    staging.write_all(&body)?;
    staging.flush()?;

    open_dataset(staging.path())
}

/// Extract metadata, coordinates, and fields from an open file.
fn load_file(file: &netcdf::File) -> Result<Dataset> {
    let variables_count = file.variables().count();
    let dimensions_count = file.dimensions().count();
    debug!("File has {} variables", variables_count);
    debug!("File has {} dimensions", dimensions_count);

    let mut global_attributes = HashMap::new();
    for attr in file.attributes() {
        global_attributes.insert(attr.name().to_string(), convert_attribute(&attr)?);
    }

    let mut dimensions = HashMap::new();
    for dim in file.dimensions() {
        dimensions.insert(
            dim.name().to_string(),
            Dimension {
                name: dim.name().to_string(),
                size: dim.len(),
                is_unlimited: dim.is_unlimited(),
            },
        );
    }

    let mut variables = HashMap::new();
    let mut coordinates = HashMap::new();
    let mut fields = HashMap::new();

    for var in file.variables() {
        let var_name = var.name().to_string();

        let var_dims: Vec<String> = var
            .dimensions()
            .iter()
            .map(|dim| dim.name().to_string())
            .collect();
        let var_shape: Vec<usize> = var.dimensions().iter().map(|dim| dim.len()).collect();

        let mut var_attrs = HashMap::new();
        for attr in var.attributes() {
            var_attrs.insert(attr.name().to_string(), convert_attribute(&attr)?);
        }

        if var_shape.len() == 1 {
            // Coordinate variable: read as f64
            match var.get_values::<f64, _>(..) {
                Ok(values) => {
                    coordinates.insert(var_name.clone(), values);
                }
                Err(e) => {
                    warn!("Skipping unreadable coordinate variable {}: {}", var_name, e);
                    continue;
                }
            }
        } else if var_shape.len() >= 2 {
            // Gridded field: read as f32 and convert sentinel cells
            let values = match var.get_values::<f32, _>(..) {
                Ok(values) => values,
                Err(e) => {
                    warn!("Skipping unreadable variable {}: {}", var_name, e);
                    continue;
                }
            };
            let raw = ArrayD::from_shape_vec(var_shape.clone(), values)?;
            let sentinel = sentinel_from_attrs(&var_attrs);
            let field = Field::from_raw(raw, var_dims.clone(), sentinel)?;
            if let Some(s) = sentinel {
                debug!(
                    variable = %var_name,
                    sentinel = s,
                    absent = field.shape().iter().product::<usize>() - field.present_count(),
                    "Converted sentinel cells to absent markers"
                );
            }
            fields.insert(var_name.clone(), field);
        } else {
            warn!("Skipping scalar variable: {}", var_name);
            continue;
        }

        variables.insert(
            var_name.clone(),
            VariableMeta {
                name: var_name,
                dimensions: var_dims,
                shape: var_shape,
                attributes: var_attrs,
                dtype: format!("{:?}", var.vartype()),
            },
        );
    }

    Ok(Dataset::new(
        Metadata {
            global_attributes,
            dimensions,
            variables,
        },
        coordinates,
        fields,
    ))
}

/// Convert a NetCDF attribute to our AttributeValue enum
fn convert_attribute(attr: &netcdf::Attribute) -> Result<AttributeValue> {
    use netcdf::AttributeValue as Nc;

    let value = attr.value()?;
    Ok(match value {
        Nc::Str(s) => AttributeValue::Text(s),
        Nc::Uchar(v) => AttributeValue::Number(v as f64),
        Nc::Schar(v) => AttributeValue::Number(v as f64),
        Nc::Short(v) => AttributeValue::Number(v as f64),
        Nc::Int(v) => AttributeValue::Number(v as f64),
        Nc::Float(v) => AttributeValue::Number(v as f64),
        Nc::Double(v) => AttributeValue::Number(v),
        Nc::Shorts(v) => AttributeValue::NumberArray(v.into_iter().map(|x| x as f64).collect()),
        Nc::Ints(v) => AttributeValue::NumberArray(v.into_iter().map(|x| x as f64).collect()),
        Nc::Floats(v) => AttributeValue::NumberArray(v.into_iter().map(|x| x as f64).collect()),
        Nc::Doubles(v) => AttributeValue::NumberArray(v),
        other => AttributeValue::Text(format!("{:?}", other)),
    })
}

/// Missing-value sentinel from an already-converted attribute map.
fn sentinel_from_attrs(attrs: &HashMap<String, AttributeValue>) -> Option<f64> {
    for name in ["missing_value", "_FillValue"] {
        if let Some(value) = attrs.get(name) {
            if let Some(n) = value.as_f64() {
                return Some(n);
            }
        }
    }
    None
}
