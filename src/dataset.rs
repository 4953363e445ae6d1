//! The loaded dataset handle.
//!
//! A [`Dataset`] is what the loader hands back: dimension and variable
//! metadata, coordinate arrays, and gridded fields, all read-only. The
//! accessors here implement the extraction contract: requesting a
//! variable or attribute that is not present is a typed error, not a
//! panic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, SstVizError};
use crate::field::Field;

/// Metadata about a NetCDF dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    /// Name of the dimension
    pub name: String,
    /// Size of the dimension
    pub size: usize,
    /// Whether this dimension is unlimited
    pub is_unlimited: bool,
}

/// Metadata about a NetCDF variable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableMeta {
    /// Name of the variable
    pub name: String,
    /// Dimensions of the variable
    pub dimensions: Vec<String>,
    /// Shape of the variable (dimension sizes)
    pub shape: Vec<usize>,
    /// Variable attributes
    pub attributes: HashMap<String, AttributeValue>,
    /// Data type as string
    pub dtype: String,
}

/// Possible attribute values in NetCDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String attribute
    Text(String),
    /// Numeric attribute (stored as f64 for simplicity)
    Number(f64),
    /// Array of numbers
    NumberArray(Vec<f64>),
}

impl AttributeValue {
    /// The attribute as a scalar number, if it is one.
    ///
    /// A single-element array also counts; archives disagree on whether
    /// `missing_value` is a scalar or a length-1 vector.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::NumberArray(values) if values.len() == 1 => Some(values[0]),
            _ => None,
        }
    }

    /// The attribute as text, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Complete metadata for a loaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// File-level attributes
    pub global_attributes: HashMap<String, AttributeValue>,
    /// Dimensions in the file
    pub dimensions: HashMap<String, Dimension>,
    /// Variables in the file
    pub variables: HashMap<String, VariableMeta>,
}

/// A loaded, read-only dataset: metadata plus extracted arrays.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// File metadata
    pub metadata: Metadata,
    /// 1-D coordinate arrays (lat, lon, time, ...) keyed by variable name
    coordinates: HashMap<String, Vec<f64>>,
    /// Gridded fields keyed by variable name
    fields: HashMap<String, Field>,
}

impl Dataset {
    /// Assemble a dataset from its parts.
    pub fn new(
        metadata: Metadata,
        coordinates: HashMap<String, Vec<f64>>,
        fields: HashMap<String, Field>,
    ) -> Self {
        Self {
            metadata,
            coordinates,
            fields,
        }
    }

    /// Get a 1-D coordinate array by variable name.
    pub fn coordinate(&self, name: &str) -> Result<&[f64]> {
        self.coordinates
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SstVizError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// Get a gridded field by variable name.
    pub fn field(&self, name: &str) -> Result<&Field> {
        self.fields.get(name).ok_or_else(|| SstVizError::UnknownVariable {
            name: name.to_string(),
        })
    }

    /// Look up an attribute on a variable.
    pub fn attribute(&self, variable: &str, attribute: &str) -> Result<&AttributeValue> {
        let var = self.metadata.variables.get(variable).ok_or_else(|| {
            SstVizError::UnknownVariable {
                name: variable.to_string(),
            }
        })?;
        var.attributes
            .get(attribute)
            .ok_or_else(|| SstVizError::MissingAttribute {
                variable: variable.to_string(),
                attribute: attribute.to_string(),
            })
    }

    /// Look up a numeric attribute on a variable.
    pub fn numeric_attribute(&self, variable: &str, attribute: &str) -> Result<f64> {
        let value = self.attribute(variable, attribute)?;
        value.as_f64().ok_or_else(|| SstVizError::InvalidParameter {
            param: attribute.to_string(),
            message: format!("attribute {} on {} is not numeric", attribute, variable),
        })
    }

    /// The missing-value sentinel declared on a variable, if any.
    ///
    /// `missing_value` takes precedence, `_FillValue` is the fallback.
    pub fn sentinel(&self, variable: &str) -> Option<f64> {
        for name in ["missing_value", "_FillValue"] {
            if let Ok(value) = self.attribute(variable, name) {
                if let Some(n) = value.as_f64() {
                    return Some(n);
                }
            }
        }
        None
    }

    /// Check if a variable exists (as a coordinate or a field).
    pub fn has_variable(&self, name: &str) -> bool {
        self.metadata.variables.contains_key(name)
    }

    /// Names of the loaded variables.
    pub fn variable_names(&self) -> Vec<&str> {
        self.metadata.variables.keys().map(String::as_str).collect()
    }

    /// Validate that the dataset is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.metadata.variables.is_empty() {
            return Err(SstVizError::DataNotFound {
                message: "No variables found in the dataset".to_string(),
            });
        }

        for (var_name, var) in &self.metadata.variables {
            for dim_name in &var.dimensions {
                if !self.metadata.dimensions.contains_key(dim_name) {
                    return Err(SstVizError::DataNotFound {
                        message: format!(
                            "Variable {} references non-existent dimension {}",
                            var_name, dim_name
                        ),
                    });
                }
            }
        }

        for (var_name, field) in &self.fields {
            let var = self.metadata.variables.get(var_name).ok_or_else(|| {
                SstVizError::DataNotFound {
                    message: format!("Field {} has no variable metadata", var_name),
                }
            })?;
            if field.shape() != var.shape.as_slice() {
                return Err(SstVizError::DataNotFound {
                    message: format!(
                        "Variable {} has inconsistent shape: metadata {:?}, data {:?}",
                        var_name,
                        var.shape,
                        field.shape()
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    fn sample_dataset() -> Dataset {
        let mut variables = HashMap::new();
        let mut attributes = HashMap::new();
        attributes.insert("units".to_string(), AttributeValue::Text("degC".to_string()));
        attributes.insert("missing_value".to_string(), AttributeValue::Number(-9.99e33));
        variables.insert(
            "sst".to_string(),
            VariableMeta {
                name: "sst".to_string(),
                dimensions: vec!["lon".to_string(), "lat".to_string(), "time".to_string()],
                shape: vec![2, 2, 1],
                attributes,
                dtype: "Float".to_string(),
            },
        );

        let mut dimensions = HashMap::new();
        for (name, size) in [("lon", 2usize), ("lat", 2), ("time", 1)] {
            dimensions.insert(
                name.to_string(),
                Dimension {
                    name: name.to_string(),
                    size,
                    is_unlimited: name == "time",
                },
            );
        }

        let mut coordinates = HashMap::new();
        coordinates.insert("lon".to_string(), vec![160.0, 170.0]);
        coordinates.insert("lat".to_string(), vec![50.0, 55.0]);
        coordinates.insert("time".to_string(), vec![0.0]);

        let mut fields = HashMap::new();
        let data = ArrayD::from_shape_vec(
            vec![2, 2, 1],
            vec![Some(1.0), Some(2.0), None, Some(4.0)],
        )
        .unwrap();
        fields.insert(
            "sst".to_string(),
            Field::new(
                data,
                vec!["lon".to_string(), "lat".to_string(), "time".to_string()],
            )
            .unwrap(),
        );

        Dataset::new(
            Metadata {
                global_attributes: HashMap::new(),
                dimensions,
                variables,
            },
            coordinates,
            fields,
        )
    }

    #[test]
    fn test_unknown_variable() {
        let ds = sample_dataset();
        match ds.field("temp") {
            Err(SstVizError::UnknownVariable { name }) => assert_eq!(name, "temp"),
            other => panic!("Expected UnknownVariable, got {:?}", other.map(|_| ())),
        }
        assert!(ds.coordinate("depth").is_err());
    }

    #[test]
    fn test_missing_attribute() {
        let ds = sample_dataset();
        match ds.attribute("sst", "valid_range") {
            Err(SstVizError::MissingAttribute { variable, attribute }) => {
                assert_eq!(variable, "sst");
                assert_eq!(attribute, "valid_range");
            }
            other => panic!("Expected MissingAttribute, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_attribute_lookup() {
        let ds = sample_dataset();
        assert_eq!(
            ds.attribute("sst", "units").unwrap().as_str(),
            Some("degC")
        );
        assert_eq!(ds.numeric_attribute("sst", "missing_value").unwrap(), -9.99e33);
        assert_eq!(ds.sentinel("sst"), Some(-9.99e33));
        assert!(ds.numeric_attribute("sst", "units").is_err());
    }

    #[test]
    fn test_repeated_extraction_is_identical() {
        let ds = sample_dataset();
        let first = ds.coordinate("lat").unwrap().to_vec();
        let second = ds.coordinate("lat").unwrap().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate() {
        let ds = sample_dataset();
        assert!(ds.validate().is_ok());
    }

    #[test]
    fn test_scalar_vs_length_one_array_attribute() {
        let scalar = AttributeValue::Number(-1.0);
        let vector = AttributeValue::NumberArray(vec![-1.0]);
        assert_eq!(scalar.as_f64(), vector.as_f64());
        assert_eq!(AttributeValue::NumberArray(vec![1.0, 2.0]).as_f64(), None);
    }
}
