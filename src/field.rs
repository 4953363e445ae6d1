//! In-memory data fields with explicit absent cells.
//!
//! A [`Field`] is a dynamic-rank array of `Option<f32>` cells together
//! with its dimension names. Missing measurements are `None`; the raw
//! file's numeric sentinel does not survive loading, so downstream code
//! never has to know which magic value a particular archive uses.

use ndarray::{ArrayD, ArrayViewD, Axis};

use crate::error::{Result, SstVizError};

/// A named, read-only gridded value array.
///
/// The SST field is rank 3, indexed (lon, lat, time). Aggregation
/// produces new rank-2 fields; nothing mutates a field in place.
#[derive(Debug, Clone)]
pub struct Field {
    data: ArrayD<Option<f32>>,
    dimensions: Vec<String>,
}

impl Field {
    /// Create a field from cell values and dimension names.
    pub fn new(data: ArrayD<Option<f32>>, dimensions: Vec<String>) -> Result<Self> {
        if data.ndim() != dimensions.len() {
            return Err(SstVizError::DataNotFound {
                message: format!(
                    "Field has {} axes but {} dimension names",
                    data.ndim(),
                    dimensions.len()
                ),
            });
        }
        Ok(Self { data, dimensions })
    }

    /// Create a field from raw file values, converting sentinel-valued
    /// and non-finite cells to absent markers.
    pub fn from_raw(
        raw: ArrayD<f32>,
        dimensions: Vec<String>,
        sentinel: Option<f64>,
    ) -> Result<Self> {
        let sentinel = sentinel.map(|s| s as f32);
        let data = raw.mapv(|v| {
            if !v.is_finite() {
                return None;
            }
            match sentinel {
                Some(s) if v == s => None,
                _ => Some(v),
            }
        });
        Self::new(data, dimensions)
    }

    /// The cell values.
    pub fn data(&self) -> ArrayViewD<'_, Option<f32>> {
        self.data.view()
    }

    /// Dimension names, in axis order.
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// Shape of the field (dimension sizes).
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Extract one time step of a rank-3 field as a rank-2 view.
    ///
    /// The time axis is the last axis, per the (lon, lat, time) layout.
    pub fn time_slice(&self, index: usize) -> Result<ArrayViewD<'_, Option<f32>>> {
        if self.ndim() != 3 {
            return Err(SstVizError::DataNotFound {
                message: format!("time_slice requires a rank-3 field, got rank {}", self.ndim()),
            });
        }
        let time_len = self.shape()[2];
        if index >= time_len {
            return Err(SstVizError::InvalidParameter {
                param: "time_index".to_string(),
                message: format!("index {} out of range for {} time steps", index, time_len),
            });
        }
        Ok(self.data.index_axis(Axis(2), index))
    }

    /// Number of present (non-absent) cells.
    pub fn present_count(&self) -> usize {
        self.data.iter().filter(|c| c.is_some()).count()
    }

    /// Minimum and maximum over present cells, or `None` if every cell
    /// is absent.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        value_range(self.data.iter().copied())
    }
}

/// Minimum and maximum over the present cells of any cell iterator.
pub fn value_range<I>(cells: I) -> Option<(f32, f32)>
where
    I: IntoIterator<Item = Option<f32>>,
{
    let mut range: Option<(f32, f32)> = None;
    for value in cells.into_iter().flatten() {
        range = Some(match range {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    fn raw_cube(values: Vec<f32>, shape: (usize, usize, usize)) -> ArrayD<f32> {
        Array::from_shape_vec(vec![shape.0, shape.1, shape.2], values).unwrap()
    }

    #[test]
    fn test_sentinel_cells_become_absent() {
        let sentinel = -9.99e33_f64;
        let raw = raw_cube(vec![1.0, sentinel as f32, 3.0, 4.0], (2, 2, 1));
        let field = Field::from_raw(
            raw,
            vec!["lon".into(), "lat".into(), "time".into()],
            Some(sentinel),
        )
        .unwrap();

        assert_eq!(field.present_count(), 3);
        assert_eq!(field.data()[[0, 1, 0]], None);
        assert_eq!(field.data()[[0, 0, 0]], Some(1.0));
    }

    #[test]
    fn test_nan_cells_become_absent_without_sentinel() {
        let raw = raw_cube(vec![1.0, f32::NAN, 3.0, 4.0], (2, 2, 1));
        let field = Field::from_raw(
            raw,
            vec!["lon".into(), "lat".into(), "time".into()],
            None,
        )
        .unwrap();
        assert_eq!(field.present_count(), 3);
    }

    #[test]
    fn test_dimension_count_mismatch() {
        let raw = raw_cube(vec![0.0; 4], (2, 2, 1));
        let result = Field::from_raw(raw, vec!["lon".into(), "lat".into()], None);
        assert!(result.is_err());
    }

    #[test]
    fn test_time_slice_shape() {
        let raw = raw_cube((0..12).map(|v| v as f32).collect(), (2, 3, 2));
        let field = Field::from_raw(
            raw,
            vec!["lon".into(), "lat".into(), "time".into()],
            None,
        )
        .unwrap();

        let slice = field.time_slice(1).unwrap();
        assert_eq!(slice.shape(), &[2, 3]);
        // (lon=0, lat=0, time=1) is flat index 1 in row-major order
        assert_eq!(slice[[0, 0]], Some(1.0));

        assert!(field.time_slice(2).is_err());
    }

    #[test]
    fn test_value_range_ignores_absent() {
        let raw = raw_cube(vec![5.0, -2.0, f32::NAN, 9.0], (2, 2, 1));
        let field = Field::from_raw(
            raw,
            vec!["lon".into(), "lat".into(), "time".into()],
            None,
        )
        .unwrap();
        assert_eq!(field.value_range(), Some((-2.0, 9.0)));
    }
}
