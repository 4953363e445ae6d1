//! Temporal aggregation.
//!
//! Reduces a rank-3 (lon, lat, time) field to a rank-2 monthly mean:
//! every time step whose calendar month matches the target contributes
//! to a per-cell arithmetic mean, absent cells excluded. Cells that are
//! absent in every matching step stay absent in the result.

use ndarray::Array2;
use tracing::debug;

use crate::error::{Result, SstVizError};
use crate::field::Field;

/// Compute the per-cell mean over all time steps in a calendar month.
///
/// `months` carries the zero-padded `"MM"` string of each time step, in
/// time-axis order; `target` is the month to aggregate, e.g. `"05"`.
/// Zero matching steps is an error rather than an all-absent result, so
/// a mistyped month fails loudly.
pub fn monthly_mean(field: &Field, months: &[String], target: &str) -> Result<Field> {
    if field.ndim() != 3 {
        return Err(SstVizError::DataNotFound {
            message: format!(
                "monthly_mean requires a rank-3 field, got rank {}",
                field.ndim()
            ),
        });
    }

    let (nlon, nlat, ntime) = (field.shape()[0], field.shape()[1], field.shape()[2]);
    if months.len() != ntime {
        return Err(SstVizError::InvalidParameter {
            param: "months".to_string(),
            message: format!(
                "{} month labels for {} time steps",
                months.len(),
                ntime
            ),
        });
    }

    let selected: Vec<usize> = months
        .iter()
        .enumerate()
        .filter(|(_, m)| m.as_str() == target)
        .map(|(i, _)| i)
        .collect();

    if selected.is_empty() {
        return Err(SstVizError::EmptySelection {
            message: format!("no time steps match month '{}'", target),
        });
    }
    debug!(
        target = target,
        selected = selected.len(),
        "Aggregating time steps"
    );

    let data = field.data();
    let mut result = Array2::<Option<f32>>::from_elem((nlon, nlat), None);
    for i in 0..nlon {
        for j in 0..nlat {
            let mut sum = 0.0_f64;
            let mut count = 0_usize;
            for &t in &selected {
                if let Some(value) = data[[i, j, t]] {
                    sum += value as f64;
                    count += 1;
                }
            }
            if count > 0 {
                result[[i, j]] = Some((sum / count as f64) as f32);
            }
        }
    }

    Field::new(result.into_dyn(), field.dimensions()[..2].to_vec())
}
