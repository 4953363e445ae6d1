//! Post-load missing-value audit.
//!
//! The loader converts sentinel-valued cells to absent markers; this
//! check makes that conversion auditable by scanning a loaded field for
//! cells that still equal the raw sentinel exactly. It gates nothing;
//! the result is reported and the pipeline continues.

use ndarray::Dimension;
use tracing::{info, warn};

use crate::field::Field;

/// Result of scanning a field for surviving sentinel values.
#[derive(Debug, Clone, PartialEq)]
pub struct SentinelAudit {
    /// The raw sentinel value scanned for
    pub sentinel: f64,
    /// Number of cells still exactly equal to the sentinel
    pub matches: usize,
    /// Index of the first offending cell, if any
    pub first_index: Option<Vec<usize>>,
}

impl SentinelAudit {
    /// Whether the conversion left no sentinel behind.
    pub fn is_clean(&self) -> bool {
        self.matches == 0
    }

    /// Log the audit outcome.
    pub fn log(&self, variable: &str) {
        if self.is_clean() {
            info!(
                variable = variable,
                sentinel = self.sentinel,
                "No sentinel values survived loading"
            );
        } else {
            warn!(
                variable = variable,
                sentinel = self.sentinel,
                matches = self.matches,
                first_index = ?self.first_index,
                "Sentinel values survived loading"
            );
        }
    }
}

/// Scan a field for cells still exactly equal to the raw sentinel.
pub fn sentinel_audit(field: &Field, sentinel: f64) -> SentinelAudit {
    let needle = sentinel as f32;
    let mut matches = 0;
    let mut first_index = None;

    for (index, cell) in field.data().indexed_iter() {
        if *cell == Some(needle) {
            matches += 1;
            if first_index.is_none() {
                first_index = Some(index.slice().to_vec());
            }
        }
    }

    SentinelAudit {
        sentinel,
        matches,
        first_index,
    }
}
