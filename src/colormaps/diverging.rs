//! Diverging colormaps (two-direction progression around a midpoint).
//!
//! Suitable for anomalies and differences where the midpoint is
//! meaningful.

use super::colormap::{sample_stops, Colormap};

/// Coolwarm colormap
pub struct Coolwarm;

const COOLWARM_STOPS: [[u8; 3]; 5] = [
    [59, 76, 192],
    [144, 178, 254],
    [220, 220, 220],
    [245, 156, 125],
    [180, 4, 38],
];

impl Colormap for Coolwarm {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        sample_stops(&COOLWARM_STOPS, value)
    }

    fn name(&self) -> &str {
        "coolwarm"
    }
}

/// RdBu colormap (red to blue)
pub struct RdBu;

const RDBU_STOPS: [[u8; 3]; 5] = [
    [103, 0, 31],
    [214, 96, 77],
    [247, 247, 247],
    [67, 147, 195],
    [5, 48, 97],
];

impl Colormap for RdBu {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        sample_stops(&RDBU_STOPS, value)
    }

    fn name(&self) -> &str {
        "rdbu"
    }
}

/// Seismic colormap (blue through white to red)
pub struct Seismic;

const SEISMIC_STOPS: [[u8; 3]; 5] = [
    [0, 0, 76],
    [0, 0, 255],
    [255, 255, 255],
    [255, 0, 0],
    [128, 0, 0],
];

impl Colormap for Seismic {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        sample_stops(&SEISMIC_STOPS, value)
    }

    fn name(&self) -> &str {
        "seismic"
    }
}
