//! Sequential colormaps (single-direction progression).
//!
//! These colormaps are suitable for data that progresses from low to
//! high, like temperature. Control points follow the matplotlib
//! references; intermediate values interpolate linearly.

use super::colormap::{sample_stops, Colormap};

/// Viridis colormap - perceptually uniform, colorblind-friendly
pub struct Viridis;

const VIRIDIS_STOPS: [[u8; 3]; 10] = [
    [68, 1, 84],
    [72, 40, 120],
    [62, 74, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [109, 205, 89],
    [180, 222, 44],
    [253, 231, 37],
];

impl Colormap for Viridis {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        sample_stops(&VIRIDIS_STOPS, value)
    }

    fn name(&self) -> &str {
        "viridis"
    }
}

/// Plasma colormap
pub struct Plasma;

const PLASMA_STOPS: [[u8; 3]; 8] = [
    [13, 8, 135],
    [84, 2, 163],
    [139, 10, 165],
    [185, 50, 137],
    [219, 92, 104],
    [244, 136, 73],
    [254, 188, 43],
    [240, 249, 33],
];

impl Colormap for Plasma {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        sample_stops(&PLASMA_STOPS, value)
    }

    fn name(&self) -> &str {
        "plasma"
    }
}

/// Inferno colormap
pub struct Inferno;

const INFERNO_STOPS: [[u8; 3]; 9] = [
    [0, 0, 4],
    [31, 12, 72],
    [85, 15, 109],
    [136, 34, 106],
    [186, 54, 85],
    [227, 89, 51],
    [249, 140, 10],
    [249, 201, 50],
    [252, 255, 164],
];

impl Colormap for Inferno {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        sample_stops(&INFERNO_STOPS, value)
    }

    fn name(&self) -> &str {
        "inferno"
    }
}

/// Magma colormap
pub struct Magma;

const MAGMA_STOPS: [[u8; 3]; 9] = [
    [0, 0, 4],
    [28, 16, 68],
    [79, 18, 123],
    [129, 37, 129],
    [181, 54, 122],
    [229, 80, 100],
    [251, 135, 97],
    [254, 194, 135],
    [252, 253, 191],
];

impl Colormap for Magma {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        sample_stops(&MAGMA_STOPS, value)
    }

    fn name(&self) -> &str {
        "magma"
    }
}

/// Cividis colormap - colorblind-friendly alternative to viridis
pub struct Cividis;

const CIVIDIS_STOPS: [[u8; 3]; 9] = [
    [0, 32, 76],
    [0, 42, 102],
    [51, 62, 110],
    [87, 83, 109],
    [118, 104, 110],
    [151, 126, 107],
    [187, 150, 91],
    [222, 176, 62],
    [253, 205, 16],
];

impl Colormap for Cividis {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        sample_stops(&CIVIDIS_STOPS, value)
    }

    fn name(&self) -> &str {
        "cividis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_names() {
        assert_eq!(Viridis.name(), "viridis");
        assert_eq!(Plasma.name(), "plasma");
        assert_eq!(Inferno.name(), "inferno");
        assert_eq!(Magma.name(), "magma");
        assert_eq!(Cividis.name(), "cividis");
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(Viridis.map_normalized(0.0), [68, 1, 84, 255]);
        assert_eq!(Viridis.map_normalized(1.0), [253, 231, 37, 255]);
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        assert_eq!(Plasma.map_normalized(-0.5), Plasma.map_normalized(0.0));
        assert_eq!(Plasma.map_normalized(1.5), Plasma.map_normalized(1.0));
    }
}
