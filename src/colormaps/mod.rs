//! Colormap implementations for raster generation.
//!
//! Matplotlib-inspired colormaps for visualizing gridded data.

pub mod colormap;
pub mod diverging;
pub mod sequential;

pub use colormap::{get_colormap, lerp_color, Colormap};

// Re-export commonly used colormaps
pub use diverging::{Coolwarm, RdBu, Seismic};
pub use sequential::{Cividis, Inferno, Magma, Plasma, Viridis};
