//! Raster rendering of 2-D slices.
//!
//! Draws a colormapped raster of one (lon, lat) slice with axis ticks
//! and numeric labels, and optionally a coastline overlay. Absent cells
//! render transparent. The plot area is resampled from the data grid
//! with missing-aware bilinear weights; latitude may arrive ascending or
//! descending, north is always up in the output.

use image::{Rgba, RgbaImage};
use ndarray::ArrayView2;
use std::io::Cursor;
use tracing::debug;

use crate::colormaps::get_colormap;
use crate::error::{Result, SstVizError};
use crate::field::value_range;
use crate::geo::{fractional_index, to_display_longitude, to_source_longitude, BoundingBox, Coastline};

/// Default image dimensions
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Default colormap
pub const DEFAULT_COLORMAP: &str = "viridis";

const MARGIN_LEFT: u32 = 48;
const MARGIN_RIGHT: u32 = 10;
const MARGIN_TOP: u32 = 10;
const MARGIN_BOTTOM: u32 = 30;
const TICK_LENGTH: u32 = 4;
const TICK_COUNT: usize = 5;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS_COLOR: Rgba<u8> = Rgba([40, 40, 40, 255]);
const COAST_COLOR: Rgba<u8> = Rgba([20, 20, 20, 255]);

/// Options controlling a single rendered raster.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Colormap name (e.g. viridis, plasma, coolwarm)
    pub colormap: String,
    /// Fixed color scale range; autocomputed from the data when `None`
    pub scale: Option<(f32, f32)>,
    /// Coastline geometry to overlay
    pub coastline: Option<Coastline>,
    /// Bounding box restricting the coastline overlay
    pub bbox: Option<BoundingBox>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            colormap: DEFAULT_COLORMAP.to_string(),
            scale: None,
            coastline: None,
            bbox: None,
        }
    }
}

/// Render one 2-D slice, shaped (lon, lat), as a colormapped raster.
pub fn render_slice(
    lon: &[f64],
    lat: &[f64],
    values: ArrayView2<Option<f32>>,
    options: &RenderOptions,
) -> Result<RgbaImage> {
    if values.shape() != [lon.len(), lat.len()] {
        return Err(SstVizError::DataNotFound {
            message: format!(
                "slice shape {:?} does not match {} lon x {} lat",
                values.shape(),
                lon.len(),
                lat.len()
            ),
        });
    }
    if lon.len() < 2 || lat.len() < 2 {
        return Err(SstVizError::DataNotFound {
            message: "rendering needs at least a 2x2 grid".to_string(),
        });
    }
    let (plot_w, plot_h) = plot_area(options.width, options.height)?;

    let colormap = get_colormap(&options.colormap)?;
    let (min_val, max_val) = match options.scale {
        Some(scale) => scale,
        None => value_range(values.iter().copied()).unwrap_or((0.0, 1.0)),
    };
    debug!(
        colormap = %options.colormap,
        min = min_val,
        max = max_val,
        "Rendering slice"
    );

    let nlon = lon.len();
    let nlat = lat.len();
    let lon_ascending = lon[0] <= lon[nlon - 1];
    let lat_ascending = lat[0] <= lat[nlat - 1];

    let mut img = RgbaImage::from_pixel(options.width, options.height, BACKGROUND);

    // Raster: resample the grid into the plot area, north up.
    for py in 0..plot_h {
        let ty = py as f64 / (plot_h - 1) as f64;
        let yi = if lat_ascending {
            (1.0 - ty) * (nlat - 1) as f64
        } else {
            ty * (nlat - 1) as f64
        };
        for px in 0..plot_w {
            let tx = px as f64 / (plot_w - 1) as f64;
            let xi = if lon_ascending {
                tx * (nlon - 1) as f64
            } else {
                (1.0 - tx) * (nlon - 1) as f64
            };
            let pixel = match sample_bilinear(&values, xi, yi) {
                Some(value) => Rgba(colormap.map(value, min_val, max_val)),
                // Transparent for absent cells
                None => Rgba([0, 0, 0, 0]),
            };
            img.put_pixel(MARGIN_LEFT + px, MARGIN_TOP + py, pixel);
        }
    }

    draw_axes(&mut img, lon, lat, plot_w, plot_h, lon_ascending, lat_ascending);

    if let Some(coastline) = &options.coastline {
        let clipped = match &options.bbox {
            Some(bbox) => coastline.clip_to(bbox),
            None => coastline.clone(),
        };
        draw_coastline(
            &mut img,
            &clipped,
            lon,
            lat,
            plot_w,
            plot_h,
            lon_ascending,
            lat_ascending,
        );
    }

    Ok(img)
}

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    img.write_to(
        &mut Cursor::new(&mut buffer),
        image::ImageOutputFormat::Png,
    )?;
    Ok(buffer)
}

fn plot_area(width: u32, height: u32) -> Result<(u32, u32)> {
    let min_w = MARGIN_LEFT + MARGIN_RIGHT + 16;
    let min_h = MARGIN_TOP + MARGIN_BOTTOM + 16;
    if width < min_w || height < min_h {
        return Err(SstVizError::InvalidParameter {
            param: "width/height".to_string(),
            message: format!("image must be at least {}x{} pixels", min_w, min_h),
        });
    }
    Ok((width - MARGIN_LEFT - MARGIN_RIGHT, height - MARGIN_TOP - MARGIN_BOTTOM))
}

/// Bilinear sample over optional cells.
///
/// Present neighbors contribute their bilinear weight; if every
/// neighbor is absent the sample is absent.
fn sample_bilinear(values: &ArrayView2<Option<f32>>, xi: f64, yi: f64) -> Option<f32> {
    let nlon = values.shape()[0];
    let nlat = values.shape()[1];

    let x0 = (xi.floor() as usize).min(nlon - 1);
    let y0 = (yi.floor() as usize).min(nlat - 1);
    let x1 = (x0 + 1).min(nlon - 1);
    let y1 = (y0 + 1).min(nlat - 1);
    let wx = xi - x0 as f64;
    let wy = yi - y0 as f64;

    let neighbors = [
        (values[[x0, y0]], (1.0 - wx) * (1.0 - wy)),
        (values[[x1, y0]], wx * (1.0 - wy)),
        (values[[x0, y1]], (1.0 - wx) * wy),
        (values[[x1, y1]], wx * wy),
    ];

    let mut sum = 0.0_f64;
    let mut weight = 0.0_f64;
    for (cell, w) in neighbors {
        if let Some(v) = cell {
            sum += v as f64 * w;
            weight += w;
        }
    }
    if weight > 0.0 {
        Some((sum / weight) as f32)
    } else {
        None
    }
}

/// Linear interpolation of a coordinate array at a fractional index.
fn coordinate_at(coords: &[f64], index: f64) -> f64 {
    let lower = (index.floor() as usize).min(coords.len() - 1);
    let upper = (lower + 1).min(coords.len() - 1);
    let t = index - lower as f64;
    coords[lower] * (1.0 - t) + coords[upper] * t
}

#[allow(clippy::too_many_arguments)]
fn draw_axes(
    img: &mut RgbaImage,
    lon: &[f64],
    lat: &[f64],
    plot_w: u32,
    plot_h: u32,
    lon_ascending: bool,
    lat_ascending: bool,
) {
    let left = MARGIN_LEFT;
    let top = MARGIN_TOP;
    let right = MARGIN_LEFT + plot_w - 1;
    let bottom = MARGIN_TOP + plot_h - 1;

    // Plot border
    for x in left..=right {
        img.put_pixel(x, top, AXIS_COLOR);
        img.put_pixel(x, bottom, AXIS_COLOR);
    }
    for y in top..=bottom {
        img.put_pixel(left, y, AXIS_COLOR);
        img.put_pixel(right, y, AXIS_COLOR);
    }

    // Longitude ticks along the bottom, labeled in display convention
    for k in 0..TICK_COUNT {
        let frac = k as f64 / (TICK_COUNT - 1) as f64;
        let px = left + (frac * (plot_w - 1) as f64).round() as u32;
        let xi = if lon_ascending {
            frac * (lon.len() - 1) as f64
        } else {
            (1.0 - frac) * (lon.len() - 1) as f64
        };
        let label = format_tick(to_display_longitude(coordinate_at(lon, xi)));
        for dy in 1..=TICK_LENGTH {
            img.put_pixel(px, bottom + dy, AXIS_COLOR);
        }
        let label_w = text_width(&label);
        let label_x = (px as i64 - label_w as i64 / 2).max(0) as u32;
        draw_text(img, label_x, bottom + TICK_LENGTH + 3, &label);
    }

    // Latitude ticks along the left edge, north at the top
    for k in 0..TICK_COUNT {
        let frac = k as f64 / (TICK_COUNT - 1) as f64;
        let py = top + (frac * (plot_h - 1) as f64).round() as u32;
        let yi = if lat_ascending {
            (1.0 - frac) * (lat.len() - 1) as f64
        } else {
            frac * (lat.len() - 1) as f64
        };
        let label = format_tick(coordinate_at(lat, yi));
        for dx in 1..=TICK_LENGTH {
            img.put_pixel(left - dx, py, AXIS_COLOR);
        }
        let label_w = text_width(&label);
        let label_x = left.saturating_sub(TICK_LENGTH + 3 + label_w);
        draw_text(img, label_x, py.saturating_sub(GLYPH_HEIGHT / 2), &label);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_coastline(
    img: &mut RgbaImage,
    coastline: &Coastline,
    lon: &[f64],
    lat: &[f64],
    plot_w: u32,
    plot_h: u32,
    lon_ascending: bool,
    lat_ascending: bool,
) {
    let source_is_0360 = lon.iter().any(|&l| l > 180.0);
    let nlon = lon.len();
    let nlat = lat.len();

    let project = |lon_signed: f64, lat_value: f64| -> Option<(i64, i64)> {
        let lon_source = if source_is_0360 {
            to_source_longitude(lon_signed)
        } else {
            lon_signed
        };
        let xi = fractional_index(lon, lon_source)?;
        let yi = fractional_index(lat, lat_value)?;
        let tx = if lon_ascending {
            xi / (nlon - 1) as f64
        } else {
            1.0 - xi / (nlon - 1) as f64
        };
        let ty = if lat_ascending {
            1.0 - yi / (nlat - 1) as f64
        } else {
            yi / (nlat - 1) as f64
        };
        let px = MARGIN_LEFT as i64 + (tx * (plot_w - 1) as f64).round() as i64;
        let py = MARGIN_TOP as i64 + (ty * (plot_h - 1) as f64).round() as i64;
        Some((px, py))
    };

    for segment in &coastline.segments {
        let mut previous: Option<(i64, i64)> = None;
        for &(lon_signed, lat_value) in segment {
            let point = project(lon_signed, lat_value);
            if let (Some(a), Some(b)) = (previous, point) {
                draw_line(img, a, b, plot_w, plot_h);
            }
            previous = point;
        }
    }
}

/// Bresenham line restricted to the plot area.
fn draw_line(img: &mut RgbaImage, from: (i64, i64), to: (i64, i64), plot_w: u32, plot_h: u32) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let x_min = MARGIN_LEFT as i64;
    let x_max = MARGIN_LEFT as i64 + plot_w as i64 - 1;
    let y_min = MARGIN_TOP as i64;
    let y_max = MARGIN_TOP as i64 + plot_h as i64 - 1;

    loop {
        if x >= x_min && x <= x_max && y >= y_min && y <= y_max {
            img.put_pixel(x as u32, y as u32, COAST_COLOR);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Format a tick value: whole degrees without decimals.
fn format_tick(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract().abs() < 1e-9 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_SPACING: u32 = 1;

/// 5x7 bitmap rows for the characters tick labels can contain.
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b01110, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        _ => return None,
    };
    Some(rows)
}

fn text_width(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    text.chars().count() as u32 * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING
}

fn draw_text(img: &mut RgbaImage, x: u32, y: u32, text: &str) {
    let mut cursor = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (dy, row) in rows.iter().enumerate() {
                for dx in 0..GLYPH_WIDTH {
                    if row & (1 << (GLYPH_WIDTH - 1 - dx)) != 0 {
                        let px = cursor + dx;
                        let py = y + dy as u32;
                        if px < img.width() && py < img.height() {
                            img.put_pixel(px, py, AXIS_COLOR);
                        }
                    }
                }
            }
        }
        cursor += GLYPH_WIDTH + GLYPH_SPACING;
    }
}
