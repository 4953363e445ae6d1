//! Test data generation utilities.
//!
//! Builders that write small synthetic NetCDF files with known data
//! patterns for exercising the pipeline end-to-end.

use std::path::Path;

type Result<T> = std::result::Result<T, netcdf::Error>;

/// The raw missing-value sentinel the test files declare.
pub const SENTINEL: f64 = -9.99e33;

/// Regional grid spanning the dateline in the 0-360 convention.
pub const LON: [f64; 4] = [160.0, 170.0, 180.0, 190.0];
pub const LAT: [f64; 2] = [50.0, 55.0];

/// Creates a regional SST file with three monthly time steps.
///
/// Values follow `10 + 0.5 * flat_index`, except the cell at
/// (lon=0, lat=1, time=2) which carries the raw sentinel. Time offsets
/// are the first days of 1800-01, -02, and -03.
pub fn create_regional_sst_nc(path: &Path) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_attribute("title", "sstviz regional test data")?;
    file.add_dimension("lon", LON.len())?;
    file.add_dimension("lat", LAT.len())?;
    file.add_dimension("time", 3)?;

    let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
    lon_var.put_attribute("units", "degrees_east")?;
    lon_var.put_values(&LON, ..)?;

    let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
    lat_var.put_attribute("units", "degrees_north")?;
    lat_var.put_values(&LAT, ..)?;

    let mut time_var = file.add_variable::<f64>("time", &["time"])?;
    time_var.put_attribute("units", "days since 1800-01-01")?;
    time_var.put_values(&[0.0, 31.0, 59.0], ..)?;

    let mut sst_var = file.add_variable::<f32>("sst", &["lon", "lat", "time"])?;
    sst_var.put_attribute("units", "degC")?;
    sst_var.put_attribute("long_name", "sea surface temperature")?;
    sst_var.put_attribute("missing_value", SENTINEL as f32)?;

    let total = LON.len() * LAT.len() * 3;
    let mut values: Vec<f32> = (0..total).map(|i| 10.0 + i as f32 * 0.5).collect();
    // (lon=0, lat=1, time=2) in row-major order
    values[5] = SENTINEL as f32;
    sst_var.put_values(&values, ..)?;

    Ok(())
}

/// Creates a 12-month climatology file where every cell of month m
/// holds the constant m (1-based).
pub fn create_monthly_climatology_nc(path: &Path) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_attribute("title", "sstviz climatology test data")?;
    file.add_dimension("lon", LON.len())?;
    file.add_dimension("lat", LAT.len())?;
    file.add_dimension("time", 12)?;

    let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
    lon_var.put_attribute("units", "degrees_east")?;
    lon_var.put_values(&LON, ..)?;

    let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
    lat_var.put_attribute("units", "degrees_north")?;
    lat_var.put_values(&LAT, ..)?;

    // First day of each month of 1800 (not a leap year)
    let offsets: [f64; 12] = [
        0.0, 31.0, 59.0, 90.0, 120.0, 151.0, 181.0, 212.0, 243.0, 273.0, 304.0, 334.0,
    ];
    let mut time_var = file.add_variable::<f64>("time", &["time"])?;
    time_var.put_attribute("units", "days since 1800-01-01")?;
    time_var.put_values(&offsets, ..)?;

    let mut sst_var = file.add_variable::<f32>("sst", &["lon", "lat", "time"])?;
    sst_var.put_attribute("units", "degC")?;
    sst_var.put_attribute("missing_value", SENTINEL as f32)?;

    let mut values = Vec::with_capacity(LON.len() * LAT.len() * 12);
    for _lon in 0..LON.len() {
        for _lat in 0..LAT.len() {
            for month in 1..=12 {
                values.push(month as f32);
            }
        }
    }
    sst_var.put_values(&values, ..)?;

    Ok(())
}
