//! End-to-end pipeline tests.
//!
//! These tests run the whole chain against generated NetCDF files:
//! load, extract, time-map, audit, aggregate, render, animate.

mod common;

use common::test_data;
use ndarray::Ix2;
use pretty_assertions::assert_eq;

use sstviz::aggregate::monthly_mean;
use sstviz::animate::{render_animation, write_html, Frame};
use sstviz::geo::{BoundingBox, Coastline};
use sstviz::loader::open_dataset;
use sstviz::quality::sentinel_audit;
use sstviz::render::{render_slice, RenderOptions};
use sstviz::{SstVizError, TimeAxis};

fn render_options() -> RenderOptions {
    RenderOptions {
        width: 160,
        height: 120,
        ..Default::default()
    }
}

fn time_axis(dataset: &sstviz::Dataset) -> TimeAxis {
    let offsets = dataset.coordinate("time").unwrap().to_vec();
    let units = dataset
        .attribute("time", "units")
        .unwrap()
        .as_str()
        .unwrap()
        .to_string();
    TimeAxis::from_cf_units(offsets, &units).unwrap()
}

#[test]
fn test_load_and_extract_regional_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regional.nc");
    test_data::create_regional_sst_nc(&path).unwrap();

    let dataset = open_dataset(&path).unwrap();
    assert_eq!(dataset.coordinate("lon").unwrap(), &test_data::LON);
    assert_eq!(dataset.coordinate("lat").unwrap(), &test_data::LAT);

    // Repeated extraction yields identical arrays
    assert_eq!(
        dataset.coordinate("lon").unwrap(),
        dataset.coordinate("lon").unwrap()
    );

    let sst = dataset.field("sst").unwrap();
    assert_eq!(sst.shape(), &[4, 2, 3]);

    // Requesting a variable the file does not have
    match dataset.field("temp") {
        Err(SstVizError::UnknownVariable { name }) => assert_eq!(name, "temp"),
        other => panic!("Expected UnknownVariable, got {:?}", other.map(|_| ())),
    }

    // Attribute lookup and its failure mode
    assert_eq!(
        dataset.attribute("sst", "units").unwrap().as_str(),
        Some("degC")
    );
    assert!(matches!(
        dataset.attribute("sst", "valid_range"),
        Err(SstVizError::MissingAttribute { .. })
    ));
}

#[test]
fn test_sentinel_is_converted_and_audited() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regional.nc");
    test_data::create_regional_sst_nc(&path).unwrap();

    let dataset = open_dataset(&path).unwrap();
    let sentinel = dataset.sentinel("sst").unwrap();
    let sst = dataset.field("sst").unwrap();

    // The loader converted the raw sentinel cell to an absent marker
    assert_eq!(sst.data()[[0, 1, 2]], None);
    assert!(sst
        .data()
        .iter()
        .all(|cell| *cell != Some(sentinel as f32)));

    // So the audit comes back clean
    let audit = sentinel_audit(sst, sentinel);
    assert!(audit.is_clean());
    assert_eq!(audit.matches, 0);
}

#[test]
fn test_calendar_mapping_from_file_units() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regional.nc");
    test_data::create_regional_sst_nc(&path).unwrap();

    let dataset = open_dataset(&path).unwrap();
    let axis = time_axis(&dataset);

    assert_eq!(axis.year_months(), vec!["1800-01", "1800-02", "1800-03"]);
    assert_eq!(axis.months(), vec!["01", "02", "03"]);
}

#[test]
fn test_absent_cell_is_excluded_from_mean() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regional.nc");
    test_data::create_regional_sst_nc(&path).unwrap();

    let dataset = open_dataset(&path).unwrap();
    let sst = dataset.field("sst").unwrap();
    let axis = time_axis(&dataset);

    // March has exactly one slice and the (0, 1) cell is absent in it,
    // so the mean at that cell is itself absent.
    let march = monthly_mean(sst, &axis.months(), "03").unwrap();
    assert_eq!(march.data()[[0, 1]], None);

    // A neighboring cell keeps its single March value: flat index 8
    // maps to (lon=1, lat=0, time=2), value 10 + 8 * 0.5.
    assert_eq!(march.data()[[1, 0]], Some(14.0));
}

#[test]
fn test_single_month_aggregation_returns_slice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("climatology.nc");
    test_data::create_monthly_climatology_nc(&path).unwrap();

    let dataset = open_dataset(&path).unwrap();
    let sst = dataset.field("sst").unwrap();
    let axis = time_axis(&dataset);

    let may = monthly_mean(sst, &axis.months(), "05").unwrap();
    assert_eq!(may.shape(), &[4, 2]);
    for i in 0..4 {
        for j in 0..2 {
            assert_eq!(may.data()[[i, j]], Some(5.0));
        }
    }

    // A month with no matching time steps fails loudly
    assert!(matches!(
        monthly_mean(sst, &axis.months(), "13"),
        Err(SstVizError::EmptySelection { .. })
    ));
}

#[test]
fn test_render_monthly_mean_with_coastline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("climatology.nc");
    test_data::create_monthly_climatology_nc(&path).unwrap();

    let dataset = open_dataset(&path).unwrap();
    let sst = dataset.field("sst").unwrap();
    let axis = time_axis(&dataset);
    let lon = dataset.coordinate("lon").unwrap().to_vec();
    let lat = dataset.coordinate("lat").unwrap().to_vec();

    let may = monthly_mean(sst, &axis.months(), "05").unwrap();
    let slice = may.data().to_owned().into_dimensionality::<Ix2>().unwrap();

    let coastline = Coastline::parse("165 51\n175 53\n185 54\n").unwrap();
    let options = RenderOptions {
        coastline: Some(coastline),
        bbox: Some(BoundingBox::parse("160,50,180,55").unwrap()),
        ..render_options()
    };

    let img = render_slice(&lon, &lat, slice.view(), &options).unwrap();
    assert_eq!((img.width(), img.height()), (160, 120));
}

#[test]
fn test_animation_artifact_is_self_contained() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("climatology.nc");
    test_data::create_monthly_climatology_nc(&path).unwrap();

    let dataset = open_dataset(&path).unwrap();
    let sst = dataset.field("sst").unwrap();
    let axis = time_axis(&dataset);
    let lon = dataset.coordinate("lon").unwrap().to_vec();
    let lat = dataset.coordinate("lat").unwrap().to_vec();

    let titles = axis.year_months();
    let mut frames = Vec::new();
    for t in 0..axis.len() {
        let values = sst
            .time_slice(t)
            .unwrap()
            .to_owned()
            .into_dimensionality::<Ix2>()
            .unwrap();
        frames.push(Frame::new(titles[t].clone(), values));
    }

    let html = render_animation(&lon, &lat, &frames, &render_options()).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches("data:image/png;base64,").count(), 12);
    assert!(html.contains("1800-01"));
    assert!(html.contains("1800-12"));
    // No external references
    assert!(!html.contains("http://"));
    assert!(!html.contains("https://"));

    let out = dir.path().join("animation.html");
    write_html(&out, &html).unwrap();
    assert!(out.metadata().unwrap().len() > 0);
}
