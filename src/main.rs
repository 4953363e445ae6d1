//! sstviz - NetCDF sea-surface temperature pipeline
//!
//! This is the main entry point: load a dataset, derive the calendar
//! axis, audit missing-value conversion, aggregate, and render.

use anyhow::Context;
use clap::Parser;
use ndarray::{Array2, Ix2};
use tracing::{info, warn};

use sstviz::aggregate::monthly_mean;
use sstviz::animate::{render_animation, write_html, Frame};
use sstviz::config::{parse_scale, Args, Config, Source};
use sstviz::geo::{BoundingBox, Coastline};
use sstviz::loader::{fetch_dataset, open_dataset};
use sstviz::quality::sentinel_audit;
use sstviz::render::{render_slice, RenderOptions};
use sstviz::{init_tracing, log_data_load_stats, log_timed_operation, SstVizError, TimeAxis};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::resolve(&args).context("Failed to resolve configuration")?;
    config.validate().context("Invalid configuration")?;
    init_tracing(&config.log_level);

    info!("Starting sstviz v{}", env!("CARGO_PKG_VERSION"));

    let source = args.source()?;
    let source_label = match &source {
        Source::File(path) => path.display().to_string(),
        Source::Remote { year, month } => format!("remote {}-{:02}", year, month),
    };

    let dataset = log_timed_operation("load", || match &source {
        Source::File(path) => open_dataset(path),
        Source::Remote { year, month } => {
            fetch_dataset(*year, *month, &config.data.url_template)
        }
    })
    .with_context(|| format!("Failed to load {}", source_label))?;

    let lon = dataset.coordinate(&config.data.lon_var)?.to_vec();
    let lat = dataset.coordinate(&config.data.lat_var)?.to_vec();
    let time = dataset.coordinate(&config.data.time_var)?.to_vec();
    let sst = dataset.field(&config.data.sst_var)?;

    log_data_load_stats(
        &source_label,
        dataset.variable_names().len(),
        &dataset.variable_names(),
        dataset.metadata.dimensions.len(),
        time.len(),
    );

    let units = dataset
        .attribute(&config.data.time_var, "units")?
        .as_str()
        .ok_or_else(|| SstVizError::InvalidParameter {
            param: "units".to_string(),
            message: format!(
                "units attribute on {} is not text",
                config.data.time_var
            ),
        })?
        .to_string();
    let axis = TimeAxis::from_cf_units(time, &units)?;

    if let Ok(units) = dataset.attribute(&config.data.sst_var, "units") {
        info!(variable = %config.data.sst_var, units = ?units, "Field units");
    }

    match dataset.sentinel(&config.data.sst_var) {
        Some(sentinel) => sentinel_audit(sst, sentinel).log(&config.data.sst_var),
        None => warn!(
            variable = %config.data.sst_var,
            "No missing_value or _FillValue attribute; skipping sentinel audit"
        ),
    }

    let options = RenderOptions {
        width: config.render.width,
        height: config.render.height,
        colormap: config.render.colormap.clone(),
        scale: args.scale.as_deref().map(parse_scale).transpose()?,
        coastline: args
            .coastline
            .as_deref()
            .map(Coastline::from_path)
            .transpose()?,
        bbox: args.bbox.as_deref().map(BoundingBox::parse).transpose()?,
    };

    if let Some(png_path) = &args.png {
        let slice: Array2<Option<f32>> = match &args.target_month {
            Some(target) => {
                let mean = log_timed_operation("aggregate", || {
                    monthly_mean(sst, &axis.months(), target)
                })?;
                info!(
                    target_month = %target,
                    "Rendering monthly mean"
                );
                mean.data().to_owned().into_dimensionality::<Ix2>()?
            }
            None => sst.time_slice(0)?.to_owned().into_dimensionality::<Ix2>()?,
        };

        let img = log_timed_operation("render", || {
            render_slice(&lon, &lat, slice.view(), &options)
        })?;
        img.save(png_path)
            .with_context(|| format!("Failed to write {}", png_path.display()))?;
        info!("Wrote raster: {}", png_path.display());
    }

    if let Some(html_path) = &args.html {
        let titles = axis.year_months();
        let mut frames = Vec::with_capacity(axis.len());
        for t in 0..axis.len() {
            let values = sst.time_slice(t)?.to_owned().into_dimensionality::<Ix2>()?;
            frames.push(Frame::new(titles[t].clone(), values));
        }
        let html = log_timed_operation("animate", || {
            render_animation(&lon, &lat, &frames, &options)
        })?;
        write_html(html_path, &html)?;
    }

    if args.png.is_none() && args.html.is_none() {
        warn!("No output requested; pass --png and/or --html");
    }

    Ok(())
}
