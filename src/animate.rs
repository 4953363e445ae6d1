//! Animated sequences as self-contained HTML.
//!
//! Renders an ordered list of 2-D slices with one color scale shared
//! across the whole sequence, so frames are visually comparable, then
//! embeds the frames base64-encoded into a single HTML document with a
//! small player. The artifact has no external references.

use base64::{prelude::BASE64_STANDARD, Engine};
use ndarray::Array2;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, SstVizError};
use crate::field::value_range;
use crate::render::{encode_png, render_slice, RenderOptions};

/// Interval between animation frames, in milliseconds.
const FRAME_INTERVAL_MS: u32 = 500;

/// One animation frame: a title and a (lon, lat) slice.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Caption shown under the raster, e.g. "1850-05"
    pub title: String,
    /// Cell values, shaped (lon, lat)
    pub values: Array2<Option<f32>>,
}

impl Frame {
    pub fn new(title: impl Into<String>, values: Array2<Option<f32>>) -> Self {
        Self {
            title: title.into(),
            values,
        }
    }
}

/// One color scale covering every present cell of every frame.
pub fn shared_scale(frames: &[Frame]) -> Option<(f32, f32)> {
    value_range(
        frames
            .iter()
            .flat_map(|frame| frame.values.iter().copied()),
    )
}

/// Render a frame sequence into a self-contained HTML document.
///
/// The scale in `options` wins if fixed; otherwise one range is
/// computed across all frames up front.
pub fn render_animation(
    lon: &[f64],
    lat: &[f64],
    frames: &[Frame],
    options: &RenderOptions,
) -> Result<String> {
    if frames.is_empty() {
        return Err(SstVizError::InvalidParameter {
            param: "frames".to_string(),
            message: "animation needs at least one frame".to_string(),
        });
    }

    let scale = match options.scale {
        Some(scale) => scale,
        None => shared_scale(frames).unwrap_or((0.0, 1.0)),
    };
    debug!(
        frames = frames.len(),
        min = scale.0,
        max = scale.1,
        "Rendering animation with shared scale"
    );

    let frame_options = RenderOptions {
        scale: Some(scale),
        ..options.clone()
    };

    let mut encoded = Vec::with_capacity(frames.len());
    for frame in frames {
        let img = render_slice(lon, lat, frame.values.view(), &frame_options)?;
        let png = encode_png(&img)?;
        encoded.push((frame.title.clone(), BASE64_STANDARD.encode(&png)));
    }

    Ok(build_html(&encoded, options.width, options.height))
}

/// Write an HTML document to disk.
pub fn write_html(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html)?;
    info!("Wrote animation: {}", path.display());
    Ok(())
}

fn build_html(frames: &[(String, String)], width: u32, height: u32) -> String {
    let mut entries = String::new();
    for (title, data) in frames {
        entries.push_str(&format!(
            "    {{title: \"{}\", src: \"data:image/png;base64,{}\"}},\n",
            title.replace('"', "\\\""),
            data
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>sstviz animation</title>
<style>
  body {{ font-family: sans-serif; text-align: center; background: #fff; }}
  #frame {{ image-rendering: auto; border: 1px solid #ccc; }}
  #title {{ margin: 8px; font-size: 16px; }}
  #controls {{ margin: 8px; }}
</style>
</head>
<body>
<img id="frame" width="{width}" height="{height}" alt="">
<div id="title"></div>
<div id="controls">
  <button id="toggle">Pause</button>
  <span id="counter"></span>
</div>
<script>
  const frames = [
{entries}  ];
  let index = 0;
  let playing = true;
  const img = document.getElementById("frame");
  const title = document.getElementById("title");
  const counter = document.getElementById("counter");
  const toggle = document.getElementById("toggle");
  function show(i) {{
    img.src = frames[i].src;
    title.textContent = frames[i].title;
    counter.textContent = (i + 1) + " / " + frames.length;
  }}
  toggle.addEventListener("click", () => {{
    playing = !playing;
    toggle.textContent = playing ? "Pause" : "Play";
  }});
  setInterval(() => {{
    if (playing) {{
      index = (index + 1) % frames.length;
      show(index);
    }}
  }}, {interval});
  show(0);
</script>
</body>
</html>
"#,
        width = width,
        height = height,
        entries = entries,
        interval = FRAME_INTERVAL_MS,
    )
}
