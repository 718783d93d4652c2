//! Mask tracing: segmentation scores to closed vector paths.
//!
//! The pipeline runs leaves first:
//! - **rle**: threshold and run-length encode the mask column by column
//! - **breakpoints**: per-column rows where the fill state flips
//! - **graph**: boundary graph with merged horizontals and straightened corners
//! - **cycles**: drain the graph into closed vertex loops
//! - **orient**: solid/hole winding by containment parity, path-data output
//! - **region**: drop regions at or below the area threshold
//!
//! Every call builds and discards its own state. Independent masks can be
//! traced in parallel with [`trace_batch`].

pub mod breakpoints;
pub mod cycles;
pub mod graph;
pub mod orient;
pub mod region;
pub mod rle;

use ndarray::ArrayView2;
use rayon::prelude::*;

use crate::config::TraceConfig;
use crate::error::{TraceError, TraceResult};

pub use breakpoints::{line_breakpoints, ColumnBreaks};
pub use cycles::{extract_cycles, Path};
pub use graph::{build_boundary_graph, BoundaryGraph, Vertex, VertexId};
pub use orient::{orient_paths, point_in_polygon, TracedPath, Winding};
pub use region::{filter_small_path_data, filter_small_regions, legacy_area, path_data_area};
pub use rle::{decode_mask, encode, encode_view, Rle};

fn check_scale(scale: f64) -> TraceResult<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(TraceError::InvalidScale(scale))
    }
}

/// Trace already encoded runs.
///
/// Masks without foreground produce no paths.
pub fn trace_rle(rle: &Rle, scale: f64, config: &TraceConfig) -> TraceResult<Vec<TracedPath>> {
    check_scale(scale)?;
    if !rle.has_foreground() {
        tracing::debug!("mask has no foreground");
        return Ok(Vec::new());
    }

    let columns = line_breakpoints(rle)?;
    let graph = build_boundary_graph(&columns);
    tracing::debug!(
        runs = rle.counts().len(),
        foreground = rle.foreground_area(),
        columns = columns.len(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "built boundary graph"
    );

    let cycles = extract_cycles(graph)?;
    let paths = orient_paths(cycles, scale);
    let traced = paths.len();
    let kept = filter_small_regions(paths, config.min_region_area);
    tracing::debug!(traced, kept = kept.len(), "filtered regions");

    Ok(kept)
}

/// Trace a `(height, width)` score array.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(height = mask.nrows(), width = mask.ncols(), scale = scale)
)]
pub fn trace_view(
    mask: ArrayView2<f32>,
    scale: f64,
    config: &TraceConfig,
) -> TraceResult<Vec<TracedPath>> {
    let rle = encode_view(mask, config.fill_threshold)?;
    trace_rle(&rle, scale, config)
}

/// Trace a flat row-major score buffer with an explicit configuration.
pub fn trace_with_config(
    data: &[f32],
    height: usize,
    width: usize,
    scale: f64,
    config: &TraceConfig,
) -> TraceResult<Vec<TracedPath>> {
    let rle = encode(data, height, width, config.fill_threshold)?;
    trace_rle(&rle, scale, config)
}

/// Trace a flat row-major score buffer into path strings using the default
/// configuration.
///
/// # Arguments
/// * `data` - Scores, length `height * width`; a pixel is filled iff its score > 0
/// * `height` - Mask height
/// * `width` - Mask width
/// * `scale` - Display scale applied to every coordinate
///
/// # Returns
/// One `M x y L x y ...` string per kept region, holes wound opposite to
/// solids.
pub fn trace(data: &[f32], height: usize, width: usize, scale: f64) -> TraceResult<Vec<String>> {
    let paths = trace_with_config(data, height, width, scale, &TraceConfig::default())?;
    Ok(to_path_data(&paths))
}

/// Render traced paths as path strings.
pub fn to_path_data(paths: &[TracedPath]) -> Vec<String> {
    paths.iter().map(TracedPath::to_path_data).collect()
}

/// Trace independent masks in parallel. Results keep the input order.
pub fn trace_batch(
    masks: &[ArrayView2<'_, f32>],
    scale: f64,
    config: &TraceConfig,
) -> Vec<TraceResult<Vec<TracedPath>>> {
    masks
        .par_iter()
        .map(|mask| trace_view(mask.view(), scale, config))
        .collect()
}
