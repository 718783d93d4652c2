//! WebAssembly exports for mask tracing.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Masks are
//! flat row-major `Float32Array`s of length `width * height`.

use wasm_bindgen::prelude::*;

use crate::config::TraceConfig;
use crate::tracer::{self, encode};

// ============================================================================
// Tracing
// ============================================================================

/// Trace a segmentation mask into path strings.
///
/// # Arguments
/// * `data` - Flat array of scores (length = width * height)
/// * `width` - Mask width in pixels
/// * `height` - Mask height in pixels
/// * `scale` - Display scale applied to every coordinate
///
/// # Returns
/// One `M x y L x y ...` string per region, noise regions removed
#[wasm_bindgen]
pub fn trace_mask_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    scale: f64,
) -> Result<Vec<String>, JsError> {
    let paths = tracer::trace_with_config(data, height, width, scale, &TraceConfig::default())?;
    Ok(tracer::to_path_data(&paths))
}

// ============================================================================
// Encoding and Filtering
// ============================================================================

/// Run-length encode a mask in column-major order, background run first.
#[wasm_bindgen]
pub fn mask_to_rle_wasm(data: &[f32], width: usize, height: usize) -> Result<Vec<u32>, JsError> {
    let rle = encode(data, height, width, 0.0)?;
    Ok(rle.into_counts())
}

/// Drop path strings enclosing at most `max_region_size` square pixels,
/// keeping the largest one if all would be dropped.
#[wasm_bindgen]
pub fn filter_small_regions_wasm(
    paths: Vec<String>,
    max_region_size: u32,
) -> Result<Vec<String>, JsError> {
    Ok(tracer::filter_small_path_data(paths, max_region_size as i64)?)
}
