//! MaskTrace
//!
//! Vectorizes raster segmentation masks into closed path outlines, with
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Mask Format
//! Masks are row-major `(height, width)` arrays of `f32` scores, as produced
//! by segmentation models. A pixel is filled iff its score is greater than
//! the fill threshold (0.0 by default).
//!
//! ## Output Format
//! Each region becomes one path string, `M x0 y0 L x1 y1 x2 y2 ...`, with
//! coordinates at pixel-corner resolution multiplied by the display scale.
//! Paths are implicitly closed. Outer boundaries wind counter-clockwise on
//! screen and holes clockwise, so a nonzero fill renders holes empty.
//! Regions with an area at or below the configured threshold are dropped,
//! but a mask with any foreground always yields at least one path.

pub mod config;
pub mod error;
pub mod tracer;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{TraceConfig, DEFAULT_MIN_REGION_AREA};
pub use error::{DecodeError, TraceError, TraceResult};
pub use tracer::{
    trace, trace_batch, trace_rle, trace_view, trace_with_config, Rle, TracedPath, Vertex, Winding,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::PyReadonlyArray2;
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::{TraceConfig, DEFAULT_MIN_REGION_AREA};
    use crate::error::TraceError;
    use crate::tracer::{self, Rle};

    fn to_py_err(err: TraceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Tracing
    // ========================================================================

    /// Trace a float32 (height, width) mask into path strings.
    ///
    /// # Arguments
    /// * `mask` - Segmentation scores; a pixel is filled iff score > `fill_threshold`
    /// * `scale` - Display scale applied to every coordinate
    /// * `min_region_area` - Regions at or below this area are dropped
    /// * `fill_threshold` - Score cutoff (default: 0.0)
    #[pyfunction]
    #[pyo3(signature = (mask, scale=1.0, min_region_area=DEFAULT_MIN_REGION_AREA, fill_threshold=0.0))]
    pub fn trace_mask<'py>(
        mask: PyReadonlyArray2<'py, f32>,
        scale: f64,
        min_region_area: i64,
        fill_threshold: f32,
    ) -> PyResult<Vec<String>> {
        let config = TraceConfig::default()
            .with_min_region_area(min_region_area)
            .with_fill_threshold(fill_threshold);
        let paths = tracer::trace_view(mask.as_array(), scale, &config).map_err(to_py_err)?;
        Ok(tracer::to_path_data(&paths))
    }

    /// Trace column-major run lengths (background first) into path strings.
    #[pyfunction]
    #[pyo3(name = "trace_rle", signature = (counts, height, width, scale=1.0, min_region_area=DEFAULT_MIN_REGION_AREA))]
    pub fn trace_rle_py(
        counts: Vec<u32>,
        height: usize,
        width: usize,
        scale: f64,
        min_region_area: i64,
    ) -> PyResult<Vec<String>> {
        let rle = Rle::from_counts(height, width, counts).map_err(|e| to_py_err(e.into()))?;
        let config = TraceConfig::default().with_min_region_area(min_region_area);
        let paths = tracer::trace_rle(&rle, scale, &config).map_err(to_py_err)?;
        Ok(tracer::to_path_data(&paths))
    }

    // ========================================================================
    // Encoding and Filtering
    // ========================================================================

    /// Run-length encode a float32 (height, width) mask in column-major order.
    #[pyfunction]
    #[pyo3(signature = (mask, fill_threshold=0.0))]
    pub fn mask_to_rle<'py>(
        mask: PyReadonlyArray2<'py, f32>,
        fill_threshold: f32,
    ) -> PyResult<Vec<u32>> {
        let rle = tracer::encode_view(mask.as_array(), fill_threshold)
            .map_err(|e| to_py_err(e.into()))?;
        Ok(rle.into_counts())
    }

    /// Drop path strings enclosing at most `max_region_size` square pixels,
    /// keeping the largest one if all would be dropped.
    #[pyfunction]
    #[pyo3(signature = (paths, max_region_size=DEFAULT_MIN_REGION_AREA))]
    pub fn filter_small_regions(paths: Vec<String>, max_region_size: i64) -> PyResult<Vec<String>> {
        tracer::filter_small_path_data(paths, max_region_size).map_err(to_py_err)
    }

    #[pymodule]
    pub fn masktrace(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(trace_mask, m)?)?;
        m.add_function(wrap_pyfunction!(trace_rle_py, m)?)?;
        m.add_function(wrap_pyfunction!(mask_to_rle, m)?)?;
        m.add_function(wrap_pyfunction!(filter_small_regions, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::masktrace;
