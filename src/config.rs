//! Tracing configuration.

/// Regions whose absolute area is at or below this many square pixels are
/// dropped as noise.
pub const DEFAULT_MIN_REGION_AREA: i64 = 100;

/// Tunables for a single trace call.
///
/// The display scale is passed per call since it follows the viewport,
/// not the mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceConfig {
    /// A pixel is filled iff its score is strictly greater than this.
    pub fill_threshold: f32,
    /// Area cutoff for the region filter, in scaled square pixels.
    pub min_region_area: i64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            fill_threshold: 0.0,
            min_region_area: DEFAULT_MIN_REGION_AREA,
        }
    }
}

impl TraceConfig {
    pub fn with_fill_threshold(mut self, fill_threshold: f32) -> Self {
        self.fill_threshold = fill_threshold;
        self
    }

    pub fn with_min_region_area(mut self, min_region_area: i64) -> Self {
        self.min_region_area = min_region_area;
        self
    }
}
