//! Area-based noise filtering.
//!
//! Areas are summed per edge as the rectangle under the edge plus its
//! triangle, with the triangle truncated toward zero and coordinates
//! truncated to integers. Region thresholds are tuned against this
//! truncating estimate, so it is kept as is rather than replaced by an
//! exact shoelace sum.

use super::orient::TracedPath;
use crate::error::{TraceError, TraceResult};

/// Signed area contribution of the edge `(x0, y0) -> (x1, y1)`.
#[inline]
fn area_under_edge((x0, y0): (i128, i128), (x1, y1): (i128, i128)) -> i128 {
    if x0 == x1 {
        return 0;
    }
    let dx = x1 - x0;
    // Integer division truncates toward zero.
    dx.saturating_mul(y0.min(y1))
        .saturating_add(dx.saturating_mul((y1 - y0).abs()) / 2)
}

/// Signed area of a closed polyline, including the edge from the last point
/// back to the first. Positive for the solid winding.
///
/// Sums that leave the `i64` range saturate at `±i64::MAX`, so the absolute
/// value of any returned area is representable.
pub fn legacy_area<I>(points: I) -> i64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    // `as` saturates out-of-range and infinite coordinates.
    let points: Vec<(i128, i128)> = points
        .into_iter()
        .map(|(x, y)| (x.trunc() as i64 as i128, y.trunc() as i64 as i128))
        .collect();
    let Some(&last) = points.last() else {
        return 0;
    };

    let mut prev = last;
    let mut area: i128 = 0;
    for &p in &points {
        area = area.saturating_add(area_under_edge(prev, p));
        prev = p;
    }
    area.clamp(-(i64::MAX as i128), i64::MAX as i128) as i64
}

fn parse_coord(token: &str) -> TraceResult<f64> {
    token
        .trim_start_matches(|c: char| c == 'M' || c == 'L')
        .parse::<f64>()
        .map_err(|_| TraceError::path_syntax(format!("bad coordinate {token:?}")))
}

/// Signed area of a `M x0 y0 L x1 y1 ...` path string.
///
/// Strings with fewer than two points or an odd coordinate count have
/// area 0.
pub fn path_data_area(data: &str) -> TraceResult<i64> {
    let tokens: Vec<&str> = data.split_whitespace().collect();
    if tokens.len() < 4 || tokens.len() % 2 != 0 {
        return Ok(0);
    }

    let coords = tokens
        .iter()
        .map(|t| parse_coord(t))
        .collect::<TraceResult<Vec<f64>>>()?;
    Ok(legacy_area(coords.chunks_exact(2).map(|c| (c[0], c[1]))))
}

/// Indices of the regions to keep: every region whose absolute area exceeds
/// `max_region_area`, or else the single largest one.
fn select_regions(areas: &[i64], max_region_area: i64) -> Vec<usize> {
    let kept: Vec<usize> = areas
        .iter()
        .enumerate()
        .filter(|(_, a)| a.abs() > max_region_area)
        .map(|(i, _)| i)
        .collect();
    if !kept.is_empty() || areas.is_empty() {
        return kept;
    }

    let mut best = 0;
    for (i, a) in areas.iter().enumerate().skip(1) {
        if a.abs() > areas[best].abs() {
            best = i;
        }
    }
    vec![best]
}

fn keep_indices<T>(items: Vec<T>, indices: &[usize]) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| indices.contains(i))
        .map(|(_, item)| item)
        .collect()
}

/// Drop regions at or below `max_region_area`, never returning an empty list
/// for non-empty input.
pub fn filter_small_regions(paths: Vec<TracedPath>, max_region_area: i64) -> Vec<TracedPath> {
    let areas: Vec<i64> = paths.iter().map(TracedPath::area).collect();
    let kept = select_regions(&areas, max_region_area);
    keep_indices(paths, &kept)
}

/// [`filter_small_regions`] for already rendered path strings.
pub fn filter_small_path_data(
    paths: Vec<String>,
    max_region_area: i64,
) -> TraceResult<Vec<String>> {
    let areas = paths
        .iter()
        .map(|p| path_data_area(p))
        .collect::<TraceResult<Vec<i64>>>()?;
    let kept = select_regions(&areas, max_region_area);
    Ok(keep_indices(paths, &kept))
}
