//! Winding assignment and path-data output.
//!
//! Paths come out of extraction counter-clockwise on a y-down raster, outer
//! curves before the curves nested inside them. A path whose sample point
//! lies inside an odd number of earlier paths is a hole and gets the
//! opposite winding, so a nonzero fill renders it empty.

use std::fmt::{self, Write};

use super::cycles::Path;
use super::graph::Vertex;
use super::region::legacy_area;

/// Fill role of a traced path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    /// Counter-clockwise on screen, positive area.
    Solid,
    /// Clockwise on screen, negative area.
    Hole,
}

/// A closed path with its winding, scale and signed area.
#[derive(Clone, Debug, PartialEq)]
pub struct TracedPath {
    vertices: Vec<Vertex>,
    winding: Winding,
    scale: f64,
    area: i64,
}

impl TracedPath {
    pub fn new(vertices: Vec<Vertex>, winding: Winding, scale: f64) -> Self {
        let mut path = Self {
            vertices,
            winding,
            scale,
            area: 0,
        };
        path.area = legacy_area(path.points());
        path
    }

    /// Unscaled pixel-corner vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }

    pub fn is_hole(&self) -> bool {
        self.winding == Winding::Hole
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Signed area of the scaled path, see [`legacy_area`].
    pub fn area(&self) -> i64 {
        self.area
    }

    /// Vertices multiplied by the display scale.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.vertices
            .iter()
            .map(move |v| (v.x as f64 * self.scale, v.y as f64 * self.scale))
    }

    /// Render as `M x0 y0 L x1 y1 ...` path data (closed by the consumer).
    pub fn to_path_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TracedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut points = self.points();
        let Some((x0, y0)) = points.next() else {
            return Ok(());
        };
        write!(f, "M{x0} {y0} L")?;
        for (i, (x, y)) in points.enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{x} {y}")?;
        }
        Ok(())
    }
}

/// Twice the exact signed area; positive for the solid winding.
pub fn twice_signed_area(path: &[Vertex]) -> i64 {
    let Some(&last) = path.last() else {
        return 0;
    };
    let mut prev = last;
    let mut sum = 0;
    for &v in path {
        sum += (v.x - prev.x) * (v.y + prev.y);
        prev = v;
    }
    sum
}

/// Even-odd ray cast of `(px, py)` against a closed vertex loop.
///
/// The ray runs toward `+x`. A point lying exactly on an edge is inside only
/// when the polygon's interior is to its right.
pub fn point_in_polygon(px: f64, py: f64, polygon: &[Vertex]) -> bool {
    let Some(&last) = polygon.last() else {
        return false;
    };
    let mut inside = false;
    let mut prev = last;
    for &v in polygon {
        let (x0, y0) = (prev.x as f64, prev.y as f64);
        let (x1, y1) = (v.x as f64, v.y as f64);
        if (y0 > py) != (y1 > py) {
            let cross_x = x0 + (py - y0) * (x1 - x0) / (y1 - y0);
            if px < cross_x {
                inside = !inside;
            }
        }
        prev = v;
    }
    inside
}

/// Reverse traversal direction while keeping the start vertex first.
fn reverse_winding(path: &mut Path) {
    if path.len() > 2 {
        path[1..].reverse();
    }
}

/// Assign windings in extraction order and attach the display scale.
///
/// Each path is sampled at the pixel centre just inside its start vertex
/// and tested against every path accepted before it. The sample can sit on
/// an unstraightened diagonal edge, where the tie rule of
/// [`point_in_polygon`] settles containment.
pub fn orient_paths(paths: Vec<Path>, scale: f64) -> Vec<TracedPath> {
    let mut accepted: Vec<TracedPath> = Vec::with_capacity(paths.len());

    for mut path in paths {
        let Some(&start) = path.first() else {
            continue;
        };
        if twice_signed_area(&path) < 0 {
            reverse_winding(&mut path);
        }

        let (sx, sy) = (start.x as f64 + 0.5, start.y as f64 + 0.5);
        let depth = accepted
            .iter()
            .filter(|p| point_in_polygon(sx, sy, p.vertices()))
            .count();

        let winding = if depth % 2 == 1 {
            reverse_winding(&mut path);
            Winding::Hole
        } else {
            Winding::Solid
        };
        accepted.push(TracedPath::new(path, winding, scale));
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i64, y: i64) -> Vertex {
        Vertex::new(x, y)
    }

    fn square(x: i64, y: i64, side: i64) -> Path {
        vec![v(x, y), v(x, y + side), v(x + side, y + side), v(x + side, y)]
    }

    #[test]
    fn test_extraction_order_is_solid_winding() {
        assert_eq!(twice_signed_area(&square(0, 0, 3)), 18);
        let mut reversed = square(0, 0, 3);
        reverse_winding(&mut reversed);
        assert_eq!(twice_signed_area(&reversed), -18);
    }

    #[test]
    fn test_point_in_polygon() {
        let sq = square(2, 2, 4);
        assert!(point_in_polygon(2.5, 2.5, &sq));
        assert!(point_in_polygon(5.5, 5.5, &sq));
        assert!(!point_in_polygon(6.5, 2.5, &sq));
        assert!(!point_in_polygon(1.5, 3.0, &sq));
    }

    #[test]
    fn test_point_on_diagonal_edge() {
        // Both triangles have the diagonal (0, 0)-(2, 2) through (0.5, 0.5).
        let left = vec![v(0, 0), v(0, 2), v(2, 2)];
        let right = vec![v(0, 0), v(2, 2), v(2, 0)];
        assert!(!point_in_polygon(0.5, 0.5, &left));
        assert!(point_in_polygon(0.5, 0.5, &right));
        assert!(point_in_polygon(0.5, 1.0, &left));
        assert!(!point_in_polygon(0.5, 1.0, &right));
    }

    #[test]
    fn test_nested_paths_alternate() {
        let paths = vec![square(0, 0, 10), square(2, 2, 6), square(4, 4, 2)];
        let oriented = orient_paths(paths, 1.0);
        let windings: Vec<Winding> = oriented.iter().map(TracedPath::winding).collect();
        assert_eq!(windings, vec![Winding::Solid, Winding::Hole, Winding::Solid]);
        assert_eq!(oriented[0].area(), 100);
        assert_eq!(oriented[1].area(), -36);
        assert_eq!(oriented[2].area(), 4);
    }

    #[test]
    fn test_hole_keeps_start_vertex() {
        let oriented = orient_paths(vec![square(0, 0, 5), square(1, 1, 2)], 1.0);
        assert_eq!(
            oriented[1].vertices(),
            &[v(1, 1), v(3, 1), v(3, 3), v(1, 3)]
        );
    }

    #[test]
    fn test_clockwise_input_is_normalized() {
        let mut sq = square(0, 0, 4);
        reverse_winding(&mut sq);
        let oriented = orient_paths(vec![sq], 1.0);
        assert_eq!(oriented[0].winding(), Winding::Solid);
        assert_eq!(oriented[0].area(), 16);
    }

    #[test]
    fn test_siblings_are_both_solid() {
        let oriented = orient_paths(vec![square(0, 0, 2), square(5, 0, 2)], 1.0);
        assert!(oriented.iter().all(|p| !p.is_hole()));
    }

    #[test]
    fn test_path_data_format() {
        let p = TracedPath::new(square(2, 1, 3), Winding::Solid, 1.0);
        assert_eq!(p.to_path_data(), "M2 1 L2 4 5 4 5 1");

        let scaled = TracedPath::new(square(2, 1, 3), Winding::Solid, 1.5);
        assert_eq!(scaled.to_path_data(), "M3 1.5 L3 6 7.5 6 7.5 1.5");
    }
}
