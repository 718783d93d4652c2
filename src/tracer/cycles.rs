//! Closed-walk extraction from the boundary graph.

use super::graph::{BoundaryGraph, Vertex};
use crate::error::{TraceError, TraceResult};

/// A closed vertex loop. The last vertex connects back to the first.
pub type Path = Vec<Vertex>;

/// Drain the graph into closed paths.
///
/// Each walk starts at the smallest vertex that still has edges, follows
/// the oldest remaining edge at every step, and stops on returning to its
/// start. Consumed edges are removed from both endpoints. A walk that gets
/// stuck means the graph was not a union of closed walks.
pub fn extract_cycles(mut graph: BoundaryGraph) -> TraceResult<Vec<Path>> {
    let order = graph.sorted_ids();
    let mut paths = Vec::new();
    let mut cursor = 0;

    loop {
        while cursor < order.len() && graph.neighbors(order[cursor]).is_empty() {
            cursor += 1;
        }
        let Some(&start) = order.get(cursor) else {
            break;
        };

        let mut path = vec![graph.vertex(start)];
        let mut current = start;
        loop {
            let next = graph.take_edge(current).ok_or_else(|| {
                TraceError::invariant(format!(
                    "walk from {:?} has no way on at {:?}",
                    graph.vertex(start),
                    graph.vertex(current)
                ))
            })?;
            if next == start {
                break;
            }
            path.push(graph.vertex(next));
            current = next;
        }
        paths.push(path);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::breakpoints::ColumnBreaks;
    use crate::tracer::graph::build_boundary_graph;

    fn v(x: i64, y: i64) -> Vertex {
        Vertex::new(x, y)
    }

    fn col(column: usize, rows: &[usize]) -> ColumnBreaks {
        ColumnBreaks {
            column,
            rows: rows.to_vec(),
        }
    }

    #[test]
    fn test_rectangle_single_cycle() {
        let g = build_boundary_graph(&[col(2, &[1, 4]), col(3, &[1, 4]), col(4, &[1, 4])]);
        let paths = extract_cycles(g).unwrap();
        assert_eq!(paths, vec![vec![v(2, 1), v(2, 4), v(5, 4), v(5, 1)]]);
    }

    #[test]
    fn test_outer_before_hole() {
        let g = build_boundary_graph(&[
            col(1, &[1, 6]),
            col(2, &[1, 6]),
            col(3, &[1, 3, 4, 6]),
            col(4, &[1, 6]),
            col(5, &[1, 6]),
        ]);
        let paths = extract_cycles(g).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], vec![v(1, 1), v(1, 6), v(6, 6), v(6, 1)]);
        assert_eq!(paths[1], vec![v(3, 3), v(3, 4), v(4, 4), v(4, 3)]);
    }

    #[test]
    fn test_corner_touching_pixels_split_at_shared_vertex() {
        // Pixels (0, 0) and (1, 1) share the corner (1, 1).
        let g = build_boundary_graph(&[col(0, &[0, 1]), col(1, &[1, 2])]);
        let paths = extract_cycles(g).unwrap();
        assert_eq!(
            paths,
            vec![
                vec![v(0, 0), v(0, 1), v(1, 1), v(1, 0)],
                vec![v(1, 1), v(1, 2), v(2, 2), v(2, 1)],
            ]
        );
    }

    #[test]
    fn test_open_chain_is_invariant_violation() {
        let mut g = BoundaryGraph::default();
        g.link(v(0, 0), v(0, 1));
        g.link(v(0, 1), v(1, 1));
        let err = extract_cycles(g).unwrap_err();
        assert!(matches!(err, TraceError::InvariantViolation(_)));
    }

    #[test]
    fn test_empty_graph_yields_nothing() {
        let paths = extract_cycles(BoundaryGraph::default()).unwrap();
        assert!(paths.is_empty());
    }
}
