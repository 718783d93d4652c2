//! Boundary graph construction.
//!
//! Adjacent columns' breakpoints are merged top to bottom and every pair of
//! consecutive breakpoints is joined by an edge:
//! - Horizontal edges are deferred per row so runs of them merge into one.
//! - A diagonal edge that ends a deferred horizontal is snapped to the right
//!   column, turning the corner into a right angle.
//! - Open spans are closed one column to the right at gaps and at the end,
//!   so every traced polygon has positive area.
//!
//! Every edge belongs to exactly one boundary curve, so the finished graph
//! decomposes into closed walks.

use std::collections::HashMap;

use super::breakpoints::ColumnBreaks;

/// Index of a vertex in a [`BoundaryGraph`].
pub type VertexId = usize;

/// A pixel corner: `x` is the column, `y` the row.
///
/// Ordering is by column, then row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex {
    pub x: i64,
    pub y: i64,
}

impl Vertex {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Undirected boundary graph over an arena of vertices.
///
/// Each edge is stored in both endpoints' adjacency lists, in insertion
/// order. Parallel edges collapse into one.
#[derive(Clone, Debug, Default)]
pub struct BoundaryGraph {
    vertices: Vec<Vertex>,
    lookup: HashMap<Vertex, VertexId>,
    adjacency: Vec<Vec<VertexId>>,
}

impl BoundaryGraph {
    /// Number of distinct vertices ever inserted.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges still stored.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns `true` once every edge has been consumed.
    pub fn is_empty(&self) -> bool {
        self.adjacency.iter().all(Vec::is_empty)
    }

    pub fn vertex(&self, id: VertexId) -> Vertex {
        self.vertices[id]
    }

    pub fn id_of(&self, vertex: Vertex) -> Option<VertexId> {
        self.lookup.get(&vertex).copied()
    }

    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        &self.adjacency[id]
    }

    /// Vertex ids sorted by column, then row.
    pub fn sorted_ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = (0..self.vertices.len()).collect();
        ids.sort_unstable_by_key(|&id| self.vertices[id]);
        ids
    }

    fn intern(&mut self, vertex: Vertex) -> VertexId {
        if let Some(&id) = self.lookup.get(&vertex) {
            return id;
        }
        let id = self.vertices.len();
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        self.lookup.insert(vertex, id);
        id
    }

    /// Insert the undirected edge `a - b`.
    pub(crate) fn link(&mut self, a: Vertex, b: Vertex) {
        if a == b {
            return;
        }
        let ia = self.intern(a);
        let ib = self.intern(b);
        if !self.adjacency[ia].contains(&ib) {
            self.adjacency[ia].push(ib);
            self.adjacency[ib].push(ia);
        }
    }

    /// Remove and return the oldest remaining edge at `id`, detaching it
    /// from the other endpoint too. Returns `None` if `id` has no edges or
    /// the mirror entry is missing.
    pub(crate) fn take_edge(&mut self, id: VertexId) -> Option<VertexId> {
        if self.adjacency[id].is_empty() {
            return None;
        }
        let next = self.adjacency[id].remove(0);
        let back = self.adjacency[next].iter().position(|&v| v == id)?;
        self.adjacency[next].remove(back);
        Some(next)
    }
}

/// Edge emitter with the pending-horizontal state.
#[derive(Default)]
struct GraphBuilder {
    graph: BoundaryGraph,
    /// Row -> starting column of a horizontal run not yet committed.
    pending: HashMap<i64, i64>,
}

impl GraphBuilder {
    /// Commit the pending horizontal at row `y`, ending at column `x2`.
    ///
    /// A horizontal cannot end at its own start; it stays open and may still
    /// grow the other way.
    fn close_horizontal(&mut self, y: i64, x2: i64) {
        let Some(&x1) = self.pending.get(&y) else {
            return;
        };
        if x1 != x2 {
            self.graph.link(Vertex::new(x1, y), Vertex::new(x2, y));
            self.pending.remove(&y);
        }
    }

    fn add_segment(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        if y1 == y2 {
            self.pending.entry(y1).or_insert(x1);
            return;
        }

        // Columns differ by at most one here, so snapping to the larger one
        // turns a diagonal into a vertical.
        let snap_x = x1.max(x2);
        let mut straighten = false;
        if self.pending.contains_key(&y1) {
            self.close_horizontal(y1, snap_x);
            straighten = true;
        }
        if self.pending.contains_key(&y2) {
            self.close_horizontal(y2, snap_x);
            straighten = true;
        }

        if straighten {
            self.graph
                .link(Vertex::new(snap_x, y1), Vertex::new(snap_x, y2));
        } else {
            self.graph.link(Vertex::new(x1, y1), Vertex::new(x2, y2));
        }
    }

    /// Close every span still open in `column` along its right edge.
    fn close_column(&mut self, column: i64, rows: &[i64]) {
        for &y in rows {
            self.add_segment(column, y, column + 1, y);
        }
        for pair in rows.chunks_exact(2) {
            self.add_segment(column + 1, pair[0], column + 1, pair[1]);
        }
    }

    /// Merge two adjacent columns' breakpoints in row order and join each
    /// consecutive pair.
    fn join_columns(&mut self, prev_x: i64, prev: &[i64], x: i64, cur: &[i64]) {
        let from_prev = prev.first().is_some_and(|&p| p <= cur[0]);
        let (mut ax, mut ay) = if from_prev {
            (prev_x, prev[0])
        } else {
            (x, cur[0])
        };
        let (mut i, mut j) = if from_prev { (1, 0) } else { (0, 1) };
        let mut opens = true;

        while i < prev.len() || j < cur.len() {
            let (bx, by) = if i == prev.len() || (j < cur.len() && cur[j] < prev[i]) {
                j += 1;
                (x, cur[j - 1])
            } else {
                i += 1;
                (prev_x, prev[i - 1])
            };

            if opens {
                if ax == prev_x && bx == prev_x {
                    // Span ends in the previous column: close it on the
                    // current column's left edge.
                    self.add_segment(prev_x, ay, x, ay);
                    self.add_segment(prev_x, by, x, by);
                    self.add_segment(x, ay, x, by);
                } else {
                    self.add_segment(ax, ay, bx, by);
                }
            }
            opens = !opens;
            ax = bx;
            ay = by;
        }
    }

    fn finish(self) -> BoundaryGraph {
        if !self.pending.is_empty() {
            tracing::warn!(
                open_rows = self.pending.len(),
                "boundary graph finished with uncommitted horizontal edges"
            );
        }
        self.graph
    }
}

/// Build the boundary graph for a sequence of column breakpoints given in
/// increasing column order.
pub fn build_boundary_graph(columns: &[ColumnBreaks]) -> BoundaryGraph {
    let mut builder = GraphBuilder::default();
    let mut last_column: i64 = -1;
    let mut last_rows: Vec<i64> = Vec::new();

    for brk in columns {
        if brk.rows.is_empty() {
            continue;
        }
        let column = brk.column as i64;
        let rows: Vec<i64> = brk.rows.iter().map(|&r| r as i64).collect();

        if column != last_column + 1 {
            builder.close_column(last_column, &last_rows);
            last_column = column - 1;
            last_rows.clear();
        }

        builder.join_columns(last_column, &last_rows, column, &rows);
        last_column = column;
        last_rows = rows;
    }
    builder.close_column(last_column, &last_rows);

    builder.finish()
}
