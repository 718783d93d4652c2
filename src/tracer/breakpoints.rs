//! Per-column fill transitions decoded from run lengths.

use super::rle::Rle;
use crate::error::DecodeError;

/// Rows at which the fill state of one mask column flips.
///
/// A column starts as background; every listed row toggles it, so rows come
/// in (start, end) pairs with `end` exclusive. A fully filled column is
/// `[0, height]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnBreaks {
    pub column: usize,
    pub rows: Vec<usize>,
}

/// Accumulates breakpoints for the column currently being decoded.
struct Cursor {
    column: Option<usize>,
    rows: Vec<usize>,
}

impl Cursor {
    fn flush(&mut self, out: &mut Vec<ColumnBreaks>) {
        if let Some(column) = self.column {
            if !self.rows.is_empty() {
                out.push(ColumnBreaks {
                    column,
                    rows: std::mem::take(&mut self.rows),
                });
            }
        }
    }
}

/// Decode run lengths into per-column breakpoints, in increasing column
/// order. Columns without any foreground are omitted.
pub fn line_breakpoints(rle: &Rle) -> Result<Vec<ColumnBreaks>, DecodeError> {
    rle.validate()?;

    let height = rle.height();
    let counts = rle.counts();
    let mut breaks = Vec::new();
    let mut cursor = Cursor {
        column: None,
        rows: Vec::new(),
    };
    let mut offset = 0usize;

    for pair in counts.chunks_exact(2) {
        let (background, foreground) = (pair[0] as usize, pair[1] as usize);
        offset += background;
        if foreground == 0 {
            continue;
        }

        let (y1, x1) = (offset % height, offset / height);
        offset += foreground;
        let (y2, x2) = (offset % height, offset / height);

        if cursor.column != Some(x1) {
            cursor.flush(&mut breaks);
            cursor.column = Some(x1);
        }

        if x1 == x2 {
            cursor.rows.extend([y1, y2]);
            continue;
        }

        // The run leaves its first column through the bottom edge.
        cursor.rows.extend([y1, height]);
        cursor.flush(&mut breaks);
        cursor.column = Some(x2);

        for column in x1 + 1..x2 {
            breaks.push(ColumnBreaks {
                column,
                rows: vec![0, height],
            });
        }

        if y2 > 0 {
            cursor.rows.extend([0, y2]);
        }
    }
    cursor.flush(&mut breaks);

    Ok(breaks)
}
