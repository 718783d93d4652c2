//! Column-major run-length encoding of thresholded masks.
//!
//! Runs alternate background, foreground, background, ... starting with a
//! (possibly empty) background run. Pixels are visited column by column,
//! top to bottom within a column.

use ndarray::{Array2, ArrayView2};

use crate::error::DecodeError;

/// A run-length encoded binary mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rle {
    height: usize,
    width: usize,
    counts: Vec<u32>,
}

impl Rle {
    /// Wrap externally produced run lengths, checking that they describe a
    /// `height x width` mask.
    pub fn from_counts(height: usize, width: usize, counts: Vec<u32>) -> Result<Self, DecodeError> {
        let rle = Self {
            height,
            width,
            counts,
        };
        rle.validate()?;
        Ok(rle)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn into_counts(self) -> Vec<u32> {
        self.counts
    }

    /// Check run sum and run shape.
    ///
    /// A trailing background run is optional. Zero-length foreground runs
    /// are accepted and contribute nothing, but an empty background run
    /// between two foreground runs is rejected since the runs would touch.
    pub fn validate(&self) -> Result<(), DecodeError> {
        let expected = pixel_count(self.height, self.width)? as u64;
        let actual: u64 = self.counts.iter().map(|&c| c as u64).sum();
        if actual != expected {
            return Err(DecodeError::RunSum { expected, actual });
        }

        let last = self.counts.len().saturating_sub(1);
        for (index, &count) in self.counts.iter().enumerate().step_by(2).skip(1) {
            if count == 0 && index < last {
                return Err(DecodeError::EmptyRun { index });
            }
        }
        Ok(())
    }

    /// Number of foreground pixels.
    pub fn foreground_area(&self) -> u64 {
        self.counts
            .iter()
            .skip(1)
            .step_by(2)
            .map(|&c| c as u64)
            .sum()
    }

    /// Returns `true` if at least one pixel is filled.
    pub fn has_foreground(&self) -> bool {
        self.counts.iter().skip(1).step_by(2).any(|&c| c > 0)
    }
}

/// Total pixel count, guarded against overflowing the `u32` run counter.
fn pixel_count(height: usize, width: usize) -> Result<usize, DecodeError> {
    height
        .checked_mul(width)
        .filter(|&n| n <= u32::MAX as usize)
        .ok_or(DecodeError::DimensionOverflow { height, width })
}

/// Encode a row-major `(height, width)` score array.
///
/// A pixel is foreground iff its score is greater than `fill_threshold`.
pub fn encode_view(mask: ArrayView2<f32>, fill_threshold: f32) -> Result<Rle, DecodeError> {
    let (height, width) = mask.dim();
    pixel_count(height, width)?;

    let mut counts = Vec::new();
    let mut filled = false;
    let mut count = 0u32;

    // The transposed view walks columns outer, rows inner.
    for &score in mask.t().iter() {
        if (score > fill_threshold) != filled {
            counts.push(count);
            filled = !filled;
            count = 1;
        } else {
            count += 1;
        }
    }
    counts.push(count);

    Ok(Rle {
        height,
        width,
        counts,
    })
}

/// Encode a flat row-major score buffer of length `height * width`.
pub fn encode(
    data: &[f32],
    height: usize,
    width: usize,
    fill_threshold: f32,
) -> Result<Rle, DecodeError> {
    let expected = pixel_count(height, width)?;
    let size_error = DecodeError::MaskSize {
        expected,
        actual: data.len(),
        height,
        width,
    };
    if data.len() != expected {
        return Err(size_error);
    }
    let view = ArrayView2::from_shape((height, width), data).map_err(|_| size_error)?;
    encode_view(view, fill_threshold)
}

/// Expand run lengths back into a row-major 0/1 mask.
pub fn decode_mask(rle: &Rle) -> Result<Array2<u8>, DecodeError> {
    rle.validate()?;

    let (height, width) = (rle.height, rle.width);
    let mut mask = Array2::<u8>::zeros((height, width));
    let mut offset = 0usize;

    for (i, &count) in rle.counts.iter().enumerate() {
        let count = count as usize;
        if i % 2 == 1 {
            for p in offset..offset + count {
                mask[[p % height, p / height]] = 1;
            }
        }
        offset += count;
    }

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_empty_mask_is_single_background_run() {
        let mask = Array2::<f32>::zeros((4, 5));
        let rle = encode_view(mask.view(), 0.0).unwrap();
        assert_eq!(rle.counts(), &[20]);
        assert!(!rle.has_foreground());
        assert_eq!(rle.foreground_area(), 0);
    }

    #[test]
    fn test_column_major_order() {
        // Column 0 is [0, 1], column 1 is [1, 1], column 2 is [0, 0].
        let mask = array![[0.0f32, 0.9, 0.0], [0.2, 0.4, -1.0]];
        let rle = encode_view(mask.view(), 0.0).unwrap();
        assert_eq!(rle.counts(), &[1, 3, 2]);
        assert_eq!(rle.foreground_area(), 3);
    }

    #[test]
    fn test_leading_foreground_starts_with_empty_run() {
        let mask = array![[1.0f32, 0.0], [1.0, 0.0]];
        let rle = encode_view(mask.view(), 0.0).unwrap();
        assert_eq!(rle.counts(), &[0, 2, 2]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mask = array![[0.5f32, 0.6]];
        let rle = encode_view(mask.view(), 0.5).unwrap();
        assert_eq!(rle.counts(), &[1, 1]);
    }

    #[test]
    fn test_flat_buffer_length_checked() {
        let err = encode(&[0.0; 5], 2, 3, 0.0).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MaskSize {
                expected: 6,
                actual: 5,
                height: 2,
                width: 3
            }
        );
    }

    #[test]
    fn test_flat_buffer_is_row_major() {
        // 2 rows x 3 columns, only (row 1, col 2) filled.
        let data = [0.0f32, 0.0, 0.0, 0.0, 0.0, 1.0];
        let rle = encode(&data, 2, 3, 0.0).unwrap();
        assert_eq!(rle.counts(), &[5, 1]);
    }

    #[test]
    fn test_run_sum_mismatch_rejected() {
        let err = Rle::from_counts(3, 3, vec![2, 3]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::RunSum {
                expected: 9,
                actual: 5
            }
        );
    }

    #[test]
    fn test_touching_foreground_runs_rejected() {
        let err = Rle::from_counts(3, 3, vec![2, 3, 0, 4]).unwrap_err();
        assert_eq!(err, DecodeError::EmptyRun { index: 2 });
    }

    #[test]
    fn test_empty_foreground_run_accepted() {
        let rle = Rle::from_counts(3, 3, vec![9, 0]).unwrap();
        assert!(!rle.has_foreground());
    }

    #[test]
    fn test_round_trip_reconstructs_pixels() {
        let mask = array![
            [0.0f32, 1.0, 1.0, 0.0],
            [1.0, 0.0, 1.0, 0.0],
            [1.0, 1.0, 1.0, 1.0],
        ];
        let rle = encode_view(mask.view(), 0.0).unwrap();
        let decoded = decode_mask(&rle).unwrap();
        assert_eq!(decoded, mask.mapv(|v| (v > 0.0) as u8));
    }
}
