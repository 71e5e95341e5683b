//! Run-length encoding of interval sequences
//!
//! Each RLE row is `[order, type, is_descending, octave_offset, run_length]`.
//! Runs are maximal: consecutive rows equal in all four fields collapse into
//! one RLE row. Decoding reproduces the input exactly, in order.

use crate::error::{EmbeddingError, Result};
use crate::models::{Grid, IntervalSequence, RleSequence, FEATURE_DIMENSIONS, RLE_WIDTH};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub fn compress(intervals: &IntervalSequence) -> Result<RleSequence> {
    intervals.expect_width("intervals", FEATURE_DIMENSIONS)?;

    let mut data: Vec<i32> = Vec::new();
    let mut previous: Option<&[i8]> = None;

    for row in intervals.iter_rows() {
        if previous == Some(row) {
            // Extend the current run
            if let Some(run_length) = data.last_mut() {
                *run_length += 1;
            }
        } else {
            data.extend(row.iter().map(|&v| i32::from(v)));
            data.push(1);
        }
        previous = Some(row);
    }

    log::debug!(
        "rle: {} rows compressed into {} runs",
        intervals.rows(),
        data.len() / RLE_WIDTH
    );
    Grid::from_vec(data, RLE_WIDTH)
}

/// Longest sequence `decompress` will materialise, in rows
pub const MAX_DECODED_ROWS: usize = 1 << 24;

pub fn decompress(rle: &RleSequence) -> Result<IntervalSequence> {
    rle.expect_width("rle", RLE_WIDTH)?;

    let mut runs = Vec::with_capacity(rle.rows());
    let mut total_rows: usize = 0;
    for run in rle.iter_rows() {
        let run_length = run[FEATURE_DIMENSIONS];
        EmbeddingError::check_range("run_length", run_length.into(), 1, MAX_DECODED_ROWS as i64)?;

        let mut descriptor = [0i8; FEATURE_DIMENSIONS];
        for (field, &value) in descriptor.iter_mut().zip(&run[..FEATURE_DIMENSIONS]) {
            *field = i8::try_from(value).map_err(|_| EmbeddingError::OutOfRange {
                name: "rle descriptor field",
                value: value.into(),
                min: i8::MIN.into(),
                max: i8::MAX.into(),
            })?;
        }

        total_rows += run_length as usize;
        EmbeddingError::check_range("decoded rows", total_rows as i64, 0, MAX_DECODED_ROWS as i64)?;
        runs.push((descriptor, run_length as usize));
    }

    let mut data: Vec<i8> = Vec::new();
    data.try_reserve_exact(total_rows * FEATURE_DIMENSIONS)
        .map_err(|_| EmbeddingError::OutOfRange {
            name: "decoded rows",
            value: total_rows as i64,
            min: 0,
            max: MAX_DECODED_ROWS as i64,
        })?;
    for (descriptor, run_length) in runs {
        for _ in 0..run_length {
            data.extend_from_slice(&descriptor);
        }
    }

    Grid::from_vec(data, FEATURE_DIMENSIONS)
}

/// Compress each sequence of a batch independently
pub fn compress_bulk(batch: &[IntervalSequence]) -> Result<Vec<RleSequence>> {
    #[cfg(feature = "parallel")]
    {
        batch.par_iter().map(compress).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        batch.iter().map(compress).collect()
    }
}

/// Decompress each RLE sequence of a batch independently.
///
/// The batch is assumed to be homogeneous: the first element's decoded length
/// is taken as the chunk length, and elements of another length are logged
/// but still returned.
pub fn decompress_bulk(batch: &[RleSequence]) -> Result<Vec<IntervalSequence>> {
    #[cfg(feature = "parallel")]
    let decoded: Vec<IntervalSequence> = batch.par_iter().map(decompress).collect::<Result<_>>()?;
    #[cfg(not(feature = "parallel"))]
    let decoded: Vec<IntervalSequence> = batch.iter().map(decompress).collect::<Result<_>>()?;

    if let Some(chunk_len) = decoded.first().map(Grid::rows) {
        for (index, chunk) in decoded.iter().enumerate().skip(1) {
            if chunk.rows() != chunk_len {
                log::warn!(
                    "rle bulk: element {} decodes to {} rows, first element has {}",
                    index,
                    chunk.rows(),
                    chunk_len
                );
            }
        }
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::transducer::chunk;

    /// Deterministic mix of runs and singletons with values in -2..2
    fn mixed_sequence(rows: usize) -> IntervalSequence {
        let mut state: u32 = 12345;
        let mut data = Vec::with_capacity(rows * FEATURE_DIMENSIONS);
        let mut current = [0i8; FEATURE_DIMENSIONS];
        for _ in 0..rows {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            if (state >> 16) % 3 != 0 {
                for field in current.iter_mut() {
                    state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
                    *field = ((state >> 16) % 4) as i8 - 2;
                }
            }
            data.extend_from_slice(&current);
        }
        Grid::from_vec(data, FEATURE_DIMENSIONS).unwrap()
    }

    fn run_lengths(rle: &RleSequence) -> Vec<i32> {
        rle.iter_rows().map(|row| row[FEATURE_DIMENSIONS]).collect()
    }

    #[test]
    fn test_runs() {
        let intervals = Grid::from_rows(vec![
            vec![0i8, 0, 0, 0],
            vec![2, 1, 0, 0],
            vec![2, 1, 0, 0],
            vec![2, 1, 0, 0],
            vec![2, 1, 1, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        let rle = compress(&intervals).unwrap();
        assert_eq!(
            rle.to_rows(),
            vec![
                vec![0, 0, 0, 0, 1],
                vec![2, 1, 0, 0, 3],
                vec![2, 1, 1, 0, 1],
                vec![0, 0, 0, 0, 2],
            ]
        );
        assert_eq!(decompress(&rle).unwrap(), intervals);
    }

    #[test]
    fn test_round_trip_shapes() {
        let identical: IntervalSequence =
            Grid::from_vec([3i8, -1, 0, 2].repeat(50), FEATURE_DIMENSIONS).unwrap();
        let distinct = Grid::from_rows((0..8).map(|i| vec![i as i8, 0, 0, 0]).collect()).unwrap();
        let mixed = mixed_sequence(960);

        for sequence in [identical, distinct, mixed] {
            let rle = compress(&sequence).unwrap();
            assert_eq!(run_lengths(&rle).iter().sum::<i32>() as usize, sequence.rows());
            assert_eq!(decompress(&rle).unwrap(), sequence);
        }
    }

    #[test]
    fn test_identical_rows_collapse_to_one_run() {
        let identical: IntervalSequence =
            Grid::from_vec([1i8, 0, 0, 0].repeat(7), FEATURE_DIMENSIONS).unwrap();
        assert_eq!(compress(&identical).unwrap().to_rows(), vec![vec![1, 0, 0, 0, 7]]);
    }

    #[test]
    fn test_empty_sequence() {
        let empty: IntervalSequence = Grid::zeros(0, FEATURE_DIMENSIONS);
        let rle = compress(&empty).unwrap();
        assert_eq!(rle.rows(), 0);
        assert_eq!(decompress(&rle).unwrap().rows(), 0);
    }

    #[test]
    fn test_errors() {
        let narrow: IntervalSequence = Grid::zeros(1, FEATURE_DIMENSIONS - 1);
        assert_eq!(compress(&narrow).unwrap_err().kind(), ErrorKind::DimensionMismatch);

        let bad_width: RleSequence = Grid::zeros(1, FEATURE_DIMENSIONS);
        assert_eq!(decompress(&bad_width).unwrap_err().kind(), ErrorKind::DimensionMismatch);

        let zero_run = Grid::from_rows(vec![vec![1, 0, 0, 0, 0]]).unwrap();
        assert_eq!(decompress(&zero_run).unwrap_err().kind(), ErrorKind::OutOfRange);

        let wide_value = Grid::from_rows(vec![vec![300, 0, 0, 0, 1]]).unwrap();
        assert_eq!(decompress(&wide_value).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_oversized_runs_are_rejected_before_allocating() {
        let corrupt = Grid::from_rows(vec![vec![1, 0, 0, 0, i32::MAX]]).unwrap();
        assert!(matches!(
            decompress(&corrupt),
            Err(EmbeddingError::OutOfRange { name: "run_length", .. })
        ));

        // Each run fits on its own, together they exceed the limit
        let half = (MAX_DECODED_ROWS / 2 + 1) as i32;
        let split = Grid::from_rows(vec![vec![1, 0, 0, 0, half], vec![2, 1, 0, 0, half]]).unwrap();
        assert!(matches!(
            decompress(&split),
            Err(EmbeddingError::OutOfRange { name: "decoded rows", .. })
        ));

        let at_limit = Grid::from_rows(vec![vec![1, 0, 0, 0, MAX_DECODED_ROWS as i32]]).unwrap();
        assert_eq!(decompress(&at_limit).unwrap().rows(), MAX_DECODED_ROWS);
    }

    #[test]
    fn test_bulk_round_trip() {
        let expected = mixed_sequence(960);
        let chunks = chunk::chunk(&expected, 96).unwrap();
        let compressed = compress_bulk(&chunks).unwrap();
        assert_eq!(compressed.len(), 10);
        let decompressed = decompress_bulk(&compressed).unwrap();
        assert_eq!(chunk::merge(&decompressed).unwrap(), expected);
    }

    #[test]
    fn test_bulk_tolerates_ragged_batches() {
        let short = compress(&mixed_sequence(3)).unwrap();
        let long = compress(&mixed_sequence(5)).unwrap();
        let decoded = decompress_bulk(&[short, long]).unwrap();
        assert_eq!(decoded[0].rows(), 3);
        assert_eq!(decoded[1].rows(), 5);
    }
}
