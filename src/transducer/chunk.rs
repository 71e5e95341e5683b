//! Chunking and merging of interval sequences

use crate::error::Result;
use crate::models::{Grid, IntervalSequence, FEATURE_DIMENSIONS};

use super::check_pixels;

/// Split into consecutive chunks of `pixels_per_chunk` rows.
///
/// Only whole chunks are returned: when the length is not a multiple of
/// `pixels_per_chunk` the trailing rows are dropped without an error.
pub fn chunk(
    intervals: &IntervalSequence,
    pixels_per_chunk: usize,
) -> Result<Vec<IntervalSequence>> {
    intervals.expect_width("intervals", FEATURE_DIMENSIONS)?;
    check_pixels("pixels_per_chunk", pixels_per_chunk)?;

    let count = intervals.rows() / pixels_per_chunk;
    let remainder = intervals.rows() % pixels_per_chunk;
    if remainder != 0 {
        log::warn!("chunk: dropping {} trailing rows", remainder);
    }

    Ok((0..count)
        .map(|index| intervals.slice_rows(index * pixels_per_chunk, (index + 1) * pixels_per_chunk))
        .collect())
}

/// Concatenate chunks back into one sequence
pub fn merge(chunks: &[IntervalSequence]) -> Result<IntervalSequence> {
    let mut data = Vec::with_capacity(chunks.iter().map(|c| c.as_slice().len()).sum());
    for chunk in chunks {
        chunk.expect_width("intervals", FEATURE_DIMENSIONS)?;
        data.extend_from_slice(chunk.as_slice());
    }
    Grid::from_vec(data, FEATURE_DIMENSIONS)
}
