//! Fixed-width row-major grids
//!
//! Pianorolls, interval sequences and RLE buffers are all 2D integer grids
//! whose second dimension is fixed. `Grid<T>` is the shared buffer type;
//! the width checks specific to each kind live with the code that consumes
//! them.

use crate::error::{EmbeddingError, Result};

/// Number of pitch lanes in a pianoroll (the MIDI pitch range)
pub const NOTES_IN_MIDI: usize = 128;

/// Width of an interval row: order, type, is_descending, octave_offset
pub const FEATURE_DIMENSIONS: usize = 4;

/// Width of an RLE row: the descriptor fields plus the run length
pub const RLE_WIDTH: usize = FEATURE_DIMENSIONS + 1;

/// Row-major 2D buffer with a fixed number of columns
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    data: Vec<T>,
}

/// Time steps × 128 pitch lanes, cell = velocity (0 = silent)
pub type Pianoroll = Grid<u8>;

/// Time steps × 4 descriptor fields
pub type IntervalSequence = Grid<i8>;

/// Runs × (4 descriptor fields + run length)
pub type RleSequence = Grid<i32>;

impl<T: Copy + Default> Grid<T> {
    /// Create a grid of `rows` × `width` default (zero) cells
    pub fn zeros(rows: usize, width: usize) -> Self {
        Self {
            width,
            data: vec![T::default(); rows * width],
        }
    }

    /// Wrap a flat row-major buffer
    pub fn from_vec(data: Vec<T>, width: usize) -> Result<Self> {
        if width == 0 {
            if data.is_empty() {
                return Ok(Self { width, data });
            }
            return Err(EmbeddingError::DimensionMismatch {
                grid: "grid",
                expected: data.len(),
                actual: 0,
            });
        }
        if data.len() % width != 0 {
            return Err(EmbeddingError::DimensionMismatch {
                grid: "grid",
                expected: width,
                actual: data.len() % width,
            });
        }
        Ok(Self { width, data })
    }

    /// Build from nested rows; the width is taken from the first row
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * width);
        for row in rows {
            if row.len() != width {
                return Err(EmbeddingError::DimensionMismatch {
                    grid: "row",
                    expected: width,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self { width, data })
    }

    /// Copy out as nested rows (the JavaScript boundary format)
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter_rows().map(<[T]>::to_vec).collect()
    }

    pub fn rows(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, index: usize) -> &[T] {
        let start = index * self.width;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, index: usize) -> &mut [T] {
        let start = index * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.width + col] = value;
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.width.max(1)).take(self.rows())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Copy of rows `start..end`
    pub fn slice_rows(&self, start: usize, end: usize) -> Self {
        Self {
            width: self.width,
            data: self.data[start * self.width..end * self.width].to_vec(),
        }
    }

    /// Fail with `DimensionMismatch` unless the width is `expected`
    pub fn expect_width(&self, grid: &'static str, expected: usize) -> Result<()> {
        if self.width != expected {
            return Err(EmbeddingError::DimensionMismatch {
                grid,
                expected,
                actual: self.width,
            });
        }
        Ok(())
    }
}
