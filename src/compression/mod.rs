//! Lossless compression of interval sequences

pub mod rle;

pub use rle::{compress, compress_bulk, decompress, decompress_bulk, MAX_DECODED_ROWS};
