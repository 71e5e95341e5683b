//! Data models for interval embedding
//!
//! Grids (pianorolls, interval sequences, RLE buffers) and the interval
//! descriptor that is the unit of exchange between them.

pub mod grid;
pub mod interval;

// Re-export commonly used types
pub use grid::{
    Grid, IntervalSequence, Pianoroll, RleSequence, FEATURE_DIMENSIONS, NOTES_IN_MIDI, RLE_WIDTH,
};
pub use interval::{
    interval_name, interval_to_semitone, is_silence_row, semitone_to_interval, silence_specs,
    Interval, IntervalSpecs, IntervalType, OneHotInterval,
};
