//! Music Embedding WASM API
//!
//! This module provides the JavaScript-facing API. Grids cross the boundary
//! as nested arrays (`number[][]`); failures are thrown as
//! `{ kind, message }` objects.
//!
//! # Module Structure
//!
//! - `helpers`: Grid conversion, error objects and logging
//! - `interval`: Stateless interval codec functions
//! - `embedder`: The session (pianoroll ↔ intervals, chunking)
//! - `rle`: Run-length compression

pub mod helpers;
pub mod interval;
pub mod embedder;
pub mod rle;

pub use interval::{
    interval_from_one_hot, interval_name, interval_to_one_hot, interval_to_semitone,
    semitone_to_interval, silence_interval,
};
pub use embedder::{
    barwise_intervals_from_pianoroll, chunk_intervals, clear_embedder_cache, configure_embedder,
    extract_lead_voice, get_embedder_config, harmonic_intervals_from_pianoroll,
    melodic_intervals_from_pianoroll, merge_intervals, pianoroll_from_barwise_intervals,
    pianoroll_from_harmonic_intervals, pianoroll_from_melodic_intervals,
};
pub use rle::{
    compress_intervals, compress_intervals_bulk, decompress_intervals, decompress_intervals_bulk,
};
