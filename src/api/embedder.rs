//! Embedder session exports
//!
//! A single [`Embedder`] lives behind a mutex for the lifetime of the module.
//! Grid arguments passed as `null`/`undefined` fall back to the session's
//! cached pianoroll or interval sequence.

use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;

use crate::config::EmbedderConfig;
use crate::embedder::Embedder;
use crate::models::{IntervalSequence, Pianoroll, FEATURE_DIMENSIONS, NOTES_IN_MIDI};
use crate::{wasm_info, wasm_log};

use super::helpers::{
    deserialize, grid_from_js, grid_to_js, grids_from_js, grids_to_js, optional_grid_from_js,
    serialize, throw_payload, to_js_error, JsErrorPayload, SESSION_UNAVAILABLE,
};

lazy_static! {
    static ref SESSION: Mutex<Embedder> = Mutex::new(Embedder::default());
}

fn lock_session(session: &Mutex<Embedder>) -> Result<MutexGuard<'_, Embedder>, JsErrorPayload> {
    session.lock().map_err(|_| JsErrorPayload {
        kind: SESSION_UNAVAILABLE.to_string(),
        message: "Embedder session lock poisoned".to_string(),
    })
}

pub(super) fn with_session<T>(
    f: impl FnOnce(&mut Embedder) -> Result<T, JsValue>,
) -> Result<T, JsValue> {
    let mut session = lock_session(&SESSION).map_err(throw_payload)?;
    f(&mut session)
}

fn opt_i64(value: Option<i32>) -> Option<i64> {
    value.map(i64::from)
}

fn opt_usize(value: Option<u32>) -> Option<usize> {
    value.map(|v| v as usize)
}

// ============================================================================
// Session
// ============================================================================

/// Replace the session configuration; missing fields take their defaults
#[wasm_bindgen(js_name = configureEmbedder)]
pub fn configure_embedder(config_js: JsValue) -> Result<(), JsValue> {
    let config: EmbedderConfig = deserialize(config_js, "Config deserialization error")?;
    wasm_info!("configureEmbedder called: {:?}", config);
    with_session(|session| session.set_config(config).map_err(to_js_error))
}

#[wasm_bindgen(js_name = getEmbedderConfig)]
pub fn get_embedder_config() -> Result<JsValue, JsValue> {
    with_session(|session| serialize(session.config(), "Config serialization error"))
}

/// Forget the cached pianoroll and intervals
#[wasm_bindgen(js_name = clearEmbedderCache)]
pub fn clear_embedder_cache() -> Result<(), JsValue> {
    with_session(|session| {
        session.clear();
        Ok(())
    })
}

/// Lead voice of the cached pianoroll, optionally replacing it first
#[wasm_bindgen(js_name = extractLeadVoice)]
pub fn extract_lead_voice(pianoroll_js: JsValue, preserve_input: bool) -> Result<Vec<u8>, JsValue> {
    let pianoroll: Option<Pianoroll> =
        optional_grid_from_js(pianoroll_js, NOTES_IN_MIDI, "Pianoroll deserialization error")?;
    with_session(|session| {
        if let Some(pianoroll) = pianoroll {
            pianoroll.expect_width("pianoroll", NOTES_IN_MIDI).map_err(to_js_error)?;
            session.set_pianoroll(pianoroll);
        }
        session.extract_lead_voice(preserve_input).map_err(to_js_error)
    })
}

// ============================================================================
// Melodic
// ============================================================================

#[wasm_bindgen(js_name = melodicIntervalsFromPianoroll)]
pub fn melodic_intervals_from_pianoroll(pianoroll_js: JsValue) -> Result<JsValue, JsValue> {
    let pianoroll =
        optional_grid_from_js(pianoroll_js, NOTES_IN_MIDI, "Pianoroll deserialization error")?;
    wasm_info!("melodicIntervalsFromPianoroll called");
    let intervals = with_session(|session| {
        session
            .melodic_intervals_from_pianoroll(pianoroll)
            .map_err(to_js_error)
    })?;
    grid_to_js(&intervals, "Intervals serialization error")
}

#[wasm_bindgen(js_name = pianorollFromMelodicIntervals)]
pub fn pianoroll_from_melodic_intervals(
    intervals_js: JsValue,
    origin: Option<i32>,
    velocity: Option<i32>,
    leading_silence: u32,
) -> Result<JsValue, JsValue> {
    let intervals =
        optional_grid_from_js(intervals_js, FEATURE_DIMENSIONS, "Intervals deserialization error")?;
    wasm_info!(
        "pianorollFromMelodicIntervals called: origin={:?}, velocity={:?}, leading_silence={}",
        origin,
        velocity,
        leading_silence
    );
    let pianoroll = with_session(|session| {
        session
            .pianoroll_from_melodic_intervals(
                intervals,
                opt_i64(origin),
                opt_i64(velocity),
                leading_silence as usize,
            )
            .map_err(to_js_error)
    })?;
    grid_to_js(&pianoroll, "Pianoroll serialization error")
}

// ============================================================================
// Harmonic
// ============================================================================

#[wasm_bindgen(js_name = harmonicIntervalsFromPianoroll)]
pub fn harmonic_intervals_from_pianoroll(
    reference_js: JsValue,
    pianoroll_js: JsValue,
) -> Result<JsValue, JsValue> {
    let reference: Pianoroll =
        grid_from_js(reference_js, NOTES_IN_MIDI, "Reference deserialization error")?;
    let pianoroll =
        optional_grid_from_js(pianoroll_js, NOTES_IN_MIDI, "Pianoroll deserialization error")?;
    wasm_info!("harmonicIntervalsFromPianoroll called: {} reference steps", reference.rows());
    let intervals = with_session(|session| {
        session
            .harmonic_intervals_from_pianoroll(&reference, pianoroll)
            .map_err(to_js_error)
    })?;
    grid_to_js(&intervals, "Intervals serialization error")
}

#[wasm_bindgen(js_name = pianorollFromHarmonicIntervals)]
pub fn pianoroll_from_harmonic_intervals(
    reference_js: JsValue,
    intervals_js: JsValue,
    velocity: Option<i32>,
) -> Result<JsValue, JsValue> {
    let reference =
        optional_grid_from_js(reference_js, NOTES_IN_MIDI, "Reference deserialization error")?;
    let intervals =
        optional_grid_from_js(intervals_js, FEATURE_DIMENSIONS, "Intervals deserialization error")?;
    wasm_info!("pianorollFromHarmonicIntervals called: velocity={:?}", velocity);
    let pianoroll = with_session(|session| {
        session
            .pianoroll_from_harmonic_intervals(reference, intervals, opt_i64(velocity))
            .map_err(to_js_error)
    })?;
    grid_to_js(&pianoroll, "Pianoroll serialization error")
}

// ============================================================================
// Barwise
// ============================================================================

#[wasm_bindgen(js_name = barwiseIntervalsFromPianoroll)]
pub fn barwise_intervals_from_pianoroll(
    pianoroll_js: JsValue,
    pixels_per_bar: Option<u32>,
) -> Result<JsValue, JsValue> {
    let pianoroll =
        optional_grid_from_js(pianoroll_js, NOTES_IN_MIDI, "Pianoroll deserialization error")?;
    wasm_info!("barwiseIntervalsFromPianoroll called: pixels_per_bar={:?}", pixels_per_bar);
    let intervals = with_session(|session| {
        session
            .barwise_intervals_from_pianoroll(pianoroll, opt_usize(pixels_per_bar))
            .map_err(to_js_error)
    })?;
    grid_to_js(&intervals, "Intervals serialization error")
}

#[wasm_bindgen(js_name = pianorollFromBarwiseIntervals)]
pub fn pianoroll_from_barwise_intervals(
    intervals_js: JsValue,
    origin: Option<i32>,
    velocity: Option<i32>,
    leading_silence: u32,
    pixels_per_bar: Option<u32>,
) -> Result<JsValue, JsValue> {
    let intervals =
        optional_grid_from_js(intervals_js, FEATURE_DIMENSIONS, "Intervals deserialization error")?;
    wasm_info!(
        "pianorollFromBarwiseIntervals: origin={:?}, leading_silence={}, pixels_per_bar={:?}",
        origin,
        leading_silence,
        pixels_per_bar
    );
    let pianoroll = with_session(|session| {
        session
            .pianoroll_from_barwise_intervals(
                intervals,
                opt_i64(origin),
                opt_i64(velocity),
                leading_silence as usize,
                opt_usize(pixels_per_bar),
            )
            .map_err(to_js_error)
    })?;
    grid_to_js(&pianoroll, "Pianoroll serialization error")
}

// ============================================================================
// Chunking
// ============================================================================

/// Split intervals into `pixelsPerChunk`-row chunks (one bar by default)
#[wasm_bindgen(js_name = chunkIntervals)]
pub fn chunk_intervals(
    intervals_js: JsValue,
    pixels_per_chunk: Option<u32>,
) -> Result<JsValue, JsValue> {
    let intervals: Option<IntervalSequence> =
        optional_grid_from_js(intervals_js, FEATURE_DIMENSIONS, "Intervals deserialization error")?;
    let chunks = with_session(|session| {
        session
            .chunk(intervals.as_ref(), opt_usize(pixels_per_chunk))
            .map_err(to_js_error)
    })?;
    wasm_log!("chunkIntervals: {} chunks", chunks.len());
    grids_to_js(&chunks, "Chunks serialization error")
}

#[wasm_bindgen(js_name = mergeIntervals)]
pub fn merge_intervals(chunks_js: JsValue) -> Result<JsValue, JsValue> {
    let chunks: Vec<IntervalSequence> =
        grids_from_js(chunks_js, FEATURE_DIMENSIONS, "Chunks deserialization error")?;
    let intervals = with_session(|session| session.merge(&chunks).map_err(to_js_error))?;
    grid_to_js(&intervals, "Intervals serialization error")
}
