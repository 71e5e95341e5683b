//! Run-length encoding exports
//!
//! `compressIntervals` falls back to the session's cached intervals; the
//! decompressed sequence becomes the cached one. Bulk calls don't touch the
//! session.

use wasm_bindgen::prelude::*;

use crate::compression::rle;
use crate::models::{IntervalSequence, RleSequence, FEATURE_DIMENSIONS, RLE_WIDTH};
use crate::wasm_info;

use super::helpers::{
    grid_from_js, grid_to_js, grids_from_js, grids_to_js, optional_grid_from_js, to_js_error,
};

#[wasm_bindgen(js_name = compressIntervals)]
pub fn compress_intervals(intervals_js: JsValue) -> Result<JsValue, JsValue> {
    let intervals: Option<IntervalSequence> =
        optional_grid_from_js(intervals_js, FEATURE_DIMENSIONS, "Intervals deserialization error")?;
    let compressed =
        super::embedder::with_session(|session| session.compress(intervals).map_err(to_js_error))?;
    wasm_info!("compressIntervals: {} runs", compressed.rows());
    grid_to_js(&compressed, "RLE serialization error")
}

#[wasm_bindgen(js_name = decompressIntervals)]
pub fn decompress_intervals(rle_js: JsValue) -> Result<JsValue, JsValue> {
    let compressed: RleSequence = grid_from_js(rle_js, RLE_WIDTH, "RLE deserialization error")?;
    let intervals = super::embedder::with_session(|session| {
        session.decompress(&compressed).map_err(to_js_error)
    })?;
    wasm_info!("decompressIntervals: {} rows", intervals.rows());
    grid_to_js(&intervals, "Intervals serialization error")
}

#[wasm_bindgen(js_name = compressIntervalsBulk)]
pub fn compress_intervals_bulk(batch_js: JsValue) -> Result<JsValue, JsValue> {
    let batch: Vec<IntervalSequence> =
        grids_from_js(batch_js, FEATURE_DIMENSIONS, "Batch deserialization error")?;
    wasm_info!("compressIntervalsBulk called: {} sequences", batch.len());
    let compressed = rle::compress_bulk(&batch).map_err(to_js_error)?;
    grids_to_js(&compressed, "RLE serialization error")
}

#[wasm_bindgen(js_name = decompressIntervalsBulk)]
pub fn decompress_intervals_bulk(batch_js: JsValue) -> Result<JsValue, JsValue> {
    let batch: Vec<RleSequence> =
        grids_from_js(batch_js, RLE_WIDTH, "Batch deserialization error")?;
    wasm_info!("decompressIntervalsBulk called: {} sequences", batch.len());
    let intervals = rle::decompress_bulk(&batch).map_err(to_js_error)?;
    grids_to_js(&intervals, "Intervals serialization error")
}
