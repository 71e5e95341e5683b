//! Shared helpers for the WASM API
//!
//! Conversions between JavaScript values and grids, the thrown error
//! object, and the logging macros used by every export.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::EmbeddingError;
use crate::models::Grid;

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

// Routed through the `log` facade; `console_log` forwards to the browser console

pub fn log_debug(msg: &str) {
    log::debug!("[WASM] {}", msg);
}

pub fn log_info(msg: &str) {
    log::info!("[WASM] {}", msg);
}

pub fn log_error(msg: &str) {
    log::error!("[WASM] {}", msg);
}

// ============================================================================
// Errors
// ============================================================================

/// Object thrown to JavaScript: `{ kind, message }`
#[derive(Debug, Serialize)]
pub struct JsErrorPayload {
    pub kind: String,
    pub message: String,
}

/// Kind reported when a JavaScript value cannot be read at all
pub const INVALID_INPUT: &str = "InvalidInput";

/// Kind reported when a result cannot be converted to a JavaScript value
pub const SERIALIZATION: &str = "Serialization";

/// Kind reported when the shared embedder session cannot be locked
pub const SESSION_UNAVAILABLE: &str = "SessionUnavailable";

fn throw(kind: String, message: String) -> JsValue {
    throw_payload(JsErrorPayload { kind, message })
}

/// Log and convert an already built payload into the thrown object
pub fn throw_payload(payload: JsErrorPayload) -> JsValue {
    log_error(&payload.message);
    serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| JsValue::from_str(&payload.message))
}

/// Convert a crate error into the thrown JavaScript object
pub fn to_js_error(err: EmbeddingError) -> JsValue {
    throw(format!("{:?}", err.kind()), err.to_string())
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| throw(INVALID_INPUT.to_string(), format!("{}: {}", error_context, e)))
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| throw(SERIALIZATION.to_string(), format!("{}: {}", error_context, e)))
}

// ============================================================================
// Grid Conversion Helpers
// ============================================================================

/// Read a `number[][]` into a grid; an empty array becomes a 0-row grid of `width`
pub fn grid_from_js<T>(
    value: JsValue,
    width: usize,
    error_context: &str,
) -> Result<Grid<T>, JsValue>
where
    T: Copy + Default + DeserializeOwned,
{
    let rows: Vec<Vec<T>> = deserialize(value, error_context)?;
    rows_to_grid(rows, width)
}

/// Same as [`grid_from_js`], `null`/`undefined` giving `None`
pub fn optional_grid_from_js<T>(
    value: JsValue,
    width: usize,
    error_context: &str,
) -> Result<Option<Grid<T>>, JsValue>
where
    T: Copy + Default + DeserializeOwned,
{
    let rows: Option<Vec<Vec<T>>> = deserialize(value, error_context)?;
    rows.map(|rows| rows_to_grid(rows, width)).transpose()
}

/// Read a `number[][][]` batch of grids
pub fn grids_from_js<T>(
    value: JsValue,
    width: usize,
    error_context: &str,
) -> Result<Vec<Grid<T>>, JsValue>
where
    T: Copy + Default + DeserializeOwned,
{
    let batch: Vec<Vec<Vec<T>>> = deserialize(value, error_context)?;
    batch.into_iter().map(|rows| rows_to_grid(rows, width)).collect()
}

fn rows_to_grid<T: Copy + Default>(rows: Vec<Vec<T>>, width: usize) -> Result<Grid<T>, JsValue> {
    if rows.is_empty() {
        return Ok(Grid::zeros(0, width));
    }
    Grid::from_rows(rows).map_err(to_js_error)
}

/// Write a grid out as `number[][]`
pub fn grid_to_js<T: Copy + Default + Serialize>(
    grid: &Grid<T>,
    error_context: &str,
) -> Result<JsValue, JsValue> {
    serialize(&grid.to_rows(), error_context)
}

/// Write a batch of grids out as a JavaScript array of `number[][]`
pub fn grids_to_js<T: Copy + Default + Serialize>(
    grids: &[Grid<T>],
    error_context: &str,
) -> Result<JsValue, JsValue> {
    let result = js_sys::Array::new();
    for grid in grids {
        result.push(&grid_to_js(grid, error_context)?);
    }
    Ok(result.into())
}
