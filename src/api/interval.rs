//! Interval codec exports
//!
//! Descriptors are accepted either as `[order, type, is_descending, octave]`
//! or as `{interval_order, interval_type, is_descending, octave_offset}` and
//! returned in the map form.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::models::{Interval, IntervalSpecs};
use crate::{wasm_info, wasm_log};

use super::helpers::{deserialize, serialize, to_js_error};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptorInput {
    List(Vec<i64>),
    Map(IntervalSpecs),
}

fn interval_from_js(value: JsValue) -> Result<Interval, JsValue> {
    let interval = match deserialize(value, "Descriptor deserialization error")? {
        DescriptorInput::List(specs) => Interval::from_specs(&specs),
        DescriptorInput::Map(specs) => Interval::try_from(specs),
    };
    interval.map_err(to_js_error)
}

/// Descriptor for a signed semitone distance
#[wasm_bindgen(js_name = semitoneToInterval)]
pub fn semitone_to_interval(semitones: i32) -> Result<JsValue, JsValue> {
    let interval = Interval::from_semitones(semitones);
    wasm_log!("semitoneToInterval: {} -> {:?}", semitones, interval.specs());
    serialize(&interval, "Interval serialization error")
}

/// Signed semitone distance of a descriptor
#[wasm_bindgen(js_name = intervalToSemitone)]
pub fn interval_to_semitone(descriptor: JsValue) -> Result<i32, JsValue> {
    Ok(interval_from_js(descriptor)?.semitones())
}

/// Human-readable name, e.g. "Descending min 3rd"
#[wasm_bindgen(js_name = intervalName)]
pub fn interval_name(descriptor: JsValue) -> Result<String, JsValue> {
    Ok(interval_from_js(descriptor)?.name())
}

#[wasm_bindgen(js_name = intervalToOneHot)]
pub fn interval_to_one_hot(descriptor: JsValue) -> Result<JsValue, JsValue> {
    let one_hot = interval_from_js(descriptor)?.to_one_hot();
    serialize(&one_hot, "One-hot serialization error")
}

/// Decode one-hot (or probability) vectors by argmax
#[wasm_bindgen(js_name = intervalFromOneHot)]
pub fn interval_from_one_hot(
    order: Vec<f64>,
    interval_type: Vec<f64>,
    is_descending: i32,
    octave_offset: i32,
) -> Result<JsValue, JsValue> {
    wasm_info!(
        "intervalFromOneHot called: {} order weights, {} type weights",
        order.len(),
        interval_type.len()
    );
    let interval = Interval::from_one_hot(
        &order,
        &interval_type,
        i64::from(is_descending),
        i64::from(octave_offset),
    )
    .map_err(to_js_error)?;
    serialize(&interval, "Interval serialization error")
}

#[wasm_bindgen(js_name = silenceInterval)]
pub fn silence_interval() -> Result<JsValue, JsValue> {
    serialize(&Interval::silence(), "Interval serialization error")
}
