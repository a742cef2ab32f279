//! WASM bindings for clash-engine.
//!
//! Exposes time parsing, clash detection, the weekly grid and free periods to
//! the course-selection front end via `wasm-bindgen`. Complex values cross the
//! boundary as JSON strings in the engine's own serde shape: a selection is an
//! array of `{id, code, name, kind?, instructor?, slots: [{day, start, end}]}`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p clash-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/clash-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/clash_engine_wasm.wasm
//! ```

use clash_engine::{GridConfig, ScheduleItem, TimeSlot, WeekDay};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn from_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// A missing or empty config string means [`GridConfig::default`].
fn grid_config(json: Option<String>) -> Result<GridConfig, JsValue> {
    match json.as_deref().map(str::trim) {
        None | Some("") => Ok(GridConfig::default()),
        Some(json) => from_json("grid config", json),
    }
}

fn parse_day(day: &str) -> Result<WeekDay, JsValue> {
    day.parse().map_err(|e: clash_engine::ClashError| JsValue::from_str(&e.to_string()))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Normalize a time string (`"14:00"`, `"2:00 PM"`, `"9 AM"`) to 24-hour `HH:MM`.
///
/// Throws if the string is not a valid time, so forms can reject it before the
/// slot is saved.
#[wasm_bindgen(js_name = "parseTimeOfDay")]
pub fn parse_time_of_day(raw: &str) -> Result<String, JsValue> {
    clash_engine::parse_time_of_day(raw)
        .map(|t| t.to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether two `{day, start, end}` slots overlap (half-open, same day).
#[wasm_bindgen(js_name = "slotsOverlap")]
pub fn slots_overlap(slot_a_json: &str, slot_b_json: &str) -> Result<bool, JsValue> {
    let a: TimeSlot = from_json("slot", slot_a_json)?;
    let b: TimeSlot = from_json("slot", slot_b_json)?;
    Ok(clash_engine::slots_overlap(&a, &b))
}

/// Items from `existing_json` that clash with `candidate_json`.
///
/// Returns a JSON array of the clashing items, in `existing` order.
#[wasm_bindgen(js_name = "findClashes")]
pub fn find_clashes(candidate_json: &str, existing_json: &str) -> Result<String, JsValue> {
    let candidate: ScheduleItem = from_json("candidate", candidate_json)?;
    let existing: Vec<ScheduleItem> = from_json("items", existing_json)?;

    to_json(&clash_engine::find_clashes(&candidate, &existing))
}

/// One `{item_id, has_clash, clashing_with}` object per input item.
#[wasm_bindgen(js_name = "detectAllClashes")]
pub fn detect_all_clashes(items_json: &str) -> Result<String, JsValue> {
    let items: Vec<ScheduleItem> = from_json("items", items_json)?;
    to_json(&clash_engine::detect_all_clashes(&items))
}

/// Every clashing pair once, with the overlapping ranges.
#[wasm_bindgen(js_name = "clashPairs")]
pub fn clash_pairs(items_json: &str) -> Result<String, JsValue> {
    let items: Vec<ScheduleItem> = from_json("items", items_json)?;
    to_json(&clash_engine::clash_pairs(&items))
}

/// Build the weekly grid.
///
/// `days_json` is an array of day names (`["Mon", "Tue", ...]`); an empty
/// string means Monday to Saturday. `config_json` is an optional
/// `{day_start, day_end, bucket_minutes}` object; missing fields default to
/// 08:00, 20:00 and 30.
#[wasm_bindgen(js_name = "buildWeeklyGrid")]
pub fn build_weekly_grid(
    items_json: &str,
    days_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let items: Vec<ScheduleItem> = from_json("items", items_json)?;
    let days: Vec<WeekDay> = if days_json.trim().is_empty() {
        WeekDay::TEACHING.to_vec()
    } else {
        from_json("days", days_json)?
    };
    let config = grid_config(config_json)?;

    to_json(&clash_engine::build_weekly_grid(&items, &days, &config))
}

/// Sort a JSON array of slots by day, then start time.
#[wasm_bindgen(js_name = "sortSlots")]
pub fn sort_slots(slots_json: &str) -> Result<String, JsValue> {
    let slots: Vec<TimeSlot> = from_json("slots", slots_json)?;
    to_json(&clash_engine::sort_slots(&slots))
}

/// Free periods on `day` inside the grid window.
#[wasm_bindgen(js_name = "freePeriods")]
pub fn free_periods(items_json: &str, day: &str, config_json: Option<String>) -> Result<String, JsValue> {
    let items: Vec<ScheduleItem> = from_json("items", items_json)?;
    let day = parse_day(day)?;
    let config = grid_config(config_json)?;

    to_json(&clash_engine::free_periods(&items, day, &config))
}
