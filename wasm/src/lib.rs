//! MedTrack WASM Module
//!
//! This crate provides WebAssembly bindings so the browser client can
//! resolve reminder schedules locally with the same engine the backend
//! uses.

use chrono::{DateTime, Utc};
use medtrack_shared::models::Reminder;
use medtrack_shared::recurrence::{next_occurrence, occurrences};
use wasm_bindgen::prelude::*;

fn parse_reminder(reminder_json: &str) -> Result<Reminder, JsValue> {
    serde_json::from_str(reminder_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid reminder: {}", e)))
}

fn millis_to_utc(millis: f64) -> Result<DateTime<Utc>, JsValue> {
    DateTime::from_timestamp_millis(millis as i64)
        .ok_or_else(|| JsValue::from_str("Timestamp out of range"))
}

/// Resolve a reminder's occurrences inside `[from_ms, to_ms)`.
///
/// Takes the reminder as a JSON document in its wire shape and Unix
/// millisecond bounds; returns occurrence times as Unix milliseconds.
#[wasm_bindgen]
pub fn resolve_occurrences(
    reminder_json: &str,
    from_ms: f64,
    to_ms: f64,
) -> Result<Vec<f64>, JsValue> {
    let reminder = parse_reminder(reminder_json)?;
    let from = millis_to_utc(from_ms)?;
    let to = millis_to_utc(to_ms)?;

    let times = occurrences(&reminder, from, to)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(times
        .into_iter()
        .map(|t| t.timestamp_millis() as f64)
        .collect())
}

/// The next time a reminder fires at or after `after_ms`, as Unix
/// milliseconds, or `null` when it never fires again.
#[wasm_bindgen]
pub fn resolve_next_occurrence(reminder_json: &str, after_ms: f64) -> Result<Option<f64>, JsValue> {
    let reminder = parse_reminder(reminder_json)?;
    let after = millis_to_utc(after_ms)?;

    let next = next_occurrence(&reminder, after)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(next.map(|t| t.timestamp_millis() as f64))
}
