//! JSON encoding of the progression record
//!
//! Decoding never fails: every field is read on its own and falls back to its
//! default when missing or malformed, so one bad value cannot wipe the rest of
//! a player's progress.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::progression::ProgressionRecord;

/// Pretty-printed JSON for the record (stable field order)
pub fn encode(record: &ProgressionRecord) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Decode a record, recovering field by field
pub fn decode(json: &str) -> ProgressionRecord {
    let value: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Progress data is not valid JSON ({}), starting fresh", e);
            return ProgressionRecord::default();
        }
    };
    let Value::Object(map) = value else {
        log::warn!("Progress data is not a JSON object, starting fresh");
        return ProgressionRecord::default();
    };

    let defaults = ProgressionRecord::default();
    let mut record = ProgressionRecord {
        unlocked: field_list(&map, "unlocked_colors").unwrap_or(defaults.unlocked),
        selected: field(&map, "snake_color").unwrap_or(defaults.selected),
        apple_milestones_reached: field_list(&map, "milestones_reached")
            .unwrap_or(defaults.apple_milestones_reached),
        game_milestones_reached: field_list(&map, "game_played_milestones_reached")
            .unwrap_or(defaults.game_milestones_reached),
        total_apples: field(&map, "total_apples").unwrap_or(defaults.total_apples),
        total_deaths: field(&map, "total_deaths").unwrap_or(defaults.total_deaths),
        games_played: field(&map, "games_played").unwrap_or(defaults.games_played),
    };
    record.normalize();
    record
}

/// A single typed field; None (with a warning) when malformed
fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring malformed '{}' in progress data: {}", key, e);
            None
        }
    }
}

/// A list field, keeping the well-formed entries of a partly bad list
fn field_list<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<Vec<T>> {
    let Value::Array(items) = map.get(key)? else {
        log::warn!("Ignoring '{}' in progress data: not a list", key);
        return None;
    };
    let total = items.len();
    let kept: Vec<T> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();
    if kept.len() != total {
        log::warn!(
            "Dropped {} malformed entries from '{}' in progress data",
            total - kept.len(),
            key
        );
    }
    Some(kept)
}
