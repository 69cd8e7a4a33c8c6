use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::records::ListingRecord;

/// Profile fields that a listing always carries fresher values for.
pub const SUPERSEDED_KEYS: [&str; 3] = ["TSI", "AgeDays", "AgeYears"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("stored profile has no PlayerID")]
    MissingPlayerId,
    #[error("listing did not serialize to a JSON object")]
    ListingNotAnObject,
}

/// A stored profile updated with one listing, plus the file key it is saved under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip)]
    pub file_key: String,
}

/// Combines a stored profile with a freshly parsed listing for the same player.
///
/// Keys of the stored object that the listing does not know about pass through
/// untouched. When a stored key collides with a listing key, the listing value
/// is kept.
pub fn merge(mut stored: Map<String, Value>, listing: &ListingRecord) -> Result<MergedRecord, MergeError> {
    let player_id = player_id(&stored)?;

    for key in SUPERSEDED_KEYS {
        stored.remove(key);
    }

    let Ok(Value::Object(fresh)) = serde_json::to_value(listing) else {
        return Err(MergeError::ListingNotAnObject);
    };
    for (key, value) in fresh {
        if let Some(old) = stored.insert(key.clone(), value) {
            debug!(player_id = %player_id, key = %key, old = %old, "stored value replaced by listing");
        }
    }

    let file_key = file_key(&player_id, &stored);
    Ok(MergedRecord {
        fields: stored,
        file_key,
    })
}

/// `PlayerID` of a stored record as text. The id names files, so only a
/// non-negative integer or a string of ASCII digits is accepted; anything else
/// counts as missing and no id is ever made up.
pub fn player_id(stored: &Map<String, Value>) -> Result<String, MergeError> {
    match stored.get("PlayerID") {
        Some(Value::Number(n)) => n.as_u64().map(|id| id.to_string()).ok_or(MergeError::MissingPlayerId),
        Some(Value::String(s)) => {
            let s = s.trim();
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                Ok(s.to_string())
            } else {
                Err(MergeError::MissingPlayerId)
            }
        }
        _ => Err(MergeError::MissingPlayerId),
    }
}

fn file_key(player_id: &str, fields: &Map<String, Value>) -> String {
    let season = fields.get("Season").and_then(Value::as_u64);
    let week = fields.get("SeasonWeek").and_then(Value::as_u64);
    match (season, week) {
        (Some(season), Some(week)) => format!("{}_{}_{}", player_id, season, week),
        _ => {
            warn!(player_id = %player_id, "merged record lacks Season/SeasonWeek; keyed by PlayerID only");
            player_id.to_string()
        }
    }
}
