use crate::error::{Result, YttextError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Language requested when the caller leaves it empty.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A caption track as described by the watch page.
///
/// Only the fields the pipeline needs are modeled; everything else the page
/// supplies is carried through in `extra`. A modeled field holding something
/// other than a string reads as absent rather than rejecting the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub language_code: String,
    #[serde(default, deserialize_with = "string_or_none")]
    pub base_url: Option<String>,
    /// `"asr"` for auto-generated tracks.
    #[serde(default, deserialize_with = "string_or_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn string_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_none(deserializer).map(Option::unwrap_or_default)
}

impl CaptionTrack {
    /// Human readable track name, e.g. "English (auto-generated)".
    pub fn display_name(&self) -> Option<String> {
        let name = self.extra.get("name")?;
        if let Some(text) = name.get("simpleText").and_then(Value::as_str) {
            return Some(text.to_string());
        }
        let runs = name.get("runs")?.as_array()?;
        let joined: String = runs
            .iter()
            .filter_map(|r| r.get("text").and_then(Value::as_str))
            .collect();
        (!joined.is_empty()).then_some(joined)
    }

    pub fn is_auto_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// The track picked for a request, with its guaranteed fetch location.
#[derive(Debug, Clone, Copy)]
pub struct SelectedTrack<'a> {
    pub track: &'a CaptionTrack,
    pub base_url: &'a str,
}

/// Pick the track matching `language`, falling back to the first track.
///
/// An absent language is not an error; only an empty list or a selected
/// entry without a `baseUrl` is.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Result<SelectedTrack<'a>> {
    let language = if language.is_empty() {
        DEFAULT_LANGUAGE
    } else {
        language
    };

    let track = match tracks.iter().find(|t| t.language_code == language) {
        Some(track) => track,
        None => {
            let first = tracks.first().ok_or(YttextError::NoSuitableTrack)?;
            debug!(
                "No '{}' track, falling back to '{}'",
                language, first.language_code
            );
            first
        }
    };

    let base_url = track
        .base_url
        .as_deref()
        .ok_or(YttextError::NoSuitableTrack)?;

    Ok(SelectedTrack { track, base_url })
}
