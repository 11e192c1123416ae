use json::{object::Object, JsonValue};
use log::warn;

use crate::model::{ids::PlayerHandle, player::PlayerProfile};

use super::ParsingError;

/// Parses a profile record. Returns `None` for the API's not-found shapes: an empty body,
/// a non-object, or an object without a username.
pub fn parse_profile(json: &JsonValue) -> Result<Option<PlayerProfile>, ParsingError> {
    let JsonValue::Object(obj) = json else {
        return Ok(None);
    };

    let Some(username) = obj["username"].as_str().and_then(|name| PlayerHandle::new(name).ok()) else {
        return Ok(None);
    };

    let mut profile = PlayerProfile::new(username);
    profile.player_id = optional(obj, "player_id", JsonValue::as_u64);
    profile.api_id = optional_string(obj, "@id");
    profile.url = optional_string(obj, "url");
    profile.name = optional_string(obj, "name");
    profile.avatar = optional_string(obj, "avatar");
    profile.country = optional_string(obj, "country");
    profile.location = optional_string(obj, "location");
    profile.title = optional_string(obj, "title");
    profile.status = optional_string(obj, "status");
    profile.followers = optional(obj, "followers", JsonValue::as_u32);
    profile.league = optional_string(obj, "league");
    profile.fide = optional(obj, "fide", JsonValue::as_u32);
    profile.joined = optional(obj, "joined", JsonValue::as_i64);
    profile.last_online = optional(obj, "last_online", JsonValue::as_i64);
    profile.is_streamer = optional(obj, "is_streamer", JsonValue::as_bool);
    profile.verified = optional(obj, "verified", JsonValue::as_bool);
    profile.twitch_url = optional_string(obj, "twitch_url");
    profile.streaming_platforms = parse_streaming_platforms(&obj["streaming_platforms"])?;

    Ok(Some(profile))
}

// Values of the wrong type count as absent
fn optional<T>(obj: &Object, key: &str, convert: fn(&JsonValue) -> Option<T>) -> Option<T> {
    match &obj[key] {
        JsonValue::Null => None,
        value => {
            let converted = convert(value);
            if converted.is_none() {
                warn!("Ignoring profile field {} with unexpected value {}", key, value.dump());
            }
            converted
        }
    }
}

fn optional_string(obj: &Object, key: &str) -> Option<String> {
    optional(obj, key, |value| value.as_str().map(str::to_string))
}

// Older responses list plain names, newer ones objects with a `type` key.
fn parse_streaming_platforms(json: &JsonValue) -> Result<Vec<String>, ParsingError> {
    match json {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::Array(entries) => entries
            .iter()
            .map(|entry| match entry {
                JsonValue::Object(platform) => platform["type"].as_str().map(str::to_string),
                other => other.as_str().map(str::to_string),
            })
            .map(|name| name.ok_or(ParsingError::InvalidType("streaming_platforms entry".into())))
            .collect(),
        _ => Err(ParsingError::InvalidType("streaming_platforms".into())),
    }
}
