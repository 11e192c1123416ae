use json::JsonValue;

use crate::model::{ids::PlayerHandle, roster::Roster};

use super::ParsingError;

pub fn parse_roster(json: &JsonValue) -> Result<Roster, ParsingError> {
    match json {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::Object(obj) => match &obj["players"] {
            JsonValue::Null => Ok(Vec::new()),
            JsonValue::Array(players) => players
                .iter()
                .map(|entry| {
                    entry
                        .as_str()
                        .and_then(|name| PlayerHandle::new(name).ok())
                        .ok_or(ParsingError::InvalidType("players entry".into()))
                })
                .collect(),
            _ => Err(ParsingError::InvalidType("players".into())),
        },
        _ => Err(ParsingError::InvalidType("root".into())),
    }
}
