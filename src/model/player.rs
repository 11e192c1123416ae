use chrono::{TimeZone, Utc};

use super::ids::PlayerHandle;

const DEFAULT_TITLE: &str = "GM";
const CHESS_COM_URL: &str = "https://www.chess.com";

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub username: PlayerHandle,
    pub player_id: Option<u64>,
    pub api_id: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub followers: Option<u32>,
    pub league: Option<String>,
    pub fide: Option<u32>,
    pub joined: Option<i64>,
    pub last_online: Option<i64>,
    pub is_streamer: Option<bool>,
    pub verified: Option<bool>,
    pub twitch_url: Option<String>,
    pub streaming_platforms: Vec<String>,
}

impl PlayerProfile {
    pub fn new(username: PlayerHandle) -> Self {
        Self {
            username,
            player_id: None,
            api_id: None,
            url: None,
            name: None,
            avatar: None,
            country: None,
            location: None,
            title: None,
            status: None,
            followers: None,
            league: None,
            fide: None,
            joined: None,
            last_online: None,
            is_streamer: None,
            verified: None,
            twitch_url: None,
            streaming_platforms: Vec::new(),
        }
    }

    /// Lower-cased last segment of the country resource URL, empty if there is none.
    pub fn country_code(&self) -> String {
        self.country
            .as_deref()
            .and_then(|url| url.rsplit('/').next())
            .map(|code| code.to_lowercase())
            .unwrap_or_default()
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_TITLE,
        }
    }

    pub fn joined_date(&self) -> Option<String> {
        self.joined.and_then(format_date)
    }

    pub fn last_online_date(&self) -> Option<String> {
        self.last_online.and_then(format_date)
    }

    pub fn stats_url(&self) -> String {
        format!("{}/stats/live/rapid/{}", CHESS_COM_URL, self.username)
    }

    pub fn games_url(&self) -> String {
        format!("{}/games/archive/{}", CHESS_COM_URL, self.username)
    }
}

pub fn format_date(timestamp: i64) -> Option<String> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|date| date.format("%B %-d, %Y").to_string())
}
