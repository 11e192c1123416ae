use crossterm::event::KeyCode;
use itertools::Itertools;
use ratatui::{style::Color, text::Line};

use crate::{
    controller::{
        navigation::NavigationIntent,
        profile::{ProfileController, ProfileState},
        PlayerSource,
    },
    model::{ids::PlayerHandle, player::PlayerProfile},
    styled_line, styled_span,
    ui::RenderContext,
};

use super::{error_lines, RenderableView, ACCENT};

const SCROLL_PAGE: i32 = 10;

// ============================================================================
// Player Profile View
// ============================================================================

pub struct ProfileView {
    controller: ProfileController,
    scroll_offset: u16,
}

impl ProfileView {
    pub fn new() -> Self {
        Self {
            controller: ProfileController::new(),
            scroll_offset: 0,
        }
    }

    pub fn activate(&mut self, source: &dyn PlayerSource, handle: PlayerHandle) {
        self.scroll_offset = 0;
        self.controller.activate(source, handle);
    }

    fn scroll_by(&mut self, delta: i32) {
        // Keep the last line on screen
        let last_line = profile_lines(self.controller.state()).len().saturating_sub(1);
        let max_offset = u16::try_from(last_line).unwrap_or(u16::MAX);
        let target = i32::from(self.scroll_offset) + delta;
        self.scroll_offset = target.clamp(0, i32::from(max_offset)) as u16;
    }
}

impl Default for ProfileView {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderableView for ProfileView {
    fn render(&self, rc: RenderContext) {
        rc.lines(profile_lines(self.controller.state()), self.scroll_offset);
    }

    fn update(&mut self) -> bool {
        self.controller.poll()
    }

    fn handle_key(&mut self, key: KeyCode) -> Option<NavigationIntent> {
        match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => return Some(self.controller.back()),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-SCROLL_PAGE),
            KeyCode::PageDown => self.scroll_by(SCROLL_PAGE),
            _ => {}
        }
        None
    }

    fn reload(&mut self, source: &dyn PlayerSource) {
        if let Some(handle) = self.controller.handle().cloned() {
            self.activate(source, handle);
        }
    }

    fn title(&self) -> String {
        match self.controller.handle() {
            Some(handle) => format!("Profile: {}", handle),
            None => "Profile".to_string(),
        }
    }

    fn key_hints(&self) -> &'static str {
        "Use ↑/↓ or PgUp/PgDown to scroll, Esc/b to go back, r to reload, q to quit."
    }
}

pub fn profile_lines(state: ProfileState) -> Vec<Line<'static>> {
    let mut lines = vec![styled_line!("← Back to list (Esc)"; Color::DarkGray)];
    match state {
        ProfileState::Loading => {
            lines.push(styled_line!());
            lines.push(styled_line!("Loading player profile..."; Color::DarkGray));
        }
        ProfileState::NotFound => {
            lines.push(styled_line!());
            lines.push(styled_line!("Not Found!"; Bold Color::Yellow));
            lines.push(styled_line!("No profile information found for this player."));
        }
        ProfileState::Failed(message) => lines.extend(error_lines(message)),
        ProfileState::Ready(profile) => {
            lines.extend(header(profile));
            lines.extend(information(profile));
            lines.extend(links(profile));
        }
    }
    lines
}

fn header(profile: &PlayerProfile) -> Vec<Line<'static>> {
    let mut lines = vec![styled_line!()];

    match &profile.avatar {
        Some(avatar) => lines.push(styled_line!("Avatar: {}", avatar; Color::DarkGray)),
        None => lines.push(styled_line!("[{}]", profile.username.initial(); Bold ACCENT)),
    }
    lines.push(styled_line!(profile.username.to_string(); Bold ACCENT));

    let mut subtitle = vec![styled_span!("{} • {}", profile.display_title(), profile.username)];
    let country = profile.country_code();
    if !country.is_empty() {
        subtitle.push(styled_span!("  [{}]", country.to_uppercase(); Color::Cyan));
    }
    lines.push(Line::from(subtitle));

    if profile.verified == Some(true) {
        lines.push(styled_line!("✔ Verified Account"; Color::Green));
    }
    lines
}

fn information(profile: &PlayerProfile) -> Vec<Line<'static>> {
    let mut lines = vec![styled_line!(), styled_line!("Player Information"; Bold ACCENT)];

    let status = profile.status.clone().unwrap_or_else(|| "N/A".to_string());
    lines.push(styled_line!("Status:         {}", status));

    let rows = [
        ("Followers:", profile.followers.map(|f| f.to_string())),
        ("League:", profile.league.clone()),
        ("FIDE rating:", profile.fide.map(|f| f.to_string())),
        ("Joined:", profile.joined_date()),
        ("Last online:", profile.last_online_date()),
        ("Streamer:", profile.is_streamer.filter(|s| *s).map(|_| "Yes".to_string())),
        ("Location:", profile.location.clone()),
        ("Name:", profile.name.clone()),
    ];
    lines.extend(
        rows.into_iter()
            .filter_map(|(label, value)| value.map(|v| styled_line!("{:<16}{}", label, v))),
    );

    if let Some(id) = profile.player_id {
        lines.push(styled_line!("Player ID:      {}", id; Color::DarkGray));
    }
    if let Some(api_id) = &profile.api_id {
        lines.push(styled_line!("API:            {}", api_id; Color::DarkGray));
    }
    lines
}

fn links(profile: &PlayerProfile) -> Vec<Line<'static>> {
    let mut lines = vec![styled_line!(), styled_line!("Links"; Bold ACCENT)];

    if let Some(url) = &profile.url {
        lines.push(styled_line!("Chess.com:      {}", url));
    }
    if let Some(twitch) = &profile.twitch_url {
        lines.push(styled_line!("Twitch:         {}", twitch));
    }
    if !profile.streaming_platforms.is_empty() {
        lines.push(styled_line!("Streaming on:   {}", profile.streaming_platforms.iter().join(", ")));
    }
    lines.push(styled_line!("Statistics:     {}", profile.stats_url(); Color::DarkGray));
    lines.push(styled_line!("Games:          {}", profile.games_url(); Color::DarkGray));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controller::{navigation::Route, testing::ScriptedSource},
        ui::views::plain_text,
    };

    fn handle(name: &str) -> PlayerHandle {
        PlayerHandle::new(name).unwrap()
    }

    fn magnus() -> PlayerProfile {
        let mut profile = PlayerProfile::new(handle("magnuscarlsen"));
        profile.name = Some("Magnus Carlsen".into());
        profile.title = Some("GM".into());
        profile.country = Some("https://api.chess.com/pub/country/NO".into());
        profile.followers = Some(100);
        profile.joined = Some(1_262_649_600);
        profile
    }

    #[test]
    fn renders_profile_header_and_rows() {
        let lines = plain_text(&profile_lines(ProfileState::Ready(&magnus())));

        assert!(lines.iter().any(|l| l == "magnuscarlsen"));
        assert!(lines.iter().any(|l| l == "GM • magnuscarlsen  [NO]"));
        assert!(lines.iter().any(|l| l.contains("Magnus Carlsen")));
        assert!(lines.iter().any(|l| l.starts_with("Followers:") && l.ends_with("100")));
        assert!(lines.iter().any(|l| l.ends_with("January 5, 2010")));
        assert!(lines.iter().any(|l| l.starts_with("Status:") && l.ends_with("N/A")));
        assert!(lines.iter().any(|l| l == "[M]"));
    }

    #[test]
    fn bare_record_has_no_country_badge() {
        let lines = plain_text(&profile_lines(ProfileState::Ready(&PlayerProfile::new(handle("magnuscarlsen")))));

        assert!(lines.iter().any(|l| l == "GM • magnuscarlsen"));
        assert!(!lines.iter().any(|l| l.contains('[') && l.contains("magnuscarlsen")));
        assert!(!lines.iter().any(|l| l.starts_with("FIDE rating:")));
    }

    #[test]
    fn scrolling_stops_at_last_line() {
        let source = ScriptedSource::default();
        let mut view = ProfileView::new();
        view.activate(&source, handle("magnuscarlsen"));
        source.take_profile("magnuscarlsen").send(Ok(Some(magnus())));
        view.update();

        let last_line = profile_lines(view.controller.state()).len() as u16 - 1;
        for _ in 0..10 {
            view.handle_key(KeyCode::PageDown);
        }
        assert_eq!(view.scroll_offset, last_line);
        view.handle_key(KeyCode::Down);
        assert_eq!(view.scroll_offset, last_line);

        view.handle_key(KeyCode::Up);
        assert_eq!(view.scroll_offset, last_line - 1);
        for _ in 0..10 {
            view.handle_key(KeyCode::PageUp);
        }
        assert_eq!(view.scroll_offset, 0);
    }

    #[test]
    fn omits_absent_rows() {
        let lines = plain_text(&profile_lines(ProfileState::Ready(&magnus())));

        assert!(!lines.iter().any(|l| l.starts_with("League:")));
        assert!(!lines.iter().any(|l| l.starts_with("FIDE rating:")));
        assert!(!lines.iter().any(|l| l.starts_with("Twitch:")));
        assert!(!lines.iter().any(|l| l.starts_with("Streaming on:")));
        assert!(!lines.iter().any(|l| l.contains("Verified")));
        assert!(lines.iter().any(|l| l.starts_with("Statistics:")));
        assert!(lines.iter().any(|l| l.starts_with("Games:")));
    }

    #[test]
    fn lists_streaming_platforms() {
        let mut profile = magnus();
        profile.verified = Some(true);
        profile.streaming_platforms = vec!["twitch".into(), "youtube".into()];
        let lines = plain_text(&profile_lines(ProfileState::Ready(&profile)));

        assert!(lines.iter().any(|l| l.ends_with("twitch, youtube")));
        assert!(lines.iter().any(|l| l.contains("Verified Account")));
    }

    #[test]
    fn not_found_is_not_an_error() {
        let lines = plain_text(&profile_lines(ProfileState::NotFound));

        assert!(lines.iter().any(|l| l == "No profile information found for this player."));
        assert!(!lines.iter().any(|l| l.contains("Error")));
        assert!(!lines.iter().any(|l| l.starts_with("Player Information")));
    }

    #[test]
    fn back_keys_return_to_list() {
        let source = ScriptedSource::default();
        let mut view = ProfileView::new();
        view.activate(&source, handle("hikaru"));

        for key in [KeyCode::Esc, KeyCode::Backspace, KeyCode::Char('b')] {
            assert_eq!(view.handle_key(key), Some(NavigationIntent::Open(Route::List)));
        }
        assert_eq!(view.handle_key(KeyCode::Down), None);
    }

    #[test]
    fn reload_refetches_same_handle() {
        let source = ScriptedSource::default();
        let mut view = ProfileView::new();
        view.activate(&source, handle("hikaru"));
        source.take_profile("hikaru").send(Ok(None));
        view.update();

        view.reload(&source);
        assert_eq!(view.controller.state(), ProfileState::Loading);
        source.take_profile("hikaru").send(Ok(Some(PlayerProfile::new(handle("hikaru")))));
        view.update();
        assert!(matches!(view.controller.state(), ProfileState::Ready(_)));
    }
}
