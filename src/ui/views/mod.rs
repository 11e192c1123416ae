use crossterm::event::KeyCode;
use ratatui::{style::Color, text::Line};

use crate::{
    controller::{navigation::NavigationIntent, PlayerSource},
    ui::RenderContext,
};

pub mod list;
pub mod profile;

pub use list::*;
pub use profile::*;

pub const ACCENT: Color = Color::Rgb(200, 150, 0);

/// Trait for rendering views in the TUI
pub trait RenderableView {
    /// Render the view into a ratatui Frame
    fn render(&self, rc: RenderContext);

    /// Polls pending fetches, returns whether anything changed
    fn update(&mut self) -> bool {
        false
    }

    /// Handles a key the shell did not consume itself
    fn handle_key(&mut self, key: KeyCode) -> Option<NavigationIntent>;

    /// Re-issues the fetch this view was opened with
    fn reload(&mut self, source: &dyn PlayerSource);

    fn title(&self) -> String;

    fn key_hints(&self) -> &'static str;
}

#[macro_export]
macro_rules! styled_span {
    // More specific patterns FIRST

    // Expression with color and bold (expr; Color::X Bold)
    ($expr:expr; Bold $color:expr) => {
        ratatui::text::Span::styled(
            format!("{}", $expr),
            ratatui::style::Style::default()
                .fg($color)
                .add_modifier(ratatui::style::Modifier::BOLD)
        )
    };

    // Expression with color (expr; Color::X)
    ($expr:expr; $color:expr) => {
        ratatui::text::Span::styled(
            format!("{}", $expr),
            ratatui::style::Style::default().fg($color)
        )
    };

    // Formatted text with color and bold (text, args...; Color::X Bold)
    ($text:literal, $($arg:expr),+; Bold $color:expr) => {
        ratatui::text::Span::styled(
            format!($text, $($arg),+),
            ratatui::style::Style::default()
                .fg($color)
                .add_modifier(ratatui::style::Modifier::BOLD)
        )
    };

    // Formatted text with color (text, args...; Color::X)
    ($text:literal, $($arg:expr),+; $color:expr) => {
        ratatui::text::Span::styled(
            format!($text, $($arg),+),
            ratatui::style::Style::default().fg($color)
        )
    };

    // Formatted text (text, args...)
    ($text:literal, $($arg:expr),+) => {
        ratatui::text::Span::raw(format!($text, $($arg),+))
    };

    // Plain text literal (LAST - most general)
    ($text:literal) => {
        ratatui::text::Span::raw($text)
    };

    // Plain expression
    ($expr:expr) => {
        ratatui::text::Span::raw(format!("{}", $expr))
    };
}

#[macro_export]
macro_rules! styled_line {
    // Empty line
    () => {
        ratatui::text::Line::raw("")
    };

    // Span list
    (LIST [$($args:expr),+ $(,)?]) => {
        ratatui::text::Line::from(vec![$($args),+])
    };

    // Full styled line
    ($($args:tt)+) => {
        ratatui::text::Line::from($crate::styled_span!($($args)+))
    };
}

pub fn error_lines(message: &str) -> Vec<Line<'static>> {
    vec![styled_line!(), styled_line!("[!] Error! {}", message; Color::Red)]
}

#[cfg(test)]
pub(crate) fn plain_text(lines: &[ratatui::text::Line]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
        .collect()
}
