use std::{fmt, io};

use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::{layout::Rect, text::Line, Frame};

pub mod repl;
pub mod views;

pub struct RenderContext<'a, 'b> {
    pub frame: &'a mut Frame<'b>,
    pub area: Rect,
    pub block: Block<'b>,
}

impl<'a, 'b> RenderContext<'a, 'b> {
    pub fn lines(self, lines: Vec<Line<'static>>, scroll_offset: u16) {
        let paragraph = Paragraph::new(lines)
            .block(self.block)
            .wrap(Wrap { trim: false })
            .scroll((scroll_offset, 0));

        self.frame.render_widget(paragraph, self.area);
    }
}

#[derive(Debug)]
pub enum ReplError {
    Console(io::Error),
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReplError::Console(err) => write!(f, "Console error: {}", err),
        }
    }
}

impl From<io::Error> for ReplError {
    fn from(error: io::Error) -> Self {
        ReplError::Console(error)
    }
}
