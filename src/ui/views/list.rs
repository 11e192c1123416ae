use crossterm::event::KeyCode;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::{
    controller::{async_data::LoadState, list::ListController, navigation::NavigationIntent, PlayerSource},
    styled_line, styled_span,
    ui::RenderContext,
};

use super::{error_lines, RenderableView, ACCENT};

const CARD_WIDTH: usize = 28;

// ============================================================================
// Grandmaster List View
// ============================================================================

pub struct ListView {
    controller: ListController,
}

impl ListView {
    pub fn new() -> Self {
        Self {
            controller: ListController::new(),
        }
    }

    pub fn activate(&mut self, source: &dyn PlayerSource) {
        self.controller.activate(source);
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderableView for ListView {
    fn render(&self, rc: RenderContext) {
        // Block has borders and one column of padding on each side
        let inner_width = (rc.area.width as usize).saturating_sub(4);
        let columns = (inner_width / CARD_WIDTH).max(1);
        rc.lines(list_lines(&self.controller, columns), 0);
    }

    fn update(&mut self) -> bool {
        self.controller.poll()
    }

    fn handle_key(&mut self, key: KeyCode) -> Option<NavigationIntent> {
        match key {
            KeyCode::Up => self.controller.select_previous(),
            KeyCode::Down => self.controller.select_next(),
            KeyCode::Left | KeyCode::PageUp => self.controller.previous_page(),
            KeyCode::Right | KeyCode::PageDown => self.controller.next_page(),
            KeyCode::Home => self.controller.set_page(1),
            KeyCode::End => self.controller.set_page(self.controller.total_pages()),
            KeyCode::Enter => return self.controller.activate_selected(),
            _ => {}
        }
        None
    }

    fn reload(&mut self, source: &dyn PlayerSource) {
        self.activate(source);
    }

    fn title(&self) -> String {
        match self.controller.state() {
            LoadState::Ready(_) if self.controller.total() > 0 => {
                format!("Grandmasters (page {})", self.controller.paginator().indicator())
            }
            _ => "Grandmasters".to_string(),
        }
    }

    fn key_hints(&self) -> &'static str {
        "Use ↑/↓ to select, ←/→ to change page, Enter to open, r to reload, q to quit."
    }
}

pub fn list_lines(list: &ListController, columns: usize) -> Vec<Line<'static>> {
    match list.state() {
        LoadState::Loading => vec![styled_line!(), styled_line!("Loading grandmasters..."; Color::DarkGray)],
        LoadState::Failed(message) => error_lines(message),
        LoadState::Ready(_) => {
            let mut lines = vec![
                styled_line!(),
                styled_line!("Chess Grandmasters"; Bold ACCENT),
                styled_line!(),
            ];

            if list.total() == 0 {
                lines.push(styled_line!("No grandmasters found."; Color::Yellow));
                return lines;
            }

            lines.extend(card_grid(list, columns));
            if let Some(summary) = list.summary() {
                lines.push(styled_line!(summary; Color::Gray));
            }
            lines.push(pager_line(list));
            lines
        }
    }
}

fn card_grid(list: &ListController, columns: usize) -> Vec<Line<'static>> {
    let columns = columns.max(1);
    let selected = list.selected_index();

    list.visible()
        .chunks(columns)
        .enumerate()
        .flat_map(|(row, chunk)| {
            let cards = chunk
                .iter()
                .enumerate()
                .flat_map(|(col, handle)| {
                    let label: String = format!("[{}] {}", handle.initial(), handle)
                        .chars()
                        .take(CARD_WIDTH - 2)
                        .collect();
                    let text = format!("{:<width$}", label, width = CARD_WIDTH - 2);
                    let style = if row * columns + col == selected {
                        Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    [Span::styled(text, style), Span::raw("  ")]
                })
                .collect::<Vec<_>>();
            vec![Line::from(cards), styled_line!()]
        })
        .collect()
}

fn pager_line(list: &ListController) -> Line<'static> {
    let paginator = list.paginator();
    let arrow = |enabled: bool| if enabled { ACCENT } else { Color::DarkGray };

    styled_line!(LIST [
        styled_span!("«"; arrow(paginator.has_previous())),
        styled_span!("  {}  ", paginator.indicator()),
        styled_span!("»"; arrow(paginator.has_next())),
    ])
}
