use std::{
    io::stdout,
    sync::{Arc, Mutex},
    thread::{self, ThreadId},
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Terminal,
};

use crate::{
    controller::{
        navigation::{NavigationIntent, Route},
        PlayerSource,
    },
    service::data_manager::DataManager,
    ui::{views::*, RenderContext},
};

use super::ReplError;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct App {
    route: Route,
    list: ListView,
    profile: ProfileView,
    should_quit: bool,
    panic_flag: Arc<Mutex<Option<String>>>,
    panic_message: Option<String>,
}

impl App {
    fn new(panic_flag: Arc<Mutex<Option<String>>>) -> Self {
        Self {
            route: Route::List,
            list: ListView::new(),
            profile: ProfileView::new(),
            should_quit: false,
            panic_flag,
            panic_message: None,
        }
    }

    fn view(&self) -> &dyn RenderableView {
        match self.route {
            Route::List => &self.list,
            Route::Profile(_) => &self.profile,
        }
    }

    fn view_mut(&mut self) -> &mut dyn RenderableView {
        match self.route {
            Route::List => &mut self.list,
            Route::Profile(_) => &mut self.profile,
        }
    }

    /// Every navigation re-activates the target view, so it always shows fresh data.
    fn open(&mut self, route: Route, source: &dyn PlayerSource) {
        info!("Navigating to {}", route);
        match &route {
            Route::List => self.list.activate(source),
            Route::Profile(handle) => self.profile.activate(source, handle.clone()),
        }
        self.route = route;
    }

    fn apply(&mut self, intent: NavigationIntent, source: &dyn PlayerSource) {
        match intent {
            NavigationIntent::Open(route) => self.open(route, source),
            NavigationIntent::Quit => self.should_quit = true,
        }
    }

    fn check_panic(&mut self) {
        if self.panic_message.is_some() {
            return;
        }
        if let Ok(panic_guard) = self.panic_flag.lock() {
            if let Some(panic_msg) = panic_guard.as_ref() {
                self.panic_message = Some(panic_msg.clone());
            }
        }
    }

    fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
        source: &dyn PlayerSource,
        start: Route,
    ) -> Result<(), ReplError> {
        self.open(start, source);

        loop {
            self.check_panic();
            self.view_mut().update();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
                    .split(f.size());

                let title = Paragraph::new(" Data provided by Chess.com API")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(ACCENT))
                            .title("Chess Grandmasters Wiki")
                            .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                    );
                f.render_widget(title, chunks[0]);

                let info = match self.panic_message {
                    Some(_) => "Press 'q' to quit.",
                    None => self.view().key_hints(),
                };
                let info_paragraph = Paragraph::new(info)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Right);
                f.render_widget(info_paragraph, chunks[2]);

                if let Some(panic_msg) = &self.panic_message {
                    let error_block = Block::default()
                        .borders(Borders::ALL)
                        .title("ERROR - Application Panicked")
                        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                        .padding(Padding::horizontal(1))
                        .border_style(Style::default().fg(Color::Red));
                    let error_text = Paragraph::new(panic_msg.as_str())
                        .block(error_block)
                        .wrap(Wrap { trim: false })
                        .style(Style::default().fg(Color::Red));
                    f.render_widget(error_text, chunks[1]);
                    return;
                }

                let view = self.view();
                let block = Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .title(view.title())
                    .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(ACCENT));
                view.render(RenderContext {
                    frame: f,
                    area: chunks[1],
                    block,
                });
            })?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    match key.code {
                        KeyCode::Char('q') => self.apply(NavigationIntent::Quit, source),
                        _ if self.panic_message.is_some() => {}
                        KeyCode::Char('r') => {
                            info!("Reloading {}", self.route);
                            self.view_mut().reload(source);
                        }
                        code => {
                            if let Some(intent) = self.view_mut().handle_key(code) {
                                self.apply(intent, source);
                            }
                        }
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }
}

/// Panics on the UI thread replace the active view with the panic panel. Worker panics only
/// get logged; the dropped responder already fails their request.
struct PanicCapture {
    flag: Arc<Mutex<Option<String>>>,
    ui_thread: ThreadId,
}

impl PanicCapture {
    fn record(&self, msg: String) {
        error!("{}", msg);
        if thread::current().id() != self.ui_thread {
            return;
        }
        if let Ok(mut panic_info_guard) = self.flag.lock() {
            *panic_info_guard = Some(msg);
        }
    }
}

pub fn run(manager: DataManager, start: Route) -> Result<(), ReplError> {
    let panic_flag = Arc::new(Mutex::new(None));
    let capture = PanicCapture {
        flag: panic_flag.clone(),
        ui_thread: thread::current().id(),
    };

    // Terminal stays in raw mode, so panics are logged instead of printed
    std::panic::set_hook(Box::new(move |panic_info| {
        let mut msg = String::from("Application panicked!\n\n");
        if let Some(location) = panic_info.location() {
            msg.push_str(&format!(
                "Location: {}:{}:{}\n\n",
                location.file(),
                location.line(),
                location.column()
            ));
        }

        msg.push_str("Message:\n");
        if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            msg.push_str(&format!("  {}\n", s));
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            msg.push_str(&format!("  {}\n", s));
        } else {
            msg.push_str("  <no message>\n");
        }

        msg.push_str(&format!("Thread: {}\n", thread::current().name().unwrap_or("<unnamed>")));

        capture.record(msg);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(panic_flag);
    let result = app.run(&mut terminal, &manager, start);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!("REPL stopped: {}", err);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controller::testing::ScriptedSource,
        model::ids::PlayerHandle,
    };

    fn app() -> App {
        App::new(Arc::new(Mutex::new(None)))
    }

    #[test]
    fn opening_profile_then_back_refetches_list() {
        let source = ScriptedSource::default();
        let mut app = app();
        app.open(Route::List, &source);
        assert_eq!(source.rosters.borrow().len(), 1);

        let hikaru = PlayerHandle::new("hikaru").unwrap();
        app.apply(NavigationIntent::Open(Route::Profile(hikaru.clone())), &source);
        assert_eq!(app.route, Route::Profile(hikaru));
        assert_eq!(app.view().title(), "Profile: hikaru");

        let intent = app.view_mut().handle_key(KeyCode::Esc);
        app.apply(intent.unwrap(), &source);
        assert_eq!(app.route, Route::List);
        assert_eq!(source.rosters.borrow().len(), 2);
    }

    #[test]
    fn quit_intent_stops_loop() {
        let source = ScriptedSource::default();
        let mut app = app();
        app.apply(NavigationIntent::Quit, &source);
        assert!(app.should_quit);
    }

    #[test]
    fn picks_up_panic_message() {
        let flag = Arc::new(Mutex::new(None));
        let mut app = App::new(flag.clone());
        *flag.lock().unwrap() = Some("boom".to_string());
        app.check_panic();
        assert_eq!(app.panic_message.as_deref(), Some("boom"));
    }

    #[test]
    fn worker_panics_leave_the_shell_running() {
        let flag = Arc::new(Mutex::new(None));
        let capture = Arc::new(PanicCapture {
            flag: flag.clone(),
            ui_thread: thread::current().id(),
        });

        let worker = Arc::clone(&capture);
        thread::spawn(move || worker.record("worker".to_string())).join().unwrap();
        assert_eq!(*flag.lock().unwrap(), None);

        capture.record("ui".to_string());
        assert_eq!(flag.lock().unwrap().as_deref(), Some("ui"));
    }
}
