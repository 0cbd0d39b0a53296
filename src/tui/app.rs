//! Main TUI application state machine.
//!
//! Handles:
//! - Page scrolling and in-page section jumps
//! - Form focus and editing
//! - Submitting through the session and polling for completion

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame, Terminal,
};
use tokio::runtime::Runtime;

use crate::adapters::HttpScoringClient;
use crate::application::{Phase, PredictionOrchestrator, Session, SubmitError};
use crate::config::ClientConfig;
use crate::domain::{field_index, ScrollPosition};
use crate::ports::ScoringService;

use super::styles::KathakTheme;
use super::ui::{
    form::{assessment, FormView},
    landing, render_disclaimer, render_header, render_key_hints, render_page, Page, Section,
};

/// Lines scrolled per mouse wheel notch.
const WHEEL_STEP: i32 = 3;

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    Form,
}

/// Main application state
pub struct App {
    /// Runtime the scoring requests run on; the UI loop itself stays synchronous
    runtime: Runtime,

    session: Session,

    form_view: FormView,

    focus: Focus,

    scroll: ScrollPosition,

    /// Body height from the last frame, for page-wise scrolling
    viewport_height: u16,

    /// Section to jump to on the next frame (anchors are known only after layout)
    pending_anchor: Option<Section>,

    /// Bring the focus line into view on the next frame
    follow_focus: bool,

    should_quit: bool,
}

impl App {
    /// Create a new application talking HTTP to the configured endpoint.
    ///
    /// # Errors
    /// Returns error if the async runtime cannot be started.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("hriday-net")
            .enable_all()
            .build()?;
        let service: Arc<dyn ScoringService> = Arc::new(HttpScoringClient::new(config));

        Ok(Self::with_dependencies(runtime, service, config))
    }

    /// Create application with injected dependencies.
    pub fn with_dependencies(
        runtime: Runtime,
        service: Arc<dyn ScoringService>,
        config: &ClientConfig,
    ) -> Self {
        let orchestrator =
            PredictionOrchestrator::new(service, runtime.handle().clone(), config.min_display);

        Self {
            runtime,
            session: Session::new(orchestrator, config.validate_before_submit),
            form_view: FormView::default(),
            focus: Focus::Page,
            scroll: ScrollPosition::default(),
            viewport_height: 0,
            pending_anchor: None,
            follow_focus: false,
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            if self.session.poll() {
                self.follow_focus = true;
            }

            terminal.draw(|f| self.draw(f))?;

            // Short poll keeps the loading state and completion responsive.
            if event::poll(Duration::from_millis(50))? {
                self.handle_event(event::read()?);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn build_page(&self) -> Page {
        let mut page = Page::default();
        landing::hero(&mut page);
        landing::philosophy(&mut page);
        landing::how_it_works(&mut page);
        assessment(
            &mut page,
            &self.session,
            &self.form_view,
            self.focus == Focus::Form,
        );
        landing::closing(&mut page);
        page
    }

    fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        f.render_widget(Block::default().style(KathakTheme::page()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress bar + nav
                Constraint::Min(0),    // Page body
                Constraint::Length(2), // Key hints
                Constraint::Length(2), // Disclaimer
            ])
            .split(area);
        let body = chunks[1];

        let page = self.build_page();

        // Every frame re-derives scroll bounds, so terminal resizes are covered.
        self.viewport_height = body.height;
        self.scroll.resize(page.height(), body.height);

        if let Some(section) = self.pending_anchor.take() {
            self.scroll.scroll_to(page.anchor(section));
        }
        if std::mem::take(&mut self.follow_focus) {
            if let Some(line) = page.focus_line {
                self.keep_visible(line);
            }
        }

        render_header(f, chunks[0], self.scroll.state());
        render_page(f, body, &page, self.scroll.offset());
        render_key_hints(f, chunks[2], &self.key_hints());
        render_disclaimer(f, chunks[3]);
    }

    fn keep_visible(&mut self, line: u16) {
        let top = self.scroll.offset();
        let height = self.viewport_height.max(1);
        if line < top {
            self.scroll.scroll_to(line.saturating_sub(2));
        } else if line >= top.saturating_add(height) {
            self.scroll
                .scroll_to(line.saturating_add(3).saturating_sub(height));
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        match self.focus {
            Focus::Page => vec![
                ("↑↓", "Scroll"),
                ("1-4", "Sections"),
                ("T", "Try AI"),
                ("Tab", "Form"),
                ("Q", "Quit"),
            ],
            Focus::Form => {
                let enter = match self.session.phase() {
                    Phase::Idle | Phase::Submitting => self.session.submit_label(),
                    Phase::Succeeded => "Check Another",
                    Phase::Failed => "Dismiss",
                };
                vec![
                    ("↑↓", "Field"),
                    ("←→", "Option"),
                    ("Enter", enter),
                    ("Esc", "Page"),
                    ("Ctrl+Q", "Quit"),
                ]
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                self.handle_key(key.code, key.modifiers);
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => self.scroll.scroll_by(WHEEL_STEP),
                MouseEventKind::ScrollUp => self.scroll.scroll_by(-WHEEL_STEP),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
            && modifiers.contains(KeyModifiers::CONTROL)
        {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::PageDown => return self.scroll.scroll_by(i32::from(self.viewport_height)),
            KeyCode::PageUp => return self.scroll.scroll_by(-i32::from(self.viewport_height)),
            _ => {}
        }

        match self.focus {
            Focus::Page => self.handle_page_key(key),
            Focus::Form => self.handle_form_key(key),
        }
    }

    fn handle_page_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.scroll.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll.scroll_by(1),
            KeyCode::Home => self.scroll.scroll_to(0),
            KeyCode::End => self.scroll.scroll_to(u16::MAX),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.pending_anchor = Some(Section::ALL[index]);
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.pending_anchor = Some(Section::Assessment);
                self.focus = Focus::Form;
            }
            KeyCode::Tab | KeyCode::Char('f') | KeyCode::Char('F') => {
                self.focus = Focus::Form;
                self.follow_focus = true;
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.focus = Focus::Page;
                return;
            }
            KeyCode::Up | KeyCode::BackTab => self.form_view.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_view.next_field(),
            KeyCode::Left => self.form_view.cycle_option(&mut self.session, -1),
            KeyCode::Right => self.form_view.cycle_option(&mut self.session, 1),
            KeyCode::Char(c) => self.form_view.input_char(&mut self.session, c),
            KeyCode::Backspace => self.form_view.delete_char(&mut self.session),
            KeyCode::Delete => self.form_view.clear_field(&mut self.session),
            KeyCode::Enter => self.activate(),
            _ => return,
        }
        self.follow_focus = true;
    }

    /// Enter: submit when idle, dismiss a held result or failure otherwise.
    fn activate(&mut self) {
        match self.session.phase() {
            Phase::Idle => self.submit(),
            Phase::Submitting => tracing::debug!("Submit ignored while a request is in flight"),
            Phase::Succeeded | Phase::Failed => {
                self.session.check_another();
                self.focus = Focus::Form;
            }
        }
        self.follow_focus = true;
    }

    fn submit(&mut self) {
        match self.session.submit() {
            Ok(()) => {}
            Err(SubmitError::Invalid(errors)) => {
                if let Some(index) = errors.first().and_then(|e| field_index(e.field())) {
                    self.form_view.selected_field = index;
                }
                self.focus = Focus::Form;
            }
            Err(SubmitError::NotIdle(e)) => tracing::debug!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldCategory, FieldValue, FormState, PredictionResult, RiskClass};
    use crate::ports::TransportError;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;

    struct FixedScoring;

    #[async_trait]
    impl ScoringService for FixedScoring {
        fn endpoint(&self) -> &str {
            "fixed://scoring"
        }

        async fn predict(&self, _form: &FormState) -> Result<PredictionResult, TransportError> {
            Ok(PredictionResult {
                prediction: RiskClass::Elevated,
                probability: 0.66,
            })
        }
    }

    fn app() -> App {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("runtime");
        let config = ClientConfig {
            min_display: Duration::ZERO,
            ..ClientConfig::default()
        };
        App::with_dependencies(runtime, Arc::new(FixedScoring), &config)
    }

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
        terminal.draw(|f| app.draw(f)).expect("draw");
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_try_ai_jumps_to_form() {
        let mut app = app();
        draw(&mut app);
        assert_eq!(app.scroll.offset(), 0);
        assert_eq!(app.scroll.state().progress, 0.0);

        press(&mut app, KeyCode::Char('t'));
        draw(&mut app);
        assert_eq!(app.focus, Focus::Form);
        assert!(app.scroll.offset() > 0);
        assert!(app.scroll.state().progress > 0.0);
    }

    #[test]
    fn test_editing_fields() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.session.form().get("age"), Some(&FieldValue::from("35")));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.form().get("gender"), Some(&FieldValue::from("2")));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.form().get("gender"), Some(&FieldValue::from("1")));

        // Letters never reach numeric fields.
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.session.form().get("age"), Some(&FieldValue::from("35")));
    }

    #[test]
    fn test_invalid_submit_moves_cursor_to_first_error() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Delete); // height
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.phase(), Phase::Idle);
        assert_eq!(app.form_view.field().name, "height");
        assert!(app.session.field_error("height").is_some());
    }

    #[test]
    fn test_submit_then_check_another() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.phase(), Phase::Submitting);

        // Enter while submitting is ignored.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.phase(), Phase::Submitting);

        let settled = app.runtime.block_on(app.session.wait()).phase();
        assert_eq!(settled, Phase::Succeeded);
        draw(&mut app);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.phase(), Phase::Idle);
        assert_eq!(app.session.form(), &FormState::initialize());
    }

    #[test]
    fn test_form_rows_are_grouped_by_category() {
        let app = app();
        let page = app.build_page();
        let texts: Vec<String> = page
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect();

        let positions: Vec<usize> = [
            FieldCategory::Demographic,
            FieldCategory::Anthropometric,
            FieldCategory::VitalSign,
            FieldCategory::LabResult,
            FieldCategory::Lifestyle,
        ]
        .iter()
        .map(|c| {
            let matches: Vec<usize> = texts
                .iter()
                .enumerate()
                .filter(|(_, t)| t.trim() == c.title())
                .map(|(i, _)| i)
                .collect();
            assert_eq!(matches.len(), 1, "{}", c.title());
            matches[0]
        })
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(positions[0] > usize::from(page.anchor(Section::Assessment)));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
