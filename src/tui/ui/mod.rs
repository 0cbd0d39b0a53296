//! UI module: View components for the TUI.
//!
//! The page is one tall document of lines scrolled beneath a fixed header
//! (scroll progress bar, emblem, section links) and a fixed footer.

pub mod form;
pub mod landing;
pub mod result;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::ScrollState;
use crate::tui::styles::{KathakTheme, EMBLEM_FRAMES};

/// In-page anchor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Philosophy,
    HowItWorks,
    Assessment,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Philosophy,
        Section::HowItWorks,
        Section::Assessment,
    ];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Philosophy => "Philosophy",
            Self::HowItWorks => "How it Works",
            Self::Assessment => "Try AI",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Philosophy => 1,
            Self::HowItWorks => 2,
            Self::Assessment => 3,
        }
    }
}

/// The scrollable document for one frame.
#[derive(Default)]
pub struct Page {
    pub lines: Vec<Line<'static>>,
    anchors: [u16; 4],
    /// Line the keyboard focus sits on, kept visible while editing
    pub focus_line: Option<u16>,
}

impl Page {
    pub fn push(&mut self, line: impl Into<Line<'static>>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    /// Record that `section` starts at the next line.
    pub fn mark(&mut self, section: Section) {
        self.anchors[section.index()] = self.height();
    }

    /// Mark the next line as the focus line.
    pub fn mark_focus(&mut self) {
        self.focus_line = Some(self.height());
    }

    #[must_use]
    pub fn anchor(&self, section: Section) -> u16 {
        self.anchors[section.index()]
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }
}

/// Fixed header: scroll progress bar over a nav line with the rotating emblem.
pub fn render_header(f: &mut Frame, area: Rect, scroll: ScrollState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(2)])
        .split(area);

    let bar = LineGauge::default()
        .filled_style(KathakTheme::progress())
        .unfilled_style(KathakTheme::border())
        .label("")
        .ratio(scroll.progress);
    f.render_widget(bar, chunks[0]);

    let emblem = EMBLEM_FRAMES[scroll.rotation_frame(EMBLEM_FRAMES.len())];
    let mut spans = vec![
        Span::styled(format!(" {emblem} "), KathakTheme::accent()),
        Span::styled("Hriday", KathakTheme::title()),
        Span::styled("   ", KathakTheme::text()),
    ];
    for (i, section) in Section::ALL.iter().enumerate() {
        spans.push(Span::styled(format!("[{}] ", i + 1), KathakTheme::key_hint()));
        spans.push(Span::styled(
            format!("{}  ", section.title()),
            KathakTheme::key_desc(),
        ));
    }

    let nav = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(KathakTheme::border()),
    );
    f.render_widget(nav, chunks[1]);
}

/// Scrollable body.
pub fn render_page(f: &mut Frame, area: Rect, page: &Page, offset: u16) {
    let body = Paragraph::new(page.lines.clone())
        .style(KathakTheme::page())
        .scroll((offset, 0));
    f.render_widget(body, area);
}

/// Key hints for the current focus.
pub fn render_key_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), KathakTheme::key_hint()),
                Span::styled(format!("{desc}  "), KathakTheme::key_desc()),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(KathakTheme::border()),
    );
    f.render_widget(footer, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "Disclaimer: This is an AI prediction model for educational purposes only. Always consult a certified medical professional for diagnosis.",
        KathakTheme::text_muted(),
    )])];

    let p = Paragraph::new(text)
        .style(KathakTheme::page())
        .wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
