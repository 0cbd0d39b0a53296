//! Loading, result and failure panels of the assessment section.

use chrono::{DateTime, Local, Utc};
use ratatui::text::{Line, Span};
use tokio::time::Instant;

use super::Page;
use crate::application::{FailureReason, Session};
use crate::domain::DisplayModel;
use crate::tui::styles::KathakTheme;

/// Width of the probability bar in cells.
const BAR_WIDTH: usize = 40;

pub fn submitting(page: &mut Page, session: &Session, started_at: Instant) {
    let dots = ".".repeat((started_at.elapsed().as_millis() / 300 % 4) as usize);
    page.push(Line::from(vec![
        Span::raw("      "),
        Span::styled(format!("  {}  ", session.submit_label()), KathakTheme::button_disabled()),
    ]));
    page.push(Line::from(Span::styled(
        format!("      Contacting the scoring service{dots}"),
        KathakTheme::text_muted(),
    )));
}

pub fn succeeded(page: &mut Page, display: &DisplayModel, received_at: &DateTime<Utc>) {
    let style = KathakTheme::severity(display.severity_tier);
    let icon = match display.severity_tier {
        crate::domain::SeverityTier::Low => "✔",
        crate::domain::SeverityTier::Elevated => "▲",
    };

    page.mark_focus();
    page.push(Line::from(Span::styled(
        format!("    {icon} {}", display.headline()),
        style.add_modifier(ratatui::style::Modifier::BOLD),
    )));
    page.push(Line::from(Span::styled(
        "      Cardiovascular Disease Probability",
        KathakTheme::text_secondary(),
    )));
    page.blank();
    page.push(Line::from(vec![
        Span::raw("      "),
        Span::styled(format!("{}%", display.percentage_label), KathakTheme::heading()),
        Span::styled(format!("  ({})", display.severity_tier), style),
    ]));

    let filled = usize::from(display.percentage_label) * BAR_WIDTH / 100;
    page.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("█".repeat(filled), style),
        Span::styled("░".repeat(BAR_WIDTH - filled), KathakTheme::border()),
    ]));
    page.blank();
    page.push(Line::from(Span::styled(
        format!(
            "      Assessed at {}",
            received_at.with_timezone(&Local).format("%H:%M:%S")
        ),
        KathakTheme::text_muted(),
    )));
    page.blank();
    page.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("[Enter] ", KathakTheme::key_hint()),
        Span::styled("Check Another Patient", KathakTheme::key_desc()),
    ]));
}

pub fn failed(page: &mut Page, reason: &FailureReason) {
    page.push(Line::from(Span::styled(
        format!("    ! {}", reason.notice()),
        KathakTheme::danger(),
    )));
    page.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("[Enter] ", KathakTheme::key_hint()),
        Span::styled("Dismiss and try again", KathakTheme::key_desc()),
    ]));
}
