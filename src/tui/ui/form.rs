//! Assessment form: field rows, submit affordance and the result panel.

use ratatui::text::{Line, Span};

use super::{result, Page, Section};
use crate::application::{Lifecycle, Session};
use crate::domain::{list_fields, FieldKind, FieldSpec, FieldValue, FIELD_COUNT};
use crate::tui::styles::KathakTheme;

/// Column width of field labels.
const LABEL_WIDTH: usize = 18;

/// Cursor over the form fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormView {
    pub selected_field: usize,
}

impl FormView {
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = FIELD_COUNT - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    #[must_use]
    pub fn field(&self) -> &'static FieldSpec {
        &list_fields()[self.selected_field]
    }

    /// Type a character into the selected numeric field.
    pub fn input_char(&self, session: &mut Session, c: char) {
        let field = self.field();
        if !matches!(field.kind, FieldKind::Numeric { .. }) {
            return;
        }
        if c.is_ascii_digit() || c == '.' || c == '-' {
            let mut text = current_text(session, field);
            text.push(c);
            apply(session, field, text);
        }
    }

    /// Delete the last character of the selected numeric field.
    pub fn delete_char(&self, session: &mut Session) {
        let field = self.field();
        if matches!(field.kind, FieldKind::Numeric { .. }) {
            let mut text = current_text(session, field);
            text.pop();
            apply(session, field, text);
        }
    }

    /// Clear the selected numeric field.
    pub fn clear_field(&self, session: &mut Session) {
        let field = self.field();
        if matches!(field.kind, FieldKind::Numeric { .. }) {
            apply(session, field, String::new());
        }
    }

    /// Step the selected enum field to the next (`step > 0`) or previous option.
    pub fn cycle_option(&self, session: &mut Session, step: isize) {
        let field = self.field();
        let options = field.options();
        if options.is_empty() {
            return;
        }

        let current = session
            .form()
            .get(field.name)
            .and_then(FieldValue::as_number)
            .and_then(|n| options.iter().position(|o| o.value as f64 == n));

        let len = options.len() as isize;
        let next = match current {
            Some(i) => (i as isize + step).rem_euclid(len) as usize,
            None => 0,
        };

        // Select inputs report their value as text, like any other input.
        apply(session, field, options[next].value.to_string());
    }
}

fn current_text(session: &Session, field: &FieldSpec) -> String {
    session
        .form()
        .get(field.name)
        .map(FieldValue::display)
        .unwrap_or_default()
}

fn apply(session: &mut Session, field: &FieldSpec, text: String) {
    if let Err(e) = session.update(field.name, text) {
        tracing::error!("Form edit dropped: {e}");
    }
}

/// Append the assessment section to the page.
pub fn assessment(page: &mut Page, session: &Session, view: &FormView, form_focused: bool) {
    page.mark(Section::Assessment);
    page.push(Line::from(Span::styled("  Patient Assessment", KathakTheme::heading())));
    page.push(Line::from(Span::styled(
        "  Enter your health metrics accurately.",
        KathakTheme::text_secondary(),
    )));
    page.blank();

    if let Lifecycle::Succeeded {
        display,
        received_at,
        ..
    } = session.lifecycle()
    {
        result::succeeded(page, display, received_at);
        return;
    }

    let mut category = None;
    for (index, (field, value)) in session.form().iter().enumerate() {
        if category != Some(field.category) {
            category = Some(field.category);
            page.push(Line::from(Span::styled(
                format!("  {}", field.category.title()),
                KathakTheme::accent(),
            )));
        }

        let selected = form_focused && index == view.selected_field;
        if selected {
            page.mark_focus();
        }
        page.push(field_row(field, value, selected));

        if let Some(err) = session.field_error(field.name) {
            page.push(Line::from(Span::styled(
                format!("    ! {err}"),
                KathakTheme::danger(),
            )));
        }
    }
    page.blank();

    match session.lifecycle() {
        Lifecycle::Failed { reason } => result::failed(page, reason),
        Lifecycle::Submitting { started_at } => result::submitting(page, session, *started_at),
        _ => submit_button(page, session),
    }
}

fn field_row(field: &FieldSpec, value: &FieldValue, selected: bool) -> Line<'static> {
    let marker = if selected { "▸" } else { " " };
    let label_style = if selected {
        KathakTheme::focused()
    } else {
        KathakTheme::text()
    };
    let input_style = if selected {
        KathakTheme::input_focused()
    } else {
        KathakTheme::input()
    };

    let shown = match field.kind {
        FieldKind::Numeric { .. } => {
            let text = value.display();
            if selected {
                format!(" {text}▌ ")
            } else {
                format!(" {text} ")
            }
        }
        FieldKind::Enum { .. } => {
            let label = value
                .as_number()
                .and_then(|n| field.option_label(n as i64).filter(|_| n.fract() == 0.0))
                .map_or_else(|| value.display(), str::to_string);
            format!(" ◂ {label} ▸ ")
        }
    };

    Line::from(vec![
        Span::styled(format!("  {marker} "), KathakTheme::focused()),
        Span::styled(format!("{:<width$}", field.label, width = LABEL_WIDTH), label_style),
        Span::styled(format!("{shown:<14}"), input_style),
        Span::styled(format!("  {}", field.domain_hint()), KathakTheme::text_muted()),
    ])
}

fn submit_button(page: &mut Page, session: &Session) {
    let style = if session.can_submit() {
        KathakTheme::button()
    } else {
        KathakTheme::button_disabled()
    };
    page.push(Line::from(vec![
        Span::raw("      "),
        Span::styled(format!("  {}  ", session.submit_label()), style),
        Span::styled("  [Enter]", KathakTheme::key_hint()),
    ]));
}
