//! Static landing sections above the assessment form.

use ratatui::text::{Line, Span};

use super::{Page, Section};
use crate::tui::styles::KathakTheme;

fn heading(page: &mut Page, text: &'static str) {
    page.push(Line::from(Span::styled(format!("  {text}"), KathakTheme::heading())));
    page.blank();
}

fn paragraph(page: &mut Page, lines: &[&'static str]) {
    for line in lines {
        page.push(Line::from(Span::styled(format!("  {line}"), KathakTheme::text_secondary())));
    }
    page.blank();
}

pub fn hero(page: &mut Page) {
    page.mark(Section::Home);
    page.blank();
    page.push(Line::from(Span::styled("  ✦ AI-Powered Cardiology", KathakTheme::accent())));
    page.blank();
    page.push(Line::from(vec![
        Span::styled("  The Rhythm of ", KathakTheme::heading()),
        Span::styled("Life", KathakTheme::title()),
    ]));
    page.blank();
    paragraph(
        page,
        &[
            "Just as a Kathak dancer keeps perfect time, your heart keeps the rhythm of your life.",
            "Check your cardiovascular health from a handful of everyday measurements.",
        ],
    );
    page.push(Line::from(vec![
        Span::styled("  [T] ", KathakTheme::key_hint()),
        Span::styled("Check Your Heart", KathakTheme::key_desc()),
    ]));
    page.blank();
    page.blank();
}

pub fn philosophy(page: &mut Page) {
    page.mark(Section::Philosophy);
    heading(page, "Health is Harmony");
    paragraph(
        page,
        &[
            "In classical dance, balance between movement and stillness is everything.",
            "The heart is no different: pressure, weight, habits and lab results all",
            "keep time together. When one falls out of step, the whole rhythm suffers.",
        ],
    );
    page.blank();
}

pub fn how_it_works(page: &mut Page) {
    page.mark(Section::HowItWorks);
    heading(page, "How it Works");

    let steps = [
        ("1", "Enter your data", "Age, body measurements, blood pressure, labs and lifestyle."),
        ("2", "The model scores it", "A trained model estimates your cardiovascular risk."),
        ("3", "Read your result", "A clear risk tier and probability, in seconds."),
    ];
    for (number, title, body) in steps {
        page.push(Line::from(vec![
            Span::styled(format!("  {number}. "), KathakTheme::accent()),
            Span::styled(title, KathakTheme::heading()),
        ]));
        page.push(Line::from(Span::styled(format!("     {body}"), KathakTheme::text_secondary())));
        page.blank();
    }
    page.blank();
}

pub fn closing(page: &mut Page) {
    page.blank();
    page.push(Line::from(Span::styled("  ♥ Hriday Health AI", KathakTheme::title())));
    page.push(Line::from(Span::styled(
        "  Design inspired by Indian Classical Arts.",
        KathakTheme::text_muted(),
    )));
    page.blank();
}
