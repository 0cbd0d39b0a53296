//! Colour palette and styles.
//!
//! Warm palette drawn from Kathak costume colours: alta red, saffron and a
//! cream page with dark brown ink.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::SeverityTier;

/// Theme color palette.
pub struct KathakTheme;

impl KathakTheme {
    // === Brand ===

    /// Deep red (alta)
    pub const PRIMARY: Color = Color::Rgb(185, 29, 71); // #B91D47

    /// Darker red for pressed/focused accents
    pub const PRIMARY_DARK: Color = Color::Rgb(160, 24, 61); // #A0183D

    /// Saffron
    pub const SECONDARY: Color = Color::Rgb(255, 152, 0); // #FF9800

    // === Semantic ===

    pub const SUCCESS: Color = Color::Rgb(21, 128, 61); // #15803D

    pub const DANGER: Color = Color::Rgb(185, 28, 28); // #B91C1C

    // === Surfaces and ink ===

    /// Cream page
    pub const BG: Color = Color::Rgb(255, 245, 240); // #FFF5F0

    /// Input well
    pub const BG_INPUT: Color = Color::Rgb(249, 250, 251); // #F9FAFB

    /// Dark brown
    pub const TEXT: Color = Color::Rgb(44, 24, 16); // #2C1810

    pub const TEXT_SECONDARY: Color = Color::Rgb(107, 114, 128); // #6B7280

    pub const TEXT_MUTED: Color = Color::Rgb(156, 163, 175); // #9CA3AF

    pub const BORDER: Color = Color::Rgb(254, 215, 170); // #FED7AA

    #[must_use]
    pub fn page() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BG)
    }

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn heading() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Selected form row
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BG_INPUT)
    }

    #[must_use]
    pub fn input_focused() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::BG_INPUT)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Enabled submit button
    #[must_use]
    pub fn button() -> Style {
        Style::default()
            .fg(Self::BG)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled submit button
    #[must_use]
    pub fn button_disabled() -> Style {
        Style::default().fg(Self::BG).bg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Scroll progress bar
    #[must_use]
    pub fn progress() -> Style {
        Style::default().fg(Self::PRIMARY).bg(Self::BG)
    }

    #[must_use]
    pub fn severity(tier: SeverityTier) -> Style {
        match tier {
            SeverityTier::Low => Style::default().fg(Self::SUCCESS),
            SeverityTier::Elevated => Style::default().fg(Self::DANGER),
        }
    }
}

/// Emblem frames cycled by scroll rotation, one per 45 degrees.
pub const EMBLEM_FRAMES: [&str; 8] = ["✶", "✷", "✸", "✹", "✺", "✹", "✸", "✷"];
