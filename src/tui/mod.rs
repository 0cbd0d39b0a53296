//! TUI module: Terminal User Interface using Ratatui.
//!
//! One scrolling page with:
//! - Landing sections (hero, philosophy, how it works)
//! - The assessment form and its result panel
//! - A scroll progress bar and rotating emblem in the header

mod app;
mod styles;
mod ui;

pub use app::{App, Focus};
pub use styles::KathakTheme;
