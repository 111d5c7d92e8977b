//! UI rendering module for City Weather
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod theme;
pub mod weather_view;

pub use help_overlay::render as render_help_overlay;
pub use theme::{Palette, Theme};
pub use weather_view::render as render_weather_view;

use ratatui::Frame;

use crate::app::App;

/// Renders the whole screen for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let palette = app.theme.palette();
    render_weather_view(frame, app, &palette);
    if app.show_help {
        render_help_overlay(frame, &palette);
    }
}
