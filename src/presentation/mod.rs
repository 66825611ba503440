//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui,
//! handles keyboard and mouse input, and renders the dashboard.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
