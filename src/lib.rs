//! Vacancy Dash - Terminal Vacancy Analysis Dashboard Library
//!
//! Ingests job vacancy CSV exports and derives a filtered, sorted view of
//! them for the terminal dashboard.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
