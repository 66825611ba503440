//! Application layer owning the dashboard state.
//!
//! Holds the loaded dataset, filter criteria, sort directive and detail
//! view, and recomputes the displayed rows from them.

pub mod state;

pub use state::*;
