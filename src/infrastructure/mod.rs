//! Infrastructure layer providing external service integrations.
//!
//! CSV ingestion, configuration files, log output and the system clipboard.

pub mod ingestion;
pub mod config;
pub mod logging;
pub mod clipboard;

pub use ingestion::*;
pub use config::*;
pub use clipboard::*;
