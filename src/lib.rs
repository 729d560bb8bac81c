//! Kingpad - a small text editor core built around rule-based highlighting
//!
//! The `syntax` module holds the highlighting engine. The remaining
//! modules are the host around it: documents and their store, the
//! workspace of open tabs, status reporting, configuration, and the
//! terminal renderer used by the `kingpad` binary.

pub mod config;
pub mod document;
pub mod error;
pub mod render;
pub mod status;
pub mod syntax;
pub mod workspace;

pub use error::{KingpadError, Result};
