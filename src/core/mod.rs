//! Core expansion modules
//!
//! This module contains the expansion host:
//! - `engine`: argument reader and the splice-and-rescan scan loop
//! - `options`: expansion budget and strictness
//! - `session`: per-document counter and toggle state

pub mod engine;
pub mod options;
pub mod session;

// Re-export main types
pub use engine::{Expansion, MacroInput, TexExpander};
pub use options::{ExpandOptions, ExpansionLimits, DEFAULT_MAX_BUFFER, DEFAULT_MAX_MACROS};
pub use session::Session;
