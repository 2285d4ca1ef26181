//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics and error reporting
//! - Error types and result types
//! - Name and number validation shared by the handlers

pub mod diagnostics;
pub mod error;
pub mod names;

// Re-export commonly used items
pub use diagnostics::{
    expand_expressions, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel,
};
pub use error::{MacroError, MacroResult};
pub use names::{is_valid_name, trim_spaces};
