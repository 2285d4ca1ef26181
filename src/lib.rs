//! # mathhax
//!
//! Stateful LaTeX macros for math preprocessing, written in Rust.
//!
//! ## Features
//!
//! - **Counters**: `\newcounter`, `\setcounter`, `\addtocounter` with
//!   reset-on-parent dependencies and `\value{name}` references
//! - **Numerals**: `\arabic`, `\alph`, `\Alph`, `\roman`, `\Roman`
//! - **Toggles**: etoolbox-style `\newtoggle`, `\settoggle`, `\iftoggle`, `\nottoggle`
//! - **Loops**: `\forloop[step]{start}{stop}{counter}{body}` unrolled in place
//! - **Indirection**: `\asarg{name}` invokes `\name`
//! - **Budgets**: per-expression limits on macro calls and buffer size
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! Everything the crate does not recognise passes through untouched, so
//! the output is ordinary LaTeX ready for a math renderer.
//!
//! ## Usage Examples
//!
//! ### One-off expansion
//!
//! ```rust
//! use mathhax::expand;
//!
//! let out = expand(r"\newcounter{n}\setcounter{n}{4}\frac{\Roman{n}}{2}").unwrap();
//! assert_eq!(out, r"\frac{IV}{2}");
//! ```
//!
//! ### Document session
//!
//! ```rust
//! use mathhax::Session;
//!
//! let mut session = Session::new();
//! session.load_preamble(r"\newcounter{eq}\newtoggle{draft}").unwrap();
//!
//! session.expand(r"\addtocounter{eq}{1}").unwrap();
//! let label = session.expand(r"(\arabic{eq})\iftoggle{draft}{?}{}").unwrap();
//! assert_eq!(label, "(2)?");
//! ```

/// Core expansion modules
pub mod core;

/// Data layer - numeral tables
pub mod data;

/// Macro handlers and the dispatch table
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core types
pub use core::{
    ExpandOptions, Expansion, ExpansionLimits, MacroInput, Session, TexExpander,
    DEFAULT_MAX_BUFFER, DEFAULT_MAX_MACROS,
};

// Re-export data modules
pub use data::numerals;
pub use data::numerals::Numeral;

// Re-export feature modules
pub use features::counters;
pub use features::forloop;
pub use features::toggles;
pub use features::{Command, CounterStore, ToggleStore, COMMANDS};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{MacroError, MacroResult};

/// Expand a single expression against a fresh session
///
/// # Arguments
/// * `input` - LaTeX source
///
/// # Returns
/// The expanded source, or the first error raised
pub fn expand(input: &str) -> MacroResult<String> {
    Session::new().expand(input)
}

/// Expand a single expression against a fresh session with custom options
pub fn expand_with_options(input: &str, options: &ExpandOptions) -> MacroResult<String> {
    Session::new().expand_with_options(input, options)
}

/// Check whether `name` (without backslash) is handled by this crate
pub fn is_macro(name: &str) -> bool {
    features::is_known(name)
}
