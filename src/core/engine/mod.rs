//! Text-rewriting macro engine
//!
//! A minimal host for the stateful macro handlers. It copies ordinary text
//! to the output, dispatches known control words to their handlers and
//! splices whatever a handler returns back into the buffer so that it is
//! scanned again from the start.
//!
//! ## Architecture
//!
//! ```text
//! buffer ──scan──> \name ──COMMANDS──> handler(store, MacroInput)
//!    ^                                        │
//!    └──── replacement + remainder, cursor 0 ─┘
//! ```
//!
//! ## Components
//!
//! - `reader`: argument extraction (`{...}`, `[...]`, single tokens)
//! - `expander`: the scan loop, splice-and-rescan and the expansion budget

pub mod expander;
pub mod reader;

pub use expander::TexExpander;
pub use reader::MacroInput;

/// What a handler hands back to the scan loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Arguments consumed, nothing to insert; scanning resumes after them
    Consumed,
    /// Splice this text in front of the remaining input and rescan it
    Rescan(String),
}
