//! Data layer - Static tables
//!
//! This module contains the static data used during expansion:
//! - Roman numeral table and numeral systems

pub mod numerals;

// Re-export commonly used items
pub use numerals::{
    to_lower_alpha, to_lower_roman, to_upper_alpha, to_upper_roman, Numeral, ROMAN_TABLE,
};
