//! Boolean toggles (etoolbox style)
//!
//! Implements:
//! - `\newtoggle{name}`, `\providetoggle{name}`
//! - `\settoggle{name}{true|false}`
//! - `\toggletrue{name}`, `\togglefalse{name}`
//! - `\iftoggle{name}{true branch}{false branch}`
//! - `\nottoggle{name}{true branch}{false branch}`
//!
//! Toggles live in their own namespace, separate from counters. A toggle
//! that was never defined reads as false.

use indexmap::IndexMap;
use tracing::trace;

use crate::core::engine::{Expansion, MacroInput};
use crate::utils::error::{MacroError, MacroResult};
use crate::utils::names::{is_valid_name, strip_backslash, trim_spaces};

#[derive(Debug, Default, Clone)]
pub struct ToggleStore {
    values: IndexMap<String, bool>,
}

impl ToggleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// All toggles in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Define `name` as true. Always resets, even if it already exists.
    pub fn define(&mut self, command: &str, name: &str) -> MacroResult<()> {
        self.assign(command, name, true)
    }

    pub fn set_true(&mut self, command: &str, name: &str) -> MacroResult<()> {
        self.assign(command, name, true)
    }

    pub fn set_false(&mut self, command: &str, name: &str) -> MacroResult<()> {
        self.assign(command, name, false)
    }

    /// Set from a `true`/`false` literal, compared case-insensitively
    pub fn set_value(&mut self, command: &str, name: &str, literal: &str) -> MacroResult<()> {
        let name = validate(command, name)?;
        let literal = trim_spaces(literal);
        let value = if literal.eq_ignore_ascii_case("true") {
            true
        } else if literal.eq_ignore_ascii_case("false") {
            false
        } else {
            return Err(MacroError::IllegalToggleValue {
                command: command.to_string(),
                value: literal.to_string(),
            });
        };
        self.values.insert(name.to_string(), value);
        trace!(toggle = name, value, "toggle set");
        Ok(())
    }

    /// Current value, false if never defined
    pub fn query(&self, command: &str, name: &str) -> MacroResult<bool> {
        let name = validate(command, name)?;
        Ok(self.get(name).unwrap_or(false))
    }

    fn assign(&mut self, command: &str, name: &str, value: bool) -> MacroResult<()> {
        let name = validate(command, name)?;
        self.values.insert(name.to_string(), value);
        trace!(toggle = name, value, "toggle set");
        Ok(())
    }
}

fn validate<'a>(command: &str, name: &'a str) -> MacroResult<&'a str> {
    let name = strip_backslash(trim_spaces(name));
    if is_valid_name(name) {
        Ok(name)
    } else {
        Err(MacroError::illegal_toggle(command, name))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `\newtoggle{name}` and `\providetoggle{name}`
pub(crate) fn new_toggle(
    command: &str,
    store: &mut ToggleStore,
    input: &mut MacroInput<'_>,
) -> MacroResult<Expansion> {
    let name = input.get_argument(command)?;
    store.define(command, &name)?;
    Ok(Expansion::Consumed)
}

/// `\toggletrue{name}` / `\togglefalse{name}`
pub(crate) fn assign_toggle(
    command: &str,
    value: bool,
    store: &mut ToggleStore,
    input: &mut MacroInput<'_>,
) -> MacroResult<Expansion> {
    let name = input.get_argument(command)?;
    if value {
        store.set_true(command, &name)?;
    } else {
        store.set_false(command, &name)?;
    }
    Ok(Expansion::Consumed)
}

/// `\settoggle{name}{value}`
pub(crate) fn set_toggle(
    command: &str,
    store: &mut ToggleStore,
    input: &mut MacroInput<'_>,
) -> MacroResult<Expansion> {
    let name = input.get_argument(command)?;
    let literal = input.get_argument(command)?;
    store.set_value(command, &name, &literal)?;
    Ok(Expansion::Consumed)
}

/// `\iftoggle` (`negate == false`) and `\nottoggle` (`negate == true`).
///
/// Both branches are always consumed; only the selected one is spliced
/// back, verbatim.
pub(crate) fn branch_on_toggle(
    command: &str,
    negate: bool,
    store: &ToggleStore,
    input: &mut MacroInput<'_>,
) -> MacroResult<Expansion> {
    let name = input.get_argument(command)?;
    let state = store.query(command, &name)?;
    let if_true = input.get_argument(command)?;
    let if_false = input.get_argument(command)?;

    let chosen = if state != negate { if_true } else { if_false };
    Ok(Expansion::Rescan(chosen))
}
