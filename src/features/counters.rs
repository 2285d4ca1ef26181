//! LaTeX counters
//!
//! Implements:
//! - `\newcounter{name}[parent]`
//! - `\setcounter{name}{number}`
//! - `\addtocounter{name}{number}`
//! - `\arabic{name}` (alias `\getcounter`), `\alph`, `\Alph`, `\roman`, `\Roman`
//! - `\value{name}`, only as the number argument of `\setcounter` and
//!   `\addtocounter`
//!
//! A counter created with a parent is reset to 1 whenever the parent is
//! incremented through `\addtocounter`. Setting the parent does not reset it.

use fxhash::FxHashMap;
use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::core::engine::{Expansion, MacroInput};
use crate::core::session::Session;
use crate::data::numerals::Numeral;
use crate::utils::error::{MacroError, MacroResult};
use crate::utils::names::{
    is_valid_name, parse_number_arg, strip_backslash, trim_spaces, NumberArg,
};

/// Counter values plus the reset-on-increment dependency graph
#[derive(Debug, Default, Clone)]
pub struct CounterStore {
    /// Values in definition order
    values: IndexMap<String, i64>,
    /// parent -> counters reset when the parent is incremented
    dependents: FxHashMap<String, Vec<String>>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter
    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Counters reset when `name` is incremented
    pub fn dependents(&self, name: &str) -> &[String] {
        self.dependents.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All counters in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Create `name` with value 1, optionally as a dependent of `parent`.
    ///
    /// A leading backslash on `name` is ignored. Recreating a counter resets
    /// its value and forgets its own dependents. The parent does not need to
    /// exist yet.
    /// Returns `true` when an existing counter was reset.
    pub fn create(&mut self, command: &str, name: &str, parent: Option<&str>) -> MacroResult<bool> {
        let name = strip_backslash(trim_spaces(name));
        if !is_valid_name(name) {
            return Err(MacroError::illegal_counter(command, name));
        }
        let parent = parent.map(trim_spaces).filter(|p| !p.is_empty());
        if let Some(parent) = parent {
            if !is_valid_name(parent) {
                return Err(MacroError::IllegalCounterNameDependency {
                    command: command.to_string(),
                    name: parent.to_string(),
                });
            }
        }

        let redefined = self.values.insert(name.to_string(), 1).is_some();
        if redefined {
            warn!(counter = name, "counter redefined, resetting to 1");
        }
        self.dependents.insert(name.to_string(), Vec::new());
        if let Some(parent) = parent {
            let children = self.dependents.entry(parent.to_string()).or_default();
            if !children.iter().any(|child| child == name) {
                children.push(name.to_string());
            }
        }
        trace!(counter = name, parent, "counter created");
        Ok(redefined)
    }

    /// Overwrite the value of `name`, creating it if needed
    pub fn set(&mut self, command: &str, name: &str, value: &str) -> MacroResult<()> {
        let name = validate(command, name)?;
        let value = self.resolve(command, value)?;
        self.values.insert(name.to_string(), value);
        trace!(counter = name, value, "counter set");
        Ok(())
    }

    /// Increment `name` and reset its direct dependents to 1
    pub fn add(&mut self, command: &str, name: &str, delta: &str) -> MacroResult<()> {
        let name = validate(command, name)?;
        let delta = self.resolve(command, delta)?;
        let value = self
            .values
            .get_mut(name)
            .ok_or_else(|| MacroError::undefined_counter(command, name))?;
        *value = value.saturating_add(delta);
        trace!(counter = name, value = *value, "counter incremented");

        if let Some(children) = self.dependents.get(name) {
            for child in children {
                self.values.insert(child.clone(), 1);
                trace!(counter = child.as_str(), parent = name, "dependent counter reset");
            }
        }
        Ok(())
    }

    /// Render the value of `name` in the given numeral system
    pub fn format(&self, command: &str, name: &str, numeral: Numeral) -> MacroResult<String> {
        let name = validate(command, name)?;
        let value = self
            .get(name)
            .ok_or_else(|| MacroError::undefined_counter(command, name))?;
        Ok(numeral.format(value))
    }

    /// Resolve an integer literal or `\value{name}`
    fn resolve(&self, command: &str, text: &str) -> MacroResult<i64> {
        let text = trim_spaces(text);
        match parse_number_arg(text) {
            Some(NumberArg::Literal(n)) => Ok(n),
            Some(NumberArg::ValueOf(other)) => {
                let other = validate(command, other)?;
                self.get(other)
                    .ok_or_else(|| MacroError::undefined_counter(command, other))
            }
            None => Err(MacroError::illegal_number(command, text)),
        }
    }
}

fn validate<'a>(command: &str, name: &'a str) -> MacroResult<&'a str> {
    let name = trim_spaces(name);
    if is_valid_name(name) {
        Ok(name)
    } else {
        Err(MacroError::illegal_counter(command, name))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `\newcounter{name}[parent]`
pub(crate) fn new_counter(
    command: &str,
    session: &mut Session,
    input: &mut MacroInput<'_>,
) -> MacroResult<Expansion> {
    let name = input.get_argument(command)?;
    let parent = input.get_brackets(command)?;
    if session
        .counters_mut()
        .create(command, &name, parent.as_deref())?
    {
        let name = strip_backslash(trim_spaces(&name));
        session.note(format!("\\{} redefines counter '{}', value reset to 1", command, name));
    }
    Ok(Expansion::Consumed)
}

/// `\setcounter{name}{number}`
pub(crate) fn set_counter(
    command: &str,
    store: &mut CounterStore,
    input: &mut MacroInput<'_>,
) -> MacroResult<Expansion> {
    let name = input.get_argument(command)?;
    let value = input.get_argument(command)?;
    store.set(command, &name, &value)?;
    Ok(Expansion::Consumed)
}

/// `\addtocounter{name}{number}`
pub(crate) fn add_to_counter(
    command: &str,
    store: &mut CounterStore,
    input: &mut MacroInput<'_>,
) -> MacroResult<Expansion> {
    let name = input.get_argument(command)?;
    let delta = input.get_argument(command)?;
    store.add(command, &name, &delta)?;
    Ok(Expansion::Consumed)
}

/// `\arabic{name}` and the other numeral renderings
pub(crate) fn format_counter(
    command: &str,
    numeral: Numeral,
    store: &CounterStore,
    input: &mut MacroInput<'_>,
) -> MacroResult<Expansion> {
    let name = input.get_argument(command)?;
    let limit = input.limits().max_buffer;
    if let Some(value) = store.get(trim_spaces(&name)) {
        if numeral.min_len(value) > limit {
            return Err(MacroError::MaxBufferSize { limit });
        }
    }
    store.format(command, &name, numeral).map(Expansion::Rescan)
}
