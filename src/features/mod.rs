//! Macro handlers
//!
//! This module contains the stateful macros and the table that routes a
//! control word to them:
//! - Counters (`\newcounter`, `\setcounter`, `\addtocounter`, `\arabic`, ...)
//! - Toggles (`\newtoggle`, `\settoggle`, `\iftoggle`, ...)
//! - Loop unrolling (`\forloop`)
//! - Indirect invocation (`\asarg`)

pub mod asarg;
pub mod counters;
pub mod forloop;
pub mod toggles;

use phf::phf_map;

use crate::core::engine::{Expansion, MacroInput};
use crate::core::session::Session;
use crate::data::numerals::Numeral;
use crate::utils::error::MacroResult;

// Re-export commonly used types
pub use counters::CounterStore;
pub use toggles::ToggleStore;

/// What a recognised control word does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewCounter,
    SetCounter,
    AddToCounter,
    Format(Numeral),
    NewToggle,
    AssignToggle(bool),
    SetToggle,
    IfToggle,
    NotToggle,
    ForLoop,
    AsArg,
}

/// Control word (without backslash) -> command
pub static COMMANDS: phf::Map<&'static str, Command> = phf_map! {
    "newcounter" => Command::NewCounter,
    "setcounter" => Command::SetCounter,
    "addtocounter" => Command::AddToCounter,
    "arabic" => Command::Format(Numeral::Arabic),
    "getcounter" => Command::Format(Numeral::Arabic),
    "alph" => Command::Format(Numeral::LowerAlpha),
    "Alph" => Command::Format(Numeral::UpperAlpha),
    "roman" => Command::Format(Numeral::LowerRoman),
    "Roman" => Command::Format(Numeral::UpperRoman),
    "newtoggle" => Command::NewToggle,
    "providetoggle" => Command::NewToggle,
    "settoggle" => Command::SetToggle,
    "toggletrue" => Command::AssignToggle(true),
    "togglefalse" => Command::AssignToggle(false),
    "iftoggle" => Command::IfToggle,
    "nottoggle" => Command::NotToggle,
    "forloop" => Command::ForLoop,
    "asarg" => Command::AsArg,
};

/// Look up a control word
pub fn lookup(name: &str) -> Option<Command> {
    COMMANDS.get(name).copied()
}

/// Check whether a control word is handled here
pub fn is_known(name: &str) -> bool {
    COMMANDS.contains_key(name)
}

impl Command {
    /// Run the handler. `name` is the control word as written and is used
    /// in error messages; `input` sits right after it.
    pub fn invoke(
        self,
        name: &str,
        session: &mut Session,
        input: &mut MacroInput<'_>,
    ) -> MacroResult<Expansion> {
        match self {
            Command::NewCounter => counters::new_counter(name, session, input),
            Command::SetCounter => counters::set_counter(name, session.counters_mut(), input),
            Command::AddToCounter => counters::add_to_counter(name, session.counters_mut(), input),
            Command::Format(numeral) => {
                counters::format_counter(name, numeral, session.counters(), input)
            }
            Command::NewToggle => toggles::new_toggle(name, session.toggles_mut(), input),
            Command::AssignToggle(value) => {
                toggles::assign_toggle(name, value, session.toggles_mut(), input)
            }
            Command::SetToggle => toggles::set_toggle(name, session.toggles_mut(), input),
            Command::IfToggle => toggles::branch_on_toggle(name, false, session.toggles(), input),
            Command::NotToggle => toggles::branch_on_toggle(name, true, session.toggles(), input),
            Command::ForLoop => forloop::for_loop(name, input),
            Command::AsArg => asarg::as_arg(name, session, input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::ExpansionLimits;

    fn run(command: &str, session: &mut Session, args: &str) -> MacroResult<Expansion> {
        let limits = ExpansionLimits::default();
        let mut input = MacroInput::new(args, 0, &limits);
        lookup(command)
            .expect("known command")
            .invoke(command, session, &mut input)
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("arabic"), Some(Command::Format(Numeral::Arabic)));
        assert_eq!(lookup("getcounter"), lookup("arabic"));
        assert_eq!(lookup("Roman"), Some(Command::Format(Numeral::UpperRoman)));
        assert_eq!(lookup("providetoggle"), Some(Command::NewToggle));
        assert_eq!(lookup("frac"), None);
        assert!(!is_known("Arabic"));
        assert_eq!(COMMANDS.len(), 18);
    }

    #[test]
    fn test_invoke_counter_commands() {
        let mut session = Session::new();
        assert_eq!(
            run("newcounter", &mut session, "{page}").unwrap(),
            Expansion::Consumed
        );
        run("setcounter", &mut session, "{page}{4}").unwrap();
        run("addtocounter", &mut session, "{page}{-1}").unwrap();
        assert_eq!(
            run("Roman", &mut session, "{page}").unwrap(),
            Expansion::Rescan("III".to_string())
        );
    }

    #[test]
    fn test_invoke_toggle_commands() {
        let mut session = Session::new();
        run("newtoggle", &mut session, "{draft}").unwrap();
        assert_eq!(
            run("iftoggle", &mut session, "{draft}{A}{B}").unwrap(),
            Expansion::Rescan("A".to_string())
        );
        run("togglefalse", &mut session, "{draft}").unwrap();
        assert_eq!(
            run("iftoggle", &mut session, "{draft}{A}{B}").unwrap(),
            Expansion::Rescan("B".to_string())
        );
        assert_eq!(
            run("nottoggle", &mut session, "{draft}{A}{B}").unwrap(),
            Expansion::Rescan("A".to_string())
        );
        run("settoggle", &mut session, "{draft}{true}").unwrap();
        assert_eq!(session.toggles().get("draft"), Some(true));
    }

    #[test]
    fn test_invoke_forloop_and_asarg() {
        let mut session = Session::new();
        assert_eq!(
            run("forloop", &mut session, "[2]{1}{3}{i}{x}").unwrap(),
            Expansion::Rescan(r"\setcounter{i}{1}x\setcounter{i}{3}x".to_string())
        );
        assert_eq!(
            run("asarg", &mut session, "{ alpha }").unwrap(),
            Expansion::Rescan(r"\alpha".to_string())
        );
    }

    #[test]
    fn test_forloop_argument_errors() {
        let mut session = Session::new();
        let err = run("forloop", &mut session, "[x]{1}{3}{i}{}").unwrap_err();
        assert_eq!(err.kind(), "IllegalNumberFormat");
        let err = run("forloop", &mut session, "{1}{three}{i}{}").unwrap_err();
        assert_eq!(err.kind(), "IllegalNumberFormat");
        let err = run("forloop", &mut session, "{1}{3}{i}").unwrap_err();
        assert_eq!(err.kind(), "MissingArgument");
    }

    #[test]
    fn test_forloop_empty_step_defaults_to_one() {
        let mut session = Session::new();
        assert_eq!(
            run("forloop", &mut session, "[]{1}{2}{i}{}").unwrap(),
            Expansion::Rescan(r"\setcounter{i}{1}\setcounter{i}{2}".to_string())
        );
    }
}
