//! Per-document expansion state
//!
//! A [`Session`] owns the counter and toggle stores for one document. Every
//! expression of the document is expanded against the same session, so a
//! counter created in one math block is visible in the next. Drop the
//! session when the document is done.

use tracing::warn;

use super::engine::TexExpander;
use super::options::ExpandOptions;
use crate::features::counters::CounterStore;
use crate::features::toggles::ToggleStore;
use crate::utils::error::MacroResult;

/// Counter and toggle state shared by all expressions of a document
#[derive(Debug, Default, Clone)]
pub struct Session {
    counters: CounterStore,
    toggles: ToggleStore,
    /// Non-fatal notes raised by handlers, oldest first
    warnings: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> &CounterStore {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut CounterStore {
        &mut self.counters
    }

    pub fn toggles(&self) -> &ToggleStore {
        &self.toggles
    }

    pub fn toggles_mut(&mut self) -> &mut ToggleStore {
        &mut self.toggles
    }

    /// Record a warning for the expression being expanded
    pub(crate) fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(message);
    }

    /// Drain the warnings raised since the last call
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// Expand one expression with default options
    pub fn expand(&mut self, input: &str) -> MacroResult<String> {
        self.expand_with_options(input, &ExpandOptions::default())
    }

    /// Expand one expression.
    ///
    /// On failure, state changes made before the failing macro are kept.
    pub fn expand_with_options(
        &mut self,
        input: &str,
        options: &ExpandOptions,
    ) -> MacroResult<String> {
        let result = TexExpander::new(self, options).expand(input);
        if let Err(ref err) = result {
            warn!(kind = err.kind(), "expression failed: {}", err);
        }
        result
    }

    /// Expand a preamble for its side effects only.
    ///
    /// Typically a list of `\newcounter` / `\newtoggle` declarations that
    /// every later expression relies on.
    pub fn load_preamble(&mut self, preamble: &str) -> MacroResult<()> {
        self.load_preamble_with_options(preamble, &ExpandOptions::default())
    }

    pub fn load_preamble_with_options(
        &mut self,
        preamble: &str,
        options: &ExpandOptions,
    ) -> MacroResult<()> {
        self.expand_with_options(preamble, options).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_persists_across_expressions() {
        let mut session = Session::new();
        session.expand(r"\newcounter{eq}").unwrap();
        session.expand(r"\addtocounter{eq}{1}").unwrap();
        assert_eq!(session.expand(r"(\arabic{eq})").unwrap(), "(2)");
    }

    #[test]
    fn test_failed_expression_keeps_committed_state() {
        let mut session = Session::new();
        let err = session
            .expand(r"\newcounter{a}\setcounter{a}{7}\setcounter{b1}{2}")
            .unwrap_err();
        assert_eq!(err.kind(), "IllegalCounterName");
        assert_eq!(session.counters().get("a"), Some(7));
        assert_eq!(session.expand(r"\arabic{a}").unwrap(), "7");
    }

    #[test]
    fn test_load_preamble() {
        let mut session = Session::new();
        session
            .load_preamble("\\newcounter{thm}\n\\newtoggle{draft}\n\\togglefalse{draft}\n")
            .unwrap();
        assert_eq!(session.counters().get("thm"), Some(1));
        assert_eq!(session.toggles().get("draft"), Some(false));
    }

    #[test]
    fn test_take_warnings() {
        let mut session = Session::new();
        session.expand(r"\newcounter{a}\asarg{alpha}").unwrap();
        assert!(session.take_warnings().is_empty());

        session.expand(r"\newcounter{a}\asarg{ }").unwrap();
        let warnings = session.take_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("'a'"));
        assert!(warnings[1].contains("blank"));
        assert!(session.take_warnings().is_empty());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = Session::new();
        let mut second = Session::new();
        first.expand(r"\newcounter{a}").unwrap();
        assert!(second.expand(r"\arabic{a}").is_err());
    }
}
