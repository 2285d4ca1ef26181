//! Expansion diagnostics
//!
//! This module turns [`MacroError`]s into user-facing reports. It is the
//! single place where a failed expression becomes a rendering failure:
//!
//! - [`Diagnostic::from_error`] attaches a kind, the expression index and
//!   a suggestion to an error
//! - [`expand_expressions`] runs a batch of expressions against one
//!   session and collects the diagnostics
//! - [`format_diagnostics`] renders a [`CheckResult`] for the terminal
//!
//! ## Example
//!
//! ```rust
//! use mathhax::diagnostics::expand_expressions;
//! use mathhax::{ExpandOptions, Session};
//!
//! let mut session = Session::new();
//! let exprs = [r"\newcounter{n}", r"\arabic{m}", r"\arabic{n}"];
//! let (outputs, result) = expand_expressions(&mut session, &exprs, &ExpandOptions::default());
//!
//! assert_eq!(outputs[1], None);
//! assert_eq!(outputs[2].as_deref(), Some("1"));
//! assert_eq!(result.errors, 1);
//! ```

use std::fmt;

use tracing::warn;

use crate::core::options::ExpandOptions;
use crate::core::session::Session;
use crate::utils::error::MacroError;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output was produced but may not be what was meant
    Warning,
    /// Error - the expression failed to render
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Stable error kind, e.g. `IllegalCounterName`
    pub kind: Option<&'static str>,
    /// Human-readable message
    pub message: String,
    /// Index of the failing expression (0-indexed)
    pub expression: Option<usize>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            kind: None,
            message: message.into(),
            expression: None,
            suggestion: None,
        }
    }

    /// Build the error diagnostic for a failed expression
    pub fn from_error(error: &MacroError, expression: usize) -> Self {
        let diag = Diagnostic::new(DiagnosticLevel::Error, error.to_string())
            .with_kind(error.kind())
            .with_expression(expression);
        match suggestion_for(error) {
            Some(hint) => diag.with_suggestion(hint),
            None => diag,
        }
    }

    pub fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_expression(mut self, index: usize) -> Self {
        self.expression = Some(index);
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

fn suggestion_for(error: &MacroError) -> Option<&'static str> {
    let hint = match error {
        MacroError::IllegalCounterName { .. } | MacroError::IllegalCounterNameDependency { .. } => {
            "counter names are one character or ASCII letters only"
        }
        MacroError::IllegalToggleName { .. } => {
            "toggle names are one character or ASCII letters only"
        }
        MacroError::IllegalToggleValue { .. } => "use `true` or `false`",
        MacroError::IllegalNumberFormat { .. } => {
            "use a decimal integer or \\value{name} as the whole argument"
        }
        MacroError::UndefinedCounter { .. } => {
            "define the counter with \\newcounter or \\setcounter first"
        }
        MacroError::MissingCloseBrace { .. } => "check for a missing '}'",
        MacroError::ExtraCloseBrace { .. } => "check for a missing '{'",
        MacroError::MissingCloseBracket { .. } => "check for a missing ']'",
        MacroError::MaxMacros { .. } | MacroError::MaxBufferSize { .. } => {
            "check for a macro that expands to itself or a loop that never ends"
        }
        MacroError::MissingArgument { .. } | MacroError::UndefinedControlSequence { .. } => {
            return None
        }
    };
    Some(hint)
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level[kind]: message
        //         --> expression N
        //         = help: suggestion

        write!(f, "{}", self.level)?;
        if let Some(kind) = self.kind {
            write!(f, "[{}]", kind)?;
        }
        write!(f, ": {}", self.message)?;

        if let Some(index) = self.expression {
            write!(f, "\n  --> expression {}", index + 1)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Expand `exprs` in order against one session.
///
/// A failed expression yields `None` and an error diagnostic; expansion
/// continues with the next one. A budget failure also stops the batch, and
/// the expressions after it stay `None` without a diagnostic of their own.
/// Warnings raised by handlers become warning diagnostics on the expression
/// that raised them.
pub fn expand_expressions<S: AsRef<str>>(
    session: &mut Session,
    exprs: &[S],
    options: &ExpandOptions,
) -> (Vec<Option<String>>, CheckResult) {
    let mut outputs = vec![None; exprs.len()];
    let mut result = CheckResult::new();

    // Left over from expressions expanded outside this batch
    for message in session.take_warnings() {
        result.add(Diagnostic::new(DiagnosticLevel::Warning, message));
    }

    for (index, expr) in exprs.iter().enumerate() {
        let expanded = session.expand_with_options(expr.as_ref(), options);
        for message in session.take_warnings() {
            result.add(Diagnostic::new(DiagnosticLevel::Warning, message).with_expression(index));
        }
        match expanded {
            Ok(text) => outputs[index] = Some(text),
            Err(err) => {
                let fatal = err.is_fatal();
                result.add(Diagnostic::from_error(&err, index));
                if fatal {
                    let skipped = exprs.len() - index - 1;
                    if skipped > 0 {
                        warn!(skipped, "budget exceeded, remaining expressions skipped");
                        result.add(Diagnostic::new(
                            DiagnosticLevel::Info,
                            format!(
                                "{} expression{} not expanded",
                                skipped,
                                if skipped == 1 { "" } else { "s" }
                            ),
                        ));
                    }
                    break;
                }
            }
        }
    }

    (outputs, result)
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error() {
        let err = MacroError::illegal_counter("newcounter", "a1");
        let diag = Diagnostic::from_error(&err, 2);
        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.kind, Some("IllegalCounterName"));
        assert_eq!(diag.expression, Some(2));
        assert!(diag.suggestion.is_some());

        let text = diag.to_string();
        assert!(text.starts_with("error[IllegalCounterName]: "));
        assert!(text.contains("--> expression 3"));
        assert!(text.contains("= help: "));
    }

    #[test]
    fn test_missing_argument_has_no_hint() {
        let diag = Diagnostic::from_error(&MacroError::missing_argument("arabic"), 0);
        assert_eq!(diag.suggestion, None);
    }

    #[test]
    fn test_batch_continues_after_error() {
        let mut session = Session::new();
        let exprs = [r"\newcounter{n}\stepN", r"\arabic{x}", r"\addtocounter{n}{2}\arabic{n}"];
        let (outputs, result) =
            expand_expressions(&mut session, &exprs, &ExpandOptions::default());

        assert_eq!(outputs[0].as_deref(), Some(r"\stepN"));
        assert_eq!(outputs[1], None);
        assert_eq!(outputs[2].as_deref(), Some("3"));
        assert_eq!(result.errors, 1);
        assert_eq!(result.diagnostics[0].expression, Some(1));
    }

    #[test]
    fn test_batch_stops_after_budget_error() {
        let mut session = Session::new();
        let exprs = [r"\forloop[0]{1}{1}{i}{x}", r"\newcounter{n}", "y"];
        let (outputs, result) =
            expand_expressions(&mut session, &exprs, &ExpandOptions::default());

        assert_eq!(outputs, vec![None, None, None]);
        assert_eq!(result.errors, 1);
        assert_eq!(result.infos, 1);
        assert_eq!(result.diagnostics[0].kind, Some("MaxBufferSize"));
        assert!(session.counters().get("n").is_none());
    }

    #[test]
    fn test_batch_reports_warnings() {
        let mut session = Session::new();
        let exprs = [r"\newcounter{n}", r"\newcounter{n}\arabic{n}", r"x\asarg{}"];
        let (outputs, result) =
            expand_expressions(&mut session, &exprs, &ExpandOptions::default());

        assert_eq!(outputs[1].as_deref(), Some("1"));
        assert_eq!(outputs[2].as_deref(), Some("x\\"));
        assert_eq!(result.errors, 0);
        assert_eq!(result.warnings, 2);
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Warning);
        assert_eq!(result.diagnostics[0].expression, Some(1));
        assert!(result.diagnostics[0].message.contains("'n'"));
        assert_eq!(result.diagnostics[1].expression, Some(2));
        assert!(session.take_warnings().is_empty());

        let text = format_diagnostics(&result, true);
        assert!(text.starts_with("\x1b[33mwarning: "));
        assert!(text.contains("Summary: 2 warnings"));
    }

    #[test]
    fn test_warnings_from_before_the_batch() {
        let mut session = Session::new();
        session.load_preamble(r"\newcounter{a}\newcounter{a}").unwrap();
        let (_, result) = expand_expressions(&mut session, &["y"], &ExpandOptions::default());

        assert_eq!(result.warnings, 1);
        assert_eq!(result.diagnostics[0].expression, None);
    }

    #[test]
    fn test_summary_format() {
        let mut result = CheckResult::new();
        assert_eq!(result.summary(), "no issues found");
        result.add(Diagnostic::new(DiagnosticLevel::Error, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));

        let summary = result.summary();
        assert!(summary.contains("1 error"));
        assert!(summary.contains("1 warning"));
    }

    #[test]
    fn test_format_without_color() {
        let mut result = CheckResult::new();
        result.add(Diagnostic::from_error(&MacroError::MaxMacros { limit: 5 }, 0));
        let text = format_diagnostics(&result, false);
        assert!(!text.contains('\x1b'));
        assert!(text.ends_with("Summary: 1 error"));
    }
}
