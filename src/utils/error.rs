//! Error handling for macro expansion
//!
//! Every handler reports failures through [`MacroError`]. Errors propagate
//! unchanged up to the expression boundary, where
//! [`crate::diagnostics::Diagnostic::from_error`] turns them into a
//! user-facing rendering failure.

use thiserror::Error;

/// Macro expansion error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MacroError {
    /// A counter name failed validation
    #[error("Illegal counter name '{name}' for \\{command}")]
    IllegalCounterName { command: String, name: String },

    /// The optional dependency of `\newcounter` failed validation
    #[error("Illegal counter name dependency '{name}' for \\{command}")]
    IllegalCounterNameDependency { command: String, name: String },

    /// A numeric argument is neither an integer nor `\value{name}`
    #[error("Illegal number format '{text}' for \\{command}")]
    IllegalNumberFormat { command: String, text: String },

    /// A toggle name failed validation
    #[error("Illegal toggle name '{name}' for \\{command}")]
    IllegalToggleName { command: String, name: String },

    /// `\settoggle` received something other than `true`/`false`
    #[error("Illegal toggle value '{value}' for \\{command}")]
    IllegalToggleValue { command: String, value: String },

    /// A counter was read before `\newcounter` or `\setcounter` created it
    #[error("Undefined counter '{name}' in \\{command}")]
    UndefinedCounter { command: String, name: String },

    /// The input ended where an argument was expected
    #[error("Missing argument for \\{command}")]
    MissingArgument { command: String },

    /// A brace group was opened but never closed
    #[error("Missing close brace in argument to \\{command}")]
    MissingCloseBrace { command: String },

    /// An argument started with a closing brace
    #[error("Extra close brace or missing open brace in argument to \\{command}")]
    ExtraCloseBrace { command: String },

    /// An optional argument was opened but never closed
    #[error("Couldn't find closing ']' for argument to \\{command}")]
    MissingCloseBracket { command: String },

    /// Strict mode only: a control sequence with no handler
    #[error("Undefined control sequence \\{name}")]
    UndefinedControlSequence { name: String },

    /// Too many macro invocations in one expression
    #[error("Maximum macro substitution count exceeded ({limit}); is there a recursive macro call?")]
    MaxMacros { limit: usize },

    /// The expansion buffer grew past its ceiling
    #[error("Maximum buffer size exceeded ({limit} bytes); is there a recursive macro call?")]
    MaxBufferSize { limit: usize },
}

/// Result type for macro expansion
pub type MacroResult<T> = Result<T, MacroError>;

impl MacroError {
    /// Stable identifier of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            MacroError::IllegalCounterName { .. } => "IllegalCounterName",
            MacroError::IllegalCounterNameDependency { .. } => "IllegalCounterNameDependency",
            MacroError::IllegalNumberFormat { .. } => "IllegalNumberFormat",
            MacroError::IllegalToggleName { .. } => "IllegalToggleName",
            MacroError::IllegalToggleValue { .. } => "IllegalToggleValue",
            MacroError::UndefinedCounter { .. } => "UndefinedCounter",
            MacroError::MissingArgument { .. } => "MissingArgument",
            MacroError::MissingCloseBrace { .. } => "MissingCloseBrace",
            MacroError::ExtraCloseBrace { .. } => "ExtraCloseBrace",
            MacroError::MissingCloseBracket { .. } => "MissingCloseBracket",
            MacroError::UndefinedControlSequence { .. } => "UndefinedControlSequence",
            MacroError::MaxMacros { .. } => "MaxMacros",
            MacroError::MaxBufferSize { .. } => "MaxBufferSize",
        }
    }

    /// Budget errors abort the whole document, everything else only the
    /// expression that raised it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MacroError::MaxMacros { .. } | MacroError::MaxBufferSize { .. }
        )
    }

    // Convenience constructors

    pub fn illegal_counter(command: &str, name: impl Into<String>) -> Self {
        MacroError::IllegalCounterName {
            command: command.to_string(),
            name: name.into(),
        }
    }

    pub fn illegal_toggle(command: &str, name: impl Into<String>) -> Self {
        MacroError::IllegalToggleName {
            command: command.to_string(),
            name: name.into(),
        }
    }

    pub fn illegal_number(command: &str, text: impl Into<String>) -> Self {
        MacroError::IllegalNumberFormat {
            command: command.to_string(),
            text: text.into(),
        }
    }

    pub fn undefined_counter(command: &str, name: impl Into<String>) -> Self {
        MacroError::UndefinedCounter {
            command: command.to_string(),
            name: name.into(),
        }
    }

    pub fn missing_argument(command: &str) -> Self {
        MacroError::MissingArgument {
            command: command.to_string(),
        }
    }
}
