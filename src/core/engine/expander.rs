//! The scan loop
//!
//! [`TexExpander`] processes one expression against a [`Session`]. State
//! changes made by handlers are written straight into the session, so they
//! survive even if a later macro in the same expression fails.

use tracing::debug;

use super::reader::{control_sequence_len, ends_with_control_word, MacroInput};
use super::Expansion;
use crate::core::options::ExpandOptions;
use crate::core::session::Session;
use crate::features::{self, Command};
use crate::utils::error::{MacroError, MacroResult};

/// Expands a single expression
pub struct TexExpander<'s> {
    session: &'s mut Session,
    options: &'s ExpandOptions,
    /// Text still being scanned; replaced wholesale on every splice
    buffer: String,
    /// Byte cursor into `buffer`
    pos: usize,
    output: String,
    /// Handler invocations so far in this expression
    macro_count: usize,
}

impl<'s> TexExpander<'s> {
    pub fn new(session: &'s mut Session, options: &'s ExpandOptions) -> Self {
        Self {
            session,
            options,
            buffer: String::new(),
            pos: 0,
            output: String::new(),
            macro_count: 0,
        }
    }

    /// Expand `input` completely and return the resulting text
    pub fn expand(mut self, input: &str) -> MacroResult<String> {
        self.buffer = input.to_string();
        self.pos = 0;
        self.output = String::with_capacity(input.len());

        while self.pos < self.buffer.len() {
            let rest = &self.buffer[self.pos..];
            let Some(offset) = rest.find('\\') else {
                self.output.push_str(rest);
                break;
            };
            self.output.push_str(&rest[..offset]);
            self.pos += offset;

            let rest = &self.buffer[self.pos..];
            let len = control_sequence_len(rest);

            if len == 1 {
                // Trailing lone backslash
                if self.options.strict {
                    return Err(MacroError::UndefinedControlSequence {
                        name: String::new(),
                    });
                }
                self.output.push('\\');
                self.pos += 1;
                continue;
            }

            let is_word = rest.as_bytes()[1].is_ascii_alphabetic();
            let command = if is_word {
                features::lookup(&rest[1..len])
            } else {
                None
            };

            match command {
                Some(command) => {
                    let name = rest[1..len].to_string();
                    self.pos += len;
                    self.dispatch(command, &name)?;
                }
                None if is_word && self.options.strict => {
                    return Err(MacroError::UndefinedControlSequence {
                        name: rest[1..len].to_string(),
                    });
                }
                None => {
                    self.output.push_str(&rest[..len]);
                    self.pos += len;
                }
            }
        }

        Ok(self.output)
    }

    fn dispatch(&mut self, command: Command, name: &str) -> MacroResult<()> {
        debug!(command = name, position = self.pos, "dispatching macro");

        let mut input = MacroInput::new(&self.buffer, self.pos, &self.options.limits);
        let expansion = command.invoke(name, self.session, &mut input)?;
        self.pos = input.position();

        if let Expansion::Rescan(text) = expansion {
            self.splice_and_rescan(&text)?;
        }
        self.check_budget()
    }

    /// Replace the consumed input with `text` and restart scanning at it
    fn splice_and_rescan(&mut self, text: &str) -> MacroResult<()> {
        let remainder = &self.buffer[self.pos..];

        let mut spliced = String::with_capacity(text.len() + remainder.len() + 1);
        spliced.push_str(text);
        // Keep `\foo` + `bar` from fusing into `\foobar`
        if ends_with_control_word(text) && remainder.starts_with(|c: char| c.is_ascii_alphabetic())
        {
            spliced.push(' ');
        }
        spliced.push_str(remainder);

        let limit = self.options.limits.max_buffer;
        if spliced.len() > limit {
            return Err(MacroError::MaxBufferSize { limit });
        }

        debug!(
            replacement = text.len(),
            buffer = spliced.len(),
            "splicing replacement"
        );
        self.buffer = spliced;
        self.pos = 0;
        Ok(())
    }

    fn check_budget(&mut self) -> MacroResult<()> {
        self.macro_count += 1;
        let limit = self.options.limits.max_macros;
        if self.macro_count > limit {
            return Err(MacroError::MaxMacros { limit });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::DEFAULT_MAX_BUFFER;

    fn run(input: &str) -> MacroResult<String> {
        let mut session = Session::new();
        let options = ExpandOptions::default();
        TexExpander::new(&mut session, &options).expand(input)
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(run("x + y = 2").unwrap(), "x + y = 2");
        assert_eq!(run("").unwrap(), "");
    }

    #[test]
    fn test_unknown_commands_pass_through() {
        assert_eq!(run(r"\frac{a}{b}").unwrap(), r"\frac{a}{b}");
        assert_eq!(run(r"a \\ b \{ c \}").unwrap(), r"a \\ b \{ c \}");
        assert_eq!(run(r"trailing \").unwrap(), r"trailing \");
    }

    #[test]
    fn test_escaped_backslash_is_not_a_command() {
        let mut session = Session::new();
        let options = ExpandOptions::default();
        let out = TexExpander::new(&mut session, &options)
            .expand(r"\\newcounter{a}")
            .unwrap();
        assert_eq!(out, r"\\newcounter{a}");
        assert!(session.counters().get("a").is_none());
    }

    #[test]
    fn test_strict_mode_rejects_unknown_commands() {
        let mut session = Session::new();
        let options = ExpandOptions::strict();
        let err = TexExpander::new(&mut session, &options)
            .expand(r"\frac{a}{b}")
            .unwrap_err();
        assert_eq!(
            err,
            MacroError::UndefinedControlSequence {
                name: "frac".to_string()
            }
        );

        let out = TexExpander::new(&mut session, &options)
            .expand(r"a \, b")
            .unwrap();
        assert_eq!(out, r"a \, b");
    }

    #[test]
    fn test_handlers_expand_inside_unknown_command_arguments() {
        assert_eq!(
            run(r"\newcounter{a}\frac{\arabic{a}}{2}").unwrap(),
            r"\frac{1}{2}"
        );
    }

    #[test]
    fn test_splice_inserts_separator() {
        let mut session = Session::new();
        let options = ExpandOptions::default();
        let out = TexExpander::new(&mut session, &options)
            .expand(r"\asarg{alpha}x")
            .unwrap();
        assert_eq!(out, r"\alpha x");
    }

    #[test]
    fn test_macro_budget() {
        let mut session = Session::new();
        let options = ExpandOptions::with_limits(DEFAULT_MAX_BUFFER, 3);
        let err = TexExpander::new(&mut session, &options)
            .expand(r"\newcounter{a}\newcounter{b}\newcounter{c}\newcounter{d}")
            .unwrap_err();
        assert_eq!(err, MacroError::MaxMacros { limit: 3 });
        // The budget is checked after the handler ran, so `d` exists too
        assert_eq!(session.counters().get("c"), Some(1));
        assert_eq!(session.counters().get("d"), Some(1));
    }

    #[test]
    fn test_buffer_budget() {
        let mut session = Session::new();
        let options = ExpandOptions::with_limits(16, 100);
        let err = TexExpander::new(&mut session, &options)
            .expand(r"\newtoggle{t}\iftoggle{t}{0123456789abcdef0}{}")
            .unwrap_err();
        assert_eq!(err, MacroError::MaxBufferSize { limit: 16 });
    }

    #[test]
    fn test_runaway_loop_is_stopped() {
        let err = run(r"\forloop[0]{1}{1}{i}{x}").unwrap_err();
        assert!(err.is_fatal());
    }
}
