//! Argument reader
//!
//! Handlers pull their arguments from a [`MacroInput`], a cursor over the
//! buffer the expander is currently scanning. Reading an argument advances
//! the cursor; the expander picks the final position back up once the
//! handler returns.

use crate::core::options::ExpansionLimits;
use crate::utils::error::{MacroError, MacroResult};

/// Cursor over the remaining input, handed to every handler
#[derive(Debug)]
pub struct MacroInput<'a> {
    text: &'a str,
    pos: usize,
    limits: &'a ExpansionLimits,
}

impl<'a> MacroInput<'a> {
    pub fn new(text: &'a str, pos: usize, limits: &'a ExpansionLimits) -> Self {
        Self { text, pos, limits }
    }

    /// Byte offset of the cursor in the underlying buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unread part of the buffer
    pub fn remainder(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Expansion ceilings in force for the current expression
    pub fn limits(&self) -> &ExpansionLimits {
        self.limits
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remainder();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Read the next required argument.
    ///
    /// A brace group yields its inner text verbatim, a control sequence
    /// yields itself, anything else yields a single character.
    pub fn get_argument(&mut self, command: &str) -> MacroResult<String> {
        self.skip_whitespace();
        let rest = self.remainder();

        match rest.chars().next() {
            None => Err(MacroError::missing_argument(command)),
            Some('}') => Err(MacroError::ExtraCloseBrace {
                command: command.to_string(),
            }),
            Some('\\') => {
                let len = control_sequence_len(rest);
                self.pos += len;
                Ok(rest[..len].to_string())
            }
            Some('{') => {
                let mut depth = 0usize;
                let mut escaped = false;
                for (i, c) in rest.char_indices() {
                    if escaped {
                        escaped = false;
                        continue;
                    }
                    match c {
                        '\\' => escaped = true,
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                self.pos += i + 1;
                                return Ok(rest[1..i].to_string());
                            }
                        }
                        _ => {}
                    }
                }
                Err(MacroError::MissingCloseBrace {
                    command: command.to_string(),
                })
            }
            Some(c) => {
                self.pos += c.len_utf8();
                Ok(c.to_string())
            }
        }
    }

    /// Read an optional `[...]` argument.
    ///
    /// Returns `None` without consuming anything when the next non-blank
    /// character is not `[`. A `]` inside braces does not close the argument.
    pub fn get_brackets(&mut self, command: &str) -> MacroResult<Option<String>> {
        let rest = self.remainder();
        let trimmed = rest.trim_start();
        if !trimmed.starts_with('[') {
            return Ok(None);
        }
        let start = rest.len() - trimmed.len();

        let mut braces = 0usize;
        let mut escaped = false;
        for (i, c) in trimmed.char_indices().skip(1) {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '{' => braces += 1,
                '}' => {
                    if braces == 0 {
                        return Err(MacroError::ExtraCloseBrace {
                            command: command.to_string(),
                        });
                    }
                    braces -= 1;
                }
                ']' if braces == 0 => {
                    self.pos += start + i + 1;
                    return Ok(Some(trimmed[1..i].to_string()));
                }
                _ => {}
            }
        }

        Err(MacroError::MissingCloseBracket {
            command: command.to_string(),
        })
    }
}

/// Byte length of the control sequence at the start of `s`, backslash
/// included. `s` must start with `\`; a lone backslash has length 1.
pub(crate) fn control_sequence_len(s: &str) -> usize {
    let after = &s[1..];
    let letters = after.bytes().take_while(u8::is_ascii_alphabetic).count();
    if letters > 0 {
        1 + letters
    } else {
        1 + after.chars().next().map(char::len_utf8).unwrap_or(0)
    }
}

/// True if `text` ends in an unescaped control word such as `\foo`
pub(crate) fn ends_with_control_word(text: &str) -> bool {
    let head = text.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if head.len() == text.len() {
        return false;
    }
    let backslashes = head.len() - head.trim_end_matches('\\').len();
    backslashes % 2 == 1
}
