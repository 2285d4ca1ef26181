//! `\forloop[step]{start}{stop}{counter}{body}`
//!
//! Unrolls the loop into `\setcounter{counter}{i}body` for every `i` from
//! `start` to `stop` inclusive and hands the whole text back for rescanning.
//! Nothing inside `body` is expanded here; references to the loop counter
//! resolve on the rescan, right after the matching `\setcounter`.

use std::fmt::Write;

use tracing::debug;

use crate::core::engine::{Expansion, MacroInput};
use crate::utils::error::{MacroError, MacroResult};
use crate::utils::names::{parse_integer, trim_spaces};

/// Build the unrolled text.
///
/// Fails with `MaxBufferSize` as soon as the text outgrows `max_buffer`, so
/// a zero or wrong-signed step cannot spin forever.
pub fn unroll(
    step: i64,
    start: i64,
    stop: i64,
    counter: &str,
    body: &str,
    max_buffer: usize,
) -> MacroResult<String> {
    let mut unrolled = String::new();
    let mut i = start;
    let mut iterations = 0usize;

    while i <= stop {
        let _ = write!(unrolled, "\\setcounter{{{}}}{{{}}}", counter, i);
        unrolled.push_str(body);
        iterations += 1;

        if unrolled.len() > max_buffer {
            return Err(MacroError::MaxBufferSize { limit: max_buffer });
        }
        match i.checked_add(step) {
            Some(next) => i = next,
            None => break,
        }
    }

    debug!(counter, iterations, bytes = unrolled.len(), "loop unrolled");
    Ok(unrolled)
}

/// `\forloop[step]{start}{stop}{counter}{body}`
pub(crate) fn for_loop(command: &str, input: &mut MacroInput<'_>) -> MacroResult<Expansion> {
    let step = input.get_brackets(command)?;
    let start = input.get_argument(command)?;
    let stop = input.get_argument(command)?;
    let counter = input.get_argument(command)?;
    let body = input.get_argument(command)?;

    let step = match step.as_deref().map(trim_spaces) {
        None | Some("") => 1,
        Some(text) => number(command, text)?,
    };
    let start = number(command, trim_spaces(&start))?;
    let stop = number(command, trim_spaces(&stop))?;

    let unrolled = unroll(
        step,
        start,
        stop,
        trim_spaces(&counter),
        trim_spaces(&body),
        input.limits().max_buffer,
    )?;
    Ok(Expansion::Rescan(unrolled))
}

fn number(command: &str, text: &str) -> MacroResult<i64> {
    parse_integer(text).ok_or_else(|| MacroError::illegal_number(command, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 20 * 1024;

    #[test]
    fn test_unroll_simple() {
        let text = unroll(1, 1, 3, "i", "X", MAX).unwrap();
        assert_eq!(
            text,
            r"\setcounter{i}{1}X\setcounter{i}{2}X\setcounter{i}{3}X"
        );
    }

    #[test]
    fn test_unroll_step() {
        let text = unroll(2, 0, 4, "i", "X", MAX).unwrap();
        assert_eq!(
            text,
            r"\setcounter{i}{0}X\setcounter{i}{2}X\setcounter{i}{4}X"
        );
        let text = unroll(3, 0, 4, "i", "", MAX).unwrap();
        assert_eq!(text, r"\setcounter{i}{0}\setcounter{i}{3}");
    }

    #[test]
    fn test_unroll_empty_range() {
        assert_eq!(unroll(1, 5, 1, "i", "X", MAX).unwrap(), "");
        assert_eq!(unroll(-1, 5, 1, "i", "X", MAX).unwrap(), "");
    }

    #[test]
    fn test_unroll_negative_values() {
        let text = unroll(1, -1, 0, "k", "", MAX).unwrap();
        assert_eq!(text, r"\setcounter{k}{-1}\setcounter{k}{0}");
    }

    #[test]
    fn test_unroll_never_terminating_step() {
        assert_eq!(
            unroll(0, 1, 1, "i", "X", 64).unwrap_err(),
            MacroError::MaxBufferSize { limit: 64 }
        );
        assert_eq!(
            unroll(-1, 1, 2, "i", "X", 64).unwrap_err(),
            MacroError::MaxBufferSize { limit: 64 }
        );
    }

    #[test]
    fn test_unroll_stops_at_integer_bounds() {
        let text = unroll(1, i64::MAX, i64::MAX, "i", "", MAX).unwrap();
        assert_eq!(text, format!("\\setcounter{{i}}{{{}}}", i64::MAX));
    }
}
