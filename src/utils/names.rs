//! Name and argument helpers shared by the counter and toggle handlers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A single non-backslash character, or a run of ASCII letters
    static ref NAME_PATTERN: Regex = Regex::new(r"^(?:[^\\\n]|[A-Za-z]+)$").unwrap();

    /// `\value{name}` as a whole numeric argument
    static ref VALUE_REF: Regex = Regex::new(r"^\\value\s*\{([^{}]*)\}$").unwrap();
}

/// Check a counter or toggle name
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Drop one leading backslash, so `\foo` and `foo` name the same thing
pub fn strip_backslash(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

/// Whitespace trimming applied to arguments by handlers
pub fn trim_spaces(text: &str) -> &str {
    text.trim_matches(|c: char| c == ' ' || c == '\t' || c == '\n' || c == '\r')
}

/// Numeric argument of `\setcounter` / `\addtocounter`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberArg<'a> {
    /// A decimal integer literal
    Literal(i64),
    /// `\value{name}`, resolved against the counter store by the caller
    ValueOf(&'a str),
}

/// Parse a trimmed numeric argument, `None` if it is neither form
pub fn parse_number_arg(text: &str) -> Option<NumberArg<'_>> {
    if let Some(caps) = VALUE_REF.captures(text) {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        return Some(NumberArg::ValueOf(trim_spaces(name)));
    }
    parse_integer(text).map(NumberArg::Literal)
}

/// Parse a signed decimal integer
pub fn parse_integer(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("a"));
        assert!(is_valid_name("section"));
        assert!(is_valid_name("CamelCase"));
        assert!(is_valid_name("*"));
        assert!(is_valid_name("1"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a1"));
        assert!(!is_valid_name("sec2"));
        assert!(!is_valid_name("*+"));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("\\"));
        assert!(!is_valid_name("\\foo"));
    }

    #[test]
    fn test_strip_backslash() {
        assert_eq!(strip_backslash("\\foo"), "foo");
        assert_eq!(strip_backslash("foo"), "foo");
        assert_eq!(strip_backslash("\\"), "");
    }

    #[test]
    fn test_parse_number_arg() {
        assert_eq!(parse_number_arg("42"), Some(NumberArg::Literal(42)));
        assert_eq!(parse_number_arg("-3"), Some(NumberArg::Literal(-3)));
        assert_eq!(parse_number_arg("+3"), Some(NumberArg::Literal(3)));
        assert_eq!(parse_number_arg("\\value{a}"), Some(NumberArg::ValueOf("a")));
        assert_eq!(parse_number_arg("\\value{ b }"), Some(NumberArg::ValueOf("b")));
        assert_eq!(parse_number_arg("abc"), None);
        assert_eq!(parse_number_arg("12abc"), None);
        assert_eq!(parse_number_arg(""), None);
        assert_eq!(parse_number_arg("\\value{a}x"), None);
    }
}
