//! Numeral systems for rendering counter values
//!
//! Pure `i64 -> String` conversions used by `\arabic`, `\alph`, `\Alph`,
//! `\roman` and `\Roman`. Letter and roman forms are only defined for
//! positive values; zero and negatives render as the empty string.

/// Roman numeral table, largest value first (subtractive pairs included)
pub const ROMAN_TABLE: [(i64, &str, &str); 13] = [
    (1000, "m", "M"),
    (900, "cm", "CM"),
    (500, "d", "D"),
    (400, "cd", "CD"),
    (100, "c", "C"),
    (90, "xc", "XC"),
    (50, "l", "L"),
    (40, "xl", "XL"),
    (10, "x", "X"),
    (9, "ix", "IX"),
    (5, "v", "V"),
    (4, "iv", "IV"),
    (1, "i", "I"),
];

/// Numeral system requested by a formatting macro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeral {
    Arabic,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

impl Numeral {
    /// Render `n` in this numeral system
    pub fn format(self, n: i64) -> String {
        match self {
            Numeral::Arabic => n.to_string(),
            Numeral::LowerAlpha => alpha(n, b'a'),
            Numeral::UpperAlpha => alpha(n, b'A'),
            Numeral::LowerRoman => roman(n, false),
            Numeral::UpperRoman => roman(n, true),
        }
    }

    /// Lower bound on the length of `format(n)` in bytes
    pub fn min_len(self, n: i64) -> usize {
        match self {
            Numeral::LowerRoman | Numeral::UpperRoman if n > 0 => {
                usize::try_from(n / 1000).unwrap_or(usize::MAX)
            }
            _ => 0,
        }
    }
}

/// Bijective base-26: 1 -> a, 26 -> z, 27 -> aa, 702 -> zz
fn alpha(mut n: i64, base: u8) -> String {
    let mut digits = Vec::new();
    while n > 0 {
        let digit = ((n - 1) % 26) as u8;
        digits.push((base + digit) as char);
        n = (n - 1) / 26;
    }
    digits.iter().rev().collect()
}

fn roman(mut n: i64, upper: bool) -> String {
    let mut result = String::new();
    for (value, lower_sym, upper_sym) in ROMAN_TABLE {
        while n >= value {
            result.push_str(if upper { upper_sym } else { lower_sym });
            n -= value;
        }
    }
    result
}

/// Lowercase letter rendering
pub fn to_lower_alpha(n: i64) -> String {
    Numeral::LowerAlpha.format(n)
}

/// Uppercase letter rendering
pub fn to_upper_alpha(n: i64) -> String {
    Numeral::UpperAlpha.format(n)
}

/// Lowercase roman rendering
pub fn to_lower_roman(n: i64) -> String {
    Numeral::LowerRoman.format(n)
}

/// Uppercase roman rendering
pub fn to_upper_roman(n: i64) -> String {
    Numeral::UpperRoman.format(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_single_letters() {
        for n in 1..=26 {
            let expected = ((b'a' + (n - 1) as u8) as char).to_string();
            assert_eq!(to_lower_alpha(n), expected);
        }
        assert_eq!(to_upper_alpha(1), "A");
        assert_eq!(to_upper_alpha(26), "Z");
    }

    #[test]
    fn test_alpha_bijective() {
        assert_eq!(to_lower_alpha(27), "aa");
        assert_eq!(to_lower_alpha(52), "az");
        assert_eq!(to_lower_alpha(53), "ba");
        assert_eq!(to_lower_alpha(702), "zz");
        assert_eq!(to_lower_alpha(703), "aaa");
        assert_eq!(to_upper_alpha(28), "AB");
    }

    #[test]
    fn test_alpha_non_positive() {
        assert_eq!(to_lower_alpha(0), "");
        assert_eq!(to_upper_alpha(-5), "");
    }

    #[test]
    fn test_roman() {
        assert_eq!(to_upper_roman(1994), "MCMXCIV");
        assert_eq!(to_lower_roman(1994), "mcmxciv");
        assert_eq!(to_upper_roman(4), "IV");
        assert_eq!(to_lower_roman(4), "iv");
        assert_eq!(to_upper_roman(3999), "MMMCMXCIX");
        assert_eq!(to_upper_roman(4000), "MMMM");
    }

    #[test]
    fn test_roman_non_positive() {
        assert_eq!(to_upper_roman(0), "");
        assert_eq!(to_lower_roman(-1), "");
    }

    #[test]
    fn test_arabic() {
        assert_eq!(Numeral::Arabic.format(42), "42");
        assert_eq!(Numeral::Arabic.format(-7), "-7");
        assert_eq!(Numeral::Arabic.format(0), "0");
    }

    #[test]
    fn test_min_len() {
        assert_eq!(Numeral::UpperRoman.min_len(4000), 4);
        assert!(Numeral::LowerRoman.min_len(2500) <= to_lower_roman(2500).len());
        assert_eq!(Numeral::UpperRoman.min_len(-4000), 0);
        assert_eq!(Numeral::Arabic.min_len(i64::MAX), 0);
        assert!(Numeral::UpperRoman.min_len(4_294_967_296_000) >= u32::MAX as usize);
    }
}
