use std::str::FromStr;

use libmips::Register;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::AsmError;

pub static LINE_REGEX: OnceCell<Regex> = OnceCell::new();
pub static LABEL_REGEX: OnceCell<Regex> = OnceCell::new();
pub static OPERAND_SPLIT_REGEX: OnceCell<Regex> = OnceCell::new();
static LINE_REGEX_PATTERN: &str =
    r"^\s*(?:(?P<label>[^\s:#]+)\s*:)?(?P<rest>[^#]*)";
static LABEL_REGEX_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
static OPERAND_SPLIT_PATTERN: &str = r"[\s,()]+";

// Range of values representable in 32 bits under either interpretation.
pub const MIN_WORD: i64 = i32::MIN as i64;
pub const MAX_WORD: i64 = u32::MAX as i64;

pub fn line_regex() -> &'static Regex {
    LINE_REGEX.get_or_init(|| Regex::new(LINE_REGEX_PATTERN).expect("Invalid line regex"))
}

pub fn operand_split_regex() -> &'static Regex {
    OPERAND_SPLIT_REGEX
        .get_or_init(|| Regex::new(OPERAND_SPLIT_PATTERN).expect("Invalid operand regex"))
}

pub fn is_valid_label(name: &str) -> bool {
    LABEL_REGEX
        .get_or_init(|| Regex::new(LABEL_REGEX_PATTERN).expect("Invalid label regex"))
        .is_match(name)
}

pub fn register(r: &str) -> Result<Register, AsmError> {
    Register::from_str(r).map_err(|_| AsmError::InvalidOperand(r.to_owned()))
}

/// Parses a decimal or `0x` hex literal, optionally signed, and checks it
/// against the inclusive range `[lower, upper]`.
pub fn number(s: &str, lower: i64, upper: i64) -> Result<i64, AsmError> {
    let invalid = || AsmError::InvalidOperand(s.to_owned());

    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, body) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };

    // from_str_radix would accept a second sign
    if !body.starts_with(|c: char| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let magnitude = i64::from_str_radix(body, radix).map_err(|_| invalid())?;
    let value = if negative { -magnitude } else { magnitude };

    if value < lower || value > upper {
        return Err(invalid());
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(number("35", -1000, 1000), Ok(35));
        assert_eq!(number("145634236", 0, 9_000_000_000), Ok(145634236));
        assert_eq!(number("0xC0FFEE", -9_000_000_000, 9_000_000_000), Ok(12648430));
        assert_eq!(number("72", -16, 72), Ok(72));
        assert!(number("72", -16, 71).is_err());
        assert_eq!(number("72", 72, 150), Ok(72));
        assert!(number("72", 73, 150).is_err());
        assert!(number("35x", -100, 100).is_err());
        assert_eq!(number("-0x10", -100, 100), Ok(-16));
        assert_eq!(number("-32768", -32768, 32767), Ok(-32768));
    }

    #[test]
    fn malformed_numbers() {
        for s in ["", "-", "0x", "--5", "-+5", "0x-5", "1 2", "$t0"] {
            assert!(number(s, MIN_WORD, MAX_WORD).is_err(), "{s} parsed");
        }
    }

    #[test]
    fn labels() {
        assert!(is_valid_label("loop"));
        assert!(is_valid_label("_start2"));
        assert!(!is_valid_label("2start"));
        assert!(!is_valid_label("$t0"));
        assert!(!is_valid_label(""));
    }

    #[test]
    fn registers() {
        assert_eq!(register("$s0"), Ok(Register::S0));
        assert_eq!(register("$16"), Ok(Register::S0));
        assert_eq!(
            register("$s9"),
            Err(AsmError::InvalidOperand("$s9".to_owned()))
        );
    }
}
