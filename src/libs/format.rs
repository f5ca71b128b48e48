//! Input masks and field patterns shared by the customer, employee and
//! order placement forms.

use regex::Regex;

lazy_static::lazy_static! {
    /// Characters a person's name may not contain
    pub static ref NAME_SPECIAL_CHARS: Regex = Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("name pattern");
    /// `0300-1234567`
    pub static ref PHONE_MASK: Regex = Regex::new(r"^\d{4}-\d{7}$").expect("phone pattern");
    /// `12345-1234567-1`
    pub static ref CNIC_MASK: Regex = Regex::new(r"^\d{5}-\d{7}-\d$").expect("cnic pattern");
}

pub const PHONE_DIGITS: usize = 11;
pub const CNIC_DIGITS: usize = 13;

fn digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Formats a phone number as `03XX-XXXXXXX`.
///
/// Non-digits are dropped and anything past eleven digits is truncated
/// before the dash is inserted, so partial input formats progressively.
pub fn format_phone(input: &str) -> String {
    let digits = digits(input, PHONE_DIGITS);
    if digits.len() > 4 {
        format!("{}-{}", &digits[..4], &digits[4..])
    } else {
        digits
    }
}

/// Formats a CNIC as `XXXXX-XXXXXXX-X`
pub fn format_cnic(input: &str) -> String {
    let digits = digits(input, CNIC_DIGITS);
    match digits.len() {
        0..=5 => digits,
        6..=12 => format!("{}-{}", &digits[..5], &digits[5..]),
        _ => format!("{}-{}-{}", &digits[..5], &digits[5..12], &digits[12..]),
    }
}

pub fn has_special_chars(name: &str) -> bool {
    NAME_SPECIAL_CHARS.is_match(name)
}

pub fn is_phone(phone: &str) -> bool {
    PHONE_MASK.is_match(phone)
}

pub fn is_cnic(cnic: &str) -> bool {
    CNIC_MASK.is_match(cnic)
}
