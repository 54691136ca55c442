//! # Input Masks
//!
//! Pure string transformations for the two masked fields of the pessoa
//! form: the CPF (`ddd.ddd.ddd-dd`) and the phone number
//! (`(dd) dddd-dddd` or `(dd) ddddd-dddd`).
//!
//! Every function accepts either a `&str` or `None` and never fails:
//! missing, empty, or whitespace-only input yields an empty string.
//! Partial input is formatted progressively, emitting a separator only once
//! the group after it has at least one digit.

/// Number of digits in a complete CPF.
pub const CPF_MAX_LENGTH: usize = 11;

/// Number of digits in a landline number (area code included).
pub const PHONE_LANDLINE_MAX_LENGTH: usize = 10;

/// Number of digits in a mobile number (area code included).
pub const PHONE_MOBILE_MAX_LENGTH: usize = 11;

/// Remove every character that is not an ASCII digit.
///
/// Returns an empty string for `None`, empty, or whitespace-only input.
pub fn strip_non_digits<'a>(input: impl Into<Option<&'a str>>) -> String {
    match input.into() {
        Some(s) if !s.trim().is_empty() => digits_of(s),
        _ => String::new(),
    }
}

/// Return the raw digits of a masked value.
///
/// Same contract as [`strip_non_digits`]; this is the name consumers use
/// when they already hold a formatted string.
pub fn remove_mask<'a>(input: impl Into<Option<&'a str>>) -> String {
    strip_non_digits(input)
}

/// Format a CPF as `ddd.ddd.ddd-dd`, progressively for partial input.
///
/// Fewer than three digits are returned as-is. Input with more than eleven
/// digits is formatted from its first eleven.
pub fn format_cpf<'a>(input: impl Into<Option<&'a str>>) -> String {
    cpf_layout(&strip_non_digits(input))
}

/// Format a phone number as `(dd) dddd-dddd` or `(dd) ddddd-dddd`.
///
/// The landline/mobile split follows the current digit count: up to ten
/// digits use the 4-4 layout, eleven use 5-4. A single digit is returned
/// as-is. Input with more than eleven digits is formatted from its first
/// eleven.
pub fn format_telefone<'a>(input: impl Into<Option<&'a str>>) -> String {
    telefone_layout(&strip_non_digits(input))
}

pub(crate) fn digits_of(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Lay out an already-stripped CPF digit string.
pub(crate) fn cpf_layout(digits: &str) -> String {
    let digits = truncate(digits, CPF_MAX_LENGTH);
    if digits.len() < 3 {
        return digits.to_string();
    }

    let mut out = String::with_capacity(14);
    out.push_str(&digits[..3]);
    push_group(&mut out, '.', slice(digits, 3, 6));
    push_group(&mut out, '.', slice(digits, 6, 9));
    push_group(&mut out, '-', slice(digits, 9, 11));
    out
}

/// Lay out an already-stripped phone digit string.
pub(crate) fn telefone_layout(digits: &str) -> String {
    let digits = truncate(digits, PHONE_MOBILE_MAX_LENGTH);
    if digits.len() < 2 {
        return digits.to_string();
    }

    let middle = if digits.len() <= PHONE_LANDLINE_MAX_LENGTH { 4 } else { 5 };

    let mut out = String::with_capacity(15);
    out.push('(');
    out.push_str(&digits[..2]);
    out.push(')');
    push_group(&mut out, ' ', slice(digits, 2, 2 + middle));
    push_group(&mut out, '-', slice(digits, 2 + middle, 2 + middle + 4));
    out
}

fn push_group(out: &mut String, separator: char, group: &str) {
    if !group.is_empty() {
        out.push(separator);
        out.push_str(group);
    }
}

// Digit strings are ASCII, so byte offsets are character offsets.
fn slice(digits: &str, start: usize, end: usize) -> &str {
    let end = end.min(digits.len());
    if start >= end {
        ""
    } else {
        &digits[start..end]
    }
}

fn truncate(digits: &str, max: usize) -> &str {
    &digits[..digits.len().min(max)]
}
