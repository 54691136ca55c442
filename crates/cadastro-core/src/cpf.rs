//! # CPF Validation
//!
//! The CPF (Cadastro de Pessoas Físicas) is the 11-digit Brazilian
//! individual taxpayer number. Its last two digits are check digits
//! computed from the preceding ones with a weighted modulo-11 sum:
//!
//! - digit 10: weights 10..=2 over digits 1..=9
//! - digit 11: weights 11..=2 over digits 1..=10
//!
//! For each, `11 - (sum % 11)`, with results of 10 or 11 mapped to 0.
//! Numbers whose 11 digits are all the same satisfy the equations but are
//! not issued, so they are rejected.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::mask::{self, CPF_MAX_LENGTH};

/// Check whether `input` is a CPF with valid check digits.
///
/// Accepts masked (`123.456.789-09`) or unmasked input; every non-digit
/// character is ignored. Never panics: malformed input is simply invalid.
pub fn is_valid_cpf(input: &str) -> bool {
    let digits: Vec<u8> = input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    if digits.len() != CPF_MAX_LENGTH {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let mut base = [0u8; 9];
    base.copy_from_slice(&digits[..9]);
    let (first, second) = check_digits(&base);
    digits[9] == first && digits[10] == second
}

/// Compute both check digits for the first nine digits of a CPF.
///
/// Each element of `base` must be in `0..=9`.
pub fn check_digits(base: &[u8; 9]) -> (u8, u8) {
    let first = verifier(base.iter().copied(), 10);
    let second = verifier(base.iter().copied().chain([first]), 11);
    (first, second)
}

fn verifier(digits: impl Iterator<Item = u8>, heaviest: u32) -> u8 {
    let sum: u32 = digits
        .zip((2..=heaviest).rev())
        .map(|(d, weight)| u32::from(d) * weight)
        .sum();
    let digit = 11 - sum % 11;
    if digit >= 10 {
        0
    } else {
        digit as u8
    }
}

/// A CPF with valid check digits.
///
/// Stored as the 11 canonical digits. The constructor accepts masked or
/// unmasked input. Serialized in the masked `ddd.ddd.ddd-dd` form;
/// deserialization routes through [`Cpf::new`] so invalid numbers are
/// rejected instead of silently accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cpf(String);

impl Cpf {
    /// Create a CPF, validating length and check digits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCpf`] if the input does not hold
    /// exactly 11 digits, all digits are equal, or a check digit is wrong.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if !is_valid_cpf(&raw) {
            return Err(ValidationError::InvalidCpf(raw));
        }
        Ok(Self(mask::digits_of(&raw)))
    }

    /// Access the 11 digits without separators.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the CPF in masked form: `ddd.ddd.ddd-dd`.
    pub fn formatted(&self) -> String {
        mask::cpf_layout(&self.0)
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl std::str::FromStr for Cpf {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Cpf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
