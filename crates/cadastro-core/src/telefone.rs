//! # Phone Numbers
//!
//! Brazilian phone numbers with area code: 10 digits for landlines,
//! 11 for mobiles.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::mask::{self, PHONE_LANDLINE_MAX_LENGTH, PHONE_MOBILE_MAX_LENGTH};

/// Check whether `input` carries 10 or 11 digits.
pub fn is_valid_telefone(input: &str) -> bool {
    TelefoneKind::from_digit_count(mask::digits_of(input).len()).is_some()
}

/// Landline or mobile, decided by digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelefoneKind {
    /// `(dd) dddd-dddd`
    Landline,
    /// `(dd) ddddd-dddd`
    Mobile,
}

impl TelefoneKind {
    /// Classify a digit count; `None` when it is neither 10 nor 11.
    pub fn from_digit_count(count: usize) -> Option<Self> {
        match count {
            PHONE_LANDLINE_MAX_LENGTH => Some(Self::Landline),
            PHONE_MOBILE_MAX_LENGTH => Some(Self::Mobile),
            _ => None,
        }
    }
}

/// A phone number with 10 or 11 digits.
///
/// Stored as digits only; serialized in masked form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Telefone(String);

impl Telefone {
    /// Create a phone number from masked or unmasked input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTelefone`] unless the input holds
    /// 10 or 11 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let digits = mask::digits_of(&raw);
        if TelefoneKind::from_digit_count(digits.len()).is_none() {
            return Err(ValidationError::InvalidTelefone(raw));
        }
        Ok(Self(digits))
    }

    /// Access the digits without separators.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Landline or mobile.
    pub fn kind(&self) -> TelefoneKind {
        if self.0.len() == PHONE_MOBILE_MAX_LENGTH {
            TelefoneKind::Mobile
        } else {
            TelefoneKind::Landline
        }
    }

    /// Area code (first two digits).
    pub fn area_code(&self) -> &str {
        &self.0[..2]
    }

    /// Return the number in masked form.
    pub fn formatted(&self) -> String {
        mask::telefone_layout(&self.0)
    }
}

impl std::fmt::Display for Telefone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl Serialize for Telefone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Telefone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
