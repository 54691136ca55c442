//! # Live Input Masking
//!
//! Entry points for masking a text field while the user types. They work
//! against the minimal [`InputTarget`] capability instead of a concrete UI
//! event type, so any UI layer (or a headless test) can drive them.
//!
//! A missing target is a silent no-op. When the stripped value has more
//! digits than the field allows, the target is left untouched: no
//! truncation and no formatting.

use crate::mask::{self, CPF_MAX_LENGTH, PHONE_MOBILE_MAX_LENGTH};

/// A text field whose value can be read and replaced.
pub trait InputTarget {
    /// Current text of the field.
    fn value(&self) -> String;

    /// Replace the text of the field.
    fn set_value(&mut self, value: String);
}

/// An owned text value implementing [`InputTarget`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl InputTarget for TextInput {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }
}

impl InputTarget for String {
    fn value(&self) -> String {
        self.clone()
    }

    fn set_value(&mut self, value: String) {
        *self = value;
    }
}

/// Which mask a field uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskKind {
    Cpf,
    Telefone,
}

impl MaskKind {
    /// Largest digit count the mask will format.
    pub fn max_digits(&self) -> usize {
        match self {
            Self::Cpf => CPF_MAX_LENGTH,
            Self::Telefone => PHONE_MOBILE_MAX_LENGTH,
        }
    }

    /// Mask the target's current value in place.
    pub fn apply<T: InputTarget + ?Sized>(&self, target: Option<&mut T>) {
        let Some(target) = target else {
            return;
        };

        let digits = mask::digits_of(&target.value());
        if digits.len() > self.max_digits() {
            return;
        }

        let formatted = match self {
            Self::Cpf => mask::cpf_layout(&digits),
            Self::Telefone => mask::telefone_layout(&digits),
        };
        target.set_value(formatted);
    }
}

/// Mask a CPF field in place.
pub fn apply_cpf_mask<T: InputTarget + ?Sized>(target: Option<&mut T>) {
    MaskKind::Cpf.apply(target);
}

/// Mask a phone field in place.
pub fn apply_telefone_mask<T: InputTarget + ?Sized>(target: Option<&mut T>) {
    MaskKind::Telefone.apply(target);
}
