//! # Validation Rules
//!
//! A validation rule is a pure predicate over a field value that returns a
//! tagged optional error: `None` when the value passes, `Some(ErrorFlag)`
//! naming the failure otherwise. Rules never fail or panic; malformed input
//! is an ordinary outcome.
//!
//! Any `Fn(Option<&str>) -> Option<ErrorFlag>` is a [`Validator`]. The
//! factories in this module ([`required`], [`min_length`], [`email`],
//! [`pattern`], [`cpf`], [`telefone`]) build the rules the pessoa form uses,
//! and [`Rule`] names them as data so field configuration can list them.
//!
//! Except for [`required`], every rule is permissive on an empty value and
//! leaves the "missing" verdict to `required`.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::cpf::is_valid_cpf;
use crate::telefone::is_valid_telefone;

lazy_static! {
    // Masked CPF: 000.000.000-00
    static ref CPF_REGEX: Regex = Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").unwrap();

    // Phone: (00) 00000-0000, (00)0000-0000, or 00000-0000
    static ref TELEFONE_REGEX: Regex = Regex::new(r"^(\(\d{2}\)\s?)?[\d\s-]{8,}$").unwrap();

    // Address with a dotted domain and an alphabetic TLD
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();

    // WHATWG-style address shape; length limits are checked separately
    static ref EMAIL_ADDRESS_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();
}

const EMAIL_MAX_LENGTH: usize = 254;
const EMAIL_LOCAL_MAX_LENGTH: usize = 64;

/// A named validation failure attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorFlag {
    /// The field has no value.
    Required,
    /// The value does not match the field's format pattern.
    Pattern,
    /// The value is not a CPF with valid check digits.
    DocumentInvalid,
    /// The value does not hold 10 or 11 phone digits.
    PhoneInvalid,
    /// The value is not a well-formed email address.
    EmailFormat,
    /// The value is shorter than the configured minimum.
    #[serde(rename_all = "camelCase")]
    MinLength {
        /// Minimum number of characters.
        required_length: usize,
        /// Number of characters in the value.
        actual_length: usize,
    },
}

impl ErrorFlag {
    /// The payload-free kind of this flag.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Required => ErrorKind::Required,
            Self::Pattern => ErrorKind::Pattern,
            Self::DocumentInvalid => ErrorKind::DocumentInvalid,
            Self::PhoneInvalid => ErrorKind::PhoneInvalid,
            Self::EmailFormat => ErrorKind::EmailFormat,
            Self::MinLength { .. } => ErrorKind::MinLength,
        }
    }
}

/// Kind of an [`ErrorFlag`], ordered by message-resolution priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Required,
    Pattern,
    DocumentInvalid,
    PhoneInvalid,
    EmailFormat,
    MinLength,
}

impl ErrorKind {
    /// Every kind, highest priority first.
    pub const ALL: [ErrorKind; 6] = [
        Self::Required,
        Self::Pattern,
        Self::DocumentInvalid,
        Self::PhoneInvalid,
        Self::EmailFormat,
        Self::MinLength,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Pattern => "pattern",
            Self::DocumentInvalid => "documentInvalid",
            Self::PhoneInvalid => "phoneInvalid",
            Self::EmailFormat => "emailFormat",
            Self::MinLength => "minLength",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active flags of one field, at most one per [`ErrorKind`].
///
/// Iterates in priority order. Serializes as a map from kind name to
/// `true`, or to the payload for `minLength`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ErrorKind, ErrorFlag>);

impl FieldErrors {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag, replacing any flag of the same kind.
    pub fn insert(&mut self, flag: ErrorFlag) {
        self.0.insert(flag.kind(), flag);
    }

    /// Whether a flag of `kind` is active.
    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.0.contains_key(&kind)
    }

    /// The active flag of `kind`, if any.
    pub fn get(&self, kind: ErrorKind) -> Option<&ErrorFlag> {
        self.0.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Active flags, highest priority first.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorFlag> {
        self.0.values()
    }
}

impl FromIterator<ErrorFlag> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = ErrorFlag>>(iter: I) -> Self {
        let mut errors = Self::new();
        for flag in iter {
            errors.insert(flag);
        }
        errors
    }
}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct MinLengthPayload {
            required_length: usize,
            actual_length: usize,
        }

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (kind, flag) in &self.0 {
            match flag {
                ErrorFlag::MinLength {
                    required_length,
                    actual_length,
                } => map.serialize_entry(
                    kind.as_str(),
                    &MinLengthPayload {
                        required_length: *required_length,
                        actual_length: *actual_length,
                    },
                )?,
                _ => map.serialize_entry(kind.as_str(), &true)?,
            }
        }
        map.end()
    }
}

/// A pure rule over a field value.
pub trait Validator {
    /// Check `value`; `None` means it passes.
    fn validate(&self, value: Option<&str>) -> Option<ErrorFlag>;
}

impl<F> Validator for F
where
    F: Fn(Option<&str>) -> Option<ErrorFlag>,
{
    fn validate(&self, value: Option<&str>) -> Option<ErrorFlag> {
        self(value)
    }
}

/// A precompiled format pattern for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// `000.000.000-00`
    Cpf,
    /// `(00) 00000-0000` and shorter variants
    Telefone,
    /// `local@domain.tld`
    Email,
}

impl Pattern {
    /// The compiled expression.
    pub fn regex(&self) -> &'static Regex {
        match self {
            Self::Cpf => &CPF_REGEX,
            Self::Telefone => &TELEFONE_REGEX,
            Self::Email => &EMAIL_REGEX,
        }
    }

    /// The expression source.
    pub fn source(&self) -> &'static str {
        self.regex().as_str()
    }

    /// Whether the whole of `value` matches.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

/// A built-in rule, as listed in field configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    Email,
    Pattern(Pattern),
    Cpf,
    Telefone,
}

impl Validator for Rule {
    fn validate(&self, value: Option<&str>) -> Option<ErrorFlag> {
        match *self {
            Rule::Required => check_required(value),
            Rule::MinLength(min) => check_min_length(min, value),
            Rule::Email => check_email(value),
            Rule::Pattern(p) => check_pattern(p, value),
            Rule::Cpf => check_cpf(value),
            Rule::Telefone => check_telefone(value),
        }
    }
}

/// Run every rule against `value` and collect the failures.
pub fn validate_all(rules: &[Rule], value: Option<&str>) -> FieldErrors {
    rules.iter().filter_map(|rule| rule.validate(value)).collect()
}

/// Fails with [`ErrorFlag::Required`] when the value is missing or empty.
pub fn required() -> impl Validator {
    check_required
}

/// Fails with [`ErrorFlag::MinLength`] when a non-empty value has fewer
/// than `min` characters.
pub fn min_length(min: usize) -> impl Validator {
    move |value: Option<&str>| check_min_length(min, value)
}

/// Fails with [`ErrorFlag::EmailFormat`] when a non-empty value is not a
/// well-formed email address.
pub fn email() -> impl Validator {
    check_email
}

/// Fails with [`ErrorFlag::Pattern`] when a non-empty value does not match
/// `pattern` in full.
pub fn pattern(pattern: Pattern) -> impl Validator {
    move |value: Option<&str>| check_pattern(pattern, value)
}

/// Fails with [`ErrorFlag::DocumentInvalid`] when a non-blank value is not
/// a CPF with valid check digits.
pub fn cpf() -> impl Validator {
    check_cpf
}

/// Fails with [`ErrorFlag::PhoneInvalid`] when a non-blank value does not
/// hold 10 or 11 digits.
pub fn telefone() -> impl Validator {
    check_telefone
}

/// Whether `value` is a well-formed email address.
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LENGTH {
        return false;
    }
    match value.rfind('@') {
        Some(at) if at <= EMAIL_LOCAL_MAX_LENGTH => EMAIL_ADDRESS_REGEX.is_match(value),
        _ => false,
    }
}

fn is_empty(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn check_required(value: Option<&str>) -> Option<ErrorFlag> {
    is_empty(value).then_some(ErrorFlag::Required)
}

fn check_min_length(min: usize, value: Option<&str>) -> Option<ErrorFlag> {
    let value = value.filter(|v| !v.is_empty())?;
    let actual_length = value.chars().count();
    (actual_length < min).then_some(ErrorFlag::MinLength {
        required_length: min,
        actual_length,
    })
}

fn check_email(value: Option<&str>) -> Option<ErrorFlag> {
    let value = value.filter(|v| !v.is_empty())?;
    (!is_valid_email(value)).then_some(ErrorFlag::EmailFormat)
}

fn check_pattern(pattern: Pattern, value: Option<&str>) -> Option<ErrorFlag> {
    let value = value.filter(|v| !v.is_empty())?;
    (!pattern.is_match(value)).then_some(ErrorFlag::Pattern)
}

fn check_cpf(value: Option<&str>) -> Option<ErrorFlag> {
    if is_blank(value) {
        return None;
    }
    (!is_valid_cpf(value.unwrap_or_default())).then_some(ErrorFlag::DocumentInvalid)
}

fn check_telefone(value: Option<&str>) -> Option<ErrorFlag> {
    if is_blank(value) {
        return None;
    }
    (!is_valid_telefone(value.unwrap_or_default())).then_some(ErrorFlag::PhoneInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- cpf --

    #[test]
    fn cpf_valid_passes() {
        assert_eq!(cpf().validate(Some("12345678909")), None);
        assert_eq!(cpf().validate(Some("123.456.789-09")), None);
    }

    #[test]
    fn cpf_invalid_flags_document() {
        assert_eq!(cpf().validate(Some("123")), Some(ErrorFlag::DocumentInvalid));
        assert_eq!(
            cpf().validate(Some("111.111.111-11")),
            Some(ErrorFlag::DocumentInvalid)
        );
        assert_eq!(
            cpf().validate(Some("123.456.789-01")),
            Some(ErrorFlag::DocumentInvalid)
        );
    }

    #[test]
    fn cpf_defers_missing_value() {
        assert_eq!(cpf().validate(None), None);
        assert_eq!(cpf().validate(Some("")), None);
        assert_eq!(cpf().validate(Some("   ")), None);
    }

    // -- telefone --

    #[test]
    fn telefone_rule() {
        assert_eq!(telefone().validate(Some("(11) 99999-9999")), None);
        assert_eq!(telefone().validate(Some("123")), Some(ErrorFlag::PhoneInvalid));
        assert_eq!(telefone().validate(Some("")), None);
        assert_eq!(telefone().validate(None), None);
    }

    // -- required --

    #[test]
    fn required_rule() {
        assert_eq!(required().validate(None), Some(ErrorFlag::Required));
        assert_eq!(required().validate(Some("")), Some(ErrorFlag::Required));
        // Whitespace counts as a value.
        assert_eq!(required().validate(Some(" ")), None);
        assert_eq!(required().validate(Some("Ana")), None);
    }

    // -- min_length --

    #[test]
    fn min_length_rule() {
        assert_eq!(
            min_length(3).validate(Some("ab")),
            Some(ErrorFlag::MinLength {
                required_length: 3,
                actual_length: 2
            })
        );
        assert_eq!(min_length(3).validate(Some("abc")), None);
        assert_eq!(min_length(3).validate(Some("")), None);
        assert_eq!(min_length(2).validate(Some("É")), Some(ErrorFlag::MinLength {
            required_length: 2,
            actual_length: 1
        }));
    }

    // -- email --

    #[test]
    fn email_rule() {
        assert_eq!(email().validate(Some("joao.silva@email.com")), None);
        assert_eq!(email().validate(Some("a@b")), None);
        assert_eq!(email().validate(Some("not-an-email")), Some(ErrorFlag::EmailFormat));
        assert_eq!(email().validate(Some("a@@b.com")), Some(ErrorFlag::EmailFormat));
        assert_eq!(email().validate(Some("a..b@c.com")), Some(ErrorFlag::EmailFormat));
        assert_eq!(email().validate(Some("")), None);
    }

    #[test]
    fn email_length_limits() {
        let local = "a".repeat(65);
        assert!(!is_valid_email(&format!("{local}@example.com")));
        let label = "b".repeat(60);
        let long = format!("a@{label}.{label}.{label}.{label}.{label}");
        assert!(long.len() > EMAIL_MAX_LENGTH);
        assert!(!is_valid_email(&long));
    }

    // -- pattern --

    #[test]
    fn pattern_rule() {
        let rule = pattern(Pattern::Cpf);
        assert_eq!(rule.validate(Some("123.456.789-09")), None);
        assert_eq!(rule.validate(Some("12345678909")), Some(ErrorFlag::Pattern));
        assert_eq!(rule.validate(None), None);

        assert!(Pattern::Telefone.is_match("(11) 99999-8888"));
        assert!(Pattern::Telefone.is_match("99999-8888"));
        assert!(!Pattern::Telefone.is_match("(11) 999"));

        assert!(Pattern::Email.is_match("maria.oliveira@email.com"));
        assert!(!Pattern::Email.is_match("a@b"));
    }

    // -- closures and collections --

    #[test]
    fn closures_are_validators() {
        let no_x = |value: Option<&str>| {
            value
                .filter(|v| v.contains('x'))
                .map(|_| ErrorFlag::Pattern)
        };
        assert_eq!(no_x.validate(Some("abc")), None);
        assert_eq!(no_x.validate(Some("xyz")), Some(ErrorFlag::Pattern));
    }

    #[test]
    fn validate_all_collects_every_failure() {
        let rules = [Rule::Required, Rule::Pattern(Pattern::Cpf), Rule::Cpf];
        let errors = validate_all(&rules, Some("123"));
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(ErrorKind::Pattern));
        assert!(errors.contains(ErrorKind::DocumentInvalid));

        assert!(validate_all(&rules, Some("123.456.789-09")).is_empty());

        let missing = validate_all(&rules, None);
        assert_eq!(missing.iter().collect::<Vec<_>>(), vec![&ErrorFlag::Required]);
    }

    #[test]
    fn field_errors_iterate_in_priority_order() {
        let errors: FieldErrors = [
            ErrorFlag::EmailFormat,
            ErrorFlag::Required,
            ErrorFlag::Pattern,
        ]
        .into_iter()
        .collect();
        let kinds: Vec<ErrorKind> = errors.iter().map(ErrorFlag::kind).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::Required, ErrorKind::Pattern, ErrorKind::EmailFormat]
        );
    }

    #[test]
    fn field_errors_serialize_as_map() {
        let errors: FieldErrors = [
            ErrorFlag::Required,
            ErrorFlag::MinLength {
                required_length: 2,
                actual_length: 1,
            },
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "required": true,
                "minLength": { "requiredLength": 2, "actualLength": 1 }
            })
        );
    }

    #[test]
    fn error_flag_wire_names() {
        assert_eq!(
            serde_json::to_string(&ErrorFlag::DocumentInvalid).unwrap(),
            "\"documentInvalid\""
        );
        for kind in ErrorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
