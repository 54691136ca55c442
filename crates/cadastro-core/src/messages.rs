//! # Error Messages
//!
//! Resolves the active error flags of a field to the single message shown
//! under it. Resolution walks the flags in a fixed priority order and stops
//! at the first one present:
//!
//! `required` → `pattern` → `documentInvalid` → `phoneInvalid` →
//! `emailFormat` → `minLength`
//!
//! A field with no active flags resolves to the empty string, which the UI
//! reads as "show nothing".
//!
//! All strings live in a [`MessageCatalog`]. The default catalog holds the
//! Portuguese messages of the registration form; a YAML or JSON file can
//! replace any of them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::validation::{ErrorFlag, FieldErrors};

/// Placeholder replaced by the field label in [`MessageCatalog::required`].
pub const LABEL_PLACEHOLDER: &str = "{label}";

/// Placeholder replaced by the minimum length in [`MessageCatalog::min_length`].
pub const REQUIRED_LENGTH_PLACEHOLDER: &str = "{requiredLength}";

/// Every user-facing validation string.
///
/// Fields missing from a loaded file keep their default value; a map that
/// is present replaces the default map as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    /// Display label per field name.
    pub labels: BTreeMap<String, String>,
    /// Format hint per field name for `pattern` failures.
    pub pattern_hints: BTreeMap<String, String>,
    /// `pattern` message for fields without a hint.
    pub pattern_fallback: String,
    /// `required` template; `{label}` is replaced by the field label.
    pub required: String,
    pub document_invalid: String,
    pub phone_invalid: String,
    pub email_format: String,
    /// `minLength` template; `{requiredLength}` is replaced by the minimum.
    pub min_length: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let labels = [
            ("nome", "Nome"),
            ("cpf", "CPF"),
            ("sexo", "Sexo"),
            ("email", "E-mail"),
            ("telefone", "Telefone"),
        ];
        let pattern_hints = [
            ("cpf", "CPF deve estar no formato 000.000.000-00"),
            ("telefone", "Telefone deve estar no formato (00) 00000-0000"),
            ("email", "Email deve ter um formato válido"),
        ];

        Self {
            labels: to_map(&labels),
            pattern_hints: to_map(&pattern_hints),
            pattern_fallback: "Formato inválido".to_string(),
            required: "{label} é obrigatório".to_string(),
            document_invalid: "CPF inválido".to_string(),
            phone_invalid: "Telefone deve ter 10 ou 11 dígitos".to_string(),
            email_format: "Email deve ter um formato válido".to_string(),
            min_length: "Campo deve ter pelo menos {requiredLength} caracteres".to_string(),
        }
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl MessageCatalog {
    /// Load a catalog from a `.json`, `.yaml`, or `.yml` file.
    ///
    /// Files with any other extension are parsed as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        tracing::debug!(path = %path.display(), labels = catalog.labels.len(), "loaded message catalog");
        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Label for `field`, or the field name with its first letter
    /// capitalized when no label is configured.
    pub fn label(&self, field: &str) -> String {
        self.labels
            .get(field)
            .cloned()
            .unwrap_or_else(|| capitalize_first(field))
    }
}

/// Maps a field's active flags to the one message to display.
#[derive(Debug, Clone, Default)]
pub struct FormErrorResolver {
    catalog: MessageCatalog,
}

impl FormErrorResolver {
    pub fn new(catalog: MessageCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Resolve the message for `field`; empty when no flag is active.
    pub fn resolve(&self, field: &str, errors: &FieldErrors) -> String {
        // FieldErrors iterates highest priority first.
        errors
            .iter()
            .next()
            .map(|flag| self.message_for(field, flag))
            .unwrap_or_default()
    }

    /// Message for a single flag on `field`.
    pub fn message_for(&self, field: &str, flag: &ErrorFlag) -> String {
        let catalog = &self.catalog;
        match flag {
            ErrorFlag::Required => catalog
                .required
                .replace(LABEL_PLACEHOLDER, &catalog.label(field)),
            ErrorFlag::Pattern => catalog
                .pattern_hints
                .get(field)
                .unwrap_or(&catalog.pattern_fallback)
                .clone(),
            ErrorFlag::DocumentInvalid => catalog.document_invalid.clone(),
            ErrorFlag::PhoneInvalid => catalog.phone_invalid.clone(),
            ErrorFlag::EmailFormat => catalog.email_format.clone(),
            ErrorFlag::MinLength {
                required_length, ..
            } => catalog
                .min_length
                .replace(REQUIRED_LENGTH_PLACEHOLDER, &required_length.to_string()),
        }
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;

    fn flags(list: &[ErrorFlag]) -> FieldErrors {
        list.iter().cloned().collect()
    }

    #[test]
    fn required_uses_label() {
        let resolver = FormErrorResolver::default();
        assert_eq!(
            resolver.resolve("nome", &flags(&[ErrorFlag::Required])),
            "Nome é obrigatório"
        );
        assert_eq!(
            resolver.resolve("email", &flags(&[ErrorFlag::Required])),
            "E-mail é obrigatório"
        );
    }

    #[test]
    fn required_falls_back_to_capitalized_name() {
        let resolver = FormErrorResolver::default();
        assert_eq!(
            resolver.resolve("endereco", &flags(&[ErrorFlag::Required])),
            "Endereco é obrigatório"
        );
        assert_eq!(
            resolver.resolve("", &flags(&[ErrorFlag::Required])),
            " é obrigatório"
        );
    }

    #[test]
    fn pattern_hints_per_field() {
        let resolver = FormErrorResolver::default();
        let pattern = flags(&[ErrorFlag::Pattern]);
        assert_eq!(
            resolver.resolve("cpf", &pattern),
            "CPF deve estar no formato 000.000.000-00"
        );
        assert_eq!(
            resolver.resolve("telefone", &pattern),
            "Telefone deve estar no formato (00) 00000-0000"
        );
        assert_eq!(
            resolver.resolve("email", &pattern),
            "Email deve ter um formato válido"
        );
        assert_eq!(resolver.resolve("nome", &pattern), "Formato inválido");
    }

    #[test]
    fn fixed_messages() {
        let resolver = FormErrorResolver::default();
        assert_eq!(
            resolver.resolve("cpf", &flags(&[ErrorFlag::DocumentInvalid])),
            "CPF inválido"
        );
        assert_eq!(
            resolver.resolve("telefone", &flags(&[ErrorFlag::PhoneInvalid])),
            "Telefone deve ter 10 ou 11 dígitos"
        );
        assert_eq!(
            resolver.resolve("email", &flags(&[ErrorFlag::EmailFormat])),
            "Email deve ter um formato válido"
        );
    }

    #[test]
    fn min_length_interpolates() {
        let resolver = FormErrorResolver::default();
        let message = resolver.resolve(
            "nome",
            &flags(&[ErrorFlag::MinLength {
                required_length: 3,
                actual_length: 1,
            }]),
        );
        assert_eq!(message, "Campo deve ter pelo menos 3 caracteres");
        assert!(message.contains('3'));
    }

    #[test]
    fn no_flags_is_empty() {
        let resolver = FormErrorResolver::default();
        assert_eq!(resolver.resolve("nome", &FieldErrors::new()), "");
    }

    #[test]
    fn priority_order() {
        let resolver = FormErrorResolver::default();
        let all = flags(&[
            ErrorFlag::MinLength {
                required_length: 2,
                actual_length: 1,
            },
            ErrorFlag::EmailFormat,
            ErrorFlag::PhoneInvalid,
            ErrorFlag::DocumentInvalid,
            ErrorFlag::Pattern,
            ErrorFlag::Required,
        ]);
        assert_eq!(resolver.resolve("cpf", &all), "CPF é obrigatório");

        let mut rest = FieldErrors::new();
        for flag in all.iter().filter(|f| f.kind() != ErrorKind::Required) {
            rest.insert(flag.clone());
        }
        assert_eq!(
            resolver.resolve("cpf", &rest),
            "CPF deve estar no formato 000.000.000-00"
        );

        let document_and_email = flags(&[ErrorFlag::EmailFormat, ErrorFlag::DocumentInvalid]);
        assert_eq!(resolver.resolve("cpf", &document_and_email), "CPF inválido");
    }

    #[test]
    fn yaml_override_keeps_other_defaults() {
        let catalog = MessageCatalog::from_yaml_str(
            "document_invalid: Documento inválido\nlabels:\n  nome: Nome completo\n",
        )
        .unwrap();
        let resolver = FormErrorResolver::new(catalog);
        assert_eq!(
            resolver.resolve("cpf", &flags(&[ErrorFlag::DocumentInvalid])),
            "Documento inválido"
        );
        assert_eq!(
            resolver.resolve("nome", &flags(&[ErrorFlag::Required])),
            "Nome completo é obrigatório"
        );
        // The labels map was replaced as a whole.
        assert_eq!(
            resolver.resolve("cpf", &flags(&[ErrorFlag::Required])),
            "Cpf é obrigatório"
        );
        assert_eq!(
            resolver.resolve("telefone", &flags(&[ErrorFlag::PhoneInvalid])),
            "Telefone deve ter 10 ou 11 dígitos"
        );
    }

    #[test]
    fn load_json_and_yaml_files() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("messages.json");
        std::fs::write(&json_path, r#"{"email_format": "E-mail inválido"}"#).unwrap();
        let catalog = MessageCatalog::load(&json_path).unwrap();
        assert_eq!(catalog.email_format, "E-mail inválido");
        assert_eq!(catalog.document_invalid, "CPF inválido");

        let yaml_path = dir.path().join("messages.yaml");
        std::fs::write(&yaml_path, "pattern_fallback: Formato incorreto\n").unwrap();
        let catalog = MessageCatalog::load(&yaml_path).unwrap();
        assert_eq!(catalog.pattern_fallback, "Formato incorreto");
    }

    #[test]
    fn load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            MessageCatalog::load(&missing),
            Err(CatalogError::Io(_))
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(matches!(MessageCatalog::load(&bad), Err(CatalogError::Json(_))));
    }

    #[test]
    fn capitalize() {
        assert_eq!(capitalize_first("telefone"), "Telefone");
        assert_eq!(capitalize_first("élan"), "Élan");
        assert_eq!(capitalize_first(""), "");
    }
}
