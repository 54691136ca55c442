//! # Error Types
//!
//! Structured errors for the fallible parts of the crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Validation *outcomes* are not errors: masking functions return plain
//! strings and validation rules return `Option<ErrorFlag>`. The types here
//! cover the places where a caller asked for something that cannot be
//! produced: a validated newtype from bad input, a registry operation that
//! was rejected, a form submitted while invalid, or an unreadable message
//! catalog.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::validation::FieldErrors;

/// Top-level error type for the crate.
#[derive(Error, Debug)]
pub enum CadastroError {
    /// A validated newtype rejected its input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The registry rejected an operation.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A form was submitted with active errors.
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// A message catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Error returned by validated newtype constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is not a CPF with valid check digits.
    #[error("invalid CPF: {0:?}")]
    InvalidCpf(String),

    /// The value does not carry 10 or 11 phone digits.
    #[error("invalid telefone: {0:?}")]
    InvalidTelefone(String),

    /// The value is not one of the accepted `sexo` options.
    #[error("invalid sexo: {0:?}")]
    InvalidSexo(String),
}

/// Error returned by [`crate::registry::PessoaRegistry`] operations.
///
/// Each variant maps to the title, message, and status code the
/// development backend answered with for the same condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Lookup without a CPF.
    #[error("Parâmetro CPF deve ser fornecido")]
    CpfRequired,

    /// The CPF failed check-digit validation.
    #[error("O CPF fornecido não é válido")]
    CpfInvalid,

    /// No record carries the requested CPF.
    #[error("Nenhuma pessoa foi encontrada com o CPF fornecido")]
    NotFound,

    /// A registration left one or more fields blank.
    #[error("Todos os campos são obrigatórios")]
    Incomplete,

    /// Another record already uses this CPF.
    #[error("Já existe uma pessoa cadastrada com este CPF")]
    CpfConflict,

    /// The email address is not of the form `local@domain.tld`.
    #[error("O email fornecido não tem um formato válido")]
    EmailInvalid,

    /// Another record already uses this email address.
    #[error("Já existe uma pessoa cadastrada com este email")]
    EmailConflict,
}

impl RegistryError {
    /// Short heading shown above the message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::CpfRequired => "CPF é obrigatório",
            Self::CpfInvalid => "CPF inválido",
            Self::NotFound => "Pessoa não encontrada",
            Self::Incomplete => "Dados incompletos",
            Self::CpfConflict => "CPF já cadastrado",
            Self::EmailInvalid => "Email inválido",
            Self::EmailConflict => "Email já cadastrado",
        }
    }

    /// HTTP-style status code for the condition.
    pub fn status(&self) -> u16 {
        match self {
            Self::CpfRequired | Self::CpfInvalid | Self::Incomplete | Self::EmailInvalid => 400,
            Self::NotFound => 404,
            Self::CpfConflict | Self::EmailConflict => 409,
        }
    }
}

/// Error returned when a form is submitted while any field has errors.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Por favor, corrija os erros no formulário")]
pub struct FormError {
    /// Active flags per field name, for every field with errors.
    pub errors: BTreeMap<String, FieldErrors>,
}

/// Error while loading a [`crate::messages::MessageCatalog`] from disk.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid YAML for a catalog.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file is not valid JSON for a catalog.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_titles_and_status() {
        assert_eq!(RegistryError::CpfInvalid.title(), "CPF inválido");
        assert_eq!(RegistryError::CpfInvalid.status(), 400);
        assert_eq!(RegistryError::NotFound.status(), 404);
        assert_eq!(RegistryError::CpfConflict.status(), 409);
        assert_eq!(RegistryError::EmailConflict.title(), "Email já cadastrado");
    }

    #[test]
    fn registry_error_display_is_message() {
        assert_eq!(
            RegistryError::NotFound.to_string(),
            "Nenhuma pessoa foi encontrada com o CPF fornecido"
        );
    }

    #[test]
    fn cadastro_error_from_validation() {
        let err: CadastroError = ValidationError::InvalidCpf("123".into()).into();
        assert!(err.to_string().contains("invalid CPF"));
    }
}
