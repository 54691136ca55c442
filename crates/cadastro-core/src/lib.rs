//! # cadastro-core — Pessoa Registration Core
//!
//! The non-UI core of the pessoa registration app: everything that turns
//! what a user types into a display string, a validation verdict, or a
//! message.
//!
//! ## Modules
//!
//! - [`mask`]: strip non-digits and lay out CPF and phone numbers,
//!   progressively for partial input.
//! - [`input`]: the same masks applied in place to a text field while
//!   typing, through the [`InputTarget`] capability.
//! - [`cpf`]: modulo-11 check-digit validation and the [`Cpf`] newtype.
//! - [`telefone`]: 10/11-digit phone numbers and the [`Telefone`] newtype.
//! - [`validation`]: rules as pure predicates returning a tagged optional
//!   [`ErrorFlag`].
//! - [`messages`]: resolution of a field's active flags to one message.
//! - [`form`]: the registration and lookup forms.
//! - [`pessoa`] and [`registry`]: the person record and an in-memory
//!   registry applying the backend's acceptance rules.
//!
//! ## Crate Policy
//!
//! - Masking and validation never fail: bad input is an ordinary result
//!   (an empty string or a flag), not an error.
//! - `Result` is reserved for constructors, catalog loading, form
//!   submission, and registry operations.
//! - No `unsafe` code.

pub mod cpf;
pub mod error;
pub mod form;
pub mod input;
pub mod mask;
pub mod messages;
pub mod pessoa;
pub mod registry;
pub mod telefone;
pub mod validation;

// Re-export primary types for ergonomic imports.
pub use cpf::{check_digits, is_valid_cpf, Cpf};
pub use error::{CadastroError, CatalogError, FormError, RegistryError, ValidationError};
pub use form::{Field, FieldConfig, FormControl, PessoaForm, SearchForm};
pub use input::{apply_cpf_mask, apply_telefone_mask, InputTarget, MaskKind, TextInput};
pub use mask::{format_cpf, format_telefone, remove_mask, strip_non_digits};
pub use messages::{FormErrorResolver, MessageCatalog};
pub use pessoa::{PessoaDados, Sexo};
pub use registry::PessoaRegistry;
pub use telefone::{is_valid_telefone, Telefone, TelefoneKind};
pub use validation::{ErrorFlag, ErrorKind, FieldErrors, Pattern, Rule, Validator};
