//! # cadastro-cli — Command-Line Surface for cadastro-core
//!
//! Provides the `cadastro` command. Argument parsing lives in the
//! subcommand modules; every handler delegates to `cadastro-core` and only
//! formats the result.
//!
//! ## Subcommands
//!
//! - `cadastro format cpf|telefone <value>`: apply a mask.
//! - `cadastro unmask <value>`: recover the digits.
//! - `cadastro validate cpf|telefone <value>`: run a field rule.
//! - `cadastro check ...`: validate a whole pessoa form.
//! - `cadastro lookup <cpf>`: query the sample registry.
//!
//! ## Exit Codes
//!
//! `0` on success or a valid value, `1` when the value or form is invalid
//! or the lookup fails, `2` on usage errors (from clap).

pub mod check;
pub mod format;
pub mod lookup;
pub mod validate;

use std::io::Write;
use std::path::Path;

use cadastro_core::{CadastroError, FormErrorResolver, MessageCatalog};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Emit JSON instead of plain text.
    pub json: bool,
    pub resolver: FormErrorResolver,
}

impl Context {
    /// Build the context, loading a message catalog override if given.
    ///
    /// # Errors
    ///
    /// Returns [`CadastroError::Catalog`] if the catalog file cannot be
    /// read or parsed.
    pub fn load(json: bool, messages: Option<&Path>) -> Result<Self, CadastroError> {
        let catalog = match messages {
            Some(path) => MessageCatalog::load(path)?,
            None => MessageCatalog::default(),
        };
        Ok(Self {
            json,
            resolver: FormErrorResolver::new(catalog),
        })
    }

    /// Write either the JSON value or the plain line.
    pub(crate) fn emit(
        &self,
        out: &mut dyn Write,
        json: serde_json::Value,
        plain: &str,
    ) -> anyhow::Result<()> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string(&json)?)?;
        } else {
            writeln!(out, "{plain}")?;
        }
        Ok(())
    }
}
