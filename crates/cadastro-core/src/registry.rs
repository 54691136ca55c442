//! # Pessoa Registry
//!
//! An in-memory store of person records keyed by CPF, applying the same
//! acceptance rules as the development backend the application talks to:
//!
//! - lookups and registrations require a CPF with valid check digits,
//! - CPF and email are unique (email compared case-insensitively),
//! - stored records are normalized (trimmed name, masked CPF, lowercased
//!   email, trimmed phone).
//!
//! Records live for as long as the registry value does; nothing is
//! persisted.

use lazy_static::lazy_static;
use regex::Regex;

use crate::cpf::Cpf;
use crate::error::RegistryError;
use crate::mask;
use crate::pessoa::PessoaDados;

lazy_static! {
    static ref CONTACT_EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// In-memory person records, in registration order.
#[derive(Debug, Clone, Default)]
pub struct PessoaRegistry {
    pessoas: Vec<PessoaDados>,
}

impl PessoaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the sample records used in development.
    pub fn seeded() -> Self {
        let sample = [
            (
                "João Silva Santos",
                "123.456.789-09",
                "masculino",
                "joao.silva@email.com",
                "(11) 99999-8888",
            ),
            (
                "Maria Oliveira Costa",
                "607.590.260-09",
                "feminino",
                "maria.oliveira@email.com",
                "(11) 88888-7777",
            ),
            (
                "Ana Carolina Ferreira",
                "987.654.321-00",
                "feminino",
                "ana.ferreira@email.com",
                "(11) 66666-5555",
            ),
        ];

        let pessoas = sample
            .into_iter()
            .map(|(nome, cpf, sexo, email, telefone)| PessoaDados {
                nome: nome.to_string(),
                cpf: cpf.to_string(),
                sexo: sexo.to_string(),
                email: email.to_string(),
                telefone: telefone.to_string(),
            })
            .collect();
        Self { pessoas }
    }

    /// Look up a record by CPF (masked or not).
    ///
    /// # Errors
    ///
    /// [`RegistryError::CpfRequired`] for a blank CPF,
    /// [`RegistryError::CpfInvalid`] when the check digits fail, and
    /// [`RegistryError::NotFound`] when no record matches.
    pub fn find(&self, cpf: &str) -> Result<&PessoaDados, RegistryError> {
        if cpf.trim().is_empty() {
            return Err(RegistryError::CpfRequired);
        }
        let cpf = Cpf::new(cpf).map_err(|_| RegistryError::CpfInvalid)?;
        self.position(cpf.as_str())
            .map(|index| &self.pessoas[index])
            .ok_or(RegistryError::NotFound)
    }

    /// Register a new record and return it as stored.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Incomplete`] when any field is blank,
    /// [`RegistryError::CpfInvalid`], [`RegistryError::CpfConflict`],
    /// [`RegistryError::EmailInvalid`], or [`RegistryError::EmailConflict`].
    pub fn register(&mut self, pessoa: PessoaDados) -> Result<PessoaDados, RegistryError> {
        let fields = [
            &pessoa.nome,
            &pessoa.cpf,
            &pessoa.sexo,
            &pessoa.email,
            &pessoa.telefone,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(RegistryError::Incomplete);
        }

        let cpf = Cpf::new(pessoa.cpf.as_str()).map_err(|_| RegistryError::CpfInvalid)?;
        if self.position(cpf.as_str()).is_some() {
            return Err(RegistryError::CpfConflict);
        }

        let email = pessoa.email.trim().to_lowercase();
        if !CONTACT_EMAIL_REGEX.is_match(&email) {
            return Err(RegistryError::EmailInvalid);
        }
        if self.pessoas.iter().any(|p| p.email.to_lowercase() == email) {
            return Err(RegistryError::EmailConflict);
        }

        let stored = PessoaDados {
            nome: pessoa.nome.trim().to_string(),
            cpf: cpf.formatted(),
            sexo: pessoa.sexo,
            email,
            telefone: pessoa.telefone.trim().to_string(),
        };
        tracing::info!(cpf = %stored.cpf, "pessoa registered");
        self.pessoas.push(stored.clone());
        Ok(stored)
    }

    /// Remove the record with this CPF and return it.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] when no record matches.
    pub fn remove(&mut self, cpf: &str) -> Result<PessoaDados, RegistryError> {
        let digits = mask::remove_mask(cpf);
        let index = self.position(&digits).ok_or(RegistryError::NotFound)?;
        let removed = self.pessoas.remove(index);
        tracing::info!(cpf = %removed.cpf, "pessoa removed");
        Ok(removed)
    }

    /// Every record, in registration order.
    pub fn list(&self) -> &[PessoaDados] {
        &self.pessoas
    }

    pub fn len(&self) -> usize {
        self.pessoas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pessoas.is_empty()
    }

    fn position(&self, digits: &str) -> Option<usize> {
        if digits.is_empty() {
            return None;
        }
        self.pessoas
            .iter()
            .position(|p| mask::remove_mask(p.cpf.as_str()) == digits)
    }
}
