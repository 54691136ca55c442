//! # Pessoa Records
//!
//! The person record exchanged between the registration form, the lookup
//! page, and the registry. Fields are kept as the user typed them (masked
//! CPF and phone); validation happens in the form and the registry.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Options of the `sexo` select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sexo {
    Masculino,
    Feminino,
    Outro,
    NaoInformar,
}

impl Sexo {
    /// Every option, in display order.
    pub const ALL: [Sexo; 4] = [Self::Masculino, Self::Feminino, Self::Outro, Self::NaoInformar];

    /// Value sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Masculino => "masculino",
            Self::Feminino => "feminino",
            Self::Outro => "outro",
            Self::NaoInformar => "nao_informar",
        }
    }

    /// Label shown in the select.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Masculino => "Masculino",
            Self::Feminino => "Feminino",
            Self::Outro => "Outro",
            Self::NaoInformar => "Prefiro não informar",
        }
    }
}

impl std::fmt::Display for Sexo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sexo {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sexo| sexo.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidSexo(s.to_string()))
    }
}

/// A person record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PessoaDados {
    pub nome: String,
    pub cpf: String,
    pub sexo: String,
    pub email: String,
    #[serde(default)]
    pub telefone: String,
}

impl PessoaDados {
    /// The `sexo` field parsed as an option, if it is one.
    pub fn sexo(&self) -> Option<Sexo> {
        self.sexo.parse().ok()
    }
}
