//! # Lookup Subcommand
//!
//! Looks a CPF up in the sample registry through the lookup form, so the
//! same field messages apply before the registry is queried.

use std::io::Write;

use clap::Args;
use serde_json::json;

use cadastro_core::{PessoaRegistry, SearchForm};

use crate::Context;

/// Arguments for the lookup subcommand.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// CPF to look up, masked or not.
    pub cpf: String,
}

/// Look the CPF up. Returns exit code 0 when found, 1 otherwise.
pub fn run_lookup(args: &LookupArgs, ctx: &Context, out: &mut dyn Write) -> anyhow::Result<u8> {
    let mut search = SearchForm::new(ctx.resolver.clone());
    search.set_cpf(args.cpf.as_str());

    let digits = match search.submit() {
        Ok(digits) => digits,
        Err(err) => {
            let message = search.error_message();
            ctx.emit(
                out,
                json!({ "found": false, "errors": err.errors, "message": message }),
                &message,
            )?;
            return Ok(1);
        }
    };

    let registry = PessoaRegistry::seeded();
    match registry.find(&digits) {
        Ok(pessoa) => {
            let sexo = pessoa.sexo().map_or(pessoa.sexo.as_str(), |s| s.label());
            let plain = format!(
                "Nome: {}\nCPF: {}\nSexo: {}\nE-mail: {}\nTelefone: {}",
                pessoa.nome, pessoa.cpf, sexo, pessoa.email, pessoa.telefone
            );
            ctx.emit(out, json!({ "found": true, "pessoa": pessoa }), &plain)?;
            Ok(0)
        }
        Err(err) => {
            tracing::info!(status = err.status(), "lookup failed: {}", err.title());
            let plain = format!("{}: {}", err.title(), err);
            ctx.emit(
                out,
                json!({ "found": false, "title": err.title(), "message": err.to_string() }),
                &plain,
            )?;
            Ok(1)
        }
    }
}
