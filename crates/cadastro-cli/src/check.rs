//! # Check Subcommand
//!
//! Fills the registration form from flags and/or a JSON file, submits it,
//! and prints one line per field with an error.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use serde_json::json;

use cadastro_core::{Field, PessoaDados, PessoaForm};

use crate::Context;

/// Arguments for the check subcommand.
///
/// Flags override the values read from `--file`.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// JSON file with a pessoa record.
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(long)]
    pub nome: Option<String>,

    #[arg(long)]
    pub cpf: Option<String>,

    /// One of masculino, feminino, outro, nao_informar.
    #[arg(long)]
    pub sexo: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub telefone: Option<String>,
}

impl CheckArgs {
    fn overrides(&self) -> [(Field, Option<&String>); 5] {
        [
            (Field::Nome, self.nome.as_ref()),
            (Field::Cpf, self.cpf.as_ref()),
            (Field::Sexo, self.sexo.as_ref()),
            (Field::Email, self.email.as_ref()),
            (Field::Telefone, self.telefone.as_ref()),
        ]
    }
}

/// Check the form. Returns exit code 0 when valid, 1 otherwise.
pub fn run_check(args: &CheckArgs, ctx: &Context, out: &mut dyn Write) -> anyhow::Result<u8> {
    let mut form = PessoaForm::new(ctx.resolver.clone());

    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let pessoa: PessoaDados = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        form.fill(&pessoa);
    }
    for (field, value) in args.overrides() {
        if let Some(value) = value {
            form.set_value(field, value.as_str());
        }
    }

    match form.submit() {
        Ok(pessoa) => {
            ctx.emit(out, json!({ "valid": true, "pessoa": pessoa }), "ok")?;
            Ok(0)
        }
        Err(err) => {
            let messages: Vec<(Field, String)> = Field::ALL
                .into_iter()
                .map(|field| (field, form.error_message(field)))
                .filter(|(_, message)| !message.is_empty())
                .collect();
            tracing::debug!(fields = messages.len(), "form rejected");

            if ctx.json {
                let by_field: serde_json::Map<String, serde_json::Value> = messages
                    .iter()
                    .map(|(field, message)| (field.to_string(), json!(message)))
                    .collect();
                let value = json!({ "valid": false, "errors": err.errors, "messages": by_field });
                writeln!(out, "{}", serde_json::to_string(&value)?)?;
            } else {
                for (field, message) in &messages {
                    writeln!(out, "{field}: {message}")?;
                }
            }
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(args: &CheckArgs, json: bool) -> (u8, String) {
        let ctx = Context {
            json,
            ..Context::default()
        };
        let mut out = Vec::new();
        let code = run_check(args, &ctx, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_form_lists_required_fields() {
        let (code, out) = check(&CheckArgs::default(), false);
        assert_eq!(code, 1);
        assert_eq!(
            out,
            "nome: Nome é obrigatório\ncpf: CPF é obrigatório\nsexo: Sexo é obrigatório\nemail: E-mail é obrigatório\n"
        );
    }

    #[test]
    fn complete_form_is_ok() {
        let args = CheckArgs {
            nome: Some("Ana Carolina Ferreira".into()),
            cpf: Some("987.654.321-00".into()),
            sexo: Some("feminino".into()),
            email: Some("ana.ferreira@email.com".into()),
            ..CheckArgs::default()
        };
        assert_eq!(check(&args, false), (0, "ok\n".into()));
    }

    #[test]
    fn file_with_flag_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pessoa.json");
        std::fs::write(
            &path,
            r#"{"nome":"M","cpf":"607.590.260-09","sexo":"feminino","email":"maria@email.com","telefone":"(11) 8888"}"#,
        )
        .unwrap();
        let args = CheckArgs {
            file: Some(path),
            telefone: Some("(11) 88888-7777".into()),
            ..CheckArgs::default()
        };
        let (code, out) = check(&args, true);
        assert_eq!(code, 1);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["errors"]["nome"]["minLength"]["requiredLength"], 2);
        assert_eq!(
            value["messages"]["nome"],
            "Campo deve ter pelo menos 2 caracteres"
        );
        assert!(value["messages"].get("telefone").is_none());
    }

    #[test]
    fn unreadable_file_is_error() {
        let args = CheckArgs {
            file: Some(PathBuf::from("/nonexistent/pessoa.json")),
            ..CheckArgs::default()
        };
        let mut out = Vec::new();
        assert!(run_check(&args, &Context::default(), &mut out).is_err());
    }
}
