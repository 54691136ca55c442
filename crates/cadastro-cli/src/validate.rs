//! # Validate Subcommand
//!
//! Runs a single field rule and prints `ok` or the resolved message.

use std::io::Write;

use clap::Args;
use serde_json::json;

use cadastro_core::validation::{self, Validator};
use cadastro_core::{ErrorFlag, Field, FieldErrors};

use crate::format::FieldKind;
use crate::Context;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Which rule to run.
    #[arg(value_enum)]
    pub kind: FieldKind,

    /// Value to check, masked or not.
    pub value: String,
}

/// Validate the value. Returns exit code 0 when valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs, ctx: &Context, out: &mut dyn Write) -> anyhow::Result<u8> {
    let value = Some(args.value.as_str());
    let (field, flag): (Field, Option<ErrorFlag>) = match args.kind {
        FieldKind::Cpf => (Field::Cpf, validation::cpf().validate(value)),
        FieldKind::Telefone => (Field::Telefone, validation::telefone().validate(value)),
    };

    let Some(flag) = flag else {
        ctx.emit(out, json!({ "valid": true }), "ok")?;
        return Ok(0);
    };

    let errors: FieldErrors = [flag].into_iter().collect();
    let message = ctx.resolver.resolve(field.as_str(), &errors);
    tracing::debug!(field = %field, "value rejected");
    ctx.emit(
        out,
        json!({ "valid": false, "errors": errors, "message": message }),
        &message,
    )?;
    Ok(1)
}
