//! # Format and Unmask Subcommands
//!
//! `cadastro format cpf|telefone <value>` prints the masked value;
//! `cadastro unmask <value>` prints its digits.

use std::io::Write;

use clap::{Args, ValueEnum};
use serde_json::json;

use cadastro_core::{format_cpf, format_telefone, remove_mask};

use crate::Context;

/// A masked field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldKind {
    Cpf,
    Telefone,
}

/// Arguments for the format subcommand.
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Which mask to apply.
    #[arg(value_enum)]
    pub kind: FieldKind,

    /// Value to format; non-digits are ignored.
    pub value: String,
}

/// Arguments for the unmask subcommand.
#[derive(Args, Debug)]
pub struct UnmaskArgs {
    /// Masked value.
    pub value: String,
}

/// Print the formatted value. Always succeeds.
pub fn run_format(args: &FormatArgs, ctx: &Context, out: &mut dyn Write) -> anyhow::Result<u8> {
    let formatted = match args.kind {
        FieldKind::Cpf => format_cpf(args.value.as_str()),
        FieldKind::Telefone => format_telefone(args.value.as_str()),
    };
    tracing::debug!(input = %args.value, output = %formatted, "formatted value");
    ctx.emit(out, json!({ "formatted": formatted }), &formatted)?;
    Ok(0)
}

/// Print the digits of the value. Always succeeds.
pub fn run_unmask(args: &UnmaskArgs, ctx: &Context, out: &mut dyn Write) -> anyhow::Result<u8> {
    let digits = remove_mask(args.value.as_str());
    ctx.emit(out, json!({ "digits": digits }), &digits)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(kind: FieldKind, value: &str, json: bool) -> String {
        let ctx = Context {
            json,
            ..Context::default()
        };
        let mut out = Vec::new();
        let args = FormatArgs {
            kind,
            value: value.to_string(),
        };
        assert_eq!(run_format(&args, &ctx, &mut out).unwrap(), 0);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn format_cpf_plain() {
        assert_eq!(format(FieldKind::Cpf, "12345678901", false), "123.456.789-01\n");
    }

    #[test]
    fn format_telefone_json() {
        assert_eq!(
            format(FieldKind::Telefone, "11987654321", true),
            "{\"formatted\":\"(11) 98765-4321\"}\n"
        );
    }

    #[test]
    fn unmask_prints_digits() {
        let mut out = Vec::new();
        let args = UnmaskArgs {
            value: "(12) 3456-7890".into(),
        };
        run_unmask(&args, &Context::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1234567890\n");
    }
}
