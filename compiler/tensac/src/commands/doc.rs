//! The `doc` command: describe the standard runtime.

use std::fmt::Write as _;

use tensa_eval::operators::OPERATORS;
use tensa_runtime::{RuntimeBinding, RuntimeEnvironment};

use super::CliError;

/// List every runtime entry, or describe the one called `name`.
pub fn render_doc(runtime: &RuntimeEnvironment, name: Option<&str>) -> Result<String, CliError> {
    let mut out = String::new();
    match name {
        None => {
            let names = runtime.names();
            let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
            for name in names {
                let doc = runtime.doc(name).unwrap_or_default();
                let _ = writeln!(out, "{name:<width$}  {doc}");
            }
        }
        Some(name) => {
            let binding = runtime
                .binding(name)
                .ok_or_else(|| CliError::UnknownName(name.to_string()))?;
            let kind = match binding {
                RuntimeBinding::Function(_) => "function",
                RuntimeBinding::Constant(_) => "constant",
            };
            let _ = writeln!(out, "{name} ({kind})");
            let _ = writeln!(out, "  {}", runtime.doc(name).unwrap_or_default());
            if let RuntimeBinding::Constant(value) = binding {
                let _ = writeln!(out, "  value: {value}");
            }
            for &(arity, symbol, _) in OPERATORS.iter().filter(|row| row.2 == name) {
                let form = if arity == 1 { "unary" } else { "binary" };
                let _ = writeln!(out, "  operator: {symbol} ({form})");
            }
        }
    }
    Ok(out)
}
