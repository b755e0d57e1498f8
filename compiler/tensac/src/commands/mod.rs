//! Command handlers for the `tensa` binary.
//!
//! Handlers return their rendered output instead of printing, so `main`
//! owns stdout and exit codes and the integration tests can call them
//! directly.

use tensa_ir::Token;
use thiserror::Error;

use crate::decode::{decode_str, DecodeError};

mod check;
mod doc;
mod run;

pub use check::{check_files, CheckReport};
pub use doc::render_doc;
pub use run::{parse_run_args, run_file, run_source, RunOptions, RunReport};

/// Failure of a command, reported on stderr.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Decode { path: String, source: DecodeError },
    #[error("cannot render output: {0}")]
    Render(#[from] serde_json::Error),
    #[error("no runtime entry named '{0}'")]
    UnknownName(String),
    #[error("{0}")]
    Usage(String),
}

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

/// Decode a syntax tree, naming `path` in errors.
pub(crate) fn decode_ast(text: &str, path: &str) -> Result<Token, CliError> {
    decode_str(text).map_err(|source| CliError::Decode {
        path: path.to_string(),
        source,
    })
}
