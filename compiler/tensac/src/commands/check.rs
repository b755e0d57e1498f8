//! The `check` command: evaluate many trees and count their issues.

use std::sync::Arc;

use rayon::prelude::*;
use tensa_eval::Interpreter;
use tensa_runtime::RuntimeEnvironment;

use super::{decode_ast, read_file, CliError};

/// Outcome of checking one file.
#[derive(Debug)]
pub struct CheckReport {
    pub path: String,
    /// Issue count, or why the file could not be evaluated.
    pub outcome: Result<usize, CliError>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        matches!(self.outcome, Ok(0))
    }
}

/// Evaluate every file independently, in parallel, in a fresh run each.
///
/// Reports come back in the order of `paths`.
pub fn check_files(paths: &[String]) -> Vec<CheckReport> {
    let interpreter = Interpreter::new(Arc::new(RuntimeEnvironment::standard()));
    paths
        .par_iter()
        .map(|path| CheckReport {
            path: path.clone(),
            outcome: check_one(&interpreter, path),
        })
        .collect()
}

fn check_one(interpreter: &Interpreter, path: &str) -> Result<usize, CliError> {
    let root = decode_ast(&read_file(path)?, path)?;
    let issues = interpreter.interpret(&root).issues.len();
    tracing::debug!(path, issues, "checked");
    Ok(issues)
}
