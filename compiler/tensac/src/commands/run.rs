//! The `run` command: evaluate one syntax tree and print the outcome.

use std::sync::Arc;

use tensa_eval::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use tensa_runtime::RuntimeEnvironment;

use super::{decode_ast, read_file, CliError};
use crate::output::{render_json, render_text, OutputFormat};

/// Options of `tensa run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Source text the tree was parsed from, for issue positions.
    pub source: Option<String>,
    pub format: OutputFormat,
    /// `None` disables the closure depth limit.
    pub max_call_depth: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            source: None,
            format: OutputFormat::default(),
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
        }
    }
}

/// Rendered outcome of one run.
#[derive(Debug)]
pub struct RunReport {
    pub rendered: String,
    pub issue_count: usize,
}

/// Parse `<ast.json> [--source=<file>] [--format=json|text] [--max-depth=N|none]`.
pub fn parse_run_args(args: &[String]) -> Result<(String, RunOptions), CliError> {
    let mut options = RunOptions::default();
    let mut path = None;

    for arg in args {
        if let Some(source) = arg.strip_prefix("--source=") {
            options.source = Some(source.to_string());
        } else if let Some(format) = arg.strip_prefix("--format=") {
            options.format = format.parse().map_err(CliError::Usage)?;
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            options.max_call_depth = match depth {
                "none" => None,
                n => Some(n.parse().map_err(|_| {
                    CliError::Usage(format!("--max-depth expects a number or 'none', got '{n}'"))
                })?),
            };
        } else if arg.starts_with('-') {
            return Err(CliError::Usage(format!("unknown option '{arg}'")));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(CliError::Usage(format!("unexpected argument '{arg}'")));
        }
    }

    let path = path.ok_or_else(|| CliError::Usage("missing syntax tree file".to_string()))?;
    Ok((path, options))
}

/// Read, evaluate and render the tree in `path`.
pub fn run_file(path: &str, options: &RunOptions) -> Result<RunReport, CliError> {
    let ast = read_file(path)?;
    let source = options.source.as_deref().map(read_file).transpose()?;
    run_source(&ast, source.as_deref(), options, path)
}

/// Evaluate a JSON syntax tree against the standard runtime.
///
/// `file` only labels issue lines in text output.
pub fn run_source(
    ast_json: &str,
    source: Option<&str>,
    options: &RunOptions,
    file: &str,
) -> Result<RunReport, CliError> {
    let root = decode_ast(ast_json, file)?;

    let mut builder = Interpreter::builder(Arc::new(RuntimeEnvironment::standard()))
        .max_call_depth(options.max_call_depth);
    if let Some(text) = source {
        builder = builder.source(text);
    }
    let interpretation = builder.build().interpret(&root);

    let rendered = match options.format {
        OutputFormat::Json => render_json(&interpretation)?,
        OutputFormat::Text => render_text(&interpretation, file),
    };
    Ok(RunReport {
        rendered,
        issue_count: interpretation.issues.len(),
    })
}
