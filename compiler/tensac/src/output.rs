//! Rendering interpretations for the terminal and for editors.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value as Json};
use tensa_diagnostic::Issue;
use tensa_eval::Interpretation;
use tensa_value::Value;

/// How `run` prints its result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(format!("unknown format '{other}' (expected json or text)")),
        }
    }
}

/// `{result, issues, state}` as sent to an editor.
#[derive(Serialize)]
pub struct RunOutput<'a> {
    pub result: Json,
    pub issues: &'a [Issue],
    pub state: Json,
}

impl<'a> RunOutput<'a> {
    pub fn new(interpretation: &'a Interpretation) -> Self {
        RunOutput {
            result: value_to_json(&interpretation.result),
            issues: &interpretation.issues,
            state: value_to_json(&Value::record(interpretation.state.to_record())),
        }
    }
}

/// JSON form of a runtime value.
///
/// Tensors become `{"shape", "data"}`, functions and the error sentinel
/// become their display strings. Non-finite numbers have no JSON form
/// and print as `null`.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Absent => Json::Null,
        Value::Number(n) => json!(n),
        Value::Str(s) => Json::String(s.to_string()),
        Value::Tensor(t) => json!({ "shape": t.shape(), "data": t.data() }),
        Value::List(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Record(record) => Json::Object(
            record
                .iter()
                .map(|(key, value)| (key.to_string(), value_to_json(value)))
                .collect(),
        ),
        Value::Function(_) | Value::Error => Json::String(value.to_string()),
    }
}

pub fn render_json(interpretation: &Interpretation) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RunOutput::new(interpretation))
}

/// Human-readable form: one line per top-level binding, then issues.
pub fn render_text(interpretation: &Interpretation, file: &str) -> String {
    let mut out = String::new();
    match &interpretation.result {
        Value::Record(record) => {
            for (key, value) in record.iter() {
                let _ = writeln!(out, "{key} = {value}");
            }
        }
        other => {
            let _ = writeln!(out, "{other}");
        }
    }
    for issue in &interpretation.issues {
        let _ = writeln!(out, "{file}:{issue}");
    }
    out
}
