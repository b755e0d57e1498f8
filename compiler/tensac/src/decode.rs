//! JSON syntax trees from the external parser.
//!
//! Every node is an object tagged by `"type"`. Children live under the
//! field names the parser uses (`value`, `path`, `argument`,
//! `functionName`, `list`, `operator`, `left`, `right`). An optional
//! `"span": {"start", "end"}` carries byte offsets into the source.
//! Unknown tags decode to `Unrecognized` so newer parsers keep working.

use serde_json::{Map, Value as Json};
use tensa_ir::{Span, TensorLiteral, TensorLiteralError, Token, TokenKind};
use thiserror::Error;

/// Why a JSON document is not a syntax tree.
///
/// `path` locates the offending node, e.g. `$.value[1].left`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path}: expected a token object with a string \"type\"")]
    NotAToken { path: String },
    #[error("{path}: missing field '{field}'")]
    MissingField { path: String, field: &'static str },
    #[error("{path}: expected {expected}")]
    WrongType { path: String, expected: &'static str },
    #[error("{path}: nested arrays have uneven lengths")]
    Ragged { path: String },
    #[error("{path}: {source}")]
    Tensor {
        path: String,
        source: TensorLiteralError,
    },
}

/// Parse `text` and decode the root token.
pub fn decode_str(text: &str) -> Result<Token, DecodeError> {
    let json: Json = serde_json::from_str(text)?;
    decode(&json)
}

pub fn decode(json: &Json) -> Result<Token, DecodeError> {
    token(json, "$")
}

fn token(json: &Json, path: &str) -> Result<Token, DecodeError> {
    let not_a_token = || DecodeError::NotAToken {
        path: path.to_string(),
    };
    let node = json.as_object().ok_or_else(not_a_token)?;
    let tag = node.get("type").and_then(Json::as_str).ok_or_else(not_a_token)?;
    let fields = Fields { node, path };

    let kind = match tag {
        "Program" => TokenKind::Program(fields.token_list("value")?),
        "Assignment" => TokenKind::Assignment {
            path: fields.boxed("path")?,
            value: fields.boxed("value")?,
        },
        "Reference" => TokenKind::Reference(fields.boxed("value")?),
        "Path" => TokenKind::Path(fields.string_list("value")?),
        "Function" => TokenKind::Function {
            argument: fields.string("argument")?,
            body: fields.boxed("value")?,
        },
        "FunctionApplication" => TokenKind::FunctionApplication {
            function_name: fields.string("functionName")?,
            argument: fields.boxed("argument")?,
        },
        "FunctionComposition" => TokenKind::FunctionComposition(fields.string_list("list")?),
        "BinaryOperation" => TokenKind::BinaryOperation {
            operator: fields.string("operator")?,
            left: fields.boxed("left")?,
            right: fields.boxed("right")?,
        },
        "UnaryOperation" => TokenKind::UnaryOperation {
            operator: fields.string("operator")?,
            operand: fields.boxed("value")?,
        },
        "ImplicitConversion" => TokenKind::ImplicitConversion(fields.boxed("value")?),
        "Tensor" => {
            let literal = tensor_literal(fields.get("value")?, &fields.child_path("value"))?;
            TokenKind::Tensor(literal)
        }
        "Object" => TokenKind::Object(fields.boxed("value")?),
        other => {
            tracing::debug!(path, tag = other, "unknown token type");
            TokenKind::Unrecognized(other.to_string())
        }
    };

    Ok(Token::new(kind, span(node, path)?))
}

struct Fields<'a> {
    node: &'a Map<String, Json>,
    path: &'a str,
}

impl<'a> Fields<'a> {
    fn get(&self, field: &'static str) -> Result<&'a Json, DecodeError> {
        self.node.get(field).ok_or_else(|| DecodeError::MissingField {
            path: self.path.to_string(),
            field,
        })
    }

    fn child_path(&self, field: &str) -> String {
        format!("{}.{field}", self.path)
    }

    fn wrong_type(&self, field: &str, expected: &'static str) -> DecodeError {
        DecodeError::WrongType {
            path: self.child_path(field),
            expected,
        }
    }

    fn boxed(&self, field: &'static str) -> Result<Box<Token>, DecodeError> {
        token(self.get(field)?, &self.child_path(field)).map(Box::new)
    }

    fn string(&self, field: &'static str) -> Result<String, DecodeError> {
        self.get(field)?
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| self.wrong_type(field, "a string"))
    }

    fn array(&self, field: &'static str) -> Result<&'a Vec<Json>, DecodeError> {
        self.get(field)?
            .as_array()
            .ok_or_else(|| self.wrong_type(field, "an array"))
    }

    fn token_list(&self, field: &'static str) -> Result<Vec<Token>, DecodeError> {
        let base = self.child_path(field);
        self.array(field)?
            .iter()
            .enumerate()
            .map(|(i, item)| token(item, &format!("{base}[{i}]")))
            .collect()
    }

    fn string_list(&self, field: &'static str) -> Result<Vec<String>, DecodeError> {
        let base = self.child_path(field);
        self.array(field)?
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(ToString::to_string)
                    .ok_or_else(|| DecodeError::WrongType {
                        path: format!("{base}[{i}]"),
                        expected: "a string",
                    })
            })
            .collect()
    }
}

fn span(node: &Map<String, Json>, path: &str) -> Result<Span, DecodeError> {
    let Some(span) = node.get("span") else {
        return Ok(Span::DUMMY);
    };
    let offset = |field: &str| {
        span.get(field)
            .and_then(Json::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| DecodeError::WrongType {
                path: format!("{path}.span.{field}"),
                expected: "a byte offset",
            })
    };
    Ok(Span::new(offset("start")?, offset("end")?))
}

/// A number, or nested arrays of numbers packed row-major.
fn tensor_literal(json: &Json, path: &str) -> Result<TensorLiteral, DecodeError> {
    if let Some(n) = json.as_f64() {
        return Ok(TensorLiteral::scalar(n));
    }
    let Some(items) = json.as_array() else {
        return Err(DecodeError::WrongType {
            path: path.to_string(),
            expected: "a number or an array of numbers",
        });
    };

    let mut shape = vec![items.len()];
    let mut first = items;
    while let Some(Json::Array(inner)) = first.first() {
        shape.push(inner.len());
        first = inner;
    }

    // The guessed shape is unchecked until flatten succeeds, so its product
    // may overflow; do not preallocate from it.
    let mut data = Vec::new();
    flatten(items, &shape, path, &mut data)?;
    TensorLiteral::new(shape, data).map_err(|source| DecodeError::Tensor {
        path: path.to_string(),
        source,
    })
}

fn flatten(
    items: &[Json],
    shape: &[usize],
    path: &str,
    data: &mut Vec<f64>,
) -> Result<(), DecodeError> {
    let ragged = || DecodeError::Ragged {
        path: path.to_string(),
    };
    let Some((&len, rest)) = shape.split_first() else {
        return Err(ragged());
    };
    if items.len() != len {
        return Err(ragged());
    }
    for (i, item) in items.iter().enumerate() {
        match item {
            Json::Number(n) if rest.is_empty() => {
                data.push(n.as_f64().ok_or_else(ragged)?);
            }
            Json::Array(inner) if !rest.is_empty() => {
                flatten(inner, rest, &format!("{path}[{i}]"), data)?;
            }
            Json::Number(_) | Json::Array(_) => return Err(ragged()),
            _ => {
                return Err(DecodeError::WrongType {
                    path: format!("{path}[{i}]"),
                    expected: "a number",
                })
            }
        }
    }
    Ok(())
}
