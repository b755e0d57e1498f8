//! Operator symbols and the runtime capabilities that implement them.
//!
//! The evaluator never computes an operator itself. It maps the symbol and
//! the operator's arity to a capability name and invokes whatever the
//! runtime environment binds to that name.

/// Capability implementing a one-operand operator.
pub fn unary_function(symbol: &str) -> Option<&'static str> {
    match symbol {
        "'" => Some("ConvertToNative"),
        "-" => Some("Negative"),
        "/" => Some("Reciprocal"),
        _ => None,
    }
}

/// Capability implementing a two-operand operator.
pub fn binary_function(symbol: &str) -> Option<&'static str> {
    match symbol {
        "+" => Some("Add"),
        "-" => Some("Subtract"),
        "*" | "×" => Some("Multiply"),
        "/" | "÷" => Some("Divide"),
        "^" => Some("Power"),
        "%" => Some("Modulus"),
        "@" => Some("MatrixMultiply"),
        _ => None,
    }
}

/// Lookup by arity. Only arities 1 and 2 have operators.
pub fn operator_function(symbol: &str, arity: usize) -> Option<&'static str> {
    match arity {
        1 => unary_function(symbol),
        2 => binary_function(symbol),
        _ => None,
    }
}

/// Every `(arity, symbol, capability)` row, for listings.
pub const OPERATORS: &[(usize, &str, &str)] = &[
    (1, "'", "ConvertToNative"),
    (1, "-", "Negative"),
    (1, "/", "Reciprocal"),
    (2, "+", "Add"),
    (2, "-", "Subtract"),
    (2, "*", "Multiply"),
    (2, "×", "Multiply"),
    (2, "/", "Divide"),
    (2, "÷", "Divide"),
    (2, "^", "Power"),
    (2, "%", "Modulus"),
    (2, "@", "MatrixMultiply"),
];
