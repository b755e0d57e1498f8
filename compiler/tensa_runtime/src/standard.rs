//! The standard capability library.
//!
//! Unary capabilities take one tensor-like value. Binary ones take the
//! `{a, b}` record the evaluator builds for operators. Elementwise binary
//! operations require equal shapes unless one side is a scalar, which is
//! broadcast over the other.

use tensa_value::{InvokeError, Tensor, TensorError, Value};

use crate::convert::{pair_args, tensor_arg, to_native};
use crate::RuntimeEnvironment;

pub(crate) fn register(env: &mut RuntimeEnvironment) {
    env.define_function(
        "Tensor",
        "Converts a number or rectangular nested list into a tensor.",
        |v| Ok(Value::Tensor(tensor_arg(&v)?)),
    );
    env.define_function(
        "ConvertToNative",
        "Converts a tensor into a number (rank 0) or nested lists.",
        |v| Ok(to_native(&*tensor_arg(&v)?)),
    );

    elementwise(env, "Negative", "Negates every element.", |x| -x);
    elementwise(env, "Reciprocal", "Computes 1/x for every element.", f64::recip);
    elementwise(env, "Abs", "Absolute value of every element.", f64::abs);
    elementwise(env, "Sqrt", "Square root of every element.", f64::sqrt);
    elementwise(env, "Exp", "e raised to every element.", f64::exp);
    elementwise(env, "Log", "Natural logarithm of every element.", f64::ln);

    binary(env, "Add", "Adds a and b elementwise.", |a, b| a + b);
    binary(env, "Subtract", "Subtracts b from a elementwise.", |a, b| a - b);
    binary(env, "Multiply", "Multiplies a and b elementwise.", |a, b| a * b);
    binary(env, "Divide", "Divides a by b elementwise.", |a, b| a / b);
    binary(env, "Power", "Raises a to the power b elementwise.", f64::powf);
    binary(
        env,
        "Modulus",
        "Floored remainder of a divided by b; the sign follows b.",
        |a, b| a - b * (a / b).floor(),
    );
    env.define_function(
        "MatrixMultiply",
        "Matrix product of two rank-2 tensors a and b.",
        |v| {
            let (a, b) = pair_args(&v)?;
            let product = matmul(&*tensor_arg(a)?, &*tensor_arg(b)?)?;
            Ok(Value::tensor(product))
        },
    );

    reduction(env, "Sum", "Sum of all elements.", |t| Ok(t.data().iter().sum()));
    reduction(env, "Mean", "Arithmetic mean of all elements.", |t| {
        Ok(t.data().iter().sum::<f64>() / t.len() as f64)
    });
    reduction(env, "Max", "Largest element.", |t| {
        t.data().iter().copied().reduce(f64::max).ok_or(TensorError::Empty)
    });
    reduction(env, "Min", "Smallest element.", |t| {
        t.data().iter().copied().reduce(f64::min).ok_or(TensorError::Empty)
    });

    env.define_function(
        "Transpose",
        "Swaps the axes of a rank-2 tensor; scalars and vectors are unchanged.",
        |v| Ok(Value::tensor(transpose(&*tensor_arg(&v)?)?)),
    );
    env.define_function(
        "Shape",
        "The shape of a tensor as a vector.",
        |v| {
            let t = tensor_arg(&v)?;
            let dims = t.shape().iter().map(|&d| d as f64).collect();
            Ok(Value::tensor(Tensor::vector(dims)))
        },
    );

    env.define_constant(
        "PI",
        "Ratio of a circle's circumference to its diameter.",
        Tensor::scalar(std::f64::consts::PI),
    );
    env.define_constant("E", "Euler's number.", Tensor::scalar(std::f64::consts::E));
}

fn elementwise(env: &mut RuntimeEnvironment, name: &str, doc: &str, op: fn(f64) -> f64) {
    env.define_function(name, doc, move |v| Ok(Value::tensor(tensor_arg(&v)?.map(op))));
}

fn binary(env: &mut RuntimeEnvironment, name: &str, doc: &str, op: fn(f64, f64) -> f64) {
    env.define_function(name, doc, move |v| {
        let (a, b) = pair_args(&v)?;
        let result = zip_with(&*tensor_arg(a)?, &*tensor_arg(b)?, op)?;
        Ok(Value::tensor(result))
    });
}

fn reduction(
    env: &mut RuntimeEnvironment,
    name: &str,
    doc: &str,
    op: fn(&Tensor) -> Result<f64, TensorError>,
) {
    env.define_function(name, doc, move |v| {
        let t = tensor_arg(&v)?;
        Ok(Value::tensor(Tensor::scalar(op(&t)?)))
    });
}

/// Elementwise combination with scalar broadcasting.
pub(crate) fn zip_with(
    a: &Tensor,
    b: &Tensor,
    op: impl Fn(f64, f64) -> f64,
) -> Result<Tensor, TensorError> {
    if a.shape() == b.shape() {
        let data = a.data().iter().zip(b.data()).map(|(&x, &y)| op(x, y)).collect();
        return Tensor::new(a.shape().to_vec(), data);
    }
    if let Some(x) = a.as_scalar() {
        return Ok(b.map(|y| op(x, y)));
    }
    if let Some(y) = b.as_scalar() {
        return Ok(a.map(|x| op(x, y)));
    }
    Err(TensorError::Incompatible {
        left: a.shape().to_vec(),
        right: b.shape().to_vec(),
    })
}

pub(crate) fn matmul(a: &Tensor, b: &Tensor) -> Result<Tensor, InvokeError> {
    let (m, k) = matrix_dims(a)?;
    let (k2, n) = matrix_dims(b)?;
    if k != k2 {
        return Err(TensorError::InnerDimension { left: k, right: k2 }.into());
    }

    let (ad, bd) = (a.data(), b.data());
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for p in 0..k {
            let x = ad[i * k + p];
            for j in 0..n {
                out[i * n + j] += x * bd[p * n + j];
            }
        }
    }
    Ok(Tensor::new(vec![m, n], out)?)
}

pub(crate) fn transpose(t: &Tensor) -> Result<Tensor, TensorError> {
    match t.rank() {
        0 | 1 => Ok(t.clone()),
        2 => {
            let (rows, cols) = (t.shape()[0], t.shape()[1]);
            let data = t.data();
            let mut out = Vec::with_capacity(data.len());
            for j in 0..cols {
                for i in 0..rows {
                    out.push(data[i * cols + j]);
                }
            }
            Tensor::new(vec![cols, rows], out)
        }
        found => Err(TensorError::Rank { expected: 2, found }),
    }
}

fn matrix_dims(t: &Tensor) -> Result<(usize, usize), TensorError> {
    match *t.shape() {
        [rows, cols] => Ok((rows, cols)),
        _ => Err(TensorError::Rank {
            expected: 2,
            found: t.rank(),
        }),
    }
}
