use std::fmt;

use tensa_ir::TensorLiteral;

use crate::TensorError;

/// Dense row-major `f64` array.
///
/// Rank 0 (empty shape) is a scalar with exactly one element. Arithmetic on
/// tensors lives in the runtime environment, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl Tensor {
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self, TensorError> {
        let expected = shape.iter().product::<usize>();
        if expected != data.len() {
            return Err(TensorError::ShapeData {
                shape,
                expected,
                found: data.len(),
            });
        }
        Ok(Tensor { shape, data })
    }

    pub fn scalar(value: f64) -> Self {
        Tensor {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    pub fn vector(data: Vec<f64>) -> Self {
        Tensor {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// The single element of a rank-0 tensor.
    pub fn as_scalar(&self) -> Option<f64> {
        if self.is_scalar() {
            self.data.first().copied()
        } else {
            None
        }
    }

    /// Same shape, each element mapped through `f`.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Tensor {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    fn fmt_axis(&self, f: &mut fmt::Formatter<'_>, axis: usize, offset: usize) -> fmt::Result {
        let stride: usize = self.shape[axis + 1..].iter().product();
        write!(f, "[")?;
        for i in 0..self.shape[axis] {
            if i > 0 {
                write!(f, ", ")?;
            }
            let start = offset + i * stride;
            if axis + 1 == self.shape.len() {
                write!(f, "{}", self.data[start])?;
            } else {
                self.fmt_axis(f, axis + 1, start)?;
            }
        }
        write!(f, "]")
    }
}

impl From<&TensorLiteral> for Tensor {
    fn from(literal: &TensorLiteral) -> Self {
        // TensorLiteral already checked that data fills its shape.
        Tensor {
            shape: literal.shape().to_vec(),
            data: literal.data().to_vec(),
        }
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_scalar() {
            Some(value) => write!(f, "{value}"),
            None => self.fmt_axis(f, 0, 0),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_checks_element_count() {
        assert!(Tensor::new(vec![2, 2], vec![1.0; 4]).is_ok());
        assert_eq!(
            Tensor::new(vec![3], vec![1.0]),
            Err(TensorError::ShapeData {
                shape: vec![3],
                expected: 3,
                found: 1
            })
        );
    }

    #[test]
    fn test_display_nested() {
        let t = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(t.to_string(), "[[1, 2, 3], [4, 5, 6]]");
        assert_eq!(Tensor::scalar(2.5).to_string(), "2.5");
        assert_eq!(Tensor::vector(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_map_keeps_shape() {
        let t = Tensor::vector(vec![1.0, -2.0]).map(f64::abs);
        assert_eq!(t.shape(), &[2]);
        assert_eq!(t.data(), &[1.0, 2.0]);
    }

    #[test]
    fn test_from_literal() {
        let literal = TensorLiteral::vector(vec![1.0, 2.0]);
        assert_eq!(Tensor::from(&literal), Tensor::vector(vec![1.0, 2.0]));
    }

    #[test]
    fn test_as_scalar() {
        assert_eq!(Tensor::scalar(3.0).as_scalar(), Some(3.0));
        assert_eq!(Tensor::vector(vec![3.0]).as_scalar(), None);
    }
}
