//! The `SecureRandom` operator contract: a shape, an `[8]` int32 seed and
//! scalar bounds in, a row-major array of uniform integers out.

use std::fmt::Display;

use crate::{
    generator::{Generator, UniformRange},
    DType, Element, SecureRandomError, Seed,
};

/// Result of the operator: the values in row-major order of `shape`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureRandomOutput<T> {
    shape: Vec<usize>,
    values: Vec<T>,
}

impl<T> SecureRandomOutput<T> {
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

/// Validate the dimensions of `shape` and return them with the number of
/// elements they describe. A rank-0 shape describes a single scalar.
pub fn num_elements<D: Copy + Into<i64>>(
    shape: &[D],
) -> Result<(Vec<usize>, usize), SecureRandomError> {
    let mut dims = Vec::with_capacity(shape.len());
    let mut count = 1_usize;
    for (i, &d) in shape.iter().enumerate() {
        let d: i64 = d.into();
        let dim = usize::try_from(d).map_err(|_| {
            SecureRandomError::InvalidShape(if d < 0 {
                format!("dimension {i} is negative: {d}")
            } else {
                format!("dimension {i} does not fit in usize: {d}")
            })
        })?;
        count = count.checked_mul(dim).ok_or_else(|| {
            SecureRandomError::InvalidShape(format!(
                "too many elements in shape {:?}",
                shape.iter().map(|&d| d.into()).collect::<Vec<i64>>()
            ))
        })?;
        dims.push(dim);
    }
    Ok((dims, count))
}

/// Run the operator for the element type `T`.
///
/// The shape, the seed and the range are checked in this order before any
/// keystream is produced; an empty shape returns an empty output.
pub fn secure_random<T: Element, D: Copy + Into<i64>>(
    shape: &[D],
    seed: &[i32],
    minval: T,
    maxval: T,
) -> Result<SecureRandomOutput<T>, SecureRandomError> {
    let (shape, count) = num_elements(shape)?;
    let seed = Seed::from_words(seed)?;
    let range = UniformRange::new(minval, maxval)?;
    let values = Generator::new(&seed).generate_in(count, &range)?;
    Ok(SecureRandomOutput { shape, values })
}

/// A bound of the operator, typed at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Int32(i32),
    Int64(i64),
}

impl Scalar {
    #[must_use]
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Int32(_) => DType::Int32,
            Self::Int64(_) => DType::Int64,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int32(v) => write!(f, "{v} ({})", self.dtype()),
            Self::Int64(v) => write!(f, "{v} ({})", self.dtype()),
        }
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

/// Values produced by [`secure_random_dyn`], typed at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Values {
    Int32(SecureRandomOutput<i32>),
    Int64(SecureRandomOutput<i64>),
}

impl Values {
    #[must_use]
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Int32(_) => DType::Int32,
            Self::Int64(_) => DType::Int64,
        }
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Int32(output) => output.shape(),
            Self::Int64(output) => output.shape(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int32(output) => output.values().len(),
            Self::Int64(output) => output.values().len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run the operator with the element type given by the bounds, which must
/// agree
pub fn secure_random_dyn<D: Copy + Into<i64>>(
    shape: &[D],
    seed: &[i32],
    minval: Scalar,
    maxval: Scalar,
) -> Result<Values, SecureRandomError> {
    match (minval, maxval) {
        (Scalar::Int32(lo), Scalar::Int32(hi)) => {
            secure_random(shape, seed, lo, hi).map(Values::Int32)
        }
        (Scalar::Int64(lo), Scalar::Int64(hi)) => {
            secure_random(shape, seed, lo, hi).map(Values::Int64)
        }
        _ => Err(SecureRandomError::DTypeMismatch {
            minval: minval.to_string(),
            maxval: maxval.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{num_elements, secure_random, secure_random_dyn, Scalar, Values};
    use crate::{uniform, DType, SecureRandomError, Seed};

    const SEED: [i32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn test_num_elements() {
        assert_eq!((vec![2, 3, 4], 24), num_elements(&[2_i64, 3, 4]).unwrap());
        assert_eq!((vec![5, 0], 0), num_elements(&[5_i32, 0]).unwrap());
        assert_eq!((vec![], 1), num_elements::<i32>(&[]).unwrap());
        assert_eq!(
            Err(SecureRandomError::InvalidShape(
                "dimension 1 is negative: -1".to_string()
            )),
            num_elements(&[3_i32, -1])
        );
        assert!(matches!(
            num_elements(&[i64::MAX, i64::MAX, i64::MAX]),
            Err(SecureRandomError::InvalidShape(_))
        ));
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_dimension_too_large() {
        let d = i64::from(u32::MAX) + 1;
        assert_eq!(
            Err(SecureRandomError::InvalidShape(format!(
                "dimension 0 does not fit in usize: {d}"
            ))),
            num_elements(&[d])
        );
    }

    #[test]
    fn test_golden_seed_words() {
        let output = secure_random(&[10_i32], &SEED, 0_i32, 100).unwrap();
        assert_eq!(&[10_usize], output.shape());
        assert_eq!(&[37, 91, 3, 70, 58, 90, 20, 60, 76, 3], output.values());
    }

    #[test]
    fn test_row_major_output() {
        let output = secure_random(&[2_i64, 3, 4], &SEED, -100_i64, 100).unwrap();
        assert_eq!(&[2_usize, 3, 4], output.shape());
        let seed = Seed::from_words(&SEED).unwrap();
        assert_eq!(uniform(&seed, 24, -100_i64, 100).unwrap(), output.into_values());
    }

    #[test]
    fn test_scalar_shape() {
        let output = secure_random::<i32, i32>(&[], &SEED, -1, 1).unwrap();
        assert!(output.shape().is_empty());
        assert_eq!(1, output.values().len());
    }

    #[test]
    fn test_empty_shape() {
        let output = secure_random(&[4_i32, 0, 3], &SEED, -1_i32, 1).unwrap();
        assert_eq!(&[4_usize, 0, 3], output.shape());
        assert!(output.values().is_empty());
    }

    #[test]
    fn test_validation_order() {
        // shape before seed before range
        assert!(matches!(
            secure_random(&[-1_i32], &SEED[..3], 10_i32, 10),
            Err(SecureRandomError::InvalidShape(_))
        ));
        assert_eq!(
            Err(SecureRandomError::InvalidSeedLength {
                given: 3,
                expected: 8
            }),
            secure_random(&[4_i32], &SEED[..3], 10_i32, 10)
        );
        assert!(matches!(
            secure_random(&[0_i32], &SEED, 10_i32, 10),
            Err(SecureRandomError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_dyn_dispatch() {
        let values =
            secure_random_dyn(&[3_i32], &SEED, Scalar::from(-5_i64), 5_i64.into()).unwrap();
        assert_eq!(DType::Int64, values.dtype());
        assert_eq!(&[3_usize], values.shape());
        assert_eq!(3, values.len());
        let expected = secure_random(&[3_i32], &SEED, -5_i64, 5).unwrap();
        assert_eq!(Values::Int64(expected), values);

        let values =
            secure_random_dyn(&[0_i64], &SEED, Scalar::Int32(0), Scalar::Int32(1)).unwrap();
        assert_eq!(DType::Int32, values.dtype());
        assert!(values.is_empty());
    }

    #[test]
    fn test_dyn_dtype_mismatch() {
        let err =
            secure_random_dyn(&[3_i32], &SEED, Scalar::Int32(0), Scalar::Int64(5)).unwrap_err();
        assert_eq!(
            SecureRandomError::DTypeMismatch {
                minval: "0 (int32)".to_string(),
                maxval: "5 (int64)".to_string()
            },
            err
        );
    }
}
