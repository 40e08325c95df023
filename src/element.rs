use std::{
    fmt::{Debug, Display},
    ops::Rem,
};

/// Integer type of the generated elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Int32,
    Int64,
}

impl DType {
    /// Width in bytes of one element
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Int32 => 4,
            Self::Int64 => 8,
        }
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
        }
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// A signed integer type the generator can produce.
///
/// Raw keystream words are read as the matching unsigned type, reduced modulo
/// the range size, then offset by the lower bound with two's-complement
/// wrapping.
pub trait Element:
    private::Sealed + Copy + PartialOrd + Debug + Display + Send + Sync + 'static
{
    type Unsigned: Copy + Ord + Debug + Display + Rem<Output = Self::Unsigned>;

    const WIDTH: usize;
    const DTYPE: DType;

    /// Read a raw value from exactly `WIDTH` little-endian bytes
    fn unsigned_from_le(bytes: &[u8]) -> Self::Unsigned;

    /// `hi - lo` as an unsigned magnitude
    fn range_size(lo: Self, hi: Self) -> Self::Unsigned;

    /// `2^bits mod range_size`: raw values below it are rejected
    fn rejection_threshold(range_size: Self::Unsigned) -> Self::Unsigned;

    /// `lo + r` with wraparound in the signed type
    fn offset(lo: Self, r: Self::Unsigned) -> Self;
}

macro_rules! impl_element {
    ($signed:ty, $unsigned:ty, $dtype:expr) => {
        impl Element for $signed {
            type Unsigned = $unsigned;

            const WIDTH: usize = std::mem::size_of::<$signed>();
            const DTYPE: DType = $dtype;

            #[inline]
            fn unsigned_from_le(bytes: &[u8]) -> $unsigned {
                let mut b = [0_u8; std::mem::size_of::<$unsigned>()];
                b.copy_from_slice(bytes);
                <$unsigned>::from_le_bytes(b)
            }

            #[inline]
            fn range_size(lo: $signed, hi: $signed) -> $unsigned {
                (hi as $unsigned).wrapping_sub(lo as $unsigned)
            }

            #[inline]
            fn rejection_threshold(range_size: $unsigned) -> $unsigned {
                // (2^bits - size) mod size == 2^bits mod size
                range_size.wrapping_neg() % range_size
            }

            #[inline]
            fn offset(lo: $signed, r: $unsigned) -> $signed {
                lo.wrapping_add(r as $signed)
            }
        }
    };
}

impl_element!(i32, u32, DType::Int32);
impl_element!(i64, u64, DType::Int64);
