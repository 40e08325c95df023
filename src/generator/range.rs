use crate::{Element, SecureRandomError};

/// A validated half-open range `[lo, hi)` together with the rejection
/// threshold that removes modulo bias for its size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformRange<T: Element> {
    lo: T,
    hi: T,
    size: T::Unsigned,
    threshold: T::Unsigned,
}

impl<T: Element> UniformRange<T> {
    pub fn new(lo: T, hi: T) -> Result<Self, SecureRandomError> {
        if lo >= hi {
            return Err(SecureRandomError::invalid_range(lo, hi));
        }
        let size = T::range_size(lo, hi);
        Ok(Self {
            lo,
            hi,
            size,
            threshold: T::rejection_threshold(size),
        })
    }

    #[must_use]
    pub fn lo(&self) -> T {
        self.lo
    }

    #[must_use]
    pub fn hi(&self) -> T {
        self.hi
    }

    /// `hi - lo` as an unsigned magnitude
    #[must_use]
    pub fn size(&self) -> T::Unsigned {
        self.size
    }

    /// Smallest raw value that is accepted
    #[must_use]
    pub fn threshold(&self) -> T::Unsigned {
        self.threshold
    }

    /// Whether the raw value `v` lies in the unbiased acceptance region.
    /// The accepted values `[threshold, 2^bits)` are a whole number of
    /// copies of `[0, size)`.
    #[inline]
    #[must_use]
    pub fn accepts(&self, v: T::Unsigned) -> bool {
        v >= self.threshold
    }

    /// Map an accepted raw value into `[lo, hi)`
    #[inline]
    #[must_use]
    pub fn map(&self, v: T::Unsigned) -> T {
        T::offset(self.lo, v % self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::UniformRange;
    use crate::SecureRandomError;

    #[test]
    fn test_invalid_range() {
        assert_eq!(
            Err(SecureRandomError::InvalidRange {
                lo: "10".to_string(),
                hi: "10".to_string()
            }),
            UniformRange::new(10_i32, 10)
        );
        assert!(UniformRange::new(3_i64, -3).is_err());
        assert!(UniformRange::new(i64::MAX, i64::MIN).is_err());
    }

    #[test]
    fn test_threshold_uses_range_size() {
        // range size 10 whatever the bounds
        let r = UniformRange::new(-5_i32, 5).unwrap();
        assert_eq!(10, r.size());
        assert_eq!(6, r.threshold());
        let shifted = UniformRange::new(1_000_i32, 1_010).unwrap();
        assert_eq!(r.threshold(), shifted.threshold());
    }

    #[test]
    fn test_map() {
        let r = UniformRange::new(-5_i32, 5).unwrap();
        assert!(!r.accepts(5));
        assert!(r.accepts(6));
        assert_eq!(1, r.map(6));
        assert_eq!(-4, r.map(11));
        assert_eq!(4, r.map(19));
        // 4_294_967_295 % 10 == 5
        assert_eq!(0, r.map(u32::MAX));
        let full = UniformRange::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(i64::MIN, full.map(0));
        assert_eq!(i64::MAX - 1, full.map(u64::MAX - 1));
        // u64::MAX % (2^64 - 1) == 0
        assert_eq!(i64::MIN, full.map(u64::MAX));
    }

    #[test]
    fn test_map_stays_in_range() {
        let r = UniformRange::new(i32::MIN + 3, i32::MIN + 10).unwrap();
        for v in (r.threshold()..r.threshold() + 100).chain(u32::MAX - 100..=u32::MAX) {
            let x = r.map(v);
            assert!(x >= r.lo() && x < r.hi());
        }
    }
}
