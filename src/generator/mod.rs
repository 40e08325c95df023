//! Uniform integer generation over `[lo, hi)` from the keystream.
//!
//! The primary buffer is filled once from block 0 and supplies the first
//! candidate of every output slot. Candidates that would bias the modulo
//! reduction are replaced from overflow blocks fetched lazily after the
//! primary blocks. The output is a pure function of
//! `(seed, count, type, lo, hi)`.

mod range;
mod sampler;

pub use range::UniformRange;

use tracing::debug;
use zeroize::Zeroizing;

use crate::{
    keystream::{blocks_for, DefaultKeystream, KeystreamSource, BLOCK_LENGTH, MAX_BLOCKS},
    Element, SecureRandomError, Seed,
};
use sampler::RejectionSampler;

/// Generates arrays of uniformly distributed integers keyed by a borrowed
/// seed. It holds no state between calls.
pub struct Generator<'s, K: KeystreamSource = DefaultKeystream> {
    seed: &'s Seed,
    keystream: K,
}

impl<'s> Generator<'s, DefaultKeystream> {
    #[must_use]
    pub fn new(seed: &'s Seed) -> Self {
        Self::with_keystream(seed, DefaultKeystream::default())
    }
}

impl<'s, K: KeystreamSource> Generator<'s, K> {
    #[must_use]
    pub fn with_keystream(seed: &'s Seed, keystream: K) -> Self {
        Self { seed, keystream }
    }

    /// Generate `count` integers uniformly distributed over `[lo, hi)`
    pub fn generate<T: Element>(
        &self,
        count: usize,
        lo: T,
        hi: T,
    ) -> Result<Vec<T>, SecureRandomError> {
        let range = UniformRange::new(lo, hi)?;
        self.generate_in(count, &range)
    }

    /// Generate `count` integers uniformly distributed over `range`.
    ///
    /// Nothing is asked of the keystream backend when `count` is 0.
    pub fn generate_in<T: Element>(
        &self,
        count: usize,
        range: &UniformRange<T>,
    ) -> Result<Vec<T>, SecureRandomError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        K::init()?;

        let primary = self.fill_primary::<T>(count)?;
        let primary_blocks = blocks_for(primary.len());
        let mut sampler = RejectionSampler::new(&self.keystream, self.seed, primary_blocks);
        let values = primary
            .chunks_exact(T::WIDTH)
            .map(|raw| sampler.sample(T::unsigned_from_le(raw), range))
            .collect::<Result<Vec<T>, _>>()?;

        debug!(
            "{}: generated {count} {} in [{}, {}): {primary_blocks} primary blocks, {} overflow \
             blocks, {} rejections",
            K::description(),
            T::DTYPE,
            range.lo(),
            range.hi(),
            sampler.blocks_fetched(),
            sampler.rejections()
        );
        Ok(values)
    }

    /// Fill the primary buffer: `count` raw elements read from block 0
    fn fill_primary<T: Element>(
        &self,
        count: usize,
    ) -> Result<Zeroizing<Vec<u8>>, SecureRandomError> {
        let byte_length = count
            .checked_mul(T::WIDTH)
            .filter(|&len| blocks_for(len) <= MAX_BLOCKS)
            .ok_or_else(|| {
                SecureRandomError::OutputTooLarge(format!(
                    "{count} {} elements exceed the {} bytes of keystream",
                    T::DTYPE,
                    MAX_BLOCKS * BLOCK_LENGTH as u64
                ))
            })?;
        let mut buf = Zeroizing::new(vec![0_u8; byte_length]);
        self.keystream.fill(self.seed, 0, &mut buf[..])?;
        Ok(buf)
    }
}

/// Generate `count` integers uniformly distributed over `[lo, hi)` with the
/// default keystream backend
pub fn uniform<T: Element>(
    seed: &Seed,
    count: usize,
    lo: T,
    hi: T,
) -> Result<Vec<T>, SecureRandomError> {
    Generator::new(seed).generate(count, lo, hi)
}
