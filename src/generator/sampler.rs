use tracing::trace;
use zeroize::Zeroizing;

use super::UniformRange;
use crate::{
    keystream::{KeystreamSource, BLOCK_LENGTH},
    Element, SecureRandomError, Seed,
};

/// Replaces rejected raw values with fresh ones taken from a single overflow
/// block of keystream, fetched by skip-ahead only when needed.
///
/// Overflow blocks start right after the blocks used by the primary buffer
/// and are consumed element by element, in order.
pub(crate) struct RejectionSampler<'a, K: KeystreamSource> {
    keystream: &'a K,
    seed: &'a Seed,
    next_block_index: u64,
    cursor: usize,
    block: Zeroizing<[u8; BLOCK_LENGTH]>,
    blocks_fetched: u64,
    rejections: u64,
}

impl<'a, K: KeystreamSource> RejectionSampler<'a, K> {
    pub(crate) fn new(keystream: &'a K, seed: &'a Seed, first_block_index: u64) -> Self {
        Self {
            keystream,
            seed,
            next_block_index: first_block_index,
            // empty: nothing is fetched until the first rejection
            cursor: BLOCK_LENGTH,
            block: Zeroizing::new([0_u8; BLOCK_LENGTH]),
            blocks_fetched: 0,
            rejections: 0,
        }
    }

    /// Map the raw value of a primary slot into the range, replacing it
    /// until an accepted value is found
    pub(crate) fn sample<T: Element>(
        &mut self,
        raw: T::Unsigned,
        range: &UniformRange<T>,
    ) -> Result<T, SecureRandomError> {
        let mut v = raw;
        while !range.accepts(v) {
            self.rejections += 1;
            v = self.next_raw::<T>()?;
        }
        Ok(range.map(v))
    }

    pub(crate) const fn blocks_fetched(&self) -> u64 {
        self.blocks_fetched
    }

    pub(crate) const fn rejections(&self) -> u64 {
        self.rejections
    }

    fn next_raw<T: Element>(&mut self) -> Result<T::Unsigned, SecureRandomError> {
        if self.cursor + T::WIDTH > BLOCK_LENGTH {
            self.refill()?;
        }
        let v = T::unsigned_from_le(&self.block[self.cursor..self.cursor + T::WIDTH]);
        self.cursor += T::WIDTH;
        Ok(v)
    }

    fn refill(&mut self) -> Result<(), SecureRandomError> {
        let block_index = u32::try_from(self.next_block_index).map_err(|_| {
            SecureRandomError::KeystreamExhausted(format!(
                "no overflow block left after block {}",
                self.next_block_index - 1
            ))
        })?;
        trace!("rejection sampling: fetching overflow block {block_index}");
        self.keystream
            .fill(self.seed, block_index, &mut self.block[..])?;
        self.next_block_index += 1;
        self.blocks_fetched += 1;
        self.cursor = 0;
        Ok(())
    }
}
