//! Raw ChaCha20 (IETF) keystream addressed by 64-byte block index.
//!
//! Block `i` is a pure function of the seed, the fixed [`NONCE`] and `i`, so
//! any block can be produced without generating the blocks before it.

mod pure;
#[cfg(all(not(target_arch = "wasm32"), not(windows), feature = "libsodium"))]
mod sodium;

pub use pure::ChaCha20Keystream;
#[cfg(all(not(target_arch = "wasm32"), not(windows), feature = "libsodium"))]
pub use sodium::SodiumKeystream;

use crate::{SecureRandomError, Seed};

/// Length in bytes of one keystream block
pub const BLOCK_LENGTH: usize = 64;

/// Fixed nonce of the keystream. It is not derived from the seed.
pub const NONCE: [u8; 12] = *b"LibsodiumDRG";

/// Blocks are addressed with a 32-bit counter. The last index is left unused
/// so that both backends accept exactly the same requests.
pub const MAX_BLOCKS: u64 = u32::MAX as u64;

/// The keystream backend selected at compile time
#[cfg(all(not(target_arch = "wasm32"), not(windows), feature = "libsodium"))]
pub type DefaultKeystream = SodiumKeystream;
/// The keystream backend selected at compile time
#[cfg(not(all(not(target_arch = "wasm32"), not(windows), feature = "libsodium")))]
pub type DefaultKeystream = ChaCha20Keystream;

pub trait KeystreamSource {
    /// Describe the backend in plaintext
    fn description() -> String;

    /// Process-wide initialization of the backend.
    ///
    /// This is idempotent and safe to call concurrently; it is called once
    /// per generation.
    fn init() -> Result<(), SecureRandomError>;

    /// Write the keystream starting at block `block_index` into `dest`.
    ///
    /// `dest` does not need to be a multiple of [`BLOCK_LENGTH`]: a trailing
    /// partial block receives the prefix of that block.
    fn fill(&self, seed: &Seed, block_index: u32, dest: &mut [u8])
        -> Result<(), SecureRandomError>;
}

/// Number of blocks needed to hold `byte_length` bytes
#[must_use]
pub const fn blocks_for(byte_length: usize) -> u64 {
    (byte_length as u64 + BLOCK_LENGTH as u64 - 1) / BLOCK_LENGTH as u64
}

/// Check that `byte_length` bytes starting at block `block_index` stay inside
/// the 32-bit block counter
pub(crate) fn check_span(block_index: u32, byte_length: usize) -> Result<(), SecureRandomError> {
    let end = u64::from(block_index) + blocks_for(byte_length);
    if end > MAX_BLOCKS {
        return Err(SecureRandomError::KeystreamExhausted(format!(
            "{byte_length} bytes from block {block_index} go past block {}",
            MAX_BLOCKS - 1
        )));
    }
    Ok(())
}
