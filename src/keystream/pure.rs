use chacha20::{
    cipher::{KeyIvInit, StreamCipher, StreamCipherSeek},
    ChaCha20, Key, Nonce,
};
use tracing::trace;

use super::{check_span, KeystreamSource, BLOCK_LENGTH, NONCE};
use crate::{SecureRandomError, Seed};

/// ChaCha20 keystream in pure Rust
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChaCha20Keystream;

impl KeystreamSource for ChaCha20Keystream {
    fn description() -> String {
        format!(
            "ChaCha20 IETF pure Rust (key bits: {}, nonce bits: {}, block bytes: {})",
            crate::SEED_LENGTH * 8,
            NONCE.len() * 8,
            BLOCK_LENGTH
        )
    }

    fn init() -> Result<(), SecureRandomError> {
        Ok(())
    }

    fn fill(
        &self,
        seed: &Seed,
        block_index: u32,
        dest: &mut [u8],
    ) -> Result<(), SecureRandomError> {
        check_span(block_index, dest.len())?;
        trace!("keystream: {} bytes from block {block_index}", dest.len());
        let mut cipher = ChaCha20::new(
            Key::from_slice(seed.as_bytes()),
            Nonce::from_slice(&NONCE),
        );
        cipher
            .try_seek(u64::from(block_index) * BLOCK_LENGTH as u64)
            .map_err(|e| SecureRandomError::KeystreamExhausted(e.to_string()))?;
        // the keystream is the encryption of zeroes
        dest.fill(0);
        cipher
            .try_apply_keystream(dest)
            .map_err(|e| SecureRandomError::KeystreamExhausted(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::ChaCha20Keystream;
    use crate::{
        keystream::{KeystreamSource, BLOCK_LENGTH},
        Seed,
    };

    fn seed() -> Seed {
        let mut bytes = [0_u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        Seed::from(bytes)
    }

    #[test]
    fn test_description() {
        assert_eq!(
            "ChaCha20 IETF pure Rust (key bits: 256, nonce bits: 96, block bytes: 64)",
            ChaCha20Keystream::description()
        );
        assert!(ChaCha20Keystream::init().is_ok());
    }

    #[test]
    fn test_known_keystream() {
        let mut buf = [0_u8; 16];
        ChaCha20Keystream.fill(&seed(), 0, &mut buf).unwrap();
        assert_eq!("0d8e6cc68715648926732e7ea73250cf", hex::encode(buf));
        ChaCha20Keystream.fill(&seed(), 2, &mut buf).unwrap();
        assert_eq!("43d96066869c63a2cef7324871900d7f", hex::encode(buf));
    }

    #[test]
    fn test_skip_ahead() {
        let seed = seed();
        let mut stream = vec![0_u8; 10 * BLOCK_LENGTH];
        ChaCha20Keystream.fill(&seed, 0, &mut stream).unwrap();
        for i in 0..10 {
            let mut block = [0_u8; BLOCK_LENGTH];
            ChaCha20Keystream.fill(&seed, i as u32, &mut block).unwrap();
            assert_eq!(stream[i * BLOCK_LENGTH..(i + 1) * BLOCK_LENGTH], block);
        }
        // partial blocks are prefixes
        let mut partial = [0_u8; BLOCK_LENGTH + 5];
        ChaCha20Keystream.fill(&seed, 3, &mut partial).unwrap();
        assert_eq!(stream[3 * BLOCK_LENGTH..4 * BLOCK_LENGTH + 5], partial[..]);
    }

    #[test]
    fn test_fill_overwrites_destination() {
        let mut a = [0_u8; BLOCK_LENGTH];
        let mut b = [0xff_u8; BLOCK_LENGTH];
        ChaCha20Keystream.fill(&seed(), 7, &mut a).unwrap();
        ChaCha20Keystream.fill(&seed(), 7, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeds_differ() {
        let mut a = [0_u8; BLOCK_LENGTH];
        let mut b = [0_u8; BLOCK_LENGTH];
        ChaCha20Keystream.fill(&seed(), 0, &mut a).unwrap();
        ChaCha20Keystream
            .fill(&Seed::from([0_u8; 32]), 0, &mut b)
            .unwrap();
        assert_ne!(a, b);
    }
}
