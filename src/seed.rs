use crate::SecureRandomError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;
use zeroize::Zeroize;

/// Length in bytes of a seed: the ChaCha20 key length
pub const SEED_LENGTH: usize = 32;

/// Number of 32-bit words making up a seed
pub const SEED_WORDS: usize = SEED_LENGTH / std::mem::size_of::<i32>();

/// The key of the keystream. The same seed always yields the same output.
///
/// Seed bytes are wiped from memory when the seed is dropped. Serialized
/// bytes belong to the caller, who must wipe them.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<u8>")]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    /// Build a seed from 32-bit words, each serialized in little-endian
    /// order. This is the layout of an `[8]` int32 seed tensor.
    pub fn from_words(words: &[i32]) -> Result<Self, SecureRandomError> {
        if words.len() != SEED_WORDS {
            return Err(SecureRandomError::InvalidSeedLength {
                given: words.len(),
                expected: SEED_WORDS,
            });
        }
        let mut bytes = [0_u8; SEED_LENGTH];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Ok(Self(bytes))
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }
}

impl<'a> TryFrom<&'a [u8]> for Seed {
    type Error = SecureRandomError;

    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        let b: [u8; SEED_LENGTH] = bytes.try_into().map_err(|_| Self::Error::InvalidSeedLength {
            given: bytes.len(),
            expected: SEED_LENGTH,
        })?;
        Ok(Self(b))
    }
}

impl TryFrom<Vec<u8>> for Seed {
    type Error = SecureRandomError;

    fn try_from(mut bytes: Vec<u8>) -> Result<Self, Self::Error> {
        let seed = Self::try_from(bytes.as_slice());
        bytes.zeroize();
        seed
    }
}

impl From<[u8; SEED_LENGTH]> for Seed {
    fn from(b: [u8; SEED_LENGTH]) -> Self {
        Self(b)
    }
}

// serialized from the borrowed bytes: no intermediate copy is left behind
impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_slice().serialize(serializer)
    }
}

impl Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// never print the seed in debug traces
impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed(..)")
    }
}

impl Zeroize for Seed {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.zeroize();
    }
}
