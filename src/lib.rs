//! Deterministic generation of uniformly distributed `int32`/`int64` arrays
//! over `[lo, hi)`, keyed by a 32-byte seed.
//!
//! The only entropy source is the ChaCha20 keystream of the seed; modulo
//! bias is removed by rejection sampling. Identical inputs always produce
//! identical outputs.

mod element;
mod error;
mod seed;

pub mod generator;
pub mod keystream;
pub mod op;

#[allow(deref_nullptr)]
#[cfg(all(not(target_arch = "wasm32"), not(windows), feature = "libsodium"))]
pub mod sodium_bindings;

pub use element::{DType, Element};
pub use error::SecureRandomError;
pub use generator::{uniform, Generator, UniformRange};
pub use op::{secure_random, secure_random_dyn, Scalar, SecureRandomOutput, Values};
pub use seed::{Seed, SEED_LENGTH, SEED_WORDS};
