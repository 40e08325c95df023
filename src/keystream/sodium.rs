// ChaCha20 IETF keystream through libsodium

use std::{os::raw::c_int, sync::OnceLock};

use tracing::{debug, trace};

use super::{check_span, KeystreamSource, BLOCK_LENGTH, NONCE};
use crate::{
    sodium_bindings::{
        crypto_stream_chacha20_ietf_KEYBYTES, crypto_stream_chacha20_ietf_NONCEBYTES,
        crypto_stream_chacha20_ietf_xor_ic, sodium_init,
    },
    SecureRandomError, Seed, SEED_LENGTH,
};

static SODIUM_INIT: OnceLock<c_int> = OnceLock::new();

const _: () = assert!(crypto_stream_chacha20_ietf_KEYBYTES as usize == SEED_LENGTH);
const _: () = assert!(crypto_stream_chacha20_ietf_NONCEBYTES as usize == NONCE.len());

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SodiumKeystream;

impl KeystreamSource for SodiumKeystream {
    fn description() -> String {
        format!(
            "ChaCha20 IETF libsodium (key bits: {}, nonce bits: {}, block bytes: {})",
            SEED_LENGTH * 8,
            NONCE.len() * 8,
            BLOCK_LENGTH
        )
    }

    fn init() -> Result<(), SecureRandomError> {
        let status = *SODIUM_INIT.get_or_init(|| {
            // 0: initialized, 1: already initialized, -1: failure
            let status = unsafe { sodium_init() };
            debug!("sodium_init returned {status}");
            status
        });
        if status < 0 {
            return Err(SecureRandomError::EntropyBackendUnavailable(format!(
                "sodium_init failed with status {status}"
            )));
        }
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
        dest.fill(0);
        let res = unsafe {
            crypto_stream_chacha20_ietf_xor_ic(
                dest.as_mut_ptr(),
                dest.as_ptr(),
                dest.len() as u64,
                NONCE.as_ptr(),
                block_index,
                seed.as_bytes().as_ptr(),
            )
        };
        if res != 0 {
            return Err(SecureRandomError::EntropyBackendUnavailable(format!(
                "crypto_stream_chacha20_ietf_xor_ic failed with status {res}"
            )));
        }
        Ok(())
    }
}
