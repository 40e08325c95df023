use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecureRandomError {
    #[error("Need minval < maxval, got {lo} >= {hi}")]
    InvalidRange { lo: String, hi: String },
    #[error("Wrong seed size: {given} given should be {expected}")]
    InvalidSeedLength { given: usize, expected: usize },
    #[error("Entropy backend unavailable: {0}")]
    EntropyBackendUnavailable(String),
    #[error("Keystream exhausted: {0}")]
    KeystreamExhausted(String),
    #[error("Output too large: {0}")]
    OutputTooLarge(String),
    #[error("Invalid shape: {0}")]
    InvalidShape(String),
    #[error("minval is {minval} but maxval is {maxval}")]
    DTypeMismatch { minval: String, maxval: String },
}

impl SecureRandomError {
    pub(crate) fn invalid_range<T: std::fmt::Display>(lo: T, hi: T) -> Self {
        Self::InvalidRange {
            lo: lo.to_string(),
            hi: hi.to_string(),
        }
    }
}
