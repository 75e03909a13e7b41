use thiserror::Error;

/// Failures a single file's decode can surface. The batch caller is
/// expected to report these per file and keep going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("file not supported, expected .rle or .bmr, but got: '{0}'")]
    UnsupportedFormat(String),

    #[error("no _RLE_16_ magic number found, therefore not a valid RLE image")]
    InvalidMagicNumber,

    #[error("input ended unexpectedly at byte {offset}")]
    TruncatedInput { offset: usize },

    #[error("unsupported run flag {flag:#04x} found at byte {offset}")]
    UnsupportedRunFlag { offset: usize, flag: u8 },
}
