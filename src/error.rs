use alloc::string::String;
use enough::StopReason;

/// Errors from PPM decoding.
///
/// Every variant is terminal: the decoder never hands back a partial image.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PpmError {
    #[error("empty input")]
    EmptyInput,

    #[error("invalid magic {0:?}, expected P3 or P6")]
    InvalidMagic(String),

    #[error("incomplete header: found {found} of 4 fields (magic, width, height, maxval)")]
    HeaderIncomplete { found: usize },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("maxval {0} out of range 1..=65535")]
    MaxvalOutOfRange(i64),

    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("not a valid integer: {0:?}")]
    NumericParse(String),

    #[error("sample {value} exceeds maxval {maxval}")]
    SampleOutOfRange { value: u32, maxval: u16 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for PpmError {
    fn from(r: StopReason) -> Self {
        PpmError::Cancelled(r)
    }
}
