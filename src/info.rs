use crate::error::PpmError;
use crate::ppm::{PpmFormat, header};

/// Header-level facts about a PPM file, read without decoding samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub maxval: u16,
    pub format: PpmFormat,
}

impl ImageInfo {
    /// Read the header only. Fails on the same header errors a full decode would.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PpmError> {
        let (h, _, _) = header::parse_header(data)?;
        Ok(Self {
            width: h.width,
            height: h.height,
            maxval: h.maxval,
            format: h.format,
        })
    }

    /// Bytes per raw sample: 1 when maxval is below 256, else 2.
    pub fn bytes_per_sample(&self) -> usize {
        if self.maxval < 256 { 1 } else { 2 }
    }

    /// Size of the decoded RGB buffer, or `None` if it would overflow `usize`.
    pub fn output_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(3)
    }
}

/// Two-byte magic check: `P3` or `P6` at the very start of `data`.
///
/// This is the only inspection done to route a file to this decoder; anything
/// else belongs to some other image loader.
pub fn sniff(data: &[u8]) -> Option<PpmFormat> {
    PpmFormat::sniff(data)
}

/// Whether `data` starts with a PPM magic this crate decodes.
pub fn is_ppm(data: &[u8]) -> bool {
    sniff(data).is_some()
}
