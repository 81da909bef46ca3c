//! PPM: P3 (ASCII) and P6 (binary) RGB pixmaps.
//!
//! Both variants share one header tokenizer. After the header, P3 samples are
//! decimal tokens and P6 samples are raw big-endian values of 1 or 2 bytes.

pub(crate) mod ascii;
pub(crate) mod binary;
pub(crate) mod header;
pub(crate) mod scale;

use crate::decode::{DecodeConfig, PixelBuffer};
use crate::error::PpmError;
use crate::limits::Limits;
use crate::logging::debug;
use enough::Stop;

/// Which PPM variant a file uses.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PpmFormat {
    /// P3: samples as whitespace-separated decimal text.
    Ascii,
    /// P6: samples as raw bytes, 1 or 2 per sample depending on maxval.
    Binary,
}

impl PpmFormat {
    const ALL: [PpmFormat; 2] = [PpmFormat::Ascii, PpmFormat::Binary];

    /// The two magic bytes identifying this variant.
    pub fn magic(self) -> &'static [u8; 2] {
        match self {
            PpmFormat::Ascii => b"P3",
            PpmFormat::Binary => b"P6",
        }
    }

    /// Match a complete magic token. Anything but exactly `P3` or `P6` fails.
    pub(crate) fn from_magic(token: &[u8]) -> Result<Self, PpmError> {
        Self::ALL
            .into_iter()
            .find(|f| token == f.magic())
            .ok_or_else(|| PpmError::InvalidMagic(header::latin1(token)))
    }

    /// Match the first two bytes of a file.
    pub(crate) fn sniff(prefix: &[u8]) -> Option<Self> {
        let head = prefix.get(..2)?;
        Self::ALL.into_iter().find(|f| head == f.magic())
    }
}

/// Validated PPM header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PpmHeader {
    pub format: PpmFormat,
    pub width: u32,
    pub height: u32,
    pub maxval: u16,
}

impl PpmHeader {
    /// Validate raw header fields.
    pub(crate) fn from_fields(
        format: PpmFormat,
        width: i64,
        height: i64,
        maxval: i64,
    ) -> Result<Self, PpmError> {
        if width <= 0 || height <= 0 {
            return Err(PpmError::InvalidDimensions { width, height });
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(PpmError::DimensionsTooLarge {
                width: width as u64,
                height: height as u64,
            });
        };
        if !(1..=65535).contains(&maxval) {
            return Err(PpmError::MaxvalOutOfRange(maxval));
        }
        Ok(Self {
            format,
            width: w,
            height: h,
            maxval: maxval as u16,
        })
    }

    /// 1 for maxval below 256, otherwise 2 (big-endian).
    pub(crate) fn bytes_per_sample(&self) -> usize {
        if self.maxval < 256 { 1 } else { 2 }
    }

    fn too_large(&self) -> PpmError {
        PpmError::DimensionsTooLarge {
            width: u64::from(self.width),
            height: u64::from(self.height),
        }
    }

    /// `width * height * 3`: the exact sample count, and the output byte count.
    pub(crate) fn sample_count(&self) -> Result<usize, PpmError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(3))
            .ok_or_else(|| self.too_large())
    }

    /// Bytes of raster data a P6 file must carry.
    pub(crate) fn raster_bytes(&self) -> Result<usize, PpmError> {
        self.sample_count()?
            .checked_mul(self.bytes_per_sample())
            .ok_or_else(|| self.too_large())
    }

    /// Samples in one row.
    pub(crate) fn row_samples(&self) -> usize {
        self.width as usize * 3
    }

    /// Size overflow, then dimension limits and the output allocation.
    pub(crate) fn check_limits(&self, limits: Option<&Limits>) -> Result<(), PpmError> {
        self.sample_count()?;
        if let Some(limits) = limits {
            limits.check_header(self)?;
        }
        debug!(
            "{:?} header: {}x{}, maxval {}, {} byte(s) per sample",
            self.format,
            self.width,
            self.height,
            self.maxval,
            self.bytes_per_sample()
        );
        Ok(())
    }
}

/// Decode an in-memory PPM file.
pub(crate) fn decode(
    data: &[u8],
    config: &DecodeConfig<'_>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, PpmError> {
    let (header, sample_start, data_start) = header::parse_header(data)?;
    header.check_limits(config.limits)?;
    stop.check()?;

    let pixels = match header.format {
        PpmFormat::Ascii => ascii::decode(&data[sample_start..], &header, config.policy, stop)?,
        PpmFormat::Binary => {
            binary::decode_slice(&data[data_start..], &header, config.policy, stop)?
        }
    };
    Ok(PixelBuffer::new(pixels, &header))
}
