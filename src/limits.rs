use alloc::format;

use crate::error::PpmError;
use crate::ppm::PpmHeader;

/// Resource limits for decoding.
///
/// All fields default to `None` (no limit). PPM puts no upper bound on width
/// or height, so set these when decoding untrusted input.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes held at once: buffered P3 text or P6 raster plus the
    /// RGB output.
    pub max_memory_bytes: Option<u64>,
    /// Maximum header bytes read from a stream while looking for the four
    /// header fields. `max_memory_bytes` caps this too.
    pub max_header_bytes: Option<u64>,
}

fn exceeded(what: &str, value: u64, max: u64) -> PpmError {
    PpmError::LimitExceeded(format!("{what} {value} exceeds limit {max}"))
}

fn at_most(what: &str, value: u64, max: Option<u64>) -> Result<(), PpmError> {
    match max {
        Some(max) if value > max => Err(exceeded(what, value, max)),
        _ => Ok(()),
    }
}

impl Limits {
    /// Dimensions and the `width * height * 3` output buffer.
    pub(crate) fn check_header(&self, header: &PpmHeader) -> Result<(), PpmError> {
        at_most(
            "width",
            u64::from(header.width),
            self.max_width.map(u64::from),
        )?;
        at_most(
            "height",
            u64::from(header.height),
            self.max_height.map(u64::from),
        )?;
        at_most(
            "pixel count",
            u64::from(header.width) * u64::from(header.height),
            self.max_pixels,
        )?;
        at_most(
            "output bytes",
            header.sample_count()? as u64,
            self.max_memory_bytes,
        )
    }

    /// A streamed P6 raster is buffered whole; unless it passes through
    /// unchanged, the output is allocated next to it.
    pub(crate) fn check_raster(&self, header: &PpmHeader) -> Result<(), PpmError> {
        let raster = header.raster_bytes()? as u64;
        let output = if header.maxval == 255 {
            0
        } else {
            header.sample_count()? as u64
        };
        at_most(
            "raster plus output bytes",
            raster.saturating_add(output),
            self.max_memory_bytes,
        )
    }

    /// How many header bytes a stream may still supply, or `None` if unbounded.
    pub(crate) fn header_budget(&self) -> Option<u64> {
        match (self.max_header_bytes, self.max_memory_bytes) {
            (Some(h), Some(m)) => Some(h.min(m)),
            (h, m) => h.or(m),
        }
    }

    pub(crate) fn header_too_long(&self, read: u64) -> PpmError {
        exceeded("header bytes", read, self.header_budget().unwrap_or(0))
    }

    /// Check buffered P3 text against the memory limit.
    pub(crate) fn check_text(&self, held: usize) -> Result<(), PpmError> {
        at_most("P3 text bytes", held as u64, self.max_memory_bytes)
    }
}
