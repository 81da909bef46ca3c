use alloc::vec::Vec;
use core::slice::ChunksExact;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::PpmError;
use crate::limits::Limits;
use crate::ppm::scale::SamplePolicy;
use crate::ppm::{self, PpmFormat, PpmHeader};
use enough::Stop;

/// Settings shared by the slice and reader decode paths.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DecodeConfig<'a> {
    pub limits: Option<&'a Limits>,
    pub policy: SamplePolicy,
}

/// Decoded image: 8-bit RGB, row-major, channels interleaved.
///
/// Always exactly `width * height * 3` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Maxval declared by the source file (before rescaling to 255).
    pub maxval: u16,
    /// Variant the image was decoded from.
    pub format: PpmFormat,
}

impl PixelBuffer {
    pub(crate) fn new(pixels: Vec<u8>, header: &PpmHeader) -> Self {
        debug_assert_eq!(
            pixels.len(),
            header.width as usize * header.height as usize * 3
        );
        Self {
            pixels,
            width: header.width,
            height: header.height,
            maxval: header.maxval,
            format: header.format,
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_vec(self) -> Vec<u8> {
        self.pixels
    }

    /// Iterate over rows of `width * 3` bytes, top to bottom.
    pub fn rows(&self) -> ChunksExact<'_, u8> {
        self.pixels.chunks_exact(self.width as usize * 3)
    }

    /// Reinterpret pixel data as RGB pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgb(&self) -> &[rgb::RGB8] {
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGB pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGB8> {
        imgref::ImgRef::new(self.as_rgb(), self.width as usize, self.height as usize)
    }

    /// Convert to an [`imgref::ImgVec`] of RGB pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        imgref::ImgVec::new(
            self.as_rgb().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}

/// Builder for decoding an in-memory PPM file.
///
/// ```
/// use zenppm::{DecodeRequest, Limits, SamplePolicy, Unstoppable};
///
/// let limits = Limits {
///     max_pixels: Some(1 << 24),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new(b"P3\n1 1 255\n10 20 30\n")
///     .with_limits(&limits)
///     .with_sample_policy(SamplePolicy::Reject)
///     .decode(Unstoppable)?;
/// assert_eq!(image.pixels(), &[10, 20, 30]);
/// # Ok::<(), zenppm::PpmError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    config: DecodeConfig<'a>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            config: DecodeConfig::default(),
        }
    }

    /// Bound dimensions and allocation size.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.config.limits = Some(limits);
        self
    }

    /// Choose how samples above maxval are handled.
    pub fn with_sample_policy(mut self, policy: SamplePolicy) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<PixelBuffer, PpmError> {
        ppm::decode(self.data, &self.config, &stop)
    }
}
