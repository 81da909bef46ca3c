//! # zenppm
//!
//! PPM decoder for the two RGB pixmap variants:
//! - **P3**: samples as whitespace-separated decimal text
//! - **P6**: samples as raw bytes, 8-bit or 16-bit big-endian
//!
//! Output is always 8-bit RGB, row-major and interleaved, exactly
//! `width * height * 3` bytes. Samples are rescaled from `[0, maxval]` to
//! `[0, 255]` with round-half-up; files with maxval 255 pass through unchanged.
//!
//! `#` comments are allowed anywhere a line is scanned for header fields or
//! P3 samples.
//!
//! ## Non-Goals
//!
//! - Encoding
//! - Grayscale/bitmap PNM (P1, P2, P4, P5), PAM, PFM
//! - Format detection beyond the two-byte magic ([`sniff`])
//!
//! ## Usage
//!
//! ```
//! use zenppm::{DecodeRequest, ImageInfo, Unstoppable};
//!
//! let data = b"P3\n2 1 100\n100 0 0 0 100 0\n";
//!
//! // Header only, no decoding
//! let info = ImageInfo::from_bytes(data)?;
//! assert_eq!((info.width, info.height), (2, 1));
//!
//! let image = DecodeRequest::new(data).decode(Unstoppable)?;
//! assert_eq!(image.pixels(), &[255, 0, 0, 0, 255, 0]);
//! # Ok::<(), zenppm::PpmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod logging;

mod decode;
mod error;
mod info;
mod limits;
mod ppm;
#[cfg(feature = "std")]
mod read;

// Re-exports
pub use decode::{DecodeRequest, PixelBuffer};
pub use enough::{Stop, Unstoppable};
pub use error::PpmError;
pub use info::{ImageInfo, is_ppm, sniff};
pub use limits::Limits;
pub use ppm::PpmFormat;
pub use ppm::scale::SamplePolicy;
#[cfg(feature = "std")]
pub use read::{ReadRequest, decode_file, decode_reader};

/// Decode an in-memory PPM file with default settings.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<PixelBuffer, PpmError> {
    DecodeRequest::new(data).decode(stop)
}
