//! P6 raster decoding.

use alloc::vec::Vec;
use enough::Stop;

use super::PpmHeader;
use super::scale::{SamplePolicy, SampleScaler};
use crate::error::PpmError;
use crate::logging::debug;

/// Block size for streaming raster reads.
#[cfg(feature = "std")]
pub(crate) const BLOCK_SIZE: usize = 64 * 1024;

/// Decode a P6 raster held in memory. Bytes past the raster are ignored.
pub(crate) fn decode_slice(
    data: &[u8],
    header: &PpmHeader,
    policy: SamplePolicy,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PpmError> {
    let expected = header.raster_bytes()?;
    let raster = data
        .get(..expected)
        .ok_or(PpmError::SampleCountMismatch {
            expected,
            actual: data.len(),
        })?;
    let scaler = SampleScaler::new(header.maxval, policy);
    if scaler.is_identity() {
        return Ok(raster.to_vec());
    }
    transform(raster, header, scaler, stop)
}

/// Rescale a complete raster of exactly `header.raster_bytes()` bytes.
pub(crate) fn transform(
    raster: &[u8],
    header: &PpmHeader,
    mut scaler: SampleScaler,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PpmError> {
    let mut out = Vec::with_capacity(header.sample_count()?);
    let row_bytes = header.row_samples() * header.bytes_per_sample();
    if header.bytes_per_sample() == 1 {
        scaler.scale_u8(raster, row_bytes, &mut out, stop)?;
    } else {
        debug!("rescaling 16-bit samples from maxval {}", header.maxval);
        scaler.scale_be16(raster, row_bytes, &mut out, stop)?;
    }
    scaler.finish();
    Ok(out)
}

/// Read up to `expected` bytes in fixed-size blocks.
///
/// Short reads are retried until `expected` bytes arrive or the stream ends.
/// The buffer grows one block at a time, so a header that lies about its size
/// cannot force a large allocation before the data is actually there.
#[cfg(feature = "std")]
pub(crate) fn read_blocks<R: std::io::Read>(
    reader: &mut R,
    expected: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PpmError> {
    use std::io::ErrorKind;

    let mut buf = Vec::with_capacity(expected.min(BLOCK_SIZE));
    let mut blocks = 0usize;
    while buf.len() < expected {
        let filled = buf.len();
        let want = (expected - filled).min(BLOCK_SIZE);
        buf.resize(filled + want, 0);
        match reader.read(&mut buf[filled..]) {
            Ok(n) => {
                buf.truncate(filled + n);
                if n == 0 {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {
                buf.truncate(filled);
                continue;
            }
            Err(e) => return Err(e.into()),
        }
        blocks += 1;
        if blocks % 16 == 0 {
            stop.check()?;
        }
    }
    if buf.len() != expected {
        return Err(PpmError::SampleCountMismatch {
            expected,
            actual: buf.len(),
        });
    }
    Ok(buf)
}

/// Decode a P6 raster from a reader positioned at the first raster byte.
#[cfg(feature = "std")]
pub(crate) fn decode_reader<R: std::io::Read>(
    reader: &mut R,
    header: &PpmHeader,
    policy: SamplePolicy,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PpmError> {
    let raster = read_blocks(reader, header.raster_bytes()?, stop)?;
    let scaler = SampleScaler::new(header.maxval, policy);
    if scaler.is_identity() {
        return Ok(raster);
    }
    transform(&raster, header, scaler, stop)
}
