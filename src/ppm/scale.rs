//! Sample rescaling from `[0, maxval]` to `[0, 255]`.
//!
//! Rounding is half-up, done in integer arithmetic:
//! `round(v * 255 / maxval) == (v * 510 + maxval) / (2 * maxval)`.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::PpmError;
use crate::logging::warn;

/// What to do with a sample larger than the declared maxval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SamplePolicy {
    /// Clamp to maxval before rescaling (the sample becomes 255).
    #[default]
    Clamp,
    /// Fail with [`PpmError::SampleOutOfRange`].
    Reject,
}

/// Rescale one in-range sample. `value` must be `<= maxval` and `maxval >= 1`.
#[inline]
pub(crate) fn rescale(value: u32, maxval: u16) -> u8 {
    let m = u32::from(maxval);
    ((value * 510 + m) / (2 * m)) as u8
}

/// Applies the sample policy and the rescale rule, counting clamped samples.
pub(crate) struct SampleScaler {
    maxval: u16,
    policy: SamplePolicy,
    clamped: u64,
    lut: Option<[u8; 256]>,
}

impl SampleScaler {
    pub(crate) fn new(maxval: u16, policy: SamplePolicy) -> Self {
        // 8-bit sources rescale through a table; maxval 255 is the identity.
        let lut = (maxval < 256).then(|| {
            let mut lut = [0u8; 256];
            for (v, slot) in lut.iter_mut().enumerate() {
                *slot = rescale((v as u32).min(u32::from(maxval)), maxval);
            }
            lut
        });
        Self {
            maxval,
            policy,
            clamped: 0,
            lut,
        }
    }

    /// Whether samples pass through unchanged.
    pub(crate) fn is_identity(&self) -> bool {
        self.maxval == 255
    }

    #[inline]
    fn bound(&mut self, value: u32) -> Result<u32, PpmError> {
        let maxval = u32::from(self.maxval);
        if value <= maxval {
            return Ok(value);
        }
        match self.policy {
            SamplePolicy::Clamp => {
                self.clamped += 1;
                Ok(maxval)
            }
            SamplePolicy::Reject => Err(PpmError::SampleOutOfRange {
                value,
                maxval: self.maxval,
            }),
        }
    }

    /// Scale a single sample of any width.
    #[inline]
    pub(crate) fn scale(&mut self, value: u32) -> Result<u8, PpmError> {
        let v = self.bound(value)?;
        Ok(rescale(v, self.maxval))
    }

    /// Scale 1-byte samples, appending to `out`.
    pub(crate) fn scale_u8(
        &mut self,
        src: &[u8],
        row_bytes: usize,
        out: &mut Vec<u8>,
        stop: &dyn Stop,
    ) -> Result<(), PpmError> {
        let maxval = self.maxval;
        for (block_idx, block) in src.chunks(row_bytes.saturating_mul(16).max(1)).enumerate() {
            if block_idx > 0 {
                stop.check()?;
            }
            let Some(lut) = self.lut else {
                for &b in block {
                    out.push(self.scale(u32::from(b))?);
                }
                continue;
            };
            if self.policy == SamplePolicy::Reject {
                if let Some(&b) = block.iter().find(|&&b| u16::from(b) > maxval) {
                    return Err(PpmError::SampleOutOfRange {
                        value: u32::from(b),
                        maxval,
                    });
                }
            } else {
                self.clamped += block.iter().filter(|&&b| u16::from(b) > maxval).count() as u64;
            }
            out.extend(block.iter().map(|&b| lut[usize::from(b)]));
        }
        Ok(())
    }

    /// Scale 2-byte big-endian samples, appending one byte per sample to `out`.
    pub(crate) fn scale_be16(
        &mut self,
        src: &[u8],
        row_bytes: usize,
        out: &mut Vec<u8>,
        stop: &dyn Stop,
    ) -> Result<(), PpmError> {
        for (block_idx, block) in src.chunks(row_bytes.saturating_mul(16).max(2)).enumerate() {
            if block_idx > 0 {
                stop.check()?;
            }
            for pair in block.chunks_exact(2) {
                let v = u32::from(u16::from_be_bytes([pair[0], pair[1]]));
                out.push(self.scale(v)?);
            }
        }
        Ok(())
    }

    /// Report clamping, if any happened.
    pub(crate) fn finish(self) {
        if self.clamped > 0 {
            warn!(
                "clamped {} samples above maxval {}",
                self.clamped, self.maxval
            );
        }
    }
}
