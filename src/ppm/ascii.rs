//! P3 sample decoding.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use enough::Stop;

use super::PpmHeader;
use super::header::{Tokens, latin1, strip_comment};
use super::scale::{SamplePolicy, SampleScaler};
use crate::error::PpmError;

/// Sample tokens after the header, comments removed.
fn sample_tokens(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    data.split(|&b| b == b'\n' || b == b'\r')
        .flat_map(|line| Tokens::new(strip_comment(line)).map(|(token, _)| token))
}

/// Drop bytes outside ASCII. They never form or split a token, so `3\xFF` reads
/// as `3` and a lone `\xFF` is not counted as a sample.
fn ascii_only(data: &[u8]) -> Cow<'_, [u8]> {
    if data.is_ascii() {
        Cow::Borrowed(data)
    } else {
        Cow::Owned(data.iter().copied().filter(u8::is_ascii).collect())
    }
}

/// Parse an unsigned decimal sample, with an optional leading `+`. Values past
/// `u32::MAX` saturate; they are out of range for any maxval anyway.
fn parse_sample(token: &[u8]) -> Result<u32, PpmError> {
    let digits = token.strip_prefix(b"+").unwrap_or(token);
    if digits.is_empty() {
        return Err(PpmError::NumericParse(latin1(token)));
    }
    let mut value = 0u32;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(PpmError::NumericParse(latin1(token)));
        }
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    Ok(value)
}

/// Decode P3 samples into 8-bit RGB.
///
/// Tokens are counted before any are parsed, so a wrong count is reported as
/// such even when the file also holds malformed tokens.
pub(crate) fn decode(
    data: &[u8],
    header: &PpmHeader,
    policy: SamplePolicy,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PpmError> {
    let expected = header.sample_count()?;
    let data = ascii_only(data);
    let actual = sample_tokens(&data).count();
    if actual != expected {
        return Err(PpmError::SampleCountMismatch { expected, actual });
    }

    let mut scaler = SampleScaler::new(header.maxval, policy);
    let mut out = Vec::with_capacity(expected);
    let check_every = header.row_samples().saturating_mul(16).max(1);
    for (i, token) in sample_tokens(&data).enumerate() {
        if i > 0 && i % check_every == 0 {
            stop.check()?;
        }
        out.push(scaler.scale(parse_sample(token)?)?);
    }
    scaler.finish();
    Ok(out)
}
