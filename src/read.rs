//! Decoding from `std::io::Read` streams.
//!
//! The header is read line by line through a `BufReader`; the same reader then
//! supplies the samples, so nothing is read twice.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use enough::Stop;

use crate::decode::{DecodeConfig, PixelBuffer};
use crate::error::PpmError;
use crate::limits::Limits;
use crate::ppm::header::{HeaderTokenizer, is_space};
use crate::ppm::scale::SamplePolicy;
use crate::ppm::{PpmFormat, ascii, binary};

/// Builder for decoding a PPM stream.
///
/// The reader is owned by the request and dropped when decoding returns,
/// whether it succeeds or fails.
#[derive(Debug)]
pub struct ReadRequest<'a, R> {
    reader: R,
    config: DecodeConfig<'a>,
}

impl<'a, R: Read> ReadRequest<'a, R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
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
        decode_stream(self.reader, &self.config, &stop)
    }
}

pub(crate) fn decode_stream<R: Read>(
    reader: R,
    config: &DecodeConfig<'_>,
    stop: &dyn Stop,
) -> Result<PixelBuffer, PpmError> {
    let mut reader = BufReader::new(reader);
    let mut tokenizer = HeaderTokenizer::new();
    let mut line = Vec::new();
    let header_limit = config
        .limits
        .and_then(|l| l.header_budget().map(|max| (l, max)));
    let mut header_len = 0u64;

    let (token_end, cut) = loop {
        line.clear();
        let read = match header_limit {
            Some((limits, max)) if header_len >= max => {
                return Err(limits.header_too_long(header_len));
            }
            Some((_, max)) => (&mut reader)
                .take(max - header_len)
                .read_until(b'\n', &mut line)?,
            None => reader.read_until(b'\n', &mut line)?,
        };
        if read == 0 {
            return Err(if header_len > 0 {
                PpmError::HeaderIncomplete {
                    found: tokenizer.found(),
                }
            } else {
                PpmError::EmptyInput
            });
        }
        header_len += read as u64;
        // The budget ran out mid-line.
        let cut = header_limit.is_some_and(|(_, max)| header_len == max)
            && !line.ends_with(b"\n");
        // A cut line may end inside a token; hold that token back.
        let whole = if cut {
            line.iter().rposition(|&b| is_space(b)).map_or(0, |i| i + 1)
        } else {
            line.len()
        };
        if let Some(end) = tokenizer.feed_line(&line[..whole])? {
            break (end, cut);
        }
    };

    let header = tokenizer.into_header()?;
    // P6 raster starts after the maxval line, which was not read to its end.
    if let (true, PpmFormat::Binary, Some((limits, _))) = (cut, header.format, header_limit)
    {
        return Err(limits.header_too_long(header_len + 1));
    }
    header.check_limits(config.limits)?;
    stop.check()?;

    let pixels = match header.format {
        PpmFormat::Ascii => {
            // The rest of the maxval line may already hold samples.
            let mut text = line.split_off(token_end);
            read_text(&mut reader, &mut text, config.limits)?;
            ascii::decode(&text, &header, config.policy, stop)?
        }
        PpmFormat::Binary => {
            if let Some(limits) = config.limits {
                limits.check_raster(&header)?;
            }
            binary::decode_reader(&mut reader, &header, config.policy, stop)?
        }
    };
    Ok(PixelBuffer::new(pixels, &header))
}

/// Read the remaining P3 text, honoring the memory limit.
fn read_text<R: Read>(
    reader: &mut R,
    text: &mut Vec<u8>,
    limits: Option<&Limits>,
) -> Result<(), PpmError> {
    match limits.and_then(|l| l.max_memory_bytes) {
        Some(max) => {
            let budget = max.saturating_sub(text.len() as u64).saturating_add(1);
            (&mut *reader).take(budget).read_to_end(text)?;
            if let Some(limits) = limits {
                limits.check_text(text.len())?;
            }
        }
        None => {
            reader.read_to_end(text)?;
        }
    }
    Ok(())
}

/// Decode a PPM stream with default settings.
pub fn decode_reader<R: Read>(reader: R, stop: impl Stop) -> Result<PixelBuffer, PpmError> {
    decode_stream(reader, &DecodeConfig::default(), &stop)
}

/// Open and decode a PPM file. The file is closed before this returns.
pub fn decode_file(path: impl AsRef<Path>, stop: impl Stop) -> Result<PixelBuffer, PpmError> {
    let file = std::fs::File::open(path)?;
    decode_stream(file, &DecodeConfig::default(), &stop)
}
