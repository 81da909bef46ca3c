//! Header tokenizer.
//!
//! The header is read line by line. Each line loses everything from the first
//! `#` onward, then splits on whitespace. Tokens accumulate across lines until
//! the four fields `magic width height maxval` are present.

use alloc::string::String;
use alloc::vec::Vec;

use super::{PpmFormat, PpmHeader};
use crate::error::PpmError;

/// Remove a `#` comment running to the end of the line.
pub(crate) fn strip_comment(line: &[u8]) -> &[u8] {
    match line.iter().position(|&b| b == b'#') {
        Some(hash) => &line[..hash],
        None => line,
    }
}

/// Netpbm whitespace: space, tab, LF, VT, FF, CR.
#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Render bytes one char per byte (Latin-1), for messages about non-ASCII input.
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Whitespace-separated tokens of a line, each with the offset just past it.
pub(crate) struct Tokens<'a> {
    line: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(line: &'a [u8]) -> Self {
        Self { line, pos: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (&'a [u8], usize);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.line[self.pos..];
        let start = self.pos + rest.iter().position(|&b| !is_space(b))?;
        let len = self.line[start..]
            .iter()
            .position(|&b| is_space(b))
            .unwrap_or(self.line.len() - start);
        self.pos = start + len;
        Some((&self.line[start..self.pos], self.pos))
    }
}

/// Line-fed header tokenizer.
///
/// Works the same whether lines come from a slice or a buffered reader, so the
/// header is parsed in one forward pass either way.
#[derive(Default)]
pub(crate) struct HeaderTokenizer {
    fields: Vec<Vec<u8>>,
    format: Option<PpmFormat>,
}

impl HeaderTokenizer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed one line (terminator included or not).
    ///
    /// Returns `Some(offset)` once the fourth field is found, where `offset` is
    /// the position within `line` just past that field. The magic is checked as
    /// soon as it is seen.
    pub(crate) fn feed_line(&mut self, line: &[u8]) -> Result<Option<usize>, PpmError> {
        for (token, end) in Tokens::new(strip_comment(line)) {
            if self.fields.is_empty() {
                self.format = Some(PpmFormat::from_magic(token)?);
            }
            self.fields.push(token.to_vec());
            if self.fields.len() == 4 {
                return Ok(Some(end));
            }
        }
        Ok(None)
    }

    /// Number of fields collected so far.
    pub(crate) fn found(&self) -> usize {
        self.fields.len()
    }

    /// Parse and validate the collected fields.
    pub(crate) fn into_header(self) -> Result<PpmHeader, PpmError> {
        let (Some(format), [_, width, height, maxval]) = (self.format, self.fields.as_slice())
        else {
            return Err(PpmError::HeaderIncomplete {
                found: self.fields.len(),
            });
        };
        PpmHeader::from_fields(
            format,
            parse_field(width)?,
            parse_field(height)?,
            parse_field(maxval)?,
        )
    }
}

/// Parse a signed decimal header field.
fn parse_field(token: &[u8]) -> Result<i64, PpmError> {
    core::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| PpmError::NumericParse(latin1(token)))
}

/// Tokenize a header held in memory.
///
/// Returns the header plus two offsets into `data`: where P3 samples start
/// (just past the maxval token) and where P6 raster data starts (just past
/// the line holding the maxval token).
pub(crate) fn parse_header(data: &[u8]) -> Result<(PpmHeader, usize, usize), PpmError> {
    let mut tokenizer = HeaderTokenizer::new();
    let mut line_start = 0;
    for line in data.split_inclusive(|&b| b == b'\n') {
        if let Some(end) = tokenizer.feed_line(line)? {
            let header = tokenizer.into_header()?;
            return Ok((header, line_start + end, line_start + line.len()));
        }
        line_start += line.len();
    }
    Err(match tokenizer.found() {
        _ if data.is_empty() => PpmError::EmptyInput,
        found => PpmError::HeaderIncomplete { found },
    })
}
