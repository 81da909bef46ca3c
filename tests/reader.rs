//! Decoding from `std::io::Read` streams.
#![cfg(feature = "std")]

use std::io::{self, Cursor, Read};

use enough::Unstoppable;
use zenppm::*;

/// Hands out at most `step` bytes per read, with an `Interrupted` error first.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    step: usize,
    interrupted: bool,
}

impl Trickle {
    fn new(data: Vec<u8>, step: usize) -> Self {
        Self {
            data,
            pos: 0,
            step,
            interrupted: false,
        }
    }
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::ErrorKind::Interrupted.into());
        }
        let n = buf.len().min(self.step).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn p6(w: u32, h: u32, maxval: u32, raster: &[u8]) -> Vec<u8> {
    let mut out = format!("P6\n{w} {h}\n{maxval}\n").into_bytes();
    out.extend_from_slice(raster);
    out
}

fn ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 256) as u8).collect()
}

#[test]
fn reader_matches_slice_p6() {
    let data = p6(31, 17, 255, &ramp(31 * 17 * 3));
    let from_slice = decode(&data, Unstoppable).unwrap();
    let from_reader = decode_reader(Trickle::new(data, 5), Unstoppable).unwrap();
    assert_eq!(from_slice, from_reader);
}

#[test]
fn reader_matches_slice_p6_sixteen_bit() {
    let data = p6(40, 30, 4095, &ramp(40 * 30 * 3 * 2));
    let from_slice = decode(&data, Unstoppable).unwrap();
    let from_reader = decode_reader(Trickle::new(data, 1000), Unstoppable).unwrap();
    assert_eq!(from_slice, from_reader);
}

#[test]
fn reader_crosses_block_boundary() {
    // Raster larger than one 64 KiB block.
    let raster = ramp(200 * 150 * 3);
    let data = p6(200, 150, 255, &raster);
    let image = decode_reader(Cursor::new(data), Unstoppable).unwrap();
    assert_eq!(image.pixels(), &raster[..]);
}

#[test]
fn reader_p3_samples_on_maxval_line() {
    let data = b"P3 2 1 100 100 0 0\n0 100 0\n".to_vec();
    let image = decode_reader(Trickle::new(data, 3), Unstoppable).unwrap();
    assert_eq!(image.pixels(), &[255, 0, 0, 0, 255, 0]);
}

#[test]
fn reader_short_raster() {
    let data = p6(2, 2, 65535, &[0xAB; 23]);
    let err = decode_reader(Cursor::new(data), Unstoppable).unwrap_err();
    assert!(matches!(
        err,
        PpmError::SampleCountMismatch {
            expected: 24,
            actual: 23
        }
    ));
}

#[test]
fn reader_header_errors() {
    assert!(matches!(
        decode_reader(Cursor::new(Vec::new()), Unstoppable),
        Err(PpmError::EmptyInput)
    ));
    assert!(matches!(
        decode_reader(Cursor::new(b"P6\n2".to_vec()), Unstoppable),
        Err(PpmError::HeaderIncomplete { found: 2 })
    ));
    assert!(matches!(
        decode_reader(Cursor::new(b"P5\n1 1\n255\n\0".to_vec()), Unstoppable),
        Err(PpmError::InvalidMagic(_))
    ));
}

#[test]
fn reader_io_error_propagates() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }
    assert!(matches!(
        decode_reader(Broken, Unstoppable),
        Err(PpmError::Io(_))
    ));
}

#[test]
fn reader_limits_cap_p3_text() {
    let limits = Limits {
        max_memory_bytes: Some(64),
        ..Default::default()
    };
    let mut data = b"P3\n1 1\n255\n".to_vec();
    data.extend(std::iter::repeat_n(b' ', 1000));
    data.extend_from_slice(b"1 2 3\n");
    let err = ReadRequest::new(Cursor::new(data))
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PpmError::LimitExceeded(_)), "{err:?}");
}

#[test]
fn reader_sample_policy() {
    let data = b"P3\n1 1\n10\n11 10 0\n".to_vec();
    let err = ReadRequest::new(Cursor::new(data))
        .with_sample_policy(SamplePolicy::Reject)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(
        err,
        PpmError::SampleOutOfRange {
            value: 11,
            maxval: 10
        }
    ));
}

#[test]
fn decode_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("zenppm-{}.ppm", std::process::id()));
    let raster = ramp(4 * 4 * 3);
    std::fs::write(&path, p6(4, 4, 255, &raster)).unwrap();
    let image = decode_file(&path, Unstoppable);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(image.unwrap().pixels(), &raster[..]);

    assert!(matches!(
        decode_file("/nonexistent/zenppm/missing.ppm", Unstoppable),
        Err(PpmError::Io(_))
    ));
}

fn header_limit(max: u64) -> Limits {
    Limits {
        max_header_bytes: Some(max),
        ..Default::default()
    }
}

#[test]
fn reader_header_without_newline_is_capped() {
    let mut data = b"P6 1 1".to_vec();
    data.extend(std::iter::repeat_n(b' ', 1000));
    let limits = header_limit(32);
    let err = ReadRequest::new(Cursor::new(data))
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PpmError::LimitExceeded(_)), "{err:?}");

    // The memory limit bounds the header as well.
    let mut data = b"P3".to_vec();
    data.extend(std::iter::repeat_n(b'\t', 1000));
    let limits = Limits {
        max_memory_bytes: Some(100),
        ..Default::default()
    };
    let err = ReadRequest::new(Cursor::new(data))
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PpmError::LimitExceeded(_)), "{err:?}");
}

#[test]
fn reader_header_cap_never_splits_a_token() {
    let data = b"P3 1 1 255 1 2 3\n";
    // "P3 1 1 25" would otherwise parse as maxval 25.
    let limits = header_limit(9);
    let err = ReadRequest::new(Cursor::new(data.to_vec()))
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PpmError::LimitExceeded(_)), "{err:?}");

    // Samples sharing the cut line are still read in full.
    let limits = header_limit(12);
    let image = ReadRequest::new(Cursor::new(data.to_vec()))
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(image.pixels(), &[1, 2, 3]);
}

#[test]
fn reader_p6_maxval_line_must_end_within_cap() {
    let mut data = b"P6 1 1 255".to_vec();
    data.extend(std::iter::repeat_n(b' ', 40));
    data.extend_from_slice(b"\n\x01\x02\x03");
    let limits = header_limit(16);
    let err = ReadRequest::new(Cursor::new(data.clone()))
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PpmError::LimitExceeded(_)), "{err:?}");

    let limits = header_limit(64);
    let image = ReadRequest::new(Cursor::new(data))
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(image.pixels(), &[1, 2, 3]);
}

#[test]
fn reader_limits_count_buffered_raster() {
    // 2x2 at maxval 1000: 24 raster bytes plus 12 output bytes.
    let data = p6(2, 2, 1000, &[0; 24]);
    let tight = Limits {
        max_memory_bytes: Some(35),
        ..Default::default()
    };
    let err = ReadRequest::new(Cursor::new(data.clone()))
        .with_limits(&tight)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, PpmError::LimitExceeded(_)), "{err:?}");

    let enough = Limits {
        max_memory_bytes: Some(36),
        ..Default::default()
    };
    let image = ReadRequest::new(Cursor::new(data))
        .with_limits(&enough)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(image.pixels(), &[0; 12]);
}
