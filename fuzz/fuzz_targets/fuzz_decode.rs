#![no_main]
use libfuzzer_sys::fuzz_target;
use zenppm::{DecodeRequest, Limits, SamplePolicy};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };

    // Slice and stream paths must never panic, and must agree.
    let from_slice = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
    let from_reader = zenppm::ReadRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
    if let (Ok(a), Ok(b)) = (&from_slice, &from_reader) {
        assert_eq!(a, b);
        assert_eq!(a.pixels().len(), a.width as usize * a.height as usize * 3);
    }

    let _ = DecodeRequest::new(data)
        .with_limits(&limits)
        .with_sample_policy(SamplePolicy::Reject)
        .decode(enough::Unstoppable);
    let _ = zenppm::ImageInfo::from_bytes(data);
});
