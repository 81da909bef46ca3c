#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // P6 2x2, 8-bit
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/p6_2x2.ppm"), ppm).unwrap();

    // P6 1x1, 16-bit with a comment
    let ppm16 = b"P6\n# sixteen\n1 1\n65535\n\xff\xff\x00\x00\x80\x00";
    fs::write(format!("{dir}/p6_16bit_1x1.ppm"), ppm16).unwrap();

    // P3 2x1, rescaled
    fs::write(format!("{dir}/p3_2x1.ppm"), b"P3\n2 1 100\n100 0 0 0 100 0\n").unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/p2.bin"), b"P2\n1 1\n255\n0\n").unwrap();
    fs::write(format!("{dir}/p6_short.bin"), b"P6\n2 2\n255\n\x00\x00").unwrap();
    fs::write(format!("{dir}/p3_extra.bin"), b"P3 1 1 255 1 2 3 4\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
