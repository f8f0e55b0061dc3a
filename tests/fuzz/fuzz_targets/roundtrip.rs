//! Fuzz target for compress/decompress round trips.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// Structured input for round-trip fuzzing.
#[derive(Arbitrary, Debug)]
struct RoundtripInput {
    text: String,
    filename: String,
    include_digest: bool,
}

fuzz_target!(|input: RoundtripInput| {
    // Limit input size to avoid OOM
    if input.text.len() > 1024 * 1024 || input.filename.chars().count() > 1024 {
        return;
    }

    let options = huffpack::PackOptions {
        include_digest: input.include_digest,
    };
    let bytes = huffpack::compress_to_container(&input.text, &input.filename, &options)
        .expect("compress");
    let out = huffpack::decompress_container(&bytes).expect("decompress");

    assert_eq!(out.text, input.text);
    assert_eq!(out.filename, input.filename);
    if input.include_digest {
        assert_eq!(out.verify(), huffpack::Verification::Match);
    }

    // Dropping the last byte must never decode.
    assert!(huffpack::decompress(&bytes[..bytes.len() - 1]).is_err());
});
