//! Fuzz target for container decoding.
//!
//! Arbitrary bytes must produce either text or an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(out) = huffpack::decompress_container(data) {
        // Re-packing what was read must give back the same text.
        let options = huffpack::PackOptions::minimal();
        let repacked = huffpack::compress_to_container(&out.text, &out.filename, &options)
            .expect("repack decoded text");
        let again = huffpack::decompress(&repacked).expect("decode repacked");
        assert_eq!(again, out.text);
    }
});
