//! WebAssembly bindings for huffpack.
//!
//! Three functions are exported: compress text into a container, unpack a
//! container, and hash text the same way the container digest does.
//!
//! # Building
//!
//! ```bash
//! rustup target add wasm32-unknown-unknown
//! cargo install wasm-bindgen-cli
//!
//! cargo build --target wasm32-unknown-unknown --release --features wasm
//! wasm-bindgen --target web --out-dir web/pkg --out-name huffpack \
//!   target/wasm32-unknown-unknown/release/huffpack.wasm
//! ```
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { compressText, decompressBytes } from 'huffpack';
//!
//! await init();
//!
//! const packed = compressText(await file.text(), file.name, true);
//! const text = decompressBytes(packed);
//! ```

use wasm_bindgen::prelude::*;

use crate::archive::{self, Limits, PackOptions, Verification};
use crate::integrity;

fn js_error(e: crate::Error) -> JsError {
    JsError::new(&e.to_string())
}

/// Compress text into container bytes.
///
/// # Arguments
///
/// * `text` - Text to compress
/// * `filename` - Name recorded in the container
/// * `include_digest` - Embed a SHA-256 digest for verification
///
/// # Returns
///
/// Container bytes as Uint8Array.
#[wasm_bindgen(js_name = "compressText")]
pub fn compress_text(text: &str, filename: &str, include_digest: bool) -> Result<Vec<u8>, JsError> {
    let limits = Limits::default();
    if !limits.allows(text.len()) {
        return Err(JsError::new(&format!(
            "Input is {} bytes; the limit is {} bytes",
            text.len(),
            limits.max_input_bytes
        )));
    }
    let options = PackOptions { include_digest };
    archive::compress_to_container(text, filename, &options).map_err(js_error)
}

/// Decompress container bytes back to text.
///
/// Fails if the container is malformed or its digest does not match.
#[wasm_bindgen(js_name = "decompressBytes")]
pub fn decompress_bytes(data: &[u8]) -> Result<String, JsError> {
    let out = archive::decompress_container(data).map_err(js_error)?;
    if out.verify() == Verification::Mismatch {
        return Err(JsError::new("Digest mismatch: decoded text is corrupt"));
    }
    Ok(out.text)
}

/// Hex SHA-256 of `text`.
#[wasm_bindgen(js_name = "digestHex")]
pub fn digest_hex(text: &str) -> String {
    integrity::to_hex(&integrity::sha256(text))
}

// JsError only works on wasm32; native tests cover the pipeline directly.
#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let packed = compress_text("hello wasm", "w.txt", true).unwrap();
        assert_eq!(decompress_bytes(&packed).unwrap(), "hello wasm");
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(decompress_bytes(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_digest_hex_len() {
        assert_eq!(digest_hex("abc").len(), 64);
    }
}
