//! # huffpack
//!
//! Lossless text compression with Huffman coding.
//!
//! Text is treated as a sequence of Unicode scalar values. Each distinct
//! character gets a prefix-free code derived from its frequency, and the
//! encoded bits are packed with the tree, the original filename and an
//! optional SHA-256 digest into a self-describing container.
//!
//! ## Features
//!
//! - **Exact round trips** for any UTF-8 text, including control characters
//! - **Deterministic output**: the same input always packs to the same bytes
//! - **Hostile input safe**: malformed containers are rejected with a typed
//!   error, never a panic
//! - Optional CLI via the `cli` feature
//! - Optional WebAssembly bindings via the `wasm` feature
//!
//! ## Example
//!
//! ```rust
//! use huffpack::{compress_to_container, decompress_container, PackOptions, Verification};
//!
//! let bytes = compress_to_container("abracadabra", "magic.txt", &PackOptions::default()).unwrap();
//! let out = decompress_container(&bytes).unwrap();
//!
//! assert_eq!(out.text, "abracadabra");
//! assert_eq!(out.filename, "magic.txt");
//! assert_eq!(out.verify(), Verification::Match);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod archive;
pub mod bits;
pub mod codec;
pub mod container;
pub mod error;
pub mod huffman;
pub mod integrity;
pub mod stats;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use archive::{
    compress, compress_to_container, decompress, decompress_container, Compressed, Decompressed,
    Limits, PackOptions, Verification, DEFAULT_OUTPUT_NAME,
};
pub use bits::Bits;
pub use container::{Container, Digest};
pub use error::{Error, Field, Result};
pub use huffman::{Code, CodeTable, FrequencyTable, HuffmanTree};
pub use stats::CompressionStats;
