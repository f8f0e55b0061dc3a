//! End-to-end compression pipeline.
//!
//! `compress` builds the model and encodes; `compress_to_container` also
//! packs the result with a filename and digest. The reverse functions
//! unpack and decode, and [`Decompressed::verify`] checks the digest.

use tracing::debug;

use crate::bits::Bits;
use crate::codec;
use crate::container::{Container, Digest};
use crate::error::Result;
use crate::huffman::{CodeTable, FrequencyTable, HuffmanTree};
use crate::integrity;
use crate::stats::CompressionStats;

/// Name used when a container records no filename.
pub const DEFAULT_OUTPUT_NAME: &str = "decoded.txt";

/// Options for packing a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Embed a SHA-256 digest of the original text.
    pub include_digest: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            include_digest: true,
        }
    }
}

impl PackOptions {
    /// Smallest output: no digest.
    pub fn minimal() -> Self {
        Self {
            include_digest: false,
        }
    }
}

/// Input limits enforced by front ends before compressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted input, in bytes.
    pub max_input_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Whether an input of `len` bytes is acceptable.
    pub fn allows(&self, len: usize) -> bool {
        len <= self.max_input_bytes
    }
}

/// Everything produced by compressing a text.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// Symbol counts of the input.
    pub frequencies: FrequencyTable,
    /// Huffman tree; `None` for empty input.
    pub tree: Option<HuffmanTree>,
    /// Code for every symbol.
    pub codes: CodeTable,
    /// Encoded text.
    pub bits: Bits,
}

impl Compressed {
    /// Number of encoded bits.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Size statistics for this run.
    pub fn stats(&self) -> CompressionStats {
        CompressionStats::new(&self.frequencies, self.bits.len() as u64)
    }

    /// Wrap the tree and bits in a container.
    pub fn into_container(self, filename: impl Into<String>) -> Container {
        Container::new(self.tree, self.bits, filename)
    }
}

/// Compress `text` into a tree, code table and encoded bits.
pub fn compress(text: &str) -> Result<Compressed> {
    let frequencies = FrequencyTable::from_text(text);
    debug!(
        chars = frequencies.total(),
        symbols = frequencies.len(),
        "counted frequencies"
    );

    let tree = HuffmanTree::from_frequencies(&frequencies);
    let (codes, bits) = match &tree {
        Some(tree) => {
            let codes = CodeTable::from_tree(tree)?;
            let len = codes.encoded_len(&frequencies) as usize;
            let bits = codec::encode_with_capacity(text, &codes, len)?;
            (codes, bits)
        }
        None => (CodeTable::default(), Bits::new()),
    };

    Ok(Compressed {
        frequencies,
        tree,
        codes,
        bits,
    })
}

/// Compress `text` and pack it into container bytes.
pub fn compress_to_container(
    text: &str,
    filename: &str,
    options: &PackOptions,
) -> Result<Vec<u8>> {
    let mut container = compress(text)?.into_container(filename);
    if options.include_digest {
        container = container.with_digest(integrity::sha256(text));
    }
    container.to_bytes()
}

/// Decode container bytes back to the original text.
pub fn decompress(bytes: &[u8]) -> Result<String> {
    Container::from_bytes(bytes)?.decode_text()
}

/// Result of unpacking and decoding a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    /// Decoded text.
    pub text: String,
    /// Filename recorded in the container; may be empty.
    pub filename: String,
    /// Digest recorded in the container, if any.
    pub digest: Option<Digest>,
    /// Length of the encoded payload in bits.
    pub bit_len: usize,
}

/// Outcome of checking a decoded text against its recorded digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The digest matches the decoded text.
    Match,
    /// The digest does not match.
    Mismatch,
    /// The container carries no digest.
    Absent,
}

impl Decompressed {
    /// Compare the recorded digest with a digest of the decoded text.
    pub fn verify(&self) -> Verification {
        match &self.digest {
            None => Verification::Absent,
            Some(expected) if *expected == integrity::sha256(&self.text) => Verification::Match,
            Some(_) => Verification::Mismatch,
        }
    }

    /// Recorded filename, or [`DEFAULT_OUTPUT_NAME`] when none was stored.
    pub fn output_name(&self) -> &str {
        if self.filename.is_empty() {
            DEFAULT_OUTPUT_NAME
        } else {
            &self.filename
        }
    }
}

/// Unpack and decode a container, keeping its metadata.
pub fn decompress_container(bytes: &[u8]) -> Result<Decompressed> {
    let container = Container::from_bytes(bytes)?;
    let text = container.decode_text()?;
    debug!(
        chars = text.chars().count(),
        filename = %container.filename,
        "decompressed container"
    );
    Ok(Decompressed {
        text,
        bit_len: container.bits.len(),
        filename: container.filename,
        digest: container.digest,
    })
}
