//! The huffpack container format.
//!
//! A container is one bit stream, packed MSB first and zero-padded to a
//! byte boundary:
//!
//! ```text
//! tree length   32 bits   (0 when the text was empty)
//! tree          see `tree_format`
//! data length   32 bits
//! data          Huffman-encoded text
//! name length   16 bits   (in characters)
//! name          21 bits per character
//! digest        256 bits, optional
//! padding       0-7 zero bits
//! ```
//!
//! Every variable-size field is preceded by its exact length, so readers
//! never depend on the padding. The digest is present exactly when at least
//! 256 bits follow the name.

pub mod tree_format;

use tracing::debug;

use crate::bits::{BitReader, BitWriter, Bits};
use crate::codec;
use crate::error::{Error, Field, Result};
use crate::huffman::HuffmanTree;

pub use tree_format::SYMBOL_BITS;

/// Width of the tree and data length prefixes.
pub const LENGTH_PREFIX_BITS: u8 = 32;

/// Width of the filename length prefix.
pub const NAME_LENGTH_BITS: u8 = 16;

/// Size of the integrity digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Size of the integrity digest in bits.
pub const DIGEST_BITS: usize = DIGEST_LEN * 8;

/// Smallest valid container: three length prefixes, no payload.
pub const MIN_CONTAINER_BITS: usize =
    2 * LENGTH_PREFIX_BITS as usize + NAME_LENGTH_BITS as usize;

/// Longest filename a container can record, in characters.
pub const MAX_NAME_CHARS: usize = (1 << NAME_LENGTH_BITS) - 1;

/// Opaque fixed-width integrity digest.
pub type Digest = [u8; DIGEST_LEN];

/// A compressed payload with its tree and metadata.
#[derive(Debug, Clone)]
pub struct Container {
    /// Decoding tree; `None` for empty text.
    pub tree: Option<HuffmanTree>,
    /// Encoded text.
    pub bits: Bits,
    /// Name of the original file.
    pub filename: String,
    /// Digest of the original text, if one was recorded.
    pub digest: Option<Digest>,
}

impl Container {
    /// Create a container without a digest.
    pub fn new(tree: Option<HuffmanTree>, bits: Bits, filename: impl Into<String>) -> Self {
        Self {
            tree,
            bits,
            filename: filename.into(),
            digest: None,
        }
    }

    /// Attach an integrity digest.
    #[must_use]
    pub fn with_digest(mut self, digest: Digest) -> Self {
        self.digest = Some(digest);
        self
    }

    /// Exact size of the packed container in bits, before padding.
    pub fn bit_len(&self) -> usize {
        let tree_bits = self.tree.as_ref().map_or(0, tree_format::serialized_len);
        let digest_bits = if self.digest.is_some() { DIGEST_BITS } else { 0 };
        MIN_CONTAINER_BITS
            + tree_bits
            + self.bits.len()
            + self.filename.chars().count() * SYMBOL_BITS as usize
            + digest_bits
    }

    /// Pack into bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let tree_bits = self.tree.as_ref().map_or(0, tree_format::serialized_len);
        let tree_len = length_prefix(tree_bits, Field::Tree)?;
        let data_len = length_prefix(self.bits.len(), Field::Data)?;

        let name_chars = self.filename.chars().count();
        if name_chars > MAX_NAME_CHARS {
            return Err(Error::container(
                Field::Name,
                format!(
                    "{} characters exceeds the {} character limit",
                    name_chars, MAX_NAME_CHARS
                ),
            ));
        }

        let mut writer = BitWriter::with_capacity(self.bit_len().div_ceil(8));

        writer.write_bits(tree_len as u64, LENGTH_PREFIX_BITS);
        if let Some(tree) = &self.tree {
            tree_format::write_tree(tree, &mut writer);
        }

        writer.write_bits(data_len as u64, LENGTH_PREFIX_BITS);
        writer.write_all(&self.bits);

        writer.write_bits(name_chars as u64, NAME_LENGTH_BITS);
        for c in self.filename.chars() {
            writer.write_bits(c as u64, SYMBOL_BITS);
        }

        if let Some(digest) = &self.digest {
            for &byte in digest {
                writer.write_bits(byte as u64, 8);
            }
        }

        debug_assert_eq!(writer.bit_len(), self.bit_len());
        let bytes = writer.into_padded_bytes();
        debug!(
            tree_bits,
            data_bits = self.bits.len(),
            bytes = bytes.len(),
            digest = self.digest.is_some(),
            "packed container"
        );
        Ok(bytes)
    }

    /// Unpack from bytes, validating every length prefix.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() * 8 < MIN_CONTAINER_BITS {
            return Err(Error::container(
                Field::Header,
                format!(
                    "need at least {} bytes, got {}",
                    MIN_CONTAINER_BITS / 8,
                    bytes.len()
                ),
            ));
        }

        let mut reader = BitReader::new(bytes);

        let tree_len = read_prefix(&mut reader, LENGTH_PREFIX_BITS, Field::TreeLength)?;
        let tree = if tree_len == 0 {
            None
        } else {
            let mut tree_reader = reader
                .split(tree_len)
                .ok_or_else(|| overrun(Field::Tree, tree_len, &reader))?;
            let tree = tree_format::read_tree(&mut tree_reader)?;
            if !tree_reader.is_empty() {
                return Err(Error::container(
                    Field::Tree,
                    format!(
                        "tree ends after {} of {} declared bits",
                        tree_reader.position(),
                        tree_len
                    ),
                ));
            }
            Some(tree)
        };

        let data_len = read_prefix(&mut reader, LENGTH_PREFIX_BITS, Field::DataLength)?;
        let bits = reader
            .read_into(data_len)
            .ok_or_else(|| overrun(Field::Data, data_len, &reader))?;

        let name_chars = read_prefix(&mut reader, NAME_LENGTH_BITS, Field::NameLength)?;
        let name_bits = name_chars * SYMBOL_BITS as usize;
        if reader.remaining() < name_bits {
            return Err(overrun(Field::Name, name_bits, &reader));
        }
        let mut filename = String::with_capacity(name_chars);
        for _ in 0..name_chars {
            let raw = reader
                .read_bits(SYMBOL_BITS)
                .ok_or_else(|| overrun(Field::Name, SYMBOL_BITS as usize, &reader))?
                as u32;
            let c = char::from_u32(raw).ok_or_else(|| {
                Error::container(Field::Name, format!("invalid code point 0x{:X}", raw))
            })?;
            filename.push(c);
        }

        let digest = read_digest(&mut reader)?;

        debug!(
            tree_bits = tree_len,
            data_bits = data_len,
            digest = digest.is_some(),
            "unpacked container"
        );
        Ok(Self {
            tree,
            bits,
            filename,
            digest,
        })
    }

    /// Decode the payload back into text.
    pub fn decode_text(&self) -> Result<String> {
        codec::decode(&self.bits, self.tree.as_ref())
    }
}

fn length_prefix(len: usize, field: Field) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        Error::container(
            field,
            format!("{} bits exceeds the 32-bit length prefix", len),
        )
    })
}

fn read_prefix(reader: &mut BitReader<'_>, width: u8, field: Field) -> Result<usize> {
    reader
        .read_bits(width)
        .map(|v| v as usize)
        .ok_or_else(|| overrun(field, width as usize, reader))
}

fn overrun(field: Field, needed: usize, reader: &BitReader<'_>) -> Error {
    Error::container(
        field,
        format!(
            "needs {} bits at bit {}, only {} remain",
            needed,
            reader.position(),
            reader.remaining()
        ),
    )
}

/// Read the optional digest; anything after it must be padding.
fn read_digest(reader: &mut BitReader<'_>) -> Result<Option<Digest>> {
    let remaining = reader.remaining();
    if remaining < 8 {
        return Ok(None);
    }
    if remaining < DIGEST_BITS {
        return Err(Error::container(
            Field::Digest,
            format!("{} trailing bits: truncated digest", remaining),
        ));
    }

    let mut digest = [0u8; DIGEST_LEN];
    for byte in digest.iter_mut() {
        *byte = reader
            .read_bits(8)
            .ok_or_else(|| overrun(Field::Digest, 8, reader))? as u8;
    }

    if reader.remaining() >= 8 {
        return Err(Error::container(
            Field::Digest,
            format!("{} unexpected bits after digest", reader.remaining()),
        ));
    }
    Ok(Some(digest))
}
