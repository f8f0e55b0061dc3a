//! Error types for the huffpack library.

use std::fmt;

/// Result type alias for huffpack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Container field being read or written when a format error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Fixed-size header (the smallest possible container).
    Header,
    /// 32-bit tree length prefix.
    TreeLength,
    /// Serialized tree body.
    Tree,
    /// 32-bit encoded data length prefix.
    DataLength,
    /// Encoded data bits.
    Data,
    /// 16-bit filename length prefix.
    NameLength,
    /// Filename characters.
    Name,
    /// Trailing integrity digest block.
    Digest,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Header => "header",
            Field::TreeLength => "tree length",
            Field::Tree => "tree",
            Field::DataLength => "data length",
            Field::Data => "data",
            Field::NameLength => "filename length",
            Field::Name => "filename",
            Field::Digest => "digest",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while compressing or decompressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A symbol in the input has no entry in the code table.
    UnknownSymbol(char),
    /// The serialized tree ended while more nodes were expected.
    TruncatedTree {
        /// Bit offset (within the tree field) where reading failed.
        bit_offset: usize,
        /// Number of tree bits that were available.
        available: usize,
    },
    /// A tree path is longer than a code can hold.
    CodeTooLong {
        /// Maximum supported code length in bits.
        max: u8,
    },
    /// A serialized leaf holds a value that is not a Unicode scalar value.
    InvalidCodePoint(u32),
    /// The encoded bits ended in the middle of a code.
    MalformedBitstream {
        /// Bit offset where the last complete symbol ended.
        bit_offset: usize,
        /// Total number of encoded bits.
        bit_len: usize,
    },
    /// The container layout is invalid or truncated.
    ContainerFormat {
        /// Field being processed.
        field: Field,
        /// Human-readable reason.
        reason: String,
    },
}

impl Error {
    pub(crate) fn container(field: Field, reason: impl Into<String>) -> Self {
        Error::ContainerFormat {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSymbol(c) => {
                write!(f, "Symbol {:?} (U+{:04X}) not in code table", c, *c as u32)
            }
            Error::TruncatedTree {
                bit_offset,
                available,
            } => {
                write!(
                    f,
                    "Truncated tree: needed more bits at offset {}, only {} available",
                    bit_offset, available
                )
            }
            Error::CodeTooLong { max } => {
                write!(f, "Huffman tree deeper than the {}-bit code limit", max)
            }
            Error::InvalidCodePoint(value) => {
                write!(f, "Invalid code point 0x{:X} in serialized tree", value)
            }
            Error::MalformedBitstream { bit_offset, bit_len } => {
                write!(
                    f,
                    "Malformed bitstream: code starting at bit {} runs past end ({} bits)",
                    bit_offset, bit_len
                )
            }
            Error::ContainerFormat { field, reason } => {
                write!(f, "Invalid container ({}): {}", field, reason)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = Error::container(Field::DataLength, "prefix runs past end of buffer");
        assert_eq!(
            err.to_string(),
            "Invalid container (data length): prefix runs past end of buffer"
        );
    }

    #[test]
    fn test_display_unknown_symbol() {
        let err = Error::UnknownSymbol('é');
        assert!(err.to_string().contains("U+00E9"));
    }
}
