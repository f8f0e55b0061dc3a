//! Code table generation from a Huffman tree.

use std::collections::BTreeMap;
use std::fmt;

use super::frequency::FrequencyTable;
use super::tree::{HuffmanTree, Node};
use crate::error::{Error, Result};

/// Longest code a [`Code`] can hold.
///
/// A tree this deep needs a total weight above the 66th Fibonacci number,
/// far beyond the 32-bit data length a container can record.
pub const MAX_CODE_LENGTH: u8 = 64;

/// A Huffman code: right-aligned bits, first bit most significant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Code {
    /// The code bits (right-aligned).
    pub bits: u64,
    /// Number of bits in the code.
    pub len: u8,
}

impl Code {
    /// Whether `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len
            && (self.len == 0 || other.bits >> (other.len - self.len) == self.bits)
    }

    /// Render as a `'0'`/`'1'` string.
    pub fn to_bit_string(&self) -> String {
        (0..self.len)
            .rev()
            .map(|i| if (self.bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// Symbol to code mapping read from tree leaf paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Walk the tree depth-first: `0` for a left edge, `1` for a right edge.
    ///
    /// A tree that is a single leaf gets the one-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(tree.root(), Code::default())];

        while let Some((id, code)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    let code = if code.len == 0 {
                        Code { bits: 0, len: 1 }
                    } else {
                        code
                    };
                    codes.insert(*symbol, code);
                }
                Node::Internal { left, right, .. } => {
                    if code.len == MAX_CODE_LENGTH {
                        return Err(Error::CodeTooLong {
                            max: MAX_CODE_LENGTH,
                        });
                    }
                    let len = code.len + 1;
                    stack.push((
                        *right,
                        Code {
                            bits: (code.bits << 1) | 1,
                            len,
                        },
                    ));
                    stack.push((
                        *left,
                        Code {
                            bits: code.bits << 1,
                            len,
                        },
                    ));
                }
            }
        }

        Ok(Self { codes })
    }

    pub fn get(&self, symbol: char) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending code point order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Code)> + '_ {
        self.codes.iter().map(|(&c, &code)| (c, code))
    }

    /// Entries by ascending code length, ties broken by code point.
    pub fn sorted_by_length(&self) -> Vec<(char, Code)> {
        let mut entries: Vec<(char, Code)> = self.iter().collect();
        entries.sort_by(|a, b| a.1.len.cmp(&b.1.len).then(a.0.cmp(&b.0)));
        entries
    }

    /// Number of bits needed to encode text with these frequencies.
    ///
    /// Symbols missing from the table contribute nothing.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(c, n)| self.get(c).map(|code| code.len as u64 * n))
            .sum()
    }
}
