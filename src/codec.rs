//! Bit-level Huffman encoding and decoding.

use tracing::debug;

use crate::bits::{BitWriter, Bits};
use crate::error::{Error, Result};
use crate::huffman::{CodeTable, HuffmanTree, Node};

/// Encode `text` by concatenating each symbol's code in order.
pub fn encode(text: &str, codes: &CodeTable) -> Result<Bits> {
    encode_with_capacity(text, codes, text.len() / 2)
}

/// Like [`encode`], pre-sizing the output for `bit_len` bits.
///
/// Use [`CodeTable::encoded_len`] to get the exact size up front.
pub fn encode_with_capacity(text: &str, codes: &CodeTable, bit_len: usize) -> Result<Bits> {
    let mut writer = BitWriter::with_capacity(bit_len.div_ceil(8));
    for c in text.chars() {
        let code = codes.get(c).ok_or(Error::UnknownSymbol(c))?;
        writer.write_bits(code.bits, code.len);
    }
    let bits = writer.finish();
    debug!(bytes = text.len(), bits = bits.len(), "encoded text");
    Ok(bits)
}

/// Decode `bits` by walking `tree` from the root for each symbol.
///
/// Without a tree only an empty bit sequence is valid. A tree that is a
/// single leaf emits its symbol once per bit. Otherwise the walk must end
/// exactly on a symbol boundary; bits that stop inside a code are reported
/// as [`Error::MalformedBitstream`] and no text is returned.
pub fn decode(bits: &Bits, tree: Option<&HuffmanTree>) -> Result<String> {
    let Some(tree) = tree else {
        if bits.is_empty() {
            return Ok(String::new());
        }
        return Err(Error::MalformedBitstream {
            bit_offset: 0,
            bit_len: bits.len(),
        });
    };

    if let Some(symbol) = tree.single_symbol() {
        return Ok(std::iter::repeat(symbol).take(bits.len()).collect());
    }

    let root = tree.root();
    let mut out = String::with_capacity(bits.len() / 4);
    let mut current = root;
    let mut symbol_start = 0;

    for (offset, bit) in bits.iter().enumerate() {
        let next = tree.child(current, bit).ok_or(Error::MalformedBitstream {
            bit_offset: symbol_start,
            bit_len: bits.len(),
        })?;

        match tree.node(next) {
            Node::Leaf { symbol, .. } => {
                out.push(*symbol);
                current = root;
                symbol_start = offset + 1;
            }
            Node::Internal { .. } => current = next,
        }
    }

    if current != root {
        return Err(Error::MalformedBitstream {
            bit_offset: symbol_start,
            bit_len: bits.len(),
        });
    }

    debug!(bits = bits.len(), bytes = out.len(), "decoded text");
    Ok(out)
}
