//! Compact binary tree serialization.
//!
//! Pre-order, one tag bit per node:
//!
//! ```text
//! leaf:     1 <21-bit code point>
//! internal: 0 <left subtree> <right subtree>
//! ```
//!
//! The stream is self-delimiting and carries no weights; decoding only
//! needs the tree shape.

use crate::bits::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::huffman::{HuffmanTree, Node, NodeId};

/// Bits per serialized symbol; covers U+0000 through U+10FFFF.
pub const SYMBOL_BITS: u8 = 21;

const LEAF_TAG: bool = true;
const INTERNAL_TAG: bool = false;

/// Number of bits [`write_tree`] will emit for `tree`.
pub fn serialized_len(tree: &HuffmanTree) -> usize {
    tree.node_count() + tree.leaf_count() * SYMBOL_BITS as usize
}

/// Append the pre-order encoding of `tree`.
pub fn write_tree(tree: &HuffmanTree, writer: &mut BitWriter) {
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        match tree.node(id) {
            Node::Leaf { symbol, .. } => {
                writer.write_bit(LEAF_TAG);
                writer.write_bits(*symbol as u64, SYMBOL_BITS);
            }
            Node::Internal { left, right, .. } => {
                writer.write_bit(INTERNAL_TAG);
                stack.push(*right);
                stack.push(*left);
            }
        }
    }
}

/// Read one tree from `reader`, consuming exactly the bits it occupies.
pub fn read_tree(reader: &mut BitReader<'_>) -> Result<HuffmanTree> {
    let truncated = |reader: &BitReader<'_>| Error::TruncatedTree {
        bit_offset: reader.position(),
        available: reader.len(),
    };

    let mut nodes = Vec::new();
    // Internal nodes whose children are still being read, with the left
    // child once it is complete.
    let mut pending: Vec<Option<NodeId>> = Vec::new();

    loop {
        let tag = reader.read_bit().ok_or_else(|| truncated(reader))?;
        if tag == INTERNAL_TAG {
            pending.push(None);
            continue;
        }

        let raw = reader
            .read_bits(SYMBOL_BITS)
            .ok_or_else(|| truncated(reader))? as u32;
        let symbol = char::from_u32(raw).ok_or(Error::InvalidCodePoint(raw))?;
        let mut done = HuffmanTree::push_node(&mut nodes, Node::Leaf { symbol, weight: 0 });

        // Attach the finished subtree, closing every parent it completes.
        loop {
            let Some(slot) = pending.last_mut() else {
                return Ok(HuffmanTree::from_arena(nodes, done));
            };
            match *slot {
                None => {
                    *slot = Some(done);
                    break;
                }
                Some(left) => {
                    pending.pop();
                    done = HuffmanTree::push_node(
                        &mut nodes,
                        Node::Internal {
                            weight: 0,
                            left,
                            right: done,
                        },
                    );
                }
            }
        }
    }
}
