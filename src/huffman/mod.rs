//! Huffman model: frequencies, tree construction and code tables.

pub mod code;
pub mod frequency;
pub mod tree;

pub use code::{Code, CodeTable, MAX_CODE_LENGTH};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node, NodeId};
