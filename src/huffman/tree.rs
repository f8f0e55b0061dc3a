//! Huffman tree construction.
//!
//! Nodes live in a flat arena and refer to their children by [`NodeId`], so
//! every traversal in the crate is an explicit loop rather than recursion.
//! A skewed tree read from an untrusted container can therefore be as deep
//! as its input allows without touching the call stack.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;

use super::frequency::FrequencyTable;

/// Index of a node inside a [`HuffmanTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn from_index(index: usize) -> Self {
        // At most 2 * 0x110000 - 1 nodes exist for distinct chars.
        debug_assert!(index <= u32::MAX as usize);
        NodeId(index as u32)
    }
}

/// A tree node: either a symbol leaf or an internal node with two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Leaf holding a symbol and its frequency.
    Leaf {
        /// The symbol.
        symbol: char,
        /// Occurrence count (zero for trees read back from a container).
        weight: u64,
    },
    /// Internal node owning two subtrees.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached by a `0` bit.
        left: NodeId,
        /// Subtree reached by a `1` bit.
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A Huffman prefix-code tree with exactly one root.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies with a greedy merge.
    ///
    /// Returns `None` for an empty table. A single symbol yields a tree whose
    /// root is that leaf.
    ///
    /// The two lightest nodes are merged first; the first one extracted
    /// becomes the left child. Equal weights are ordered by arena index:
    /// leaves come first in code point order, then internal nodes in the
    /// order they were created. The result is fully determined by the table.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        let mut nodes: Vec<Node> = Vec::with_capacity(frequencies.len() * 2);
        nodes.extend(
            frequencies
                .iter()
                .map(|(symbol, weight)| Node::Leaf { symbol, weight }),
        );

        let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| Reverse((node.weight(), NodeId::from_index(i))))
            .collect();

        loop {
            let Reverse((left_weight, left)) = heap.pop()?;
            let Some(Reverse((right_weight, right))) = heap.pop() else {
                trace!(nodes = nodes.len(), "huffman tree built");
                return Some(Self { nodes, root: left });
            };

            let weight = left_weight + right_weight;
            let id = NodeId::from_index(nodes.len());
            nodes.push(Node::Internal {
                weight,
                left,
                right,
            });
            heap.push(Reverse((weight, id)));
        }
    }

    /// Assemble a tree from an arena. Caller guarantees it is well-formed.
    pub(crate) fn from_arena(nodes: Vec<Node>, root: NodeId) -> Self {
        debug_assert!(root.index() < nodes.len());
        Self { nodes, root }
    }

    /// Push `node` into an arena under construction.
    pub(crate) fn push_node(nodes: &mut Vec<Node>, node: Node) -> NodeId {
        let id = NodeId::from_index(nodes.len());
        nodes.push(node);
        id
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Child reached from `id` by following `bit`; `None` at a leaf.
    #[inline]
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.node(id) {
            Node::Internal { left, right, .. } => Some(if bit { *right } else { *left }),
            Node::Leaf { .. } => None,
        }
    }

    /// The symbol when the whole tree is a single leaf.
    pub fn single_symbol(&self) -> Option<char> {
        match self.node(self.root) {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Total weight (the length of the text the tree was built from).
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Longest root-to-leaf path in edges.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }
        max
    }

    /// Leaf symbols in pre-order (left to right).
    pub fn symbols(&self) -> Vec<char> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.node(id) {
                Node::Leaf { symbol, .. } => out.push(*symbol),
                Node::Internal { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }
        out
    }

    /// Print the tree to stdout, one node per line.
    pub fn print_structure(&self) {
        println!("Huffman Tree Structure:");
        let mut stack = vec![(self.root, 0usize, "root")];
        while let Some((id, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match self.node(id) {
                Node::Leaf { symbol, weight } => {
                    println!(
                        "{}{}-> Leaf: {:?} (U+{:04X}) [weight: {}]",
                        indent, label, symbol, *symbol as u32, weight
                    );
                }
                Node::Internal {
                    weight,
                    left,
                    right,
                } => {
                    println!("{}{}-> Internal [weight: {}]", indent, label, weight);
                    stack.push((*right, depth + 1, "R"));
                    stack.push((*left, depth + 1, "L"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(text: &str) -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::from_text(text)).unwrap()
    }

    #[test]
    fn test_empty_table_has_no_tree() {
        assert!(HuffmanTree::from_frequencies(&FrequencyTable::default()).is_none());
    }

    #[test]
    fn test_single_symbol_is_leaf_root() {
        let tree = tree_for("aaaa");
        assert_eq!(tree.single_symbol(), Some('a'));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.weight(), 4);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_first_extracted_is_left() {
        // b(1) is lighter than a(2), so it is popped first and goes left.
        let tree = tree_for("aab");
        assert_eq!(tree.symbols(), vec!['b', 'a']);
        assert_eq!(tree.weight(), 3);
    }

    #[test]
    fn test_equal_weights_order_by_code_point() {
        let tree = tree_for("ba");
        assert_eq!(tree.symbols(), vec!['a', 'b']);
    }

    #[test]
    fn test_internal_weight_is_sum_of_children() {
        let tree = tree_for("the quick brown fox jumps over the lazy dog");
        for i in 0..tree.node_count() {
            if let Node::Internal {
                weight,
                left,
                right,
            } = tree.node(NodeId::from_index(i))
            {
                assert_eq!(*weight, tree.node(*left).weight() + tree.node(*right).weight());
            }
        }
    }

    #[test]
    fn test_leaves_are_distinct_symbols() {
        let text = "mississippi river";
        let tree = tree_for(text);
        let mut symbols = tree.symbols();
        symbols.sort();
        let mut expected: Vec<char> = FrequencyTable::from_text(text)
            .iter()
            .map(|(c, _)| c)
            .collect();
        expected.sort();
        assert_eq!(symbols, expected);
        assert_eq!(tree.node_count(), 2 * tree.leaf_count() - 1);
    }

    #[test]
    fn test_deterministic() {
        let text = "abracadabra alakazam";
        assert_eq!(tree_for(text).symbols(), tree_for(text).symbols());
    }

    #[test]
    fn test_child_navigation() {
        let tree = tree_for("aab");
        let left = tree.child(tree.root(), false).unwrap();
        let right = tree.child(tree.root(), true).unwrap();
        assert_eq!(tree.node(left), &Node::Leaf { symbol: 'b', weight: 1 });
        assert_eq!(tree.node(right), &Node::Leaf { symbol: 'a', weight: 2 });
        assert_eq!(tree.child(left, false), None);
    }

    #[test]
    fn test_skewed_frequencies_depth() {
        // Fibonacci-like weights force a maximally skewed tree.
        let table: FrequencyTable = [('a', 1), ('b', 1), ('c', 2), ('d', 3), ('e', 5), ('f', 8)]
            .into_iter()
            .collect();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        assert_eq!(tree.depth(), 5);
    }
}
