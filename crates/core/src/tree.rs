//! Huffman tree construction.
//!
//! Nodes live in a flat arena and refer to their children by index. The
//! tree is built greedily: every distinct symbol starts as a leaf on a
//! min-heap, and the two lightest nodes are merged until one root remains.
//!
//! # Tie-breaking
//!
//! Heap order is `(weight, node id)`. Leaves are allocated in ascending
//! symbol order and internal nodes get ids in creation order, so equal
//! weights always resolve the same way: lowest id first. The first node
//! popped in a merge becomes the left (`0`) child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::frequency::FrequencyTable;

/// Index of a node in the tree's arena.
pub type NodeId = usize;

/// A node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: u8, weight: u64 },
    Internal { weight: u64, left: NodeId, right: NodeId },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Strict binary tree over the symbols of a [`FrequencyTable`].
///
/// # Invariants
/// - every internal node has exactly two children, both with smaller ids
/// - an internal node's weight is the sum of its children's weights
/// - `root` is the last node in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

/// Heap entry: lighter weight first, then lower id.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    weight: u64,
    id: NodeId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HuffmanTree {
    /// Build the tree for `frequencies`.
    ///
    /// Returns `None` when the table is empty. A single distinct symbol
    /// yields a tree that is just one leaf.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let distinct = frequencies.distinct();
        if distinct == 0 {
            return None;
        }

        // n leaves + (n - 1) internal nodes
        let mut nodes = Vec::with_capacity(2 * distinct - 1);
        let mut heap = BinaryHeap::with_capacity(distinct);

        for (symbol, weight) in frequencies.iter() {
            heap.push(HeapEntry {
                weight,
                id: nodes.len(),
            });
            nodes.push(Node::Leaf { symbol, weight });
        }

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };

            let weight = left.weight.saturating_add(right.weight);
            let id = nodes.len();
            trace!(left = left.id, right = right.id, weight, id, "merge");

            nodes.push(Node::Internal {
                weight,
                left: left.id,
                right: right.id,
            });
            heap.push(HeapEntry { weight, id });
        }

        let root = heap.pop()?.id;
        debug!(symbols = distinct, nodes = nodes.len(), weight = nodes[root].weight(), "built huffman tree");

        Some(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node at `id`.
    ///
    /// # Panics
    /// If `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// All nodes, leaves first in ascending symbol order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Total weight (the input length for byte-derived tables).
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }
}
