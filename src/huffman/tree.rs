// Huffman tree construction.
//
// Nodes own their children directly. Trees decoded from an artifact can be
// as deep as they have leaves, so nothing in here recurses per level:
// traversals use explicit stacks and `Drop` dismantles the tree in a loop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;

use super::frequency::FrequencyTable;
use crate::error::CodecError;

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A node of a Huffman tree.
///
/// Weights are occurrence counts for trees built from a frequency table and
/// zero for trees rebuilt from a topology stream, which does not carry them.
#[derive(Debug)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn leaf(symbol: char, weight: u64) -> Self {
        Self::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new parent. `left` takes the 0 branch.
    pub fn merge(left: Self, right: Self) -> Self {
        Self::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

/// Free a subtree without recursing once per level.
pub(crate) fn dismantle(node: HuffmanNode) {
    let mut pending = vec![node];
    while let Some(node) = pending.pop() {
        if let HuffmanNode::Internal { left, right, .. } = node {
            pending.push(*left);
            pending.push(*right);
        }
    }
}

// ---------------------------------------------------------------------------
// Min-heap entries
// ---------------------------------------------------------------------------

/// Heap entry ordered by `(weight, order)`, smallest first.
///
/// Leaves are numbered in ascending symbol order and merged nodes take the
/// next number as they are created, so equal weights always pop in the same
/// sequence and a given frequency table always yields the same tree.
struct HeapEntry {
    weight: u64,
    order: u64,
    node: HuffmanNode,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.order == other.order
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        (other.weight, other.order).cmp(&(self.weight, self.order))
    }
}

// ---------------------------------------------------------------------------
// HuffmanTree
// ---------------------------------------------------------------------------

/// An owned Huffman prefix tree.
#[derive(Debug)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build an optimal prefix tree for `frequencies`.
    ///
    /// The two lightest entries are merged repeatedly, the first popped
    /// becoming the left child. A table with a single symbol produces a tree
    /// whose root is that symbol's leaf.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self, CodecError> {
        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        let mut next_order = 0u64;

        for (symbol, weight) in frequencies.iter() {
            heap.push(HeapEntry {
                weight,
                order: next_order,
                node: HuffmanNode::leaf(symbol, weight),
            });
            next_order += 1;
        }

        loop {
            let Some(first) = heap.pop() else {
                return Err(CodecError::EmptyInput);
            };
            let Some(second) = heap.pop() else {
                trace!(
                    "huffman tree built: {} leaves, root weight {}",
                    frequencies.len(),
                    first.weight
                );
                return Ok(Self { root: first.node });
            };

            let node = HuffmanNode::merge(first.node, second.node);
            heap.push(HeapEntry {
                weight: node.weight(),
                order: next_order,
                node,
            });
            next_order += 1;
        }
    }

    pub(crate) fn from_root(root: HuffmanNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total weight (the symbol count for trees built from frequencies).
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Every leaf with its depth, left to right.
    pub fn leaves(&self) -> Vec<(char, u64, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, weight } => out.push((*symbol, *weight, depth)),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), depth + 1));
                    stack.push((left.as_ref(), depth + 1));
                }
            }
        }
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.leaves().iter().map(|&(_, _, d)| d).max().unwrap_or(0)
    }

    /// `sum(weight * depth)` over all leaves: the payload size in bits of the
    /// text this tree was built from.
    pub fn weighted_path_length(&self) -> u64 {
        self.leaves()
            .iter()
            .map(|&(_, weight, depth)| weight * depth as u64)
            .sum()
    }

    /// Same shape and same symbols at the same positions. Weights are ignored.
    pub fn is_isomorphic(&self, other: &HuffmanTree) -> bool {
        let mut stack = vec![(&self.root, &other.root)];
        while let Some(pair) = stack.pop() {
            match pair {
                (HuffmanNode::Leaf { symbol: a, .. }, HuffmanNode::Leaf { symbol: b, .. }) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    HuffmanNode::Internal {
                        left: l1,
                        right: r1,
                        ..
                    },
                    HuffmanNode::Internal {
                        left: l2,
                        right: r2,
                        ..
                    },
                ) => {
                    stack.push((r1.as_ref(), r2.as_ref()));
                    stack.push((l1.as_ref(), l2.as_ref()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Drop for HuffmanTree {
    fn drop(&mut self) {
        if let HuffmanNode::Internal { left, right, .. } = &mut self.root {
            let placeholder = || HuffmanNode::leaf('\0', 0);
            dismantle(std::mem::replace(left.as_mut(), placeholder()));
            dismantle(std::mem::replace(right.as_mut(), placeholder()));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
