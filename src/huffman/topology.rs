// Tree topology stream: the shape of a Huffman tree plus its leaf symbols.
//
// Post-order, one record per node:
//   leaf      01 s0 s1 s2 s3   (symbol scalar value, u32 little-endian)
//   internal  00               (after both children)
// followed by one more 00 that ends the stream. Weights are not stored.

use std::collections::BTreeSet;

use log::trace;

use super::tree::{HuffmanNode, HuffmanTree, dismantle};
use crate::error::CodecError;

pub const LEAF_MARKER: u8 = 1;
pub const INTERNAL_MARKER: u8 = 0;

/// Marker byte plus a 4-byte scalar value.
pub const LEAF_RECORD_LEN: usize = 5;

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Encode `tree` as a topology stream, including the end marker.
pub fn serialize(tree: &HuffmanTree) -> Vec<u8> {
    let mut out = Vec::new();
    // (node, children already emitted)
    let mut stack = vec![(tree.root(), false)];

    while let Some((node, expanded)) = stack.pop() {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                out.push(LEAF_MARKER);
                out.extend_from_slice(&u32::from(*symbol).to_le_bytes());
            }
            HuffmanNode::Internal { left, right, .. } => {
                if expanded {
                    out.push(INTERNAL_MARKER);
                } else {
                    stack.push((node, true));
                    stack.push((right.as_ref(), false));
                    stack.push((left.as_ref(), false));
                }
            }
        }
    }

    out.push(INTERNAL_MARKER);
    out
}

/// Exact size of `serialize(tree)` for a tree with `leaves` leaves.
pub fn serialized_len(leaves: usize) -> usize {
    leaves * LEAF_RECORD_LEN + leaves.saturating_sub(1) + 1
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Subtrees awaiting a parent. Dropped iteratively so a deep, partially
/// rebuilt tree from a corrupt stream is freed safely on the error path.
#[derive(Default)]
struct NodeStack {
    nodes: Vec<HuffmanNode>,
}

impl NodeStack {
    fn push(&mut self, node: HuffmanNode) {
        self.nodes.push(node);
    }

    fn pop(&mut self) -> Option<HuffmanNode> {
        self.nodes.pop()
    }

    /// Pop the top two nodes as `(left, right)`; `right` is on top.
    fn pop_pair(&mut self) -> Option<(HuffmanNode, HuffmanNode)> {
        if self.nodes.len() < 2 {
            return None;
        }
        let right = self.nodes.pop()?;
        let left = self.nodes.pop()?;
        Some((left, right))
    }
}

impl Drop for NodeStack {
    fn drop(&mut self) {
        for node in self.nodes.drain(..) {
            dismantle(node);
        }
    }
}

fn corrupt(offset: usize, reason: impl Into<String>) -> CodecError {
    CodecError::CorruptTopology {
        offset,
        reason: reason.into(),
    }
}

/// Rebuild a tree from a topology stream.
///
/// The whole of `data` must be consumed: the stream has to end exactly at
/// its end marker.
pub fn deserialize(data: &[u8]) -> Result<HuffmanTree, CodecError> {
    let mut stack = NodeStack::default();
    let mut seen = BTreeSet::new();
    let mut pos = 0usize;

    loop {
        let Some(&marker) = data.get(pos) else {
            return Err(corrupt(pos, "stream ended before the end marker"));
        };

        match marker {
            LEAF_MARKER => {
                let raw: [u8; 4] = data
                    .get(pos + 1..pos + LEAF_RECORD_LEN)
                    .and_then(|b| b.try_into().ok())
                    .ok_or_else(|| corrupt(pos, "leaf record cut short"))?;
                let value = u32::from_le_bytes(raw);
                let symbol = char::from_u32(value).ok_or_else(|| {
                    corrupt(pos + 1, format!("{value:#x} is not a Unicode scalar value"))
                })?;
                if !seen.insert(symbol) {
                    return Err(corrupt(pos + 1, format!("duplicate symbol {symbol:?}")));
                }
                stack.push(HuffmanNode::leaf(symbol, 0));
                pos += LEAF_RECORD_LEN;
            }
            INTERNAL_MARKER => {
                if let Some((left, right)) = stack.pop_pair() {
                    stack.push(HuffmanNode::merge(left, right));
                    pos += 1;
                    continue;
                }
                let Some(root) = stack.pop() else {
                    return Err(corrupt(pos, "internal marker with no subtree to close"));
                };
                pos += 1;
                if pos != data.len() {
                    dismantle(root);
                    return Err(corrupt(
                        pos,
                        format!("{} trailing bytes after the end marker", data.len() - pos),
                    ));
                }
                trace!("topology decoded: {} bytes", data.len());
                return Ok(HuffmanTree::from_root(root));
            }
            other => {
                return Err(corrupt(pos, format!("invalid marker byte {other:#04x}")));
            }
        }
    }
}
