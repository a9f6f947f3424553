// Huffman coding primitives.
//
// - `bitseq`     — BitSequence / BitReader: packed, bounds-checked bits
// - `frequency`  — FrequencyTable: symbol occurrence counts
// - `tree`       — HuffmanTree: deterministic min-heap construction
// - `code_table` — CodeTable: symbol -> bit-string codes from tree paths
// - `topology`   — Post-order tree topology serialization

pub mod bitseq;
pub mod code_table;
pub mod frequency;
pub mod topology;
pub mod tree;

pub use bitseq::{BitIndexError, BitReader, BitSequence};
pub use code_table::{Code, CodeTable};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanNode, HuffmanTree};
