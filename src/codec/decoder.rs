// Artifact decoder and inspector.
//
// Decoding is bounded by the header's symbol count, never by the payload
// length: the last payload byte carries padding bits that must not be read
// as further codes.

use log::debug;

use super::header::ArtifactHeader;
use crate::error::CodecError;
use crate::huffman::bitseq::BitReader;
use crate::huffman::code_table::CodeTable;
use crate::huffman::topology;
use crate::huffman::tree::{HuffmanNode, HuffmanTree};

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decompress an artifact back to UTF-8 text bytes.
pub fn decode(artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
    decode_to_string(artifact).map(String::into_bytes)
}

/// Decompress an artifact back to text.
pub fn decode_to_string(artifact: &[u8]) -> Result<String, CodecError> {
    let header = ArtifactHeader::decode(artifact)?;
    let (topology_bytes, payload) = header.sections(artifact)?;
    let tree = topology::deserialize(topology_bytes)?;

    let expected = u64::from(header.symbol_count);
    let bits = BitReader::new(payload);
    let text = walk(&tree, &bits, expected)?;

    debug!(
        "decoded {expected} symbols from {} payload bytes ({} topology bytes)",
        payload.len(),
        topology_bytes.len()
    );
    Ok(text)
}

/// Emit `expected` symbols by walking `tree` along `bits`.
///
/// A tree whose root is a leaf has a single zero-bit code, so every symbol
/// is emitted straight from the root without consuming any bits.
fn walk(
    tree: &HuffmanTree,
    bits: &BitReader<'_>,
    expected: u64,
) -> Result<String, CodecError> {
    let root = tree.root();
    // The payload bounds the output for multi-leaf trees; don't trust the
    // header's count for the up-front allocation.
    let mut text = String::with_capacity(expected.min(bits.bit_len() as u64) as usize);
    let mut node = root;
    let mut cursor = 0usize;
    let mut decoded = 0u64;

    while decoded < expected {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                text.push(*symbol);
                decoded += 1;
                node = root;
            }
            HuffmanNode::Internal { left, right, .. } => {
                if cursor >= bits.bit_len() {
                    return Err(CodecError::TruncatedPayload { expected, decoded });
                }
                node = if bits.get(cursor)? {
                    right.as_ref()
                } else {
                    left.as_ref()
                };
                cursor += 1;
            }
        }
    }

    Ok(text)
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// Header, sizes and code table of an artifact, without decoding its payload.
#[derive(Debug, Clone)]
pub struct ArtifactSummary {
    pub header: ArtifactHeader,
    /// Bytes following the topology section.
    pub payload_len: usize,
    /// Leaves in the decoded tree.
    pub distinct_symbols: usize,
    /// Longest root-to-leaf path.
    pub tree_depth: usize,
    pub codes: CodeTable,
}

impl ArtifactSummary {
    /// Total artifact size in bytes.
    pub fn artifact_len(&self) -> usize {
        super::header::HEADER_LEN + self.header.topology_len as usize + self.payload_len
    }
}

/// Parse an artifact's header and topology and rebuild its code table.
pub fn inspect(artifact: &[u8]) -> Result<ArtifactSummary, CodecError> {
    let header = ArtifactHeader::decode(artifact)?;
    let (topology_bytes, payload) = header.sections(artifact)?;
    let tree = topology::deserialize(topology_bytes)?;
    let codes = CodeTable::from_tree(&tree);

    Ok(ArtifactSummary {
        header,
        payload_len: payload.len(),
        distinct_symbols: codes.len(),
        tree_depth: codes.max_code_len(),
        codes,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encoder::encode_str;
    use crate::codec::header::HEADER_LEN;

    #[test]
    fn abracadabra_roundtrip() {
        let artifact = encode_str("abracadabra").unwrap();
        assert_eq!(decode_to_string(&artifact).unwrap(), "abracadabra");
        assert_eq!(decode(&artifact).unwrap(), b"abracadabra");
    }

    #[test]
    fn single_symbol_roundtrip() {
        let artifact = encode_str("aaaa").unwrap();
        assert_eq!(decode_to_string(&artifact).unwrap(), "aaaa");
    }

    #[test]
    fn single_symbol_ignores_payload_bytes() {
        let mut artifact = encode_str("zz").unwrap();
        artifact.extend_from_slice(&[0xFF, 0x00]);
        assert_eq!(decode_to_string(&artifact).unwrap(), "zz");
    }

    #[test]
    fn garbage_padding_is_ignored() {
        let mut artifact = encode_str("abracadabra").unwrap();
        *artifact.last_mut().unwrap() |= 0x80;
        assert_eq!(decode_to_string(&artifact).unwrap(), "abracadabra");
    }

    #[test]
    fn trailing_payload_bytes_are_ignored() {
        let mut artifact = encode_str("hello").unwrap();
        artifact.extend_from_slice(&[0xAB; 4]);
        assert_eq!(decode_to_string(&artifact).unwrap(), "hello");
    }

    #[test]
    fn truncated_payload() {
        let mut artifact = encode_str("abracadabra").unwrap();
        artifact.pop();
        match decode(&artifact) {
            Err(CodecError::TruncatedPayload { expected, decoded }) => {
                assert_eq!(expected, 11);
                assert!(decoded < 11);
            }
            other => panic!("expected TruncatedPayload, got {other:?}"),
        }
    }

    #[test]
    fn inflated_symbol_count_is_truncation() {
        let mut artifact = encode_str("abracadabra").unwrap();
        artifact[4..8].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            decode(&artifact),
            Err(CodecError::TruncatedPayload { expected: 1000, .. })
        ));
    }

    #[test]
    fn zero_symbol_count_decodes_empty() {
        let mut artifact = encode_str("abc").unwrap();
        artifact[4..8].copy_from_slice(&0u32.to_le_bytes());
        assert_eq!(decode_to_string(&artifact).unwrap(), "");
    }

    #[test]
    fn short_artifact_is_malformed() {
        assert!(matches!(decode(&[1, 2, 3]), Err(CodecError::MalformedHeader(_))));
        assert!(matches!(decode(&[]), Err(CodecError::MalformedHeader(_))));
    }

    #[test]
    fn corrupt_topology_is_reported() {
        let mut artifact = encode_str("abracadabra").unwrap();
        artifact[HEADER_LEN] = 9;
        assert!(matches!(
            decode(&artifact),
            Err(CodecError::CorruptTopology { offset: 0, .. })
        ));
    }

    #[test]
    fn multibyte_text_roundtrip() {
        let text = "Grüße, 世界! 🦀🦀🦀 ∑ x²";
        let artifact = encode_str(text).unwrap();
        assert_eq!(decode_to_string(&artifact).unwrap(), text);
    }

    #[test]
    fn inspect_reports_codes() {
        let artifact = encode_str("abracadabra").unwrap();
        let summary = inspect(&artifact).unwrap();
        assert_eq!(summary.header.symbol_count, 11);
        assert_eq!(summary.header.topology_len, 30);
        assert_eq!(summary.payload_len, 3);
        assert_eq!(summary.distinct_symbols, 5);
        assert_eq!(summary.tree_depth, 3);
        assert_eq!(summary.artifact_len(), artifact.len());
        assert_eq!(summary.codes.get('a').unwrap().to_string(), "0");
    }
}
