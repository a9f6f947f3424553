// Artifact encoder.
//
// Two scans over the text: one to count symbols, one to pack their codes.
// Everything is built in memory and returned as a single byte vector.

use log::debug;

use super::header::{ArtifactHeader, HEADER_LEN};
use crate::error::CodecError;
use crate::huffman::bitseq::BitSequence;
use crate::huffman::code_table::CodeTable;
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::topology;
use crate::huffman::tree::HuffmanTree;

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Figures gathered while encoding one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Symbols in the text.
    pub symbol_count: u64,
    /// Distinct symbols (leaves in the tree).
    pub distinct_symbols: usize,
    /// Size of the topology section in bytes.
    pub topology_len: usize,
    /// Meaningful payload bits.
    pub payload_bits: u64,
    /// Total artifact size in bytes.
    pub artifact_len: usize,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Compress UTF-8 `input` into an artifact.
pub fn encode(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let text = std::str::from_utf8(input)?;
    encode_str(text)
}

/// Compress `text` into an artifact.
///
/// # Example
/// ```
/// let artifact = oxihuff::codec::encode_str("abracadabra").unwrap();
/// let text = oxihuff::codec::decode_to_string(&artifact).unwrap();
/// assert_eq!(text, "abracadabra");
/// ```
pub fn encode_str(text: &str) -> Result<Vec<u8>, CodecError> {
    encode_with_summary(text).map(|(artifact, _)| artifact)
}

/// Compress `text` and report sizes along with the artifact.
pub fn encode_with_summary(text: &str) -> Result<(Vec<u8>, EncodeSummary), CodecError> {
    let frequencies = FrequencyTable::from_text(text);
    if frequencies.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    let symbol_count = u32::try_from(frequencies.total()).map_err(|_| {
        CodecError::InputTooLarge(format!(
            "{} symbols exceed the header limit of {}",
            frequencies.total(),
            u32::MAX
        ))
    })?;

    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);
    let payload_bits = codes.encoded_bit_len(&frequencies);
    let payload = pack(text, &codes, payload_bits)?;

    let topology = topology::serialize(&tree);
    let topology_len = u32::try_from(topology.len()).map_err(|_| {
        CodecError::InputTooLarge(format!("topology of {} bytes", topology.len()))
    })?;

    let header = ArtifactHeader {
        topology_len,
        symbol_count,
    };
    let mut artifact = Vec::with_capacity(HEADER_LEN + topology.len() + payload.byte_length());
    header.encode_into(&mut artifact);
    artifact.extend_from_slice(&topology);
    artifact.extend_from_slice(payload.as_bytes());

    let summary = EncodeSummary {
        symbol_count: frequencies.total(),
        distinct_symbols: frequencies.len(),
        topology_len: topology.len(),
        payload_bits,
        artifact_len: artifact.len(),
    };
    debug!(
        "encoded {} symbols ({} distinct): topology {} bytes, payload {} bits, artifact {} bytes",
        summary.symbol_count,
        summary.distinct_symbols,
        summary.topology_len,
        summary.payload_bits,
        summary.artifact_len
    );

    Ok((artifact, summary))
}

/// Write the code of every symbol of `text`, in order, into a sequence of
/// exactly `bit_len` bits.
fn pack(text: &str, codes: &CodeTable, bit_len: u64) -> Result<BitSequence, CodecError> {
    let bit_len = usize::try_from(bit_len)
        .map_err(|_| CodecError::InputTooLarge(format!("payload of {bit_len} bits")))?;
    let mut bits = BitSequence::new(bit_len);
    let mut cursor = 0usize;

    for symbol in text.chars() {
        let code = codes.get(symbol).ok_or(CodecError::UnknownSymbol(symbol))?;
        for &bit in code.bits() {
            bits.set(cursor, bit)?;
            cursor += 1;
        }
    }

    Ok(bits)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
