use oxihuff::CodecError;
use oxihuff::codec::{self, ArtifactHeader, HEADER_LEN};
use oxihuff::huffman::{CodeTable, FrequencyTable, HuffmanTree, topology};

fn roundtrip(text: &str) -> Vec<u8> {
    let artifact = codec::encode_str(text).unwrap();
    assert_eq!(codec::decode_to_string(&artifact).unwrap(), text);
    artifact
}

#[test]
fn worked_example_layout() {
    let artifact = roundtrip("abracadabra");
    assert_eq!(artifact.len(), 41);

    let header = ArtifactHeader::decode(&artifact).unwrap();
    assert_eq!(header.topology_len, 30);
    assert_eq!(header.symbol_count, 11);
    assert_eq!(&artifact[HEADER_LEN + 30..], &[0x76, 0x51, 0x3b]);
}

#[test]
fn topology_of_worked_example() {
    let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_text("abracadabra")).unwrap();
    let mut expected = Vec::new();
    for record in [
        Some('a'),
        Some('c'),
        Some('d'),
        None,
        Some('b'),
        Some('r'),
        None,
        None,
        None,
    ] {
        match record {
            Some(symbol) => {
                expected.push(topology::LEAF_MARKER);
                expected.extend_from_slice(&u32::from(symbol).to_le_bytes());
            }
            None => expected.push(topology::INTERNAL_MARKER),
        }
    }
    expected.push(topology::INTERNAL_MARKER);
    assert_eq!(topology::serialize(&tree), expected);
}

#[test]
fn codes_are_optimal_for_worked_example() {
    let frequencies = FrequencyTable::from_text("abracadabra");
    let tree = HuffmanTree::from_frequencies(&frequencies).unwrap();
    let codes = CodeTable::from_tree(&tree);
    assert_eq!(codes.encoded_bit_len(&frequencies), 23);
    assert_eq!(tree.weighted_path_length(), 23);
}

#[test]
fn single_symbol_texts() {
    for text in ["a", "aaaa", "🦀🦀🦀", "\n\n"] {
        let artifact = roundtrip(text);
        assert_eq!(artifact.len(), HEADER_LEN + 6, "text {text:?}");
    }
}

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(codec::encode(b""), Err(CodecError::EmptyInput)));
}

#[test]
fn invalid_utf8_is_an_error() {
    assert!(matches!(
        codec::encode(&[0xC3, 0x28]),
        Err(CodecError::InvalidUtf8(_))
    ));
}

#[test]
fn unicode_and_whitespace_survive() {
    roundtrip("tab\tsep\r\nwindows line\n");
    roundtrip("日本語のテキスト、そして English.");
    roundtrip("e\u{301} vs é");
    roundtrip("\u{0}\u{10FFFF}\u{0}");
}

#[test]
fn larger_text_compresses() {
    let text = "the quick brown fox jumps over the lazy dog\n".repeat(200);
    let artifact = roundtrip(&text);
    assert!(artifact.len() < text.len());
}

#[test]
fn encoding_is_deterministic() {
    let text = "peter piper picked a peck of pickled peppers";
    let first = codec::encode_str(text).unwrap();
    for _ in 0..5 {
        assert_eq!(codec::encode_str(text).unwrap(), first);
    }
}

#[test]
fn truncated_artifact_is_reported() {
    let mut artifact = codec::encode_str("hello world").unwrap();
    artifact.truncate(artifact.len() - 1);
    assert!(matches!(
        codec::decode(&artifact),
        Err(CodecError::TruncatedPayload { expected: 11, .. })
    ));
}

#[test]
fn short_artifact_is_malformed() {
    assert!(matches!(
        codec::decode(&[0, 0, 0]),
        Err(CodecError::MalformedHeader(_))
    ));
}

#[test]
fn oversized_topology_length_is_malformed() {
    let mut artifact = codec::encode_str("hello world").unwrap();
    artifact[..4].copy_from_slice(&u32::MAX.to_le_bytes());
    assert!(matches!(
        codec::decode(&artifact),
        Err(CodecError::MalformedHeader(_))
    ));
}

#[test]
fn corrupt_topology_is_reported() {
    let mut artifact = codec::encode_str("hello world").unwrap();
    // Invalid scalar value (surrogate) in the first leaf record.
    artifact[HEADER_LEN + 1..HEADER_LEN + 5].copy_from_slice(&0xD800u32.to_le_bytes());
    assert!(matches!(
        codec::decode(&artifact),
        Err(CodecError::CorruptTopology { .. })
    ));
}

#[test]
fn duplicate_leaf_symbols_are_corrupt() {
    let mut topology = Vec::new();
    for _ in 0..2 {
        topology.push(topology::LEAF_MARKER);
        topology.extend_from_slice(&u32::from('x').to_le_bytes());
    }
    topology.extend([topology::INTERNAL_MARKER, topology::INTERNAL_MARKER]);

    let mut artifact = ArtifactHeader {
        topology_len: topology.len() as u32,
        symbol_count: 3,
    }
    .to_bytes()
    .to_vec();
    artifact.extend_from_slice(&topology);
    artifact.push(0b101);

    assert!(matches!(
        codec::decode(&artifact),
        Err(CodecError::CorruptTopology { offset: 6, .. })
    ));
    assert!(matches!(
        codec::inspect(&artifact),
        Err(CodecError::CorruptTopology { .. })
    ));
}

#[test]
fn inspect_matches_encoder_summary() {
    let (artifact, summary) = codec::encode_with_summary("mississippi").unwrap();
    let inspected = codec::inspect(&artifact).unwrap();
    assert_eq!(u64::from(inspected.header.symbol_count), summary.symbol_count);
    assert_eq!(inspected.header.topology_len as usize, summary.topology_len);
    assert_eq!(inspected.distinct_symbols, summary.distinct_symbols);
    assert_eq!(inspected.artifact_len(), summary.artifact_len);
    assert_eq!(inspected.codes.get('s').unwrap().to_string(), "0");
}
