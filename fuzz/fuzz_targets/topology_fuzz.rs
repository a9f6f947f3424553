#![no_main]
use libfuzzer_sys::fuzz_target;
use oxihuff::huffman::topology;

fuzz_target!(|data: &[u8]| {
    // Anything that parses must serialize back to the same bytes.
    if let Ok(tree) = topology::deserialize(data) {
        assert_eq!(topology::serialize(&tree), data);
    }
});
