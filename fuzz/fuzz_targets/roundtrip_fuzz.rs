#![no_main]
use libfuzzer_sys::fuzz_target;
use oxihuff::codec;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.is_empty() {
        assert!(codec::encode_str(text).is_err());
        return;
    }

    let artifact = codec::encode_str(text).unwrap();
    let decoded = codec::decode_to_string(&artifact).unwrap();
    assert_eq!(decoded, text);
});
