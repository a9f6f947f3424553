use oxihuff::codec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = "It was the best of times, it was the worst of times.";

    let (artifact, summary) = codec::encode_with_summary(text)?;
    let restored = codec::decode_to_string(&artifact)?;
    assert_eq!(restored, text);

    println!(
        "encoded {} bytes ({} symbols, {} distinct) -> artifact {} bytes ({} payload bits) -> restored {} bytes",
        text.len(),
        summary.symbol_count,
        summary.distinct_symbols,
        artifact.len(),
        summary.payload_bits,
        restored.len()
    );

    Ok(())
}
