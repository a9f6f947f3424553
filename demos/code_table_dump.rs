// Print the code assigned to each symbol of a text, most frequent first.
//
// Usage:
//   cargo run --example code_table_dump -- "some text to analyse"

use oxihuff::huffman::{CodeTable, FrequencyTable, HuffmanTree, topology};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "abracadabra".to_string());

    let frequencies = FrequencyTable::from_text(&text);
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let codes = CodeTable::from_tree(&tree);

    let mut rows: Vec<_> = frequencies.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    println!("{:<10} {:>8}  code", "symbol", "count");
    for (symbol, count) in rows {
        let code = codes.get(symbol).map(|c| c.to_string()).unwrap_or_default();
        println!("{:<10} {count:>8}  {code}", format!("{symbol:?}"));
    }

    let bits = codes.encoded_bit_len(&frequencies);
    println!();
    println!("symbols:         {}", frequencies.total());
    println!("distinct:        {}", frequencies.len());
    println!("tree depth:      {}", tree.depth());
    println!("payload bits:    {bits}");
    println!("topology bytes:  {}", topology::serialized_len(frequencies.len()));
    if frequencies.total() > 0 {
        println!(
            "bits per symbol: {:.3}",
            bits as f64 / frequencies.total() as f64
        );
    }

    Ok(())
}
