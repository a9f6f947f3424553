// Symbol -> bit-string code table derived from a Huffman tree.

use std::collections::BTreeMap;
use std::fmt;

use super::frequency::FrequencyTable;
use super::tree::{HuffmanNode, HuffmanTree};

// ---------------------------------------------------------------------------
// Code
// ---------------------------------------------------------------------------

/// A root-to-leaf path: `false` for a left branch, `true` for a right one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True only for the code of a single-symbol tree.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CodeTable
// ---------------------------------------------------------------------------

/// One code per leaf of a tree, ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Walk `tree` depth-first and record each leaf's path.
    ///
    /// A tree whose root is a leaf gives its symbol the empty code.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut path: Vec<bool> = Vec::new();
        // (node, length of the parent's path, branch taken to reach node)
        let mut stack: Vec<(&HuffmanNode, usize, Option<bool>)> = vec![(tree.root(), 0, None)];

        while let Some((node, parent_len, branch)) = stack.pop() {
            path.truncate(parent_len);
            if let Some(bit) = branch {
                path.push(bit);
            }
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(*symbol, Code::from(path.clone()));
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let len = path.len();
                    stack.push((right.as_ref(), len, Some(true)));
                    stack.push((left.as_ref(), len, Some(false)));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Payload size in bits for a text with these frequencies:
    /// `sum(count * code length)`. Symbols without a code contribute nothing.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(text: &str) -> (FrequencyTable, CodeTable) {
        let freq = FrequencyTable::from_text(text);
        let tree = HuffmanTree::from_frequencies(&freq).unwrap();
        (freq, CodeTable::from_tree(&tree))
    }

    fn code(table: &CodeTable, symbol: char) -> String {
        table.get(symbol).unwrap().to_string()
    }

    #[test]
    fn abracadabra_codes() {
        let (freq, table) = table_for("abracadabra");
        assert_eq!(table.len(), 5);
        assert_eq!(code(&table, 'a'), "0");
        assert_eq!(code(&table, 'c'), "100");
        assert_eq!(code(&table, 'd'), "101");
        assert_eq!(code(&table, 'b'), "110");
        assert_eq!(code(&table, 'r'), "111");
        assert_eq!(table.encoded_bit_len(&freq), 23);
        assert_eq!(table.max_code_len(), 3);
    }

    #[test]
    fn most_frequent_symbol_has_shortest_code() {
        let (freq, table) = table_for("abracadabra");
        let a_len = table.get('a').unwrap().len();
        for (symbol, code) in table.iter() {
            if symbol != 'a' {
                assert!(code.len() >= a_len);
                assert!(freq.get(symbol) <= freq.get('a'));
            }
        }
    }

    #[test]
    fn single_symbol_gets_empty_code() {
        let (freq, table) = table_for("zzzzzz");
        assert_eq!(table.len(), 1);
        assert!(table.get('z').unwrap().is_empty());
        assert_eq!(table.encoded_bit_len(&freq), 0);
    }

    #[test]
    fn codes_are_prefix_free() {
        let (_, table) = table_for("It was the best of times, it was the worst of times.");
        let codes: Vec<&Code> = table.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn code_lengths_match_leaf_depths() {
        let freq = FrequencyTable::from_text("mississippi river");
        let tree = HuffmanTree::from_frequencies(&freq).unwrap();
        let table = CodeTable::from_tree(&tree);
        for (symbol, _, depth) in tree.leaves() {
            assert_eq!(table.get(symbol).unwrap().len(), depth);
        }
        assert_eq!(table.encoded_bit_len(&freq), tree.weighted_path_length());
    }

    #[test]
    fn display_renders_bits() {
        let code = Code::from(vec![true, false, false, true]);
        assert_eq!(code.to_string(), "1001");
        assert_eq!(Code::default().to_string(), "");
    }

    #[test]
    fn prefix_relation() {
        let short = Code::from(vec![true, false]);
        let long = Code::from(vec![true, false, true]);
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(Code::default().is_prefix_of(&long));
    }
}
