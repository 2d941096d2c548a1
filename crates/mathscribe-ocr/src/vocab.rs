//! Symbol vocabulary and CTC decoding.
//!
//! The recognizer emits one class per timestep over a fixed symbol table;
//! id 0 is the CTC blank. A model repository may ship a `vocab.json`
//! (a JSON array of symbol strings, blank first) to override the
//! built-in table.

use std::path::Path;

use mathscribe_core::{Error, Result};

/// The CTC blank class id.
pub const BLANK_ID: u32 = 0;

/// Built-in symbol table: digits, common variable letters, operators, and
/// the LaTeX commands the stock model was trained on. Index 0 is blank.
const DEFAULT_SYMBOLS: &[&str] = &[
    "<blank>",
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "x", "y", "z", "a", "b", "c", "n", "t",
    "+", "-", "=", "(", ")", ".", "/", "^", "{", "}", "|",
    r"\frac", r"\sqrt", r"\cdot", r"\pi",
    r"\sin", r"\cos", r"\tan", r"\log", r"\ln",
];

/// Maps model output ids to symbol strings.
#[derive(Debug, Clone)]
pub struct SymbolVocab {
    symbols: Vec<String>,
}

impl SymbolVocab {
    /// The built-in symbol table.
    #[must_use]
    pub fn default_table() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Loads a vocabulary from a JSON array of symbol strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON
    /// array with the blank entry first.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let symbols: Vec<String> = serde_json::from_str(&data)?;
        if symbols.len() < 2 {
            return Err(Error::model_load(
                "vocabulary must contain the blank entry and at least one symbol",
            ));
        }
        Ok(Self { symbols })
    }

    /// Number of classes including the blank.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when the table is empty (never for loaded vocabularies).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Collapses a raw per-timestep class sequence CTC-style: adjacent
    /// repeats merge, blanks separate repeats and are dropped.
    #[must_use]
    pub fn collapse(raw: &[u32]) -> Vec<u32> {
        let mut out = Vec::new();
        let mut prev: Option<u32> = None;
        for &id in raw {
            if Some(id) != prev && id != BLANK_ID {
                out.push(id);
            }
            prev = Some(id);
        }
        out
    }

    /// Decodes a collapsed id sequence to its textual representation.
    ///
    /// # Errors
    ///
    /// Returns an inference error for ids outside the table.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let mut out = String::new();
        for &id in ids {
            let symbol = self
                .symbols
                .get(id as usize)
                .ok_or_else(|| {
                    Error::inference(format!("class id {id} outside the symbol table"))
                })?;
            out.push_str(symbol);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_merges_repeats_and_drops_blanks() {
        // b 2 2 b 2 x -> 2 2 x
        let raw = [BLANK_ID, 5, 5, BLANK_ID, 5, 11];
        assert_eq!(SymbolVocab::collapse(&raw), vec![5, 5, 11]);
    }

    #[test]
    fn test_decode_expression() {
        let vocab = SymbolVocab::default_table();
        let ids: Vec<u32> = ["2", "x", "^", "2", "+", "3", "x", "-", "5", "=", "0"]
            .iter()
            .map(|s| {
                vocab
                    .symbols
                    .iter()
                    .position(|sym| sym == s)
                    .unwrap() as u32
            })
            .collect();
        assert_eq!(vocab.decode(&ids).unwrap(), "2x^2+3x-5=0");
    }

    #[test]
    fn test_decode_out_of_range() {
        let vocab = SymbolVocab::default_table();
        let err = vocab.decode(&[9999]).unwrap_err();
        assert!(matches!(err, Error::Inference { .. }));
    }
}
