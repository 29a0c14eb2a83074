//! Builder input records: tokens paired with relative frequency weights.

use serde::{Deserialize, Serialize};

/// Reserved end-of-stream marker byte.
///
/// 0xFF cannot start a UTF-8 sequence, so it never collides with text
/// tokens. It enters code-table construction like any other token and its
/// code terminates decoding.
pub const STOP_BYTE: u8 = 0xFF;

/// A token (non-empty byte string) with its relative frequency.
///
/// Commonly a single UTF-8 character, a short word fragment, or a
/// punctuation symbol. Weights are relative; only their ordering and sums
/// matter to the builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ngram {
    pub token: Vec<u8>,
    pub weight: f32,
}

impl Ngram {
    pub fn new(token: impl Into<Vec<u8>>, weight: f32) -> Self {
        Self { token: token.into(), weight }
    }

    /// The stop-token record, weighted minimally so it lands among the
    /// long codes.
    pub fn stop(weight: f32) -> Self {
        Self { token: vec![STOP_BYTE], weight }
    }

    pub fn is_stop(&self) -> bool {
        self.token == [STOP_BYTE]
    }
}

/// Sort ngrams for the Shannon-Fano builder: descending weight, ties broken
/// lexicographically by token so equal-weight inputs build reproducible
/// tables.
pub fn sort_by_weight_desc(ngrams: &mut [Ngram]) {
    ngrams.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.token.cmp(&b.token))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_ngram() {
        let n = Ngram::stop(0.5);
        assert!(n.is_stop());
        assert_eq!(n.token, vec![0xFF]);
    }

    #[test]
    fn test_sort_desc_with_lexicographic_ties() {
        let mut v = vec![
            Ngram::new("b", 1.0),
            Ngram::new("a", 1.0),
            Ngram::new("c", 5.0),
        ];
        sort_by_weight_desc(&mut v);
        assert_eq!(v[0].token, b"c");
        assert_eq!(v[1].token, b"a");
        assert_eq!(v[2].token, b"b");
    }
}
