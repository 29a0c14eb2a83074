//! Token-weight histograms: the raw material for code-table construction.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use shortz_core::ngram::{self, Ngram, STOP_BYTE};

static RE_LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\r\n|\n\r|\n)+").unwrap());

/// Weight assigned to the stop token and to seeded fallback bytes: just
/// enough to participate, small enough to land among the longest codes.
const SEED_WEIGHT: f32 = 1.0;
const STOP_WEIGHT: f32 = 0.5;

/// Accumulates token → weight counts from one or more sources.
#[derive(Debug, Default, Clone)]
pub struct Histogram {
    weights: HashMap<Vec<u8>, f32>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` for one token.
    pub fn add_weighted(&mut self, token: impl Into<Vec<u8>>, weight: f32) {
        *self.weights.entry(token.into()).or_insert(0.0) += weight;
    }

    /// Count every character of `text` as a one-character token.
    pub fn add_chars(&mut self, text: &str) {
        let mut buf = [0u8; 4];
        for c in text.chars() {
            self.add_weighted(c.encode_utf8(&mut buf).as_bytes(), 1.0);
        }
    }

    /// Count sliding character windows of `min_n..=max_n` characters.
    ///
    /// Longer fragments that recur often enough earn their own code and
    /// beat per-character encoding; rare ones just dilute the table, so
    /// callers typically prune by weight before building.
    pub fn add_char_ngrams(&mut self, text: &str, min_n: usize, max_n: usize) {
        let chars: Vec<char> = text.chars().collect();
        let min_n = min_n.max(1);
        for n in min_n..=max_n.max(min_n) {
            for window in chars.windows(n) {
                let gram: String = window.iter().collect();
                self.add_weighted(gram.into_bytes(), 1.0);
            }
        }
    }

    /// Parse one `token<delim>weight` line from a pre-tabulated histogram
    /// file. Line-break runs are collapsed to a space first; an unparsable
    /// weight degrades to epsilon rather than dropping the token.
    pub fn add_weighted_line(&mut self, line: &str, delim: char) {
        let line = RE_LINE_BREAKS.replace_all(line, " ");
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let (token, weight_str) = match line.find(delim) {
            Some(i) => (&line[..i], &line[i + delim.len_utf8()..]),
            None => (line, ""),
        };
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        let weight = match weight_str.trim().parse::<f32>() {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!(token, error = %e, "unparsable histogram weight, using epsilon");
                f32::EPSILON
            }
        };
        self.add_weighted(token.as_bytes(), weight);
    }

    /// Give every byte value except the stop byte a minimal entry, so the
    /// encoder always has a single-byte fallback and can never hit an
    /// unencodable input.
    pub fn seed_missing_bytes(&mut self) {
        for b in 0x00u8..STOP_BYTE {
            let token = vec![b];
            self.weights.entry(token).or_insert(SEED_WEIGHT);
        }
    }

    /// Ensure the stop token is present.
    pub fn seed_stop_token(&mut self) {
        self.weights.entry(vec![STOP_BYTE]).or_insert(STOP_WEIGHT);
    }

    pub fn get(&self, token: &[u8]) -> Option<f32> {
        self.weights.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Drop tokens below `min_weight`, keeping one-byte fallbacks and the
    /// stop token regardless.
    pub fn prune(&mut self, min_weight: f32) {
        self.weights.retain(|token, w| token.len() == 1 || *w >= min_weight);
    }

    /// Export as builder input, descending weight with lexicographic
    /// tie-break.
    pub fn into_ngrams(self) -> Vec<Ngram> {
        let mut ngrams: Vec<Ngram> = self
            .weights
            .into_iter()
            .map(|(token, weight)| Ngram { token, weight })
            .collect();
        ngram::sort_by_weight_desc(&mut ngrams);
        ngrams
    }
}
