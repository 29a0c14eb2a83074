//! Fixed-dictionary substitution codec, kept as a comparison baseline.
//!
//! Whole high-frequency phrases are swapped for `$AA`-style markers. No
//! bit packing, no weights beyond frequency ranking; it exists so benches
//! and table-tuning sessions can compare the prefix-code stream against a
//! plain-text dictionary approach. Not wire-compatible with the bit codec.

use std::collections::{HashMap, HashSet};

const MIN_FREQ: usize = 3;
const MIN_PHRASE_LEN: usize = 6;
const MAX_ENTRIES: usize = 200;
/// Stand-in for literal `$` while markers are being substituted.
const SIGIL_ESCAPE: &str = "\x00SGL\x00";

/// Dictionary codec over a marker → phrase codebook.
#[derive(Debug, Clone, Default)]
pub struct DictCodec {
    codebook: HashMap<String, String>,
}

impl DictCodec {
    /// Learn a codebook from sample texts with default thresholds.
    pub fn train(samples: &[&str]) -> Self {
        Self::train_with(samples, MIN_FREQ, MAX_ENTRIES)
    }

    /// Learn a codebook: word n-grams (2..=5 words) of at least
    /// `MIN_PHRASE_LEN` characters occurring at least `min_freq` times,
    /// ranked by frequency × length, with phrases that contain (or are
    /// contained by) an already-accepted phrase skipped.
    pub fn train_with(samples: &[&str], min_freq: usize, max_entries: usize) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for text in samples {
            for (gram, n) in word_ngrams(text, 2, 5) {
                *counts.entry(gram).or_insert(0) += n;
            }
        }

        let mut candidates: Vec<(String, usize)> = counts
            .into_iter()
            .filter(|(phrase, count)| *count >= min_freq && phrase.len() >= MIN_PHRASE_LEN)
            .collect();
        candidates.sort_by(|a, b| {
            (b.1 * b.0.len())
                .cmp(&(a.1 * a.0.len()))
                .then_with(|| a.0.cmp(&b.0))
        });

        let markers = mint_markers(candidates.len().min(max_entries));
        let mut codebook = HashMap::new();
        let mut accepted: HashSet<String> = HashSet::new();
        for ((phrase, _), marker) in candidates.into_iter().zip(markers) {
            let overlaps = accepted
                .iter()
                .any(|seen| phrase.contains(seen.as_str()) || seen.contains(phrase.as_str()));
            if overlaps {
                continue;
            }
            accepted.insert(phrase.clone());
            codebook.insert(marker, phrase);
            if codebook.len() >= max_entries {
                break;
            }
        }
        Self { codebook }
    }

    pub fn from_codebook(codebook: HashMap<String, String>) -> Self {
        Self { codebook }
    }

    pub fn codebook(&self) -> &HashMap<String, String> {
        &self.codebook
    }

    pub fn len(&self) -> usize {
        self.codebook.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codebook.is_empty()
    }

    /// Substitute phrases with markers, longest phrase first.
    pub fn encode(&self, text: &str) -> String {
        if text.is_empty() || self.codebook.is_empty() {
            return text.to_string();
        }
        let mut result = text.replace('$', SIGIL_ESCAPE);
        let mut sorted: Vec<(&String, &String)> = self.codebook.iter().collect();
        sorted.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
        for (marker, phrase) in sorted {
            let escaped = phrase.replace('$', SIGIL_ESCAPE);
            result = result.replace(&escaped, marker);
        }
        result
    }

    /// Reverse [`DictCodec::encode`], longest marker first.
    pub fn decode(&self, text: &str) -> String {
        if text.is_empty() || self.codebook.is_empty() {
            return text.to_string();
        }
        let mut result = text.to_string();
        let mut sorted: Vec<(&String, &String)> = self.codebook.iter().collect();
        sorted.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        for (marker, phrase) in sorted {
            result = result.replace(marker.as_str(), phrase);
        }
        result.replace(SIGIL_ESCAPE, "$")
    }
}

/// Mint `n` markers: `$AA`..`$ZZ`, then `$AAA`...
fn mint_markers(n: usize) -> Vec<String> {
    let mut markers = Vec::with_capacity(n);
    for i in 0..26u8 {
        for j in 0..26u8 {
            if markers.len() >= n {
                return markers;
            }
            markers.push(format!("${}{}", (b'A' + i) as char, (b'A' + j) as char));
        }
    }
    for i in 0..26u8 {
        for j in 0..26u8 {
            for k in 0..26u8 {
                if markers.len() >= n {
                    return markers;
                }
                markers.push(format!(
                    "${}{}{}",
                    (b'A' + i) as char,
                    (b'A' + j) as char,
                    (b'A' + k) as char
                ));
            }
        }
    }
    markers
}

/// Count word n-grams of `min_n..=max_n` words.
fn word_ngrams(text: &str, min_n: usize, max_n: usize) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let words: Vec<&str> = text.split_whitespace().collect();
    for n in min_n..=max_n {
        for window in words.windows(n) {
            let gram = window.join(" ");
            if gram.len() >= MIN_PHRASE_LEN {
                *counts.entry(gram).or_insert(0) += 1;
            }
        }
    }
    counts
}
