//! Histogram → code table, plus generated table artifacts.

use shortz_core::table::escape_token;
use shortz_core::{huffman, shannon_fano, CodeTable, Result, ShortzError};

use crate::histogram::Histogram;

/// Which code-construction algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    ShannonFano,
    Huffman,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShannonFano => "shannon-fano",
            Self::Huffman => "huffman",
        }
    }
}

/// Builds deployable code tables from histograms.
pub struct MapBuilder {
    pub algorithm: Algorithm,
}

impl MapBuilder {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    pub fn shannon_fano() -> Self {
        Self::new(Algorithm::ShannonFano)
    }

    pub fn huffman() -> Self {
        Self::new(Algorithm::Huffman)
    }

    /// Build a code table from the histogram.
    ///
    /// Seeds the stop token if the histogram lacks it, runs the selected
    /// builder, and verifies the result is prefix-free before handing it
    /// out. A conflict here means a builder bug; generated tables get
    /// committed, so the check runs at generation time, not in the codec.
    pub fn build(&self, mut histogram: Histogram) -> Result<CodeTable> {
        histogram.seed_stop_token();
        let ngrams = histogram.into_ngrams();
        tracing::info!(
            tokens = ngrams.len(),
            algorithm = self.algorithm.name(),
            "building code table"
        );
        let table = match self.algorithm {
            Algorithm::ShannonFano => shannon_fano::build_table(ngrams)?,
            Algorithm::Huffman => huffman::build_table(ngrams)?,
        };
        if let Some((a, b)) = table.find_prefix_conflict() {
            return Err(ShortzError::MalformedTable(format!(
                "generated table has a prefix conflict between `{}` and `{}`",
                escape_token(&a),
                escape_token(&b)
            )));
        }
        tracing::info!(
            entries = table.len(),
            max_token_len = table.max_token_len(),
            "code table ready"
        );
        Ok(table)
    }
}

/// Render a table as a Rust constant, for compiling a codebook into a
/// binary instead of loading the JSON artifact at startup.
///
/// Entries are `(token bytes, bit length, bits)`, sorted by code so the
/// output is stable across regenerations.
pub fn render_rust_source(table: &CodeTable, const_name: &str) -> String {
    let mut entries: Vec<(Vec<u8>, u32, String)> = table
        .iter()
        .map(|(token, code)| (token.to_vec(), code.bit_len(), code.to_string()))
        .collect();
    entries.sort_by(|a, b| (a.1, &a.2).cmp(&(b.1, &b.2)));

    let mut out = String::new();
    out.push_str("// Generated by shortz-corpus; do not edit.\n");
    out.push_str(&format!(
        "pub const {const_name}: &[(&[u8], u32, u32)] = &[\n"
    ));
    for (token, bit_len, bits) in entries {
        out.push_str(&format!(
            "    (b\"{}\", {bit_len}, 0b{bits}),\n",
            escape_token(&token)
        ));
    }
    out.push_str("];\n");
    out
}
