//! The runtime codec: greedy longest-match encoder and trie-walking
//! decoder over one immutable codebook.

use std::collections::HashMap;

use crate::code::Code;
use crate::error::{Result, ShortzError};
use crate::ngram::STOP_BYTE;
use crate::table::CodeTable;
use crate::tree::DecodeTree;

/// Compression output with statistics.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// Packed bitstream, MSB-first within each byte, right-padded with
    /// zeros in the final byte.
    pub bytes: Vec<u8>,
    /// Meaningful bits written, excluding padding.
    pub bit_count: usize,
    pub original_len: usize,
}

impl Compressed {
    /// Compressed size over original size.
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 1.0;
        }
        self.bytes.len() as f64 / self.original_len as f64
    }
}

/// Short-string compressor over a static prefix-free codebook.
///
/// Holds a compress-direction lookup map and a decode trie, both derived
/// from the same table at construction and immutable afterwards — `compress`
/// and `decompress` borrow shared state only, so a built `Codec` can be
/// used concurrently. Swapping codebooks means building a new `Codec`.
#[derive(Debug)]
pub struct Codec {
    compress_map: HashMap<Vec<u8>, Code>,
    decode_tree: DecodeTree,
    max_token_len: usize,
}

impl Codec {
    /// Build a codec from a finished code table.
    ///
    /// Errors if the table has fewer than 2 entries or carries no code for
    /// the stop token.
    pub fn new(table: &CodeTable) -> Result<Self> {
        if table.len() < 2 {
            return Err(ShortzError::TableTooSmall { count: table.len() });
        }
        if !table.contains(&[STOP_BYTE]) {
            return Err(ShortzError::MissingStopToken);
        }
        let mut decode_tree = DecodeTree::new();
        let mut compress_map = HashMap::with_capacity(table.len());
        let mut max_token_len = 0;
        for (token, code) in table.iter() {
            decode_tree.insert(code, token);
            max_token_len = max_token_len.max(token.len());
            compress_map.insert(token.to_vec(), code);
        }
        tracing::debug!(tokens = compress_map.len(), max_token_len, "codec built");
        Ok(Self { compress_map, decode_tree, max_token_len })
    }

    /// Compress `input`, greedy longest-match-first.
    ///
    /// A match window of up to `max_token_len` bytes is looked up in the
    /// table and shrunk from the right until it hits; the matched token's
    /// code bits are packed MSB-first and the window restarts past the
    /// match. The parse never backtracks past a successful match — it is
    /// deliberately non-optimal, and stays that way for bit compatibility
    /// with previously encoded data. The stop token is appended before
    /// encoding so the stream is self-terminating.
    ///
    /// Errors: [`ShortzError::ReservedByte`] if the input contains the stop
    /// byte, [`ShortzError::Unencodable`] if some byte has no single-byte
    /// fallback entry.
    pub fn compress(&self, input: &[u8]) -> Result<Compressed> {
        if input.contains(&STOP_BYTE) {
            return Err(ShortzError::ReservedByte { byte: STOP_BYTE });
        }
        let mut buf = Vec::with_capacity(input.len() + 1);
        buf.extend_from_slice(input);
        buf.push(STOP_BYTE);

        let mut bytes = Vec::new();
        let mut byte = 0u8;
        let mut bit_idx = 0u32;
        let mut bit_count = 0usize;

        let end = buf.len();
        let mut it = 0;
        while it < end {
            let mut chunk_end = (it + self.max_token_len).min(end);
            loop {
                if chunk_end == it {
                    // Shrunk to nothing: the leading byte has no entry.
                    return Err(ShortzError::Unencodable { byte: buf[it] });
                }
                if let Some(code) = self.compress_map.get(&buf[it..chunk_end]) {
                    for bit in code.iter_bits() {
                        byte = (byte << 1) | u8::from(bit);
                        bit_idx += 1;
                        bit_count += 1;
                        if bit_idx == 8 {
                            bytes.push(byte);
                            byte = 0;
                            bit_idx = 0;
                        }
                    }
                    it = chunk_end;
                    break;
                }
                chunk_end -= 1;
            }
        }
        if bit_idx > 0 {
            // Left-align the partial byte, zero-padded on the right.
            bytes.push(byte << (8 - bit_idx));
        }
        Ok(Compressed { bytes, bit_count, original_len: input.len() })
    }

    /// Decompress a stream produced by [`Codec::compress`].
    ///
    /// Walks the trie bit by bit, emitting a token per leaf, until the stop
    /// token's leaf terminates decoding; padding and anything after the
    /// stop code are ignored. Truncated or malformed streams are reported
    /// as errors, never as partial output.
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.decode_tree.decode(data, &[STOP_BYTE])
    }

    /// Longest token key in the codebook.
    pub fn max_token_len(&self) -> usize {
        self.max_token_len
    }

    /// Trie membership test, for diagnostics and tests.
    pub fn knows_token(&self, token: &[u8]) -> bool {
        self.decode_tree.contains(token)
    }
}
