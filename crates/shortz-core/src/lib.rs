//! shortz — short-string compression via static prefix-free codebooks.
//!
//! Frequent substrings ("tokens") are replaced by prefix-free bit codes
//! drawn from a codebook built ahead of time from a token/weight histogram.
//! Two builders are provided (Shannon-Fano bisection and Huffman merge);
//! both feed the same runtime codec: a greedy longest-match encoder and a
//! binary-trie decoder terminated by a reserved stop token.
//!
//! Targets small inputs (words, log lines, short phrases) where
//! general-purpose compressors lose to their own framing overhead.

pub mod code;
pub mod codec;
pub mod error;
pub mod huffman;
pub mod ngram;
pub mod shannon_fano;
pub mod table;
pub mod tree;

pub use code::Code;
pub use codec::{Codec, Compressed};
pub use error::{Result, ShortzError};
pub use ngram::{Ngram, STOP_BYTE};
pub use table::CodeTable;
