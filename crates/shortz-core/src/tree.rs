//! The decode trie: a binary tree whose root-to-leaf paths reproduce each
//! token's code bits (0 = left, 1 = right).
//!
//! Each node exclusively owns its children; the trie is built once at codec
//! construction, never mutated afterwards, and dropped with its codec.

use crate::code::Code;
use crate::error::{Result, ShortzError};

#[derive(Debug, Default)]
struct Node {
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
    token: Option<Vec<u8>>,
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Binary decode trie built from a finished code table.
#[derive(Debug, Default)]
pub struct DecodeTree {
    root: Node,
}

impl DecodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one `(code, token)` pair, creating interior nodes on demand
    /// along the code's MSB-first bit path.
    pub fn insert(&mut self, code: Code, token: &[u8]) {
        let mut node = &mut self.root;
        for bit in code.iter_bits() {
            let child = if bit { &mut node.right } else { &mut node.left };
            node = child.get_or_insert_with(Box::default).as_mut();
        }
        node.token = Some(token.to_vec());
    }

    /// Whether some leaf carries `token`. Diagnostics and tests only.
    pub fn contains(&self, token: &[u8]) -> bool {
        fn walk(node: &Node, token: &[u8]) -> bool {
            if node.is_leaf() {
                return node.token.as_deref() == Some(token);
            }
            node.left.as_deref().is_some_and(|n| walk(n, token))
                || node.right.as_deref().is_some_and(|n| walk(n, token))
        }
        walk(&self.root, token)
    }

    /// Decode a packed bitstream, consuming bits MSB-first per byte until a
    /// leaf holding `stop` is reached. Bits past the stop token (padding or
    /// trailing garbage) are never consumed.
    ///
    /// Errors: [`ShortzError::InvalidBitPath`] if a bit has no edge to
    /// follow (impossible for tries built from a full prefix-free table,
    /// checked anyway), [`ShortzError::TruncatedStream`] if the bits run out
    /// before the stop leaf.
    pub fn decode(&self, data: &[u8], stop: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut node = &self.root;
        for &byte in data {
            for shift in (0..8).rev() {
                let bit = (byte >> shift) & 1 == 1;
                let next = if bit { node.right.as_deref() } else { node.left.as_deref() };
                node = next.ok_or(ShortzError::InvalidBitPath)?;
                if node.is_leaf() {
                    let token = node.token.as_deref().ok_or(ShortzError::InvalidBitPath)?;
                    if token == stop {
                        return Ok(out);
                    }
                    out.extend_from_slice(token);
                    node = &self.root;
                }
            }
        }
        Err(ShortzError::TruncatedStream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> DecodeTree {
        // a = 0, b = 10, stop = 11
        let mut tree = DecodeTree::new();
        tree.insert(Code::new(1, 0b0), b"a");
        tree.insert(Code::new(2, 0b10), b"b");
        tree.insert(Code::new(2, 0b11), &[0xFF]);
        tree
    }

    #[test]
    fn test_contains() {
        let tree = small_tree();
        assert!(tree.contains(b"a"));
        assert!(tree.contains(b"b"));
        assert!(tree.contains(&[0xFF]));
        assert!(!tree.contains(b"z"));
    }

    #[test]
    fn test_decode_single_byte() {
        let tree = small_tree();
        // 0 10 11 -> "ab", left-aligned: 0101_1000
        let out = tree.decode(&[0b0101_1000], &[0xFF]).unwrap();
        assert_eq!(out, b"ab");
    }

    #[test]
    fn test_decode_ignores_trailing_garbage() {
        let tree = small_tree();
        let out = tree.decode(&[0b0101_1111, 0xAB, 0xCD], &[0xFF]).unwrap();
        assert_eq!(out, b"ab");
    }

    #[test]
    fn test_decode_truncated() {
        let tree = small_tree();
        // decodes tokens but never reaches the stop leaf
        let err = tree.decode(&[0b0101_0000], &[0xFF]).unwrap_err();
        assert!(matches!(err, ShortzError::TruncatedStream));
    }

    #[test]
    fn test_decode_empty_stream() {
        let tree = small_tree();
        let err = tree.decode(&[], &[0xFF]).unwrap_err();
        assert!(matches!(err, ShortzError::TruncatedStream));
    }

    #[test]
    fn test_decode_missing_edge() {
        // Sparse trie: only the path 00 exists; a leading 1 bit has no edge.
        let mut tree = DecodeTree::new();
        tree.insert(Code::new(2, 0b00), b"x");
        let err = tree.decode(&[0b1000_0000], b"x").unwrap_err();
        assert!(matches!(err, ShortzError::InvalidBitPath));
    }
}
