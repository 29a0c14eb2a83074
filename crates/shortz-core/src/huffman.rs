//! Huffman code assignment: bottom-up merge of the two lightest entries
//! until a single tree remains.
//!
//! The merge tree lives in an index-addressed arena rather than boxed
//! nodes; it only exists for the duration of the build.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::code::Code;
use crate::error::{Result, ShortzError};
use crate::ngram::Ngram;
use crate::table::CodeTable;

struct MergeNode {
    /// Index into the input ngram list for leaves, `None` for internal
    /// merge nodes.
    leaf: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Heap key: weight first, then insertion sequence.
///
/// The sequence number pins pop order when weights tie, which makes the
/// build deterministic for this implementation. That order is not promised
/// to match any other Huffman implementation; the JSON interchange table is
/// the compatibility boundary, not the tie-break.
type HeapEntry = Reverse<(OrderedFloat<f32>, u64, usize)>;

/// Build a prefix-free code table from weighted tokens.
///
/// No input ordering is required. Every token enters a min-priority queue
/// keyed by weight; the two lightest entries are repeatedly merged into an
/// internal node carrying their summed weight until one root remains, and
/// codes are read off the merge tree (0 left, 1 right).
pub fn build_table(ngrams: Vec<Ngram>) -> Result<CodeTable> {
    if ngrams.len() < 2 {
        return Err(ShortzError::TableTooSmall { count: ngrams.len() });
    }

    let mut arena: Vec<MergeNode> = Vec::with_capacity(2 * ngrams.len() - 1);
    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::with_capacity(ngrams.len());
    let mut seq: u64 = 0;

    for (i, ngram) in ngrams.iter().enumerate() {
        arena.push(MergeNode { leaf: Some(i), left: None, right: None });
        heap.push(Reverse((OrderedFloat(ngram.weight), seq, i)));
        seq += 1;
    }

    while heap.len() > 1 {
        let (Reverse((wa, _, a)), Reverse((wb, _, b))) = match (heap.pop(), heap.pop()) {
            (Some(a), Some(b)) => (a, b),
            _ => break, // loop guard holds two entries
        };
        let merged = arena.len();
        arena.push(MergeNode { leaf: None, left: Some(a), right: Some(b) });
        heap.push(Reverse((OrderedFloat(wa.0 + wb.0), seq, merged)));
        seq += 1;
    }

    // With >= 2 leaves the loop merges at least once and the final push is
    // the surviving root.
    let root = arena.len() - 1;
    let mut codes = vec![Code::empty(); ngrams.len()];
    emit(&arena, root, Code::empty(), &mut codes)?;

    tracing::debug!(tokens = ngrams.len(), "assigned huffman codes");

    let mut table = CodeTable::new();
    for (ngram, code) in ngrams.into_iter().zip(codes) {
        table.insert(ngram.token, code)?;
    }
    Ok(table)
}

fn emit(arena: &[MergeNode], idx: usize, prefix: Code, codes: &mut [Code]) -> Result<()> {
    let node = &arena[idx];
    if let Some(leaf) = node.leaf {
        codes[leaf] = prefix;
        return Ok(());
    }
    if prefix.bit_len() == Code::MAX_BITS {
        return Err(ShortzError::CodeOverflow { max: Code::MAX_BITS });
    }
    if let Some(left) = node.left {
        emit(arena, left, prefix.with_bit(false), codes)?;
    }
    if let Some(right) = node.right {
        emit(arena, right, prefix.with_bit(true), codes)?;
    }
    Ok(())
}
