//! Shannon-Fano code assignment: recursive bisection of a weight-sorted
//! token list into near-equal halves.

use crate::code::Code;
use crate::error::{Result, ShortzError};
use crate::ngram::{self, Ngram};
use crate::table::CodeTable;

/// Build a prefix-free code table from weighted tokens.
///
/// Sorts by descending weight (lexicographic tie-break, so equal-weight
/// inputs are reproducible) and recursively splits the list where the two
/// halves' weight sums come closest, extending the accumulated code by 0 on
/// the left and 1 on the right. More frequent tokens end up nearer the top
/// of the recursion and get shorter codes.
pub fn build_table(mut ngrams: Vec<Ngram>) -> Result<CodeTable> {
    if ngrams.len() < 2 {
        return Err(ShortzError::TableTooSmall { count: ngrams.len() });
    }
    ngram::sort_by_weight_desc(&mut ngrams);

    let mut codes = vec![Code::empty(); ngrams.len()];
    split(&ngrams, &mut codes, 0, ngrams.len() - 1, Code::empty())?;

    tracing::debug!(tokens = ngrams.len(), "assigned shannon-fano codes");

    let mut table = CodeTable::new();
    for (ngram, code) in ngrams.into_iter().zip(codes) {
        table.insert(ngram.token, code)?;
    }
    Ok(table)
}

/// Assign codes to the inclusive range `[l, r]` under `prefix`.
///
/// The cursor loop is the balancing step: `pr` walks left absorbing weight
/// into the right sum while it lags the left sum, then `pl` walks right;
/// each pass strictly narrows the gap, so `pr == pl + 1` is always reached.
/// Ties favor the left partition (the `wr < wl` check is strict).
fn split(ngrams: &[Ngram], codes: &mut [Code], l: usize, r: usize, prefix: Code) -> Result<()> {
    if l == r {
        codes[l] = prefix;
        return Ok(());
    }
    if prefix.bit_len() == Code::MAX_BITS {
        // Pathologically skewed weights; refuse rather than overflow.
        return Err(ShortzError::CodeOverflow { max: Code::MAX_BITS });
    }
    let mut pl = l;
    let mut pr = r;
    let mut wl = ngrams[pl].weight;
    let mut wr = ngrams[pr].weight;
    loop {
        while wr < wl && pr != pl + 1 {
            pr -= 1;
            wr += ngrams[pr].weight;
        }
        if pr != pl + 1 {
            pl += 1;
            wl += ngrams[pl].weight;
        } else {
            break;
        }
    }
    split(ngrams, codes, l, pl, prefix.with_bit(false))?;
    split(ngrams, codes, pr, r, prefix.with_bit(true))
}
