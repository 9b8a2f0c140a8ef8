//! In-memory suffix array construction
//!
//! Sorts all corpus positions by the suffix starting there. Comparisons are
//! bounded to [`MAX_COMPARISON_LENGTH`] tokens, with suffix length and then
//! position breaking the remaining ties, so the order is total and the
//! build is deterministic. Large corpora sort in parallel.

use super::{Suffixes, MAX_COMPARISON_LENGTH};
use crate::corpus::{Corpus, Position};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Threshold above which the sort runs in parallel
const PARALLEL_SORT_THRESHOLD: usize = 100_000;

/// In-memory suffix array
#[derive(Debug, Clone)]
pub struct SuffixArray {
    positions: Vec<Position>,
}

impl SuffixArray {
    /// Build a suffix array for a corpus
    pub fn build<C: Corpus + Sync>(corpus: &C) -> Self {
        let n = corpus.len();
        let mut positions: Vec<Position> = (0..n as Position).collect();

        if n > PARALLEL_SORT_THRESHOLD {
            positions.par_sort_unstable_by(|&a, &b| {
                compare_suffixes(corpus, a as usize, b as usize)
            });
        } else {
            positions.sort_unstable_by(|&a, &b| {
                compare_suffixes(corpus, a as usize, b as usize)
            });
        }

        Self { positions }
    }

    /// Wrap an already-sorted position list
    ///
    /// Used by tests and by callers that load an array from elsewhere; run
    /// [`verify_permutation`](super::verify_permutation) on untrusted input.
    pub fn from_positions(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

impl Suffixes for SuffixArray {
    fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn position(&self, i: usize) -> usize {
        self.positions[i] as usize
    }
}

/// Compare two suffixes token by token, up to the comparison bound
#[inline]
fn compare_suffixes<C: Corpus>(corpus: &C, a: usize, b: usize) -> Ordering {
    let n = corpus.len();
    let limit = MAX_COMPARISON_LENGTH.min(n - a).min(n - b);

    for k in 0..limit {
        match corpus.token(a + k).cmp(&corpus.token(b + k)) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }

    // One suffix is a prefix of the other (or both hit the bound):
    // shorter sorts first, position keeps equal-prefix runs deterministic.
    (n - a).cmp(&(n - b)).then_with(|| a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusArray;

    fn corpus_of(tokens: &[u32]) -> CorpusArray {
        CorpusArray::new(tokens.to_vec(), vec![0]).unwrap()
    }

    #[test]
    fn test_build_banana_shape() {
        // b=1 a=0 n=2: "banana"
        let corpus = corpus_of(&[1, 0, 2, 0, 2, 0]);
        let sa = SuffixArray::build(&corpus);

        // a; ana; anana; banana; na; nana
        assert_eq!(sa.positions(), &[5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let tokens: Vec<u32> = (0..500).map(|i| (i * 7 + 3) % 5).collect();
        let corpus = CorpusArray::new(tokens, vec![0]).unwrap();
        let first = SuffixArray::build(&corpus);
        let second = SuffixArray::build(&corpus);
        assert_eq!(first.positions(), second.positions());
    }

    #[test]
    fn test_build_empty() {
        let (corpus, _) =
            CorpusArray::from_reader(std::io::Cursor::new("")).unwrap();
        let sa = SuffixArray::build(&corpus);
        assert!(sa.is_empty());
    }

    #[test]
    fn test_suffixes_are_sorted() {
        let corpus = corpus_of(&[2, 1, 2, 1, 2, 0, 1]);
        let sa = SuffixArray::build(&corpus);

        for i in 1..sa.len() {
            let a = sa.position(i - 1);
            let b = sa.position(i);
            assert_ne!(
                compare_suffixes(&corpus, a, b),
                Ordering::Greater,
                "suffixes {} and {} out of order",
                a,
                b
            );
        }
    }
}
