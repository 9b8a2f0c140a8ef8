//! Suffix array construction and views
//!
//! A suffix array orders every corpus position by the suffix starting
//! there, which lets the phrase extractor enumerate substring equivalence
//! classes with one linear sweep over the adjacent-suffix LCP table.
//!
//! - `builder`: in-memory construction by bounded-comparison sort
//! - `writer`: persists a suffix array to disk
//! - `mmap`: memory-mapped view over the persisted form
//! - `lcp`: the adjacent-suffix longest-common-prefix table

pub mod builder;
pub mod lcp;
pub mod mmap;
pub mod writer;

pub use builder::SuffixArray;
pub use lcp::LcpTable;
pub use mmap::MemoryMappedSuffixArray;
pub use writer::SuffixArrayWriter;

use anyhow::{bail, Result};

/// Maximum number of tokens compared between two suffixes
///
/// Bounds worst-case work on pathologically repetitive corpora, for both
/// suffix sorting and LCP construction. Downstream code treats a clamped
/// LCP value as "at least this long", which is sound because phrase
/// extraction never looks past `max_phrase_length <= MAX_COMPARISON_LENGTH`
/// tokens.
pub const MAX_COMPARISON_LENGTH: usize = 256;

/// Magic number for suffix array files ("CLSA")
pub const SA_MAGIC: u32 = 0x434C_5341;

/// Size of the suffix array file header in bytes
pub const SA_HEADER_SIZE: usize = 12;

/// Ordered view of corpus positions sorted by suffix
pub trait Suffixes {
    /// Number of suffixes (equals the corpus length)
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Corpus position of the suffix at index `i` in sorted order
    fn position(&self, i: usize) -> usize;
}

/// Check that a suffix array is a permutation of `[0, corpus_len)`
///
/// Run on externally supplied arrays before the sweeps; a non-permutation
/// means the file is corrupt or belongs to a different corpus.
pub fn verify_permutation<S: Suffixes>(suffixes: &S, corpus_len: usize) -> Result<()> {
    if suffixes.len() != corpus_len {
        bail!(
            "Corrupt suffix array: {} entries for a corpus of {} tokens",
            suffixes.len(),
            corpus_len
        );
    }
    let mut seen = vec![false; corpus_len];
    for i in 0..suffixes.len() {
        let pos = suffixes.position(i);
        if pos >= corpus_len {
            bail!("Corrupt suffix array: position {} out of range at index {}", pos, i);
        }
        if seen[pos] {
            bail!("Corrupt suffix array: position {} appears twice", pos);
        }
        seen[pos] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_permutation() {
        let good = SuffixArray::from_positions(vec![2, 0, 1]);
        assert!(verify_permutation(&good, 3).is_ok());

        let wrong_len = SuffixArray::from_positions(vec![0, 1]);
        assert!(verify_permutation(&wrong_len, 3).is_err());

        let duplicate = SuffixArray::from_positions(vec![0, 0, 1]);
        assert!(verify_permutation(&duplicate, 3).is_err());

        let out_of_range = SuffixArray::from_positions(vec![0, 1, 7]);
        assert!(verify_permutation(&out_of_range, 3).is_err());
    }
}
