//! Corpus and vocabulary views
//!
//! A corpus is an immutable token-ID sequence with an attached sentence
//! index. Two implementations sit behind the [`Corpus`] trait: an in-memory
//! array built from plain text, and a memory-mapped view over the compiled
//! binary form. Consumers are generic over the trait, so the concrete
//! representation is chosen once at startup and the inner loops are
//! monomorphized.

pub mod array;
pub mod mmap;
pub mod types;
pub mod vocab;

pub use array::CorpusArray;
pub use mmap::MemoryMappedCorpus;
pub use types::{CorpusMeta, Position, TokenId, FORMAT_VERSION, UNKNOWN_TOKEN, UNKNOWN_WORD};
pub use vocab::Vocabulary;

use anyhow::{bail, Result};

/// Read-only view of a tokenized corpus with sentence boundaries
pub trait Corpus {
    /// Number of tokens
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Token at a position; out of range is a programming error and panics
    fn token(&self, pos: usize) -> TokenId;

    /// Number of sentences
    fn sentence_count(&self) -> usize;

    /// Start position of a sentence. `sentence == sentence_count()` yields
    /// `len()`, so the exclusive end of sentence `s` is `sentence_start(s + 1)`.
    fn sentence_start(&self, sentence: usize) -> usize;

    /// Sentence containing a position
    fn sentence_of(&self, pos: usize) -> usize;

    /// Token-ID sequence for the range `[start, end)`
    fn phrase_tokens(&self, start: usize, end: usize) -> Vec<TokenId> {
        (start..end).map(|pos| self.token(pos)).collect()
    }
}

/// Check that every token ID is inside the vocabulary range
///
/// Binary corpus and vocabulary files are produced separately, so a
/// mismatched pair is a real failure mode for the three-file input form.
pub fn verify_token_range<C: Corpus>(corpus: &C, vocab_size: usize) -> Result<()> {
    for pos in 0..corpus.len() {
        let token = corpus.token(pos);
        if token as usize >= vocab_size {
            bail!(
                "Corrupt corpus: token ID {} at position {} outside vocabulary of size {}",
                token,
                pos,
                vocab_size
            );
        }
    }
    Ok(())
}
