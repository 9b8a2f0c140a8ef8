//! Collocation enumeration
//!
//! A collocation is an ordered pair of frequent-phrase occurrences that
//! start in the same sentence within `window_size` tokens of each other.
//! The enumerator is a single pass over the corpus with a FIFO window and
//! is exposed as a lazy iterator: dropping it stops production.

pub mod enumerate;

pub use enumerate::Collocations;

use crate::phrase::Rank;
use serde::{Deserialize, Serialize};

/// One co-occurrence of two frequent phrases
///
/// `position1 <= position2`, both in the same sentence, at most
/// `window_size` tokens apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collocation {
    pub rank1: Rank,
    pub rank2: Rank,
    pub position1: u32,
    pub position2: u32,
}

/// Enumeration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollocationOptions {
    /// Maximum phrase length in tokens; should match the extraction bound
    pub max_phrase_length: usize,
    /// Maximum distance between the start positions of a pair
    pub window_size: usize,
    /// Minimum nonterminal gap span, carried on the stream as a
    /// configuration tag for the downstream consumer; the enumerator does
    /// not filter on it
    pub min_nonterminal_span: usize,
}

impl Default for CollocationOptions {
    fn default() -> Self {
        Self {
            max_phrase_length: 10,
            window_size: 10,
            min_nonterminal_span: 2,
        }
    }
}
