//! Frequency ranks of the extracted phrases
//!
//! Compacts phrase identity to a 16-bit integer: the most frequent phrase
//! gets rank 0, following the iteration order of [`FrequentPhrases`]. The
//! collocation pass looks phrases up here once per candidate, so lookups
//! take a borrowed token slice.

use super::extract::FrequentPhrases;
use super::types::Phrase;
use crate::corpus::TokenId;
use ahash::AHashMap;

/// Position of a phrase in frequency-descending order
pub type Rank = u16;

/// Map from phrase to frequency rank
#[derive(Debug, Clone)]
pub struct RankMap {
    map: AHashMap<Phrase, Rank>,
}

impl RankMap {
    /// Assign ranks 0, 1, 2, ... in the iteration order of the phrase table
    pub fn new(phrases: &FrequentPhrases) -> Self {
        let mut map = AHashMap::with_capacity(phrases.len());
        for (rank, (phrase, _)) in phrases.iter().enumerate() {
            map.insert(phrase.clone(), rank as Rank);
        }
        Self { map }
    }

    /// Rank of a token sequence, if it is a frequent phrase
    #[inline]
    pub fn rank(&self, tokens: &[TokenId]) -> Option<Rank> {
        self.map.get(tokens).copied()
    }

    pub fn contains(&self, tokens: &[TokenId]) -> bool {
        self.map.contains_key(tokens)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
