//! Frequent-phrase discovery
//!
//! - `types`: phrase identity over token-ID sequences
//! - `extract`: the LCP-interval sweep and bounded top-N selection
//! - `rank`: compact 16-bit frequency ranks for the collocation pass

pub mod extract;
pub mod rank;
pub mod types;

pub use extract::{ExtractOptions, FrequentPhrases, MAX_PHRASES_LIMIT};
pub use rank::{Rank, RankMap};
pub use types::Phrase;
